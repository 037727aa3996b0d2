use std::time::{Duration, Instant};

use egui::{pos2, Align2, Color32, FontId, Frame, Pos2, Stroke};

use refract::{AngleReadout, Refraction, Simulation, Vector};

use super::{BEAM_LENGTH, WINDOW_WIDTH};

/// Interval of the fixed simulation timestep. Frames that arrive early draw
/// the same state again; a late frame runs a single step, never several.
const STEP_INTERVAL: Duration = Duration::from_millis(20);

const BACKGROUND: Color32 = Color32::BLACK;
const BOUNDARY_COLOUR: Color32 = Color32::from_rgb(150, 150, 150);
const CORE_RAY_COLOUR: Color32 = Color32::from_rgb(0, 255, 255);
const EXITED_RAY_COLOUR: Color32 = Color32::from_rgb(255, 0, 0);
const READOUT_COLOUR: Color32 = Color32::WHITE;

const LINE_WIDTH: f32 = 2.0;

pub struct App {
    sim: Simulation,
    last_step: Instant,
}

impl App {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            last_step: Instant::now(),
        }
    }

    fn draw(&self, painter: &egui::Painter) {
        let fibre = self.sim.fibre();

        for y in [fibre.top(), fibre.bottom()] {
            painter.line_segment(
                [pos2(0.0, y as f32), pos2(WINDOW_WIDTH, y as f32)],
                Stroke::new(LINE_WIDTH, BOUNDARY_COLOUR),
            );
        }

        for ray in self.sim.rays() {
            let (sin, cos) = ray.orientation().sin_cos();
            let tail = ray.position();
            let tip = tail + Vector::new(cos, sin) * BEAM_LENGTH;

            let colour = if ray.has_exited() {
                EXITED_RAY_COLOUR
            } else {
                CORE_RAY_COLOUR
            };

            painter.line_segment([to_pos(&tail), to_pos(&tip)], Stroke::new(LINE_WIDTH, colour));
        }

        if let Some(readout) = self.sim.readout() {
            painter.text(
                pos2(10.0, 10.0),
                Align2::LEFT_TOP,
                format_readout(readout),
                FontId::proportional(16.0),
                READOUT_COLOUR,
            );
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.last_step.elapsed() >= STEP_INTERVAL {
            self.sim.tick();
            self.last_step = Instant::now();
        }

        egui::CentralPanel::default()
            .frame(Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| self.draw(ui.painter()));

        ctx.request_repaint();
    }
}

#[inline]
fn to_pos(v: &Vector) -> Pos2 {
    pos2(v.x as f32, v.y as f32)
}

fn format_readout(readout: &AngleReadout) -> String {
    match readout.refraction {
        Refraction::Transmitted(angle) => format!(
            "Incidence angle: {:.2}°\nRefraction angle: {angle:.2}°",
            readout.incidence,
        ),
        Refraction::TotalInternal => {
            format!("Incidence angle: {:.2}°\nRefraction: TIR", readout.incidence)
        }
    }
}
