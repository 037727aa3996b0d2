use refract::{Float, Simulation, Viewport};

pub use eframe;

mod app;

use app::App;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// Length of the rendered beam segment. The simulation's boundary probe
/// defaults to the same value but is configured independently.
pub const BEAM_LENGTH: Float = 50.0;

/// The region rays may occupy before being culled: the window itself.
#[inline]
pub fn viewport() -> Viewport {
    Viewport {
        width: WINDOW_WIDTH as Float,
        height: WINDOW_HEIGHT as Float,
    }
}

/// Open the scene window and drive `sim` until it is closed.
///
/// `font` optionally holds the bytes of a TTF/OTF file to render the angle
/// readout with; without it the toolkit's built-in fonts are used.
pub fn run_simulation(sim: Simulation, font: Option<Vec<u8>>) -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(egui::vec2(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Optical Fibre - TIR & Refraction",
        native_options,
        Box::new(move |cc| {
            if let Some(bytes) = font {
                install_readout_font(&cc.egui_ctx, bytes);
            }

            Ok(Box::new(App::new(sim)))
        }),
    )
}

/// Put the supplied face in front of the proportional family, so the readout
/// (and everything else) renders with it.
fn install_readout_font(ctx: &egui::Context, bytes: Vec<u8>) {
    let mut fonts = egui::FontDefinitions::default();

    fonts
        .font_data
        .insert("readout".to_owned(), egui::FontData::from_owned(bytes));

    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, "readout".to_owned());

    ctx.set_fonts(fonts);
}
