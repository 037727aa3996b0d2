use refract::{Fibre, LightRay, RefractiveIndices, Simulation, Vector};
use refract_eframe::eframe;

// A shallow launch down a dense core: every boundary interaction ends in
// total internal reflection, so the beam zig-zags along the fibre until it
// leaves through the right edge.
fn main() -> eframe::Result {
    let fibre = Fibre::default();
    let indices = RefractiveIndices::try_new(1.5, 1.0).unwrap();

    let mut sim = Simulation::new(
        fibre,
        indices,
        refract_eframe::viewport(),
        refract_eframe::BEAM_LENGTH,
    );

    sim.spawn(LightRay::launched(Vector::new(100.0, fibre.midline()), 30.0, 1.2).unwrap());

    refract_eframe::run_simulation(sim, None)
}
