use refract::{Fibre, LightRay, RefractiveIndices, Simulation, Vector};
use refract_eframe::eframe;

// A steep launch: Snell's law still has a real solution at the boundary, so
// the beam refracts into the cladding (turning red) and flies off.
fn main() -> eframe::Result {
    let fibre = Fibre::default();
    let indices = RefractiveIndices::try_new(1.5, 1.0).unwrap();

    let mut sim = Simulation::new(
        fibre,
        indices,
        refract_eframe::viewport(),
        refract_eframe::BEAM_LENGTH,
    );

    sim.spawn(LightRay::launched(Vector::new(100.0, fibre.midline()), 60.0, 1.2).unwrap());

    refract_eframe::run_simulation(sim, None)
}
