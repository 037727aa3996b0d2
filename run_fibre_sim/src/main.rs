use std::{
    env,
    error::Error,
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};

use refract::{Fibre, Float, LightRay, RefractiveIndices, Simulation, Vector};
use refract_json::{serde_json, JsonDes, JsonSer, Scene};

/// Horizontal launch position of the ray.
const LAUNCH_X: Float = 100.0;

/// Distance travelled per simulation step.
const LAUNCH_SPEED: Float = 1.2;

fn prompt(label: &str) -> Result<Float, Box<dyn Error>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    line.trim()
        .parse()
        .map_err(|_| format!("expected a number, got {:?}", line.trim()).into())
}

fn prompt_scene() -> Result<Scene, Box<dyn Error>> {
    let angle = prompt("Enter incident angle in degrees (e.g., 60): ")?;
    let n1 = prompt("Enter core refractive index (n1): ")?;
    let n2 = prompt("Enter cladding refractive index (n2): ")?;

    let indices =
        RefractiveIndices::try_new(n1, n2).ok_or("refractive indices must be positive")?;

    Scene::try_new(angle, indices, Fibre::default())
        .ok_or_else(|| format!("incident angle must lie within [0, 90], got {angle}").into())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = env::args().skip(1);

    let scene = match args.next() {
        Some(path) => Scene::from_json(&serde_json::from_reader(File::open(path)?)?)?,
        None => prompt_scene()?,
    };

    log::info!("scene: {}", scene.to_json());

    let font_path = args.next().map(PathBuf::from).or_else(|| scene.font.clone());

    let font = font_path
        .map(|path| {
            fs::read(&path)
                .map_err(|e| format!("failed to read font {}: {e}", path.display()))
        })
        .transpose()?;

    let mut sim = Simulation::new(
        scene.fibre,
        scene.indices,
        refract_eframe::viewport(),
        refract_eframe::BEAM_LENGTH,
    );

    let launch = Vector::new(LAUNCH_X, scene.fibre.midline());
    sim.spawn(
        LightRay::launched(launch, scene.angle(), LAUNCH_SPEED)
            .ok_or("launch speed must be non-zero")?,
    );

    refract_eframe::run_simulation(sim, font)?;

    Ok(())
}
