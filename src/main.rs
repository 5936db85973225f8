use std::error::Error;

use env_logger::Env;
use fractal_zoo::{
    builtin_catalog, Dimensions, EngineConfig, FractalFactory, FractalRegistry, PpmFilePresenter,
    SnapshotController,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Usage: `fractal_zoo [fractal name] [output path]`
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let mut args = std::env::args().skip(1);
    let fractal = args.next().unwrap_or_else(|| "Mandelbrot".to_owned());
    let filepath = args
        .next()
        .unwrap_or_else(|| format!("output/{}.ppm", file_stem(&fractal)));

    let config = EngineConfig::default();
    let registry =
        FractalRegistry::from_records(builtin_catalog(), &FractalFactory::with_builtins(), &config);
    let mut controller = SnapshotController::new(PpmFilePresenter::new(), registry, config)?;

    controller.generate(&fractal, Dimensions::new(WIDTH, HEIGHT)?)?;
    controller.write(&filepath)?;
    println!("Saved to {}", filepath);

    Ok(())
}

fn file_stem(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            ' ' | '-' | '_' => Some('_'),
            _ => None,
        })
        .collect()
}
