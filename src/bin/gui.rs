use std::error::Error;

use env_logger::Env;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let presenter_factory = fractal_zoo::PixelsPresenterFactory::new();
    let command = fractal_zoo::RunGuiCommand::new(presenter_factory);

    command.execute()
}
