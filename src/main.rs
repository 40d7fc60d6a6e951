//! `holoface [config.json]`: render the holographic face animation.

use std::path::PathBuf;
use std::process::ExitCode;

use holoface::prelude::*;

fn run() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => HologramConfig::from_file(&PathBuf::from(path))?,
        None => {
            log::info!("No config given; using defaults");
            HologramConfig::default()
        }
    };
    let output = config.output_path.clone();

    let mut renderer = SoftwareRenderer::new(config.width, config.height)?;
    let mut driver = AnimationDriver::new(config)?;
    let report = driver.execute(
        &FileMeshLoader::new(),
        &mut renderer,
        &mut GifExporter::new(),
        &CancelToken::new(),
    )?;
    if report.used_fallback_mesh {
        log::warn!("Rendered the default primitive instead of the configured mesh");
    }

    if !output.exists() {
        return Err(format!("export reported success but {} is missing", output.display()).into());
    }
    Ok(output)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("{} {}", holoface::NAME, holoface::VERSION);

    match run() {
        Ok(path) => {
            println!("Animation saved to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
