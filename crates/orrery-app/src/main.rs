//! The `orrery` binary: load config, render the animation, write it out.

use clap::Parser;
use orrery_app::{AppDirs, render_to_disk};
use orrery_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => AppDirs::with_config_dir(dir),
        None => match AppDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
        std::process::exit(1);
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config: {}", dirs.config_dir.display());

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    match render_to_disk(&config) {
        Ok(written) => {
            for path in written.iter().take(1) {
                println!("{}", path.display());
            }
            if written.len() > 1 {
                println!("... and {} more", written.len() - 1);
            }
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    }
}
