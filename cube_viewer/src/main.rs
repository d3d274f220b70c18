//! Cube viewer
//!
//! Opens a window showing a lit grey cube. Drag with the left mouse button
//! to rotate it, press Space to reset the rotation and Escape to quit.
//!
//! Usage: `cube_viewer [config.toml|config.ron]` (defaults to `viewer.toml`;
//! built-in defaults are used when the file does not exist).

mod viewer;

use std::process::ExitCode;

use viewer_engine::foundation::logging;
use viewer_engine::prelude::*;

use crate::viewer::CubeViewer;

const DEFAULT_CONFIG_PATH: &str = "viewer.toml";

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match ViewerConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            log::error!("Failed to load {}: {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_level);

    log::info!("Starting cube viewer");

    if let Err(e) = config.validate() {
        log::error!("Invalid configuration in {}: {}", config_path, e);
        return ExitCode::FAILURE;
    }

    let mut app = CubeViewer::new(&config);
    match Engine::run(config, &mut app) {
        Ok(()) => {
            log::info!("Cube viewer finished successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
