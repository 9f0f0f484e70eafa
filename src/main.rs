//! `generate-app-assets`: regenerates every SPYLL app asset under the current
//! directory.

use std::env;
use std::process::ExitCode;

use log::{error, info, LevelFilter};

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let root = match env::current_dir() {
        Ok(root) => root,
        Err(err) => {
            error!("Could not determine the project root: {err}");
            return ExitCode::from(1);
        }
    };

    info!("Generating SPYLL app assets...");
    match spyll_assets::generate(&root) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::from(1)
        }
    }
}
