pub mod cli;
pub mod core;

use crate::cli::convert::ConstantOverrides;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::io;
use tracing::{debug, info};

pub enum AppCommand {
    Convert {
        amount: String,
        overrides: ConstantOverrides,
        plain: bool,
    },
    Session,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Price converter starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Convert {
            amount,
            overrides,
            plain,
        } => cli::convert::run(&mut io::stdout(), &config, &amount, &overrides, plain),
        AppCommand::Session => {
            let stdin = io::stdin();
            cli::session::Session::new(config).run(stdin.lock(), &mut io::stdout())
        }
    }
}
