//! Loopsmith CLI - interval audio track composer
//!
//! Command-line interface for rendering recipe files into audio tracks.

use clap::Parser;
use env_logger::Env;
use log::info;

use loopsmith::cli::{commands, Cli, Commands};
use loopsmith::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Loopsmith v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Render { config }) => commands::render(&config),
        Some(Commands::Check { config }) => commands::check(&config),
        None => {
            println!("Loopsmith v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}
