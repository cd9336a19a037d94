//! CLI Module
//!
//! Command-line interface for the Loopsmith track composer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Loopsmith - composes interval audio tracks from looping sources
#[derive(Parser, Debug)]
#[command(name = "loopsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every output defined in a recipe file
    #[command(name = "render")]
    Render {
        /// Path to the recipe file
        #[arg(short, long, default_value = "recipe.toml")]
        config: PathBuf,
    },

    /// Parse and validate a recipe file without rendering
    #[command(name = "check")]
    Check {
        /// Path to the recipe file
        #[arg(short, long, default_value = "recipe.toml")]
        config: PathBuf,
    },
}
