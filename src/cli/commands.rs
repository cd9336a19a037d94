//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use crate::error::{LoopsmithError, Result};
use crate::pipeline;
use crate::recipe::RecipeDoc;

/// Render every output defined in the recipe.
pub fn render(config: &Path) -> Result<()> {
    info!("Rendering recipe: {}", config.display());

    pipeline::run(config)?;

    println!("All outputs rendered.");
    Ok(())
}

/// Validate a recipe file and report every issue found.
pub fn check(config: &Path) -> Result<()> {
    info!("Checking recipe: {}", config.display());

    let doc = RecipeDoc::load(config)?;
    match doc.validate() {
        Ok(()) => {
            println!("Recipe OK: {}", config.display());
            println!(
                "{} source(s), {} output(s), crossfade {}ms",
                doc.source.len(),
                doc.output.len(),
                doc.settings.crossfade
            );
            Ok(())
        }
        Err(issues) => {
            println!("Recipe is invalid:");
            for issue in &issues {
                println!("  - {}", issue);
            }
            Err(LoopsmithError::InvalidRecipe { issues })
        }
    }
}
