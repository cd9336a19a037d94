//! Recipe document parsing and validation
//!
//! A recipe is a TOML document with three sections:
//!
//! ```toml
//! [settings]
//! crossfade = 100          # milliseconds, applied at every seam
//! output_dir = "out"
//!
//! [source]
//! music = ["takes/a.wav", "takes/b.wav"]
//! rest  = ["takes/rest.wav"]
//!
//! [[output.workout]]
//! source = "music"
//! duration = 40            # whole seconds
//!
//! [[output.workout]]
//! source = "rest"
//! duration = 20
//! ```
//!
//! Structural errors (missing sections, wrong types) surface as parse
//! errors. Everything serde cannot enforce (non-empty lists, positive
//! durations, segment sources that are actually defined) is checked by
//! [`RecipeDoc::validate`], a pure function returning the full list of
//! human-readable issues rather than stopping at the first. Callers
//! decide how to react; nothing here exits the process.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::{LoopsmithError, Result};

/// Global recipe settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    /// Crossfade length at each segment seam, in milliseconds
    pub crossfade: u64,
    /// Directory that receives one WAV per output entry
    pub output_dir: PathBuf,
}

/// One segment request within an output entry
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SegmentSpec {
    /// Name of the source to pull from, defined in `[source]`
    pub source: String,
    /// Requested length in whole seconds
    pub duration: u64,
}

/// Parsed recipe document
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecipeDoc {
    pub settings: Settings,
    /// Source name -> ordered list of audio files to concatenate
    pub source: BTreeMap<String, Vec<PathBuf>>,
    /// Output name -> ordered list of segment requests
    pub output: BTreeMap<String, Vec<SegmentSpec>>,
}

impl RecipeDoc {
    /// Parse a recipe from TOML text.
    pub fn parse_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load and parse a recipe file.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading recipe file from '{}'", path.display());
        let text = std::fs::read_to_string(path).map_err(|e| LoopsmithError::RecipeParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse_str(&text).map_err(|e| LoopsmithError::RecipeParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Check everything the type system could not.
    ///
    /// Returns every issue found, not just the first, so one run of
    /// `loopsmith check` reports the whole document.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.source.is_empty() {
            issues.push("'source' section has no content.".to_string());
        }
        for (name, paths) in &self.source {
            if paths.is_empty() {
                issues.push(format!("Source '{}' has no files.", name));
            }
        }

        if self.output.is_empty() {
            issues.push("'output' section has no content.".to_string());
        }
        for (name, segments) in &self.output {
            if segments.is_empty() {
                issues.push(format!("Output '{}' has no segments.", name));
            }
            for (i, segment) in segments.iter().enumerate() {
                if segment.duration == 0 {
                    issues.push(format!(
                        "Output '{}', segment #{}: duration must be positive.",
                        name, i
                    ));
                }
                if !self.source.contains_key(&segment.source) {
                    issues.push(format!(
                        "Output '{}', segment #{} has undefined source: '{}'.",
                        name, i, segment.source
                    ));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Validate, converting the issue list into an error.
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|issues| LoopsmithError::InvalidRecipe { issues })?;
        Ok(self)
    }
}
