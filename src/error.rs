//! Error handling for Loopsmith
//!
//! Every error carries enough context (output name, segment index,
//! source name, offending path) to be actionable without re-running
//! with extra diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Loopsmith operations
pub type Result<T> = std::result::Result<T, LoopsmithError>;

/// Main error type for Loopsmith operations
#[derive(Error, Debug)]
pub enum LoopsmithError {
    // Recipe errors
    #[error("Recipe file is invalid ({} issues)", .issues.len())]
    InvalidRecipe { issues: Vec<String> },

    #[error("Failed to parse recipe at '{path}': {reason}")]
    RecipeParse { path: PathBuf, reason: String },

    // Composition errors
    //
    // Note: thiserror treats a field literally named `source` as the
    // error cause, so these carry the source's name as `source_name`.
    #[error("Segment references undefined source '{source_name}'")]
    UnknownSource { source_name: String },

    #[error(
        "Segment #{index} requests {requested_secs}s from source '{source_name}' \
         which is only {source_secs:.3}s long"
    )]
    DurationExceedsSource {
        index: usize,
        source_name: String,
        requested_secs: u64,
        source_secs: f64,
    },

    #[error("Slice [{start_secs:.3}s, {end_secs:.3}s) is outside buffer of {duration_secs:.3}s")]
    SliceOutOfRange {
        start_secs: f64,
        end_secs: f64,
        duration_secs: f64,
    },

    #[error("Crossfade of {crossfade_secs:.3}s exceeds operand duration of {duration_secs:.3}s")]
    CrossfadeTooLong {
        crossfade_secs: f64,
        duration_secs: f64,
    },

    #[error("Cannot splice buffers: expected {expected}, found {found}")]
    FormatMismatch { expected: String, found: String },

    // Collaborator errors
    #[error("Failed to load source audio at '{path}': {reason}")]
    LoadError { path: PathBuf, reason: String },

    #[error("Failed to write output audio at '{path}': {reason}")]
    EncodeError { path: PathBuf, reason: String },

    #[error("Failed to generate output '{output}': {source}")]
    OutputFailed {
        output: String,
        #[source]
        source: Box<LoopsmithError>,
    },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoopsmithError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LoopsmithError::InvalidRecipe { .. } => "INVALID_RECIPE",
            LoopsmithError::RecipeParse { .. } => "RECIPE_PARSE",
            LoopsmithError::UnknownSource { .. } => "UNKNOWN_SOURCE",
            LoopsmithError::DurationExceedsSource { .. } => "DURATION_EXCEEDS_SOURCE",
            LoopsmithError::SliceOutOfRange { .. } => "SLICE_OUT_OF_RANGE",
            LoopsmithError::CrossfadeTooLong { .. } => "CROSSFADE_TOO_LONG",
            LoopsmithError::FormatMismatch { .. } => "FORMAT_MISMATCH",
            LoopsmithError::LoadError { .. } => "LOAD_ERROR",
            LoopsmithError::EncodeError { .. } => "ENCODE_ERROR",
            LoopsmithError::OutputFailed { .. } => "OUTPUT_FAILED",
            LoopsmithError::Io(_) => "IO_ERROR",
        }
    }

    /// Attach the name of the output being generated.
    ///
    /// Used by the pipeline so a composition failure names the recipe
    /// entry it came from, not just the segment.
    pub fn for_output(self, output: &str) -> Self {
        LoopsmithError::OutputFailed {
            output: output.to_string(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = LoopsmithError::UnknownSource {
            source_name: "bells".to_string(),
        };
        assert_eq!(err.error_code(), "UNKNOWN_SOURCE");
    }

    #[test]
    fn test_segment_errors_have_no_cause_chain() {
        // The source name rides along as plain data; neither segment
        // error wraps an underlying cause.
        use std::error::Error;
        let unknown = LoopsmithError::UnknownSource {
            source_name: "bells".to_string(),
        };
        assert!(unknown.source().is_none());
        assert!(unknown.to_string().contains("bells"));

        let exceeds = LoopsmithError::DurationExceedsSource {
            index: 0,
            source_name: "music".to_string(),
            requested_secs: 10,
            source_secs: 5.0,
        };
        assert!(exceeds.source().is_none());
        assert!(exceeds.to_string().contains("music"));
    }

    #[test]
    fn test_for_output_wraps_source() {
        let err = LoopsmithError::DurationExceedsSource {
            index: 2,
            source_name: "music".to_string(),
            requested_secs: 90,
            source_secs: 60.0,
        };
        let wrapped = err.for_output("warmup");
        assert_eq!(wrapped.error_code(), "OUTPUT_FAILED");
        assert!(wrapped.to_string().contains("warmup"));
    }

    #[test]
    fn test_invalid_recipe_message_counts_issues() {
        let err = LoopsmithError::InvalidRecipe {
            issues: vec!["a".into(), "b".into()],
        };
        assert!(err.to_string().contains("2 issues"));
    }

    #[test]
    fn test_load_error_names_path() {
        let err = LoopsmithError::LoadError {
            path: PathBuf::from("takes/missing.wav"),
            reason: "file not found".to_string(),
        };
        assert!(err.to_string().contains("takes/missing.wav"));
    }
}
