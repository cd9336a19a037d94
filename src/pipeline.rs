//! Output rendering pipeline
//!
//! Drives one compose-then-encode pass per named output in the recipe.
//! The run aborts on the first failing output; errors reaching the
//! caller name the output they came from.

use std::fs;
use std::path::Path;

use log::info;

use crate::compose::compose;
use crate::error::Result;
use crate::io;
use crate::library::SourceLibrary;
use crate::recipe::RecipeDoc;

/// Load, validate, and render a recipe file end to end.
pub fn run(recipe_path: &Path) -> Result<()> {
    let doc = RecipeDoc::load(recipe_path)?.validated()?;
    let library = SourceLibrary::load(&doc.source)?;
    render_outputs(&doc, &library)
}

/// Render every output named in the recipe into `settings.output_dir`.
///
/// Outputs land at `<output_dir>/<name>.wav`. Each output's composition
/// gets its own cursor state; the shared library is only borrowed.
pub fn render_outputs(doc: &RecipeDoc, library: &SourceLibrary) -> Result<()> {
    fs::create_dir_all(&doc.settings.output_dir)?;

    for (name, segments) in &doc.output {
        info!("Generating audio for output '{}'", name);
        let rendered = compose(segments, library, doc.settings.crossfade)
            .map_err(|e| e.for_output(name))?;

        let path = doc.settings.output_dir.join(format!("{}.wav", name));
        info!(
            "Saving output '{}' ({:.3}s) to '{}'",
            name,
            rendered.duration(),
            path.display()
        );
        io::export_audio(&rendered, &path).map_err(|e| e.for_output(name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use tempfile::tempdir;

    use crate::buffer::AudioBuffer;
    use crate::error::LoopsmithError;
    use crate::recipe::{SegmentSpec, Settings};

    const RATE: u32 = 8000;

    fn tone(secs: usize, value: f32) -> AudioBuffer {
        AudioBuffer::from_interleaved(vec![value; secs * RATE as usize], 1, RATE).unwrap()
    }

    fn doc_for(output_dir: &Path, outputs: BTreeMap<String, Vec<SegmentSpec>>) -> RecipeDoc {
        RecipeDoc {
            settings: Settings {
                crossfade: 0,
                output_dir: output_dir.to_path_buf(),
            },
            // Loader is bypassed in these tests; paths are unused.
            source: BTreeMap::from([("music".to_string(), vec![])]),
            output: outputs,
        }
    }

    #[test]
    fn test_renders_one_wav_per_output() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("rendered");

        let library = SourceLibrary::from_buffers(BTreeMap::from([(
            "music".to_string(),
            tone(10, 0.25),
        )]));
        let outputs = BTreeMap::from([
            (
                "long".to_string(),
                vec![SegmentSpec {
                    source: "music".to_string(),
                    duration: 6,
                }],
            ),
            (
                "short".to_string(),
                vec![SegmentSpec {
                    source: "music".to_string(),
                    duration: 2,
                }],
            ),
        ]);

        render_outputs(&doc_for(&out_dir, outputs), &library).unwrap();

        let long = crate::io::import_audio(&out_dir.join("long.wav")).unwrap();
        let short = crate::io::import_audio(&out_dir.join("short.wav")).unwrap();
        assert_eq!(long.num_frames(), 6 * RATE as usize);
        assert_eq!(short.num_frames(), 2 * RATE as usize);
    }

    #[test]
    fn test_first_failure_aborts_run() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("rendered");

        let library = SourceLibrary::from_buffers(BTreeMap::from([(
            "music".to_string(),
            tone(5, 0.25),
        )]));
        // BTreeMap order puts the failing output first.
        let outputs = BTreeMap::from([
            (
                "a_bad".to_string(),
                vec![SegmentSpec {
                    source: "music".to_string(),
                    duration: 60, // longer than the 5s source
                }],
            ),
            (
                "b_good".to_string(),
                vec![SegmentSpec {
                    source: "music".to_string(),
                    duration: 2,
                }],
            ),
        ]);

        let err = render_outputs(&doc_for(&out_dir, outputs), &library).unwrap_err();
        match err {
            LoopsmithError::OutputFailed { output, source } => {
                assert_eq!(output, "a_bad");
                assert!(matches!(
                    *source,
                    LoopsmithError::DurationExceedsSource { .. }
                ));
            }
            other => panic!("Expected OutputFailed, got: {:?}", other),
        }
        // The later output was never rendered.
        assert!(!out_dir.join("b_good.wav").exists());
    }
}
