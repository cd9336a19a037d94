//! Named source buffers
//!
//! A [`SourceLibrary`] maps source names to decoded audio. It is built
//! once at startup by the loader and never mutated afterwards, so the
//! composer can borrow buffers freely across however many outputs a
//! recipe defines.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::info;

use crate::buffer::AudioBuffer;
use crate::error::{LoopsmithError, Result};
use crate::io;

/// Read-only mapping from source name to decoded audio
#[derive(Debug, Default)]
pub struct SourceLibrary {
    sources: BTreeMap<String, AudioBuffer>,
}

impl SourceLibrary {
    /// Build a library from already-decoded buffers.
    pub fn from_buffers(sources: BTreeMap<String, AudioBuffer>) -> Self {
        Self { sources }
    }

    /// Decode and concatenate each source's file list into one buffer.
    ///
    /// Files are spliced in list order with no gap and no gain change.
    /// All files within a source must share channel count and sample
    /// rate; decode failures name the offending path.
    pub fn load(source_files: &BTreeMap<String, Vec<PathBuf>>) -> Result<Self> {
        info!("Loading sources");
        let mut sources = BTreeMap::new();
        for (name, paths) in source_files {
            info!("Loading source files for source '{}'", name);
            // Placeholder format; the first decoded file's format wins.
            let mut combined = AudioBuffer::empty(1, 44100);
            for path in paths {
                info!("Adding '{}' to source '{}'", path.display(), name);
                let decoded = io::import_audio(path)?;
                combined = combined.concat(&decoded).map_err(|e| match e {
                    LoopsmithError::FormatMismatch { expected, found } => {
                        LoopsmithError::LoadError {
                            path: path.clone(),
                            reason: format!(
                                "format differs from earlier files in source '{}': expected {}, found {}",
                                name, expected, found
                            ),
                        }
                    }
                    other => other,
                })?;
            }
            sources.insert(name.clone(), combined);
        }
        Ok(Self { sources })
    }

    /// Look up a source by name.
    pub fn get(&self, name: &str) -> Result<&AudioBuffer> {
        self.sources
            .get(name)
            .ok_or_else(|| LoopsmithError::UnknownSource {
                source_name: name.to_string(),
            })
    }

    /// Names of all loaded sources, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
