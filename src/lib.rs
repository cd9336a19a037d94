//! Loopsmith - interval audio track composer
//!
//! Loopsmith builds finite output tracks from a small set of named,
//! possibly-looping source recordings, following a declarative recipe
//! of (source, duration) segments joined by crossfades.
//!
//! # Architecture
//!
//! - [`buffer::AudioBuffer`]: immutable decoded audio with splice and
//!   crossfade operations
//! - [`library::SourceLibrary`]: named sources, loaded once per run
//! - [`compose`]: the segment-stitching core - per-source cursors,
//!   wraparound, clamped crossfades
//! - [`pipeline`]: one compose + encode pass per named output
//! - [`recipe`]: TOML recipe parsing and pure validation

pub mod buffer;
pub mod cli;
pub mod compose;
pub mod error;
pub mod io;
pub mod library;
pub mod pipeline;
pub mod recipe;

pub use error::{LoopsmithError, Result};
