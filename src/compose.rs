//! Timeline composition
//!
//! Stitches an ordered list of segment requests into one output buffer.
//! Each segment pulls audio from a named source, continuing from
//! wherever the previous segment on that source left off; when a
//! segment needs more material than remains, it wraps to the source's
//! start. Consecutive appends are blended with a crossfade clamped to
//! the audio accumulated so far, so the first segment of every output
//! is always appended dry.
//!
//! All composition state (per-source cursors, the growing result) is
//! local to one [`compose`] call. Outputs rendered from the same
//! library never observe each other's cursors.

use std::collections::HashMap;

use log::{debug, info};

use crate::buffer::AudioBuffer;
use crate::error::{LoopsmithError, Result};
use crate::library::SourceLibrary;
use crate::recipe::SegmentSpec;

/// Compose one output track from an ordered segment list.
///
/// `crossfade_ms` is the configured blend length at every seam, in
/// milliseconds; the length actually applied to each append is clamped
/// to the duration of the result built so far (floored to whole
/// milliseconds), so no crossfade ever reaches before the start of the
/// output.
pub fn compose(
    recipe: &[SegmentSpec],
    library: &SourceLibrary,
    crossfade_ms: u64,
) -> Result<AudioBuffer> {
    let mut cursors: HashMap<String, f64> = HashMap::new();
    // Placeholder format; the first appended slice's format wins.
    let mut result = AudioBuffer::empty(1, 44100);

    for (index, segment) in recipe.iter().enumerate() {
        let buf = library.get(&segment.source)?;
        let requested = segment.duration as f64;
        if requested > buf.duration() {
            return Err(LoopsmithError::DurationExceedsSource {
                index,
                source_name: segment.source.clone(),
                requested_secs: segment.duration,
                source_secs: buf.duration(),
            });
        }

        // Clamp the crossfade to the history we actually have. Whole
        // milliseconds, flooring toward zero.
        let history_ms = (result.duration() * 1000.0).floor() as u64;
        let fade_secs = crossfade_ms.min(history_ms) as f64 / 1000.0;

        let start = cursors.get(segment.source.as_str()).copied().unwrap_or(0.0);
        let end = start + requested;
        debug!(
            "Segment #{}: source '{}', {}s from cursor {:.3}s (fade {:.3}s)",
            index, segment.source, segment.duration, start, fade_secs
        );

        if end > buf.duration() {
            // Not enough material left before the end of the source:
            // consume the tail, then wrap to the start. Both halves use
            // the crossfade computed above, so a wrapped segment has an
            // audible seam at the loop point.
            info!("Looping audio for source '{}'", segment.source);
            let tail = buf.slice(start, buf.duration())?;
            result = result.append_with_crossfade(&tail, fade_secs)?;

            // Historical remainder arithmetic: `end` already includes
            // the overshoot past the source's end, so this overshoots
            // the intuitive continuation point. The slice end is
            // truncated to the source's duration, as is the stored
            // cursor, keeping later segments on this source in bounds.
            let remainder = requested - (buf.duration() - end);
            let wrapped_end = remainder.min(buf.duration());
            let head = buf.slice(0.0, wrapped_end)?;
            result = result.append_with_crossfade(&head, fade_secs)?;
            cursors.insert(segment.source.clone(), wrapped_end);
        } else {
            let piece = buf.slice(start, end)?;
            result = result.append_with_crossfade(&piece, fade_secs)?;
            cursors.insert(segment.source.clone(), end);
        }
    }

    Ok(result)
}
