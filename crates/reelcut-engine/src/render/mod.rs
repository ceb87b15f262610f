//! Text renderers for an assembled timeline.
//!
//! Each renderer builds its whole output in memory and either returns the
//! complete text or fails; an entry is never silently dropped.

mod edit_list;
mod subtitle;

pub use edit_list::EditListRenderer;
pub use subtitle::SubtitleRenderer;

use crate::error::{EngineError, EngineResult};
use crate::timeline::TimelineEntry;

/// Everything a renderer needs to serialize one timeline.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub title: &'a str,
    pub entries: &'a [TimelineEntry<'a>],
}

/// Serializes a timeline into one output format.
pub trait TimelineRenderer {
    /// File name the output is conventionally written to.
    fn file_name(&self) -> &'static str;

    /// Render the complete output text.
    fn render(&self, ctx: &RenderContext<'_>) -> EngineResult<String>;
}

/// Fail when an entry lost its source or record span.
pub(crate) fn ensure_renderable(position: usize, entry: &TimelineEntry<'_>) -> EngineResult<()> {
    let scene = &entry.scene_match.scene;
    if !scene.has_valid_span() {
        return Err(EngineError::render(format!(
            "entry {} ({} scene {}) has no valid source span: {} -> {}",
            position, scene.content_id, scene.scene_index, scene.start_time, scene.end_time
        )));
    }

    let record_valid = entry.record_start.is_finite()
        && entry.record_end.is_finite()
        && entry.record_start >= 0.0
        && entry.record_start < entry.record_end;
    if !record_valid {
        return Err(EngineError::render(format!(
            "entry {} ({} scene {}) has no valid record span: {} -> {}",
            position, scene.content_id, scene.scene_index, entry.record_start, entry.record_end
        )));
    }

    Ok(())
}
