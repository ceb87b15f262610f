//! Subtitle (SRT) rendering.
//!
//! ```text
//! 1
//! 00:00:05,000 --> 00:00:12,000
//! climb text
//!
//! ```
//!
//! Captions use each scene's source times, since they describe the clip's
//! own content rather than its placement on the assembled output.

use std::fmt::Write;

use reelcut_models::seconds_to_subtitle_timecode;

use super::{ensure_renderable, RenderContext, TimelineRenderer};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleRenderer;

impl SubtitleRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Caption text with blank lines removed, so it cannot end its block early.
fn caption_text(transcript: &str) -> String {
    transcript
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl TimelineRenderer for SubtitleRenderer {
    fn file_name(&self) -> &'static str {
        "output.srt"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> EngineResult<String> {
        let mut out = String::new();

        for (position, entry) in ctx.entries.iter().enumerate() {
            ensure_renderable(position, entry)?;

            let scene = &entry.scene_match.scene;
            let start = seconds_to_subtitle_timecode(scene.start_time)
                .map_err(|e| EngineError::render(e.to_string()))?;
            let end = seconds_to_subtitle_timecode(scene.end_time)
                .map_err(|e| EngineError::render(e.to_string()))?;

            write!(
                out,
                "{}\n{} --> {}\n{}\n\n",
                position + 1,
                start,
                end,
                caption_text(&scene.transcript)
            )
            .map_err(|e| EngineError::render(e.to_string()))?;
        }

        Ok(out)
    }
}
