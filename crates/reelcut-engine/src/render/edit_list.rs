//! CMX3600-style edit decision list rendering.
//!
//! A simplified single-reel, single-track dialect: one cut record per
//! timeline entry, with no transition or wipe codes.
//!
//! ```text
//! TITLE: Mountain Day
//! FCM: NON-DROP FRAME
//!
//! 001  AX       AA/V  C        00:00:05:00 00:00:12:00 00:00:00:00 00:00:07:00
//! * FROM CLIP NAME: hike_a
//!
//! ```

use std::fmt::Write;

use reelcut_models::{seconds_to_edit_timecode, DEFAULT_FRAME_RATE};

use super::{ensure_renderable, RenderContext, TimelineRenderer};
use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Copy)]
pub struct EditListRenderer {
    frame_rate: f64,
}

impl Default for EditListRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl EditListRenderer {
    pub fn new(frame_rate: f64) -> Self {
        Self { frame_rate }
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn timecode(&self, seconds: f64) -> EngineResult<String> {
        seconds_to_edit_timecode(seconds, self.frame_rate)
            .map_err(|e| EngineError::render(e.to_string()))
    }
}

impl TimelineRenderer for EditListRenderer {
    fn file_name(&self) -> &'static str {
        "output.edl"
    }

    fn render(&self, ctx: &RenderContext<'_>) -> EngineResult<String> {
        let fmt_err = |e: std::fmt::Error| EngineError::render(e.to_string());
        let mut out = String::new();

        write!(out, "TITLE: {}\nFCM: NON-DROP FRAME\n\n", ctx.title).map_err(fmt_err)?;

        for (position, entry) in ctx.entries.iter().enumerate() {
            ensure_renderable(position, entry)?;

            let src_in = self.timecode(entry.source_start())?;
            let src_out = self.timecode(entry.source_end())?;
            let rec_in = self.timecode(entry.record_start)?;
            let rec_out = self.timecode(entry.record_end)?;

            write!(
                out,
                "{:03}  AX       AA/V  C        {} {} {} {}\n* FROM CLIP NAME: {}\n\n",
                position + 1,
                src_in,
                src_out,
                rec_in,
                rec_out,
                entry.content_id()
            )
            .map_err(fmt_err)?;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_only_when_empty() {
        let ctx = RenderContext {
            title: "Mountain Day",
            entries: &[],
        };
        assert_eq!(
            EditListRenderer::default().render(&ctx).unwrap(),
            "TITLE: Mountain Day\nFCM: NON-DROP FRAME\n\n"
        );
    }
}
