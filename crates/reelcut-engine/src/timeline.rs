//! Record-timeline assembly.
//!
//! Flattens a selection (sections in scenario order, rank order within a
//! section) and lays the scenes end to end starting at zero. Entries are
//! strictly contiguous: each `record_start` is exactly the previous
//! `record_end`.

use crate::selector::{SceneMatch, Selection};

/// A selected scene placed on the assembled output timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry<'a> {
    pub scene_match: &'a SceneMatch,
    pub record_start: f64,
    pub record_end: f64,
}

impl TimelineEntry<'_> {
    pub fn content_id(&self) -> &str {
        &self.scene_match.scene.content_id
    }

    pub fn source_start(&self) -> f64 {
        self.scene_match.scene.start_time
    }

    pub fn source_end(&self) -> f64 {
        self.scene_match.scene.end_time
    }
}

/// Assemble the selection into contiguous timeline entries.
pub fn assemble(selection: &Selection) -> Vec<TimelineEntry<'_>> {
    let mut cursor: f64 = 0.0;

    selection
        .matches()
        .map(|scene_match| {
            let record_start = cursor;
            let record_end = record_start + scene_match.scene.duration();
            cursor = record_end;
            TimelineEntry {
                scene_match,
                record_start,
                record_end,
            }
        })
        .collect()
}

/// Length of the assembled timeline in seconds.
pub fn timeline_duration(entries: &[TimelineEntry<'_>]) -> f64 {
    entries.last().map(|e| e.record_end).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreBreakdown;
    use crate::selector::SectionSelection;
    use reelcut_models::Scene;
    use std::sync::Arc;

    fn scene_match(section_id: &str, start: f64, end: f64) -> SceneMatch {
        let breakdown = ScoreBreakdown {
            text: 1.0,
            emotion: 0.0,
            shot: 0.0,
            total: 0.6,
        };
        SceneMatch {
            scene: Arc::new(Scene {
                content_id: "c".into(),
                scene_index: 0,
                start_time: start,
                end_time: end,
                transcript: String::new(),
                topics: Default::default(),
                emotion_scores: Default::default(),
            }),
            score: breakdown.total,
            breakdown,
            section_id: section_id.into(),
        }
    }

    #[test]
    fn test_assemble_contiguous() {
        let selection = Selection::new(vec![
            SectionSelection {
                section_id: "intro".into(),
                matches: vec![scene_match("intro", 5.0, 12.0), scene_match("intro", 0.1, 0.4)],
            },
            SectionSelection {
                section_id: "empty".into(),
                matches: vec![],
            },
            SectionSelection {
                section_id: "outro".into(),
                matches: vec![scene_match("outro", 100.0, 103.3)],
            },
        ]);

        let entries = assemble(&selection);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].record_start, 0.0);
        assert_eq!(entries[0].record_end, 7.0);
        for pair in entries.windows(2) {
            assert_eq!(pair[1].record_start, pair[0].record_end);
        }
        assert_eq!(entries[2].scene_match.section_id, "outro");
        assert!((timeline_duration(&entries) - 10.6).abs() < 1e-9);
    }

    #[test]
    fn test_assemble_empty() {
        let selection = Selection::default();
        let entries = assemble(&selection);
        assert!(entries.is_empty());
        assert_eq!(timeline_duration(&entries), 0.0);
    }
}
