//! Ranked, capacity-bounded scene selection per scenario section.
//!
//! For every requirement, in scenario order:
//! 1. Score every scene of every content (full cross-product, in parallel)
//! 2. Drop candidates scoring `<= 0`
//! 3. Sort by score descending, then `(content_id, start_time)` ascending
//! 4. Keep the first `max_count`; report an underfill when fewer than `min_count` exist
//!
//! A scene may be picked for several sections.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use reelcut_models::{ContentIndex, Requirement, Scenario, Scene};

use crate::diagnostics::Diagnostic;
use crate::scoring::{SceneScorer, ScoreBreakdown, ScoringStrategy};
use crate::telemetry::metric_names;

/// A scene accepted for one section.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMatch {
    pub scene: Arc<Scene>,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub section_id: String,
}

/// Total rank order: score descending, then content id and start time ascending.
///
/// Independent of evaluation order, so parallel scoring followed by one sort
/// is reproducible.
pub fn rank_order(a: &SceneMatch, b: &SceneMatch) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.scene.content_id.cmp(&b.scene.content_id))
        .then_with(|| a.scene.start_time.total_cmp(&b.scene.start_time))
        .then_with(|| a.scene.scene_index.cmp(&b.scene.scene_index))
}

/// Scenes picked for one section, in rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSelection {
    pub section_id: String,
    pub matches: Vec<SceneMatch>,
}

/// Flat, serializable view of one selected scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedSceneRecord {
    pub section_id: String,
    pub content_id: String,
    pub scene_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub score: f64,
    pub transcript: String,
    pub topics: Vec<String>,
}

/// Selected scenes grouped by section, in scenario order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    sections: Vec<SectionSelection>,
}

impl Selection {
    pub fn new(sections: Vec<SectionSelection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionSelection] {
        &self.sections
    }

    /// Every match, sections in scenario order, rank order within a section.
    pub fn matches(&self) -> impl Iterator<Item = &SceneMatch> {
        self.sections.iter().flat_map(|s| s.matches.iter())
    }

    /// Number of selected scenes across all sections (reused scenes count once per section).
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.matches.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into serializable records.
    pub fn records(&self) -> Vec<SelectedSceneRecord> {
        self.matches()
            .map(|m| SelectedSceneRecord {
                section_id: m.section_id.clone(),
                content_id: m.scene.content_id.clone(),
                scene_index: m.scene.scene_index,
                start_time: m.scene.start_time,
                end_time: m.scene.end_time,
                score: m.score,
                transcript: m.scene.transcript.clone(),
                topics: m.scene.topics.iter().cloned().collect(),
            })
            .collect()
    }
}

/// A selection plus the non-fatal conditions found while building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionOutcome {
    pub selection: Selection,
    pub diagnostics: Vec<Diagnostic>,
}

/// Picks scenes for each scenario section.
#[derive(Debug, Clone, Copy)]
pub struct SceneSelector<'a> {
    scorer: SceneScorer<'a>,
}

impl<'a> SceneSelector<'a> {
    pub fn new(strategy: &'a ScoringStrategy) -> Self {
        Self {
            scorer: SceneScorer::new(strategy),
        }
    }

    /// Positive-score candidates for one requirement, in rank order.
    pub fn rank_candidates(
        &self,
        index: &ContentIndex,
        requirement: &Requirement,
    ) -> Vec<SceneMatch> {
        let scenes: Vec<&Arc<Scene>> = index.scenes().collect();
        metrics::counter!(metric_names::CANDIDATES_SCORED_TOTAL).increment(scenes.len() as u64);

        let mut candidates: Vec<SceneMatch> = scenes
            .par_iter()
            .filter_map(|scene| {
                let breakdown = self.scorer.score(scene, requirement);
                breakdown.is_candidate().then(|| SceneMatch {
                    scene: Arc::clone(scene),
                    score: breakdown.total,
                    breakdown,
                    section_id: requirement.section_id.clone(),
                })
            })
            .collect();

        candidates.sort_by(rank_order);
        candidates
    }

    /// Select scenes for one requirement.
    ///
    /// Returns the accepted matches and an underfill diagnostic when fewer
    /// than `min_count` candidates exist.
    pub fn select_section(
        &self,
        index: &ContentIndex,
        requirement: &Requirement,
    ) -> (SectionSelection, Option<Diagnostic>) {
        let mut candidates = self.rank_candidates(index, requirement);
        let available = candidates.len();
        candidates.truncate(requirement.max_count);

        debug!(
            section_id = %requirement.section_id,
            candidates = available,
            selected = candidates.len(),
            "Ranked section candidates"
        );

        let diagnostic = (available < requirement.min_count).then(|| {
            warn!(
                section_id = %requirement.section_id,
                min_count = requirement.min_count,
                available,
                "Requirement underfilled, using available scenes"
            );
            metrics::counter!(
                metric_names::UNDERFILLED_REQUIREMENTS_TOTAL,
                "section_id" => requirement.section_id.clone()
            )
            .increment(1);
            Diagnostic::underfilled(&requirement.section_id, requirement.min_count, available)
        });

        metrics::counter!(metric_names::SCENES_SELECTED_TOTAL).increment(candidates.len() as u64);

        (
            SectionSelection {
                section_id: requirement.section_id.clone(),
                matches: candidates,
            },
            diagnostic,
        )
    }

    /// Select scenes for every section of a scenario.
    pub fn select(&self, index: &ContentIndex, scenario: &Scenario) -> SelectionOutcome {
        let mut sections = Vec::with_capacity(scenario.requirements.len());
        let mut diagnostics = Vec::new();

        for requirement in &scenario.requirements {
            let (section, diagnostic) = self.select_section(index, requirement);
            sections.push(section);
            diagnostics.extend(diagnostic);
        }

        let selection = Selection::new(sections);
        if selection.is_empty() {
            warn!(title = %scenario.title, "No scenes selected for any section");
            diagnostics.push(Diagnostic::EmptySelection);
        }

        info!(
            title = %scenario.title,
            sections = selection.sections().len(),
            selected = selection.len(),
            diagnostics = diagnostics.len(),
            "Scene selection complete"
        );

        SelectionOutcome {
            selection,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcut_models::{ContentItem, RequirementRecord, SceneRecord};

    fn item(content_id: &str, scenes: &[(f64, f64, &str)]) -> ContentItem {
        ContentItem {
            content_id: content_id.into(),
            total_duration: scenes.last().map(|s| s.1).unwrap_or(0.0),
            scenes: scenes
                .iter()
                .map(|(start, end, transcript)| SceneRecord {
                    start_time: *start,
                    end_time: *end,
                    transcript: transcript.to_string(),
                    topics: vec![],
                    emotion_scores: None,
                })
                .collect(),
        }
    }

    fn requirement(section_id: &str, keywords: &[&str], min: u32, max: u32) -> Requirement {
        Requirement::from_record(RequirementRecord {
            description: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            emotions: vec![],
            min_count: min,
            max_count: max,
            section_id: section_id.into(),
            shot_type: None,
        })
        .unwrap()
    }

    #[test]
    fn test_rank_order_ties() {
        let index = ContentIndex::from_items(vec![
            item("b", &[(0.0, 5.0, "plain words here")]),
            item("a", &[(10.0, 15.0, "plain words here"), (0.0, 5.0, "plain words here")]),
        ])
        .unwrap();
        let strategy = ScoringStrategy::default();
        let selector = SceneSelector::new(&strategy);

        let ranked = selector.rank_candidates(&index, &requirement("s", &[], 0, 3));
        let order: Vec<(&str, f64)> = ranked
            .iter()
            .map(|m| (m.scene.content_id.as_str(), m.scene.start_time))
            .collect();
        assert_eq!(order, vec![("a", 0.0), ("a", 10.0), ("b", 0.0)]);
    }

    #[test]
    fn test_higher_score_first() {
        let index = ContentIndex::from_items(vec![item(
            "a",
            &[(0.0, 5.0, "summit only here"), (5.0, 9.0, "summit and ridge today")],
        )])
        .unwrap();
        let strategy = ScoringStrategy::default();
        let selector = SceneSelector::new(&strategy);

        let (section, diagnostic) =
            selector.select_section(&index, &requirement("s", &["summit", "ridge"], 1, 5));
        assert!(diagnostic.is_none());
        assert_eq!(section.matches.len(), 2);
        assert_eq!(section.matches[0].scene.scene_index, 1);
        assert!(section.matches[0].score > section.matches[1].score);
    }

    #[test]
    fn test_max_count_caps_selection() {
        let index = ContentIndex::from_items(vec![item(
            "a",
            &[
                (0.0, 1.0, "one more step"),
                (1.0, 2.0, "one more step"),
                (2.0, 3.0, "one more step"),
            ],
        )])
        .unwrap();
        let strategy = ScoringStrategy::default();
        let selector = SceneSelector::new(&strategy);

        let (section, _) = selector.select_section(&index, &requirement("s", &["step"], 0, 2));
        assert_eq!(section.matches.len(), 2);

        let (section, _) = selector.select_section(&index, &requirement("s", &["step"], 0, 0));
        assert!(section.matches.is_empty());
    }

    #[test]
    fn test_empty_selection_diagnostic() {
        let index = ContentIndex::from_items(vec![item("a", &[(0.0, 5.0, "intro text")])]).unwrap();
        let scenario = Scenario {
            title: "Nothing".into(),
            requirements: vec![requirement("s", &["volcano"], 0, 2)],
        };
        let strategy = ScoringStrategy::default();
        let outcome = SceneSelector::new(&strategy).select(&index, &scenario);

        assert!(outcome.selection.is_empty());
        assert_eq!(outcome.diagnostics, vec![Diagnostic::EmptySelection]);
    }

    #[test]
    fn test_records() {
        let index =
            ContentIndex::from_items(vec![item("a", &[(5.0, 12.0, "climb text")])]).unwrap();
        let scenario = Scenario {
            title: "t".into(),
            requirements: vec![requirement("climb", &["climb"], 1, 1)],
        };
        let strategy = ScoringStrategy::default();
        let outcome = SceneSelector::new(&strategy).select(&index, &scenario);

        let records = outcome.selection.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section_id, "climb");
        assert_eq!(records[0].content_id, "a");
        assert_eq!(records[0].end_time, 12.0);
    }
}
