//! Scene × requirement similarity scoring.
//!
//! The total score is a weighted sum of three components:
//!
//! ```text
//! total = w_text * text + w_emotion * emotion + w_shot * shot
//! ```
//!
//! With the default weights (0.6 / 0.3 / 0.1). Scores are not normalized and
//! may exceed 1.0. A scene scoring `<= 0` is not a candidate for the requirement.

pub mod strategy;

use std::collections::{BTreeSet, HashSet};

use reelcut_models::utils::words;
use reelcut_models::{Requirement, Scene};
use serde::Serialize;

pub use strategy::{
    DurationBand, ScoreWeights, ScoringStrategy, ShotMatchRules, ShotProfile, TextMatchRules,
};

/// Per-component scores for one scene × requirement pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub text: f64,
    pub emotion: f64,
    pub shot: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Whether the scene may be selected for the requirement.
    pub fn is_candidate(&self) -> bool {
        self.total > 0.0
    }
}

/// Scores scenes against requirements using a [`ScoringStrategy`].
#[derive(Debug, Clone, Copy)]
pub struct SceneScorer<'a> {
    strategy: &'a ScoringStrategy,
}

impl<'a> SceneScorer<'a> {
    pub fn new(strategy: &'a ScoringStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &ScoringStrategy {
        self.strategy
    }

    /// Score a scene against a requirement.
    pub fn score(&self, scene: &Scene, requirement: &Requirement) -> ScoreBreakdown {
        let weights = &self.strategy.weights;

        let text = self.text_score(scene, requirement);
        let emotion = self.emotion_score(scene, requirement);
        let shot = self.shot_score(scene, requirement);

        ScoreBreakdown {
            text,
            emotion,
            shot,
            total: weights.text * text + weights.emotion * emotion + weights.shot * shot,
        }
    }

    /// Keyword match against the transcript.
    ///
    /// Each keyword contributes the whole-word credit when its words appear
    /// as whole words, otherwise the substring credit when it appears
    /// anywhere in the lower-cased transcript.
    ///
    /// Without keywords the score is the floor (0.1), so description-only
    /// requirements still admit candidates. When the trimmed description
    /// occurs in the transcript the score is raised to the substring credit
    /// (0.5): the description check is treated as one substring-matched
    /// keyword, and such a scene outranks one that only reaches the floor.
    pub fn text_score(&self, scene: &Scene, requirement: &Requirement) -> f64 {
        let rules = &self.strategy.text;
        let transcript = scene.transcript.to_lowercase();

        let raw = if requirement.keywords.is_empty() {
            let description = requirement.description.trim().to_lowercase();
            if !description.is_empty() && transcript.contains(&description) {
                rules.substring_credit.max(rules.keywordless_floor)
            } else {
                rules.keywordless_floor
            }
        } else {
            let padded = padded_words(&scene.transcript);
            let per_keyword = 1.0 / requirement.keywords.len() as f64;

            requirement
                .keywords
                .iter()
                .map(|keyword| {
                    let phrase = padded_words(keyword);
                    if phrase.trim().is_empty() {
                        0.0
                    } else if padded.contains(&phrase) {
                        rules.whole_word_credit * per_keyword
                    } else if transcript.contains(keyword.as_str()) {
                        rules.substring_credit * per_keyword
                    } else {
                        0.0
                    }
                })
                .sum::<f64>()
        };

        if scene.transcript.chars().count() < rules.short_transcript_chars {
            raw * rules.short_transcript_penalty
        } else {
            raw
        }
    }

    /// Mean of the scene's values over the axes mapped from the requirement's emotions.
    pub fn emotion_score(&self, scene: &Scene, requirement: &Requirement) -> f64 {
        if requirement.emotions.is_empty() {
            return 0.0;
        }

        let axes: BTreeSet<&str> = requirement
            .emotions
            .iter()
            .flat_map(|emotion| self.strategy.axes_for(emotion))
            .collect();
        if axes.is_empty() {
            return 0.0;
        }

        let total: f64 = axes.iter().map(|axis| scene.emotion(axis)).sum();
        (total / axes.len() as f64).clamp(0.0, 1.0)
    }

    /// Shot-type cue words present in the scene plus the duration bonus.
    pub fn shot_score(&self, scene: &Scene, requirement: &Requirement) -> f64 {
        let Some(shot) = requirement.shot_type else {
            return 0.0;
        };
        let Some(profile) = self.strategy.shot_profile(shot) else {
            return 0.0;
        };

        let rules = &self.strategy.shot;
        let keyword_part = if profile.keywords.is_empty() {
            0.0
        } else {
            let vocabulary = scene_vocabulary(scene);
            let hits = profile
                .keywords
                .iter()
                .filter(|k| vocabulary.contains(k.as_str()))
                .count();
            rules.keyword_weight * hits as f64 / profile.keywords.len() as f64
        };

        let duration_part = match profile.duration {
            Some(band) if band.contains(scene.duration()) => rules.duration_bonus,
            _ => 0.0,
        };

        keyword_part + duration_part
    }
}

/// Words of `text` joined by single spaces, with a leading and trailing space,
/// so a phrase match on word boundaries is a plain `contains`.
fn padded_words(text: &str) -> String {
    let joined = words(text).collect::<Vec<_>>().join(" ");
    format!(" {} ", joined)
}

/// Transcript and topic words of a scene.
fn scene_vocabulary(scene: &Scene) -> HashSet<String> {
    words(&scene.transcript)
        .chain(scene.topics.iter().flat_map(|topic| words(topic)))
        .collect()
}
