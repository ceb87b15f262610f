//! Scoring tables.
//!
//! All constants that shape a score live here as plain data so callers can
//! swap a table without touching the scorer's control flow.

use std::collections::{BTreeMap, HashMap};

use reelcut_models::ShotType;

/// Weights of the three score components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub text: f64,
    pub emotion: f64,
    pub shot: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            text: 0.6,
            emotion: 0.3,
            shot: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Every weight is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.text, self.emotion, self.shot]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Keyword matching credits for the text component.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatchRules {
    /// Credit for a keyword found as whole word(s), divided by keyword count
    pub whole_word_credit: f64,
    /// Credit for a keyword found only as a substring, divided by keyword count
    pub substring_credit: f64,
    /// Text score of a requirement without keywords
    pub keywordless_floor: f64,
    /// Transcripts shorter than this many characters are penalized
    pub short_transcript_chars: usize,
    /// Multiplier applied to short transcripts
    pub short_transcript_penalty: f64,
}

impl Default for TextMatchRules {
    fn default() -> Self {
        Self {
            whole_word_credit: 1.0,
            substring_credit: 0.5,
            keywordless_floor: 0.1,
            short_transcript_chars: 10,
            short_transcript_penalty: 0.5,
        }
    }
}

/// Scene duration range that earns the shot-type bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationBand {
    /// Strictly longer than the bound
    Above(f64),
    /// Strictly shorter than the bound
    Below(f64),
    /// Within the bounds, inclusive
    Within(f64, f64),
}

impl DurationBand {
    pub fn contains(&self, duration: f64) -> bool {
        match *self {
            DurationBand::Above(min) => duration > min,
            DurationBand::Below(max) => duration < max,
            DurationBand::Within(min, max) => duration >= min && duration <= max,
        }
    }
}

/// Cue words and expected duration for one shot type.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotProfile {
    pub keywords: Vec<String>,
    pub duration: Option<DurationBand>,
}

impl ShotProfile {
    fn new(keywords: &[&str], duration: Option<DurationBand>) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            duration,
        }
    }
}

/// Weights inside the shot-type component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotMatchRules {
    /// Multiplied by the fraction of profile keywords present in the scene
    pub keyword_weight: f64,
    /// Added when the scene duration falls in the profile's band
    pub duration_bonus: f64,
}

impl Default for ShotMatchRules {
    fn default() -> Self {
        Self {
            keyword_weight: 0.7,
            duration_bonus: 0.3,
        }
    }
}

/// The complete set of scoring tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringStrategy {
    pub weights: ScoreWeights,
    pub text: TextMatchRules,
    /// Requirement emotion name -> scene emotion axes
    pub emotion_axes: BTreeMap<String, Vec<String>>,
    pub shot: ShotMatchRules,
    pub shot_profiles: HashMap<ShotType, ShotProfile>,
}

impl Default for ScoringStrategy {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            text: TextMatchRules::default(),
            emotion_axes: default_emotion_axes(),
            shot: ShotMatchRules::default(),
            shot_profiles: default_shot_profiles(),
        }
    }
}

impl ScoringStrategy {
    /// Use different component weights, keeping every other table.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Scene emotion axes for a requirement emotion.
    ///
    /// Names missing from the table are read as a single axis of the same name.
    pub fn axes_for<'a>(&'a self, emotion: &'a str) -> Vec<&'a str> {
        match self.emotion_axes.get(emotion) {
            Some(axes) => axes.iter().map(String::as_str).collect(),
            None => vec![emotion],
        }
    }

    pub fn shot_profile(&self, shot: ShotType) -> Option<&ShotProfile> {
        self.shot_profiles.get(&shot)
    }
}

fn default_emotion_axes() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 5] = [
        ("exciting", &["joy", "surprise", "anticipation"]),
        ("calm", &["neutral", "calm"]),
        ("inspiring", &["trust", "joy", "anticipation"]),
        ("informative", &["neutral", "trust"]),
        ("humorous", &["joy", "surprise"]),
    ];

    table
        .into_iter()
        .map(|(name, axes)| {
            (
                name.to_string(),
                axes.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

fn default_shot_profiles() -> HashMap<ShotType, ShotProfile> {
    HashMap::from([
        (
            ShotType::Establishing,
            ShotProfile::new(
                &["landscape", "view", "scenery", "panorama", "overview", "skyline"],
                Some(DurationBand::Above(5.0)),
            ),
        ),
        (
            ShotType::Action,
            ShotProfile::new(
                &["run", "jump", "climb", "race", "move", "fast"],
                Some(DurationBand::Within(2.0, 10.0)),
            ),
        ),
        (
            ShotType::Closeup,
            ShotProfile::new(
                &["face", "detail", "expression", "eyes", "hands"],
                Some(DurationBand::Below(3.0)),
            ),
        ),
        (
            ShotType::Interview,
            ShotProfile::new(
                &["think", "feel", "believe", "question", "answer", "explain"],
                None,
            ),
        ),
        (
            ShotType::Montage,
            ShotProfile::new(
                &["moments", "highlights", "sequence", "memories", "series"],
                Some(DurationBand::Below(2.0)),
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoreWeights::default();
        assert_eq!((weights.text, weights.emotion, weights.shot), (0.6, 0.3, 0.1));
        assert!(weights.is_valid());
        assert!(!ScoreWeights { text: -0.1, ..weights }.is_valid());
        assert!(!ScoreWeights { shot: f64::NAN, ..weights }.is_valid());
    }

    #[test]
    fn test_axes_for() {
        let strategy = ScoringStrategy::default();
        assert_eq!(strategy.axes_for("calm"), vec!["neutral", "calm"]);
        assert_eq!(strategy.axes_for("joy"), vec!["joy"]);
    }

    #[test]
    fn test_every_shot_type_has_profile() {
        let strategy = ScoringStrategy::default();
        for shot in ShotType::ALL {
            assert!(strategy.shot_profile(shot).is_some(), "missing {}", shot);
        }
    }

    #[test]
    fn test_duration_bands() {
        assert!(DurationBand::Above(5.0).contains(5.1));
        assert!(!DurationBand::Above(5.0).contains(5.0));
        assert!(DurationBand::Below(3.0).contains(2.9));
        assert!(DurationBand::Within(2.0, 10.0).contains(2.0));
        assert!(DurationBand::Within(2.0, 10.0).contains(10.0));
        assert!(!DurationBand::Within(2.0, 10.0).contains(10.5));
    }
}
