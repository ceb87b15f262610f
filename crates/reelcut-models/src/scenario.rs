//! Scenario and requirement models.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::utils::{strip_bom, words};

/// Camera shot type a scenario section may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ShotType {
    Establishing,
    Action,
    #[serde(alias = "close_up", alias = "close-up")]
    Closeup,
    Interview,
    Montage,
}

impl ShotType {
    /// All shot types, in detection priority order.
    pub const ALL: [ShotType; 5] = [
        ShotType::Establishing,
        ShotType::Action,
        ShotType::Closeup,
        ShotType::Interview,
        ShotType::Montage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotType::Establishing => "establishing",
            ShotType::Action => "action",
            ShotType::Closeup => "closeup",
            ShotType::Interview => "interview",
            ShotType::Montage => "montage",
        }
    }

    /// Phrases (as lower-cased word sequences) that imply this shot type.
    fn cue_phrases(&self) -> &'static [&'static str] {
        match self {
            ShotType::Establishing => &["establishing", "wide shot"],
            ShotType::Action => &["action"],
            ShotType::Closeup => &["closeup", "close up"],
            ShotType::Interview => &["interview"],
            ShotType::Montage => &["montage"],
        }
    }

    /// Find the first shot type whose name or alias occurs as whole words in `text`.
    ///
    /// # Examples
    /// ```
    /// use reelcut_models::ShotType;
    /// assert_eq!(ShotType::detect("A wide shot of the valley"), Some(ShotType::Establishing));
    /// assert_eq!(ShotType::detect("Close-up of the summit sign"), Some(ShotType::Closeup));
    /// assert_eq!(ShotType::detect("Team discussion"), None);
    /// ```
    pub fn detect(text: &str) -> Option<ShotType> {
        let padded = format!(" {} ", words(text).collect::<Vec<_>>().join(" "));
        Self::ALL.into_iter().find(|shot| {
            shot.cue_phrases()
                .iter()
                .any(|phrase| padded.contains(&format!(" {} ", phrase)))
        })
    }
}

impl std::fmt::Display for ShotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scenario section's criteria as it appears in a scenario document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RequirementRecord {
    /// Free-text description of the section
    #[serde(default)]
    pub description: String,

    /// Keywords the section's scenes should mention
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Emotion names (exciting, calm, inspiring, informative, humorous)
    #[serde(default)]
    pub emotions: Vec<String>,

    /// Minimum number of scenes wanted
    pub min_count: u32,

    /// Maximum number of scenes accepted
    pub max_count: u32,

    /// Section identifier
    pub section_id: String,

    /// Explicit shot type; inferred from description/keywords when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<ShotType>,
}

/// A scenario document as returned by the scenario authoring collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioDocument {
    /// Title of the final edit
    pub title: String,

    /// Ordered sections
    pub scene_requirements: Vec<RequirementRecord>,
}

/// JSON Schema of [`ScenarioDocument`].
///
/// Handed to the scenario authoring collaborator so it emits documents
/// that pass validation.
pub fn scenario_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(ScenarioDocument)
}

/// A validated requirement.
///
/// Keywords and emotions are trimmed, lower-cased, de-duplicated sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    pub section_id: String,
    pub description: String,
    pub keywords: BTreeSet<String>,
    pub emotions: BTreeSet<String>,
    pub min_count: usize,
    pub max_count: usize,
    pub shot_type: Option<ShotType>,
}

fn normalized_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

impl Requirement {
    /// Validate a requirement record.
    pub fn from_record(record: RequirementRecord) -> ModelResult<Self> {
        if record.section_id.trim().is_empty() {
            return Err(ModelError::malformed("section_id must not be empty"));
        }
        if record.min_count > record.max_count {
            return Err(ModelError::malformed(format!(
                "section '{}': min_count {} exceeds max_count {}",
                record.section_id, record.min_count, record.max_count
            )));
        }

        let keywords = normalized_set(record.keywords);
        let shot_type = record.shot_type.or_else(|| {
            ShotType::detect(&record.description)
                .or_else(|| keywords.iter().find_map(|k| ShotType::detect(k)))
        });

        Ok(Self {
            section_id: record.section_id,
            description: record.description,
            keywords,
            emotions: normalized_set(record.emotions),
            min_count: record.min_count as usize,
            max_count: record.max_count as usize,
            shot_type,
        })
    }
}

/// A validated scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub title: String,
    pub requirements: Vec<Requirement>,
}

impl Scenario {
    /// Validate a scenario document. The first invalid requirement rejects the whole scenario.
    pub fn from_document(document: ScenarioDocument) -> ModelResult<Self> {
        let requirements = document
            .scene_requirements
            .into_iter()
            .map(Requirement::from_record)
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self {
            title: document.title,
            requirements,
        })
    }

    /// Parse and validate a scenario JSON document. A leading byte-order mark is ignored.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let document: ScenarioDocument = serde_json::from_str(strip_bom(json))?;
        Self::from_document(document)
    }
}
