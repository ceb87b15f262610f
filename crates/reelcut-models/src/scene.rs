//! Content index models.
//!
//! The `*Record` / `ContentItem` types mirror the JSON documents produced by
//! the upstream metadata extractor. They are validated once into `Content`
//! and `Scene`, which the engine reads without further checks.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::utils::strip_bom;

/// One scene as it appears in a content index document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SceneRecord {
    /// Source start time in seconds
    pub start_time: f64,

    /// Source end time in seconds
    pub end_time: f64,

    /// Transcript text spoken during the scene
    #[serde(default)]
    pub transcript: String,

    /// Topic tags
    #[serde(default)]
    pub topics: Vec<String>,

    /// Emotion name -> score in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion_scores: Option<BTreeMap<String, f64>>,
}

/// One source video as it appears in a content index document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentItem {
    /// Unique content identifier (used as the clip name in edit lists)
    pub content_id: String,

    /// Total duration of the source video in seconds
    pub total_duration: f64,

    /// Scenes, ascending by start time
    pub scenes: Vec<SceneRecord>,
}

/// A validated, immutable scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub content_id: String,
    /// 0-based position within the owning content
    pub scene_index: usize,
    pub start_time: f64,
    pub end_time: f64,
    pub transcript: String,
    pub topics: BTreeSet<String>,
    pub emotion_scores: BTreeMap<String, f64>,
}

impl Scene {
    /// Scene length in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Score for an emotion axis, 0.0 when the scene has none.
    pub fn emotion(&self, axis: &str) -> f64 {
        self.emotion_scores.get(axis).copied().unwrap_or(0.0)
    }

    /// Whether the scene still carries a usable time span.
    pub fn has_valid_span(&self) -> bool {
        self.start_time.is_finite()
            && self.end_time.is_finite()
            && self.start_time >= 0.0
            && self.start_time < self.end_time
    }

    fn from_record(content_id: &str, scene_index: usize, record: SceneRecord) -> ModelResult<Self> {
        let at = || format!("content '{}' scene {}", content_id, scene_index);

        for (name, value) in [("start_time", record.start_time), ("end_time", record.end_time)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::malformed(format!(
                    "{}: {} must be a finite non-negative number, got {}",
                    at(),
                    name,
                    value
                )));
            }
        }
        if record.start_time >= record.end_time {
            return Err(ModelError::malformed(format!(
                "{}: start_time {} must be before end_time {}",
                at(),
                record.start_time,
                record.end_time
            )));
        }

        let emotion_scores = record.emotion_scores.unwrap_or_default();
        for (emotion, score) in &emotion_scores {
            if !score.is_finite() || !(0.0..=1.0).contains(score) {
                return Err(ModelError::malformed(format!(
                    "{}: emotion score '{}' must be within [0, 1], got {}",
                    at(),
                    emotion,
                    score
                )));
            }
        }

        Ok(Self {
            content_id: content_id.to_string(),
            scene_index,
            start_time: record.start_time,
            end_time: record.end_time,
            transcript: record.transcript,
            topics: record.topics.into_iter().collect(),
            emotion_scores,
        })
    }
}

/// A validated source video and its scenes.
#[derive(Debug, Clone)]
pub struct Content {
    pub content_id: String,
    pub total_duration: f64,
    pub scenes: Vec<Arc<Scene>>,
}

impl Content {
    /// Validate a content document.
    pub fn from_item(item: ContentItem) -> ModelResult<Self> {
        if item.content_id.trim().is_empty() {
            return Err(ModelError::malformed("content_id must not be empty"));
        }
        if !item.total_duration.is_finite() || item.total_duration < 0.0 {
            return Err(ModelError::malformed(format!(
                "content '{}': total_duration must be a finite non-negative number, got {}",
                item.content_id, item.total_duration
            )));
        }

        let scenes = item
            .scenes
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Scene::from_record(&item.content_id, index, record).map(Arc::new)
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self {
            content_id: item.content_id,
            total_duration: item.total_duration,
            scenes,
        })
    }
}

/// The full set of contents available to one selection run.
#[derive(Debug, Clone, Default)]
pub struct ContentIndex {
    contents: Vec<Content>,
}

impl ContentIndex {
    /// Validate a list of content documents.
    ///
    /// Content ids must be unique across the index.
    pub fn from_items(items: Vec<ContentItem>) -> ModelResult<Self> {
        let mut seen = HashSet::new();
        let mut contents = Vec::with_capacity(items.len());

        for item in items {
            if !seen.insert(item.content_id.clone()) {
                return Err(ModelError::malformed(format!(
                    "duplicate content_id '{}'",
                    item.content_id
                )));
            }
            contents.push(Content::from_item(item)?);
        }

        Ok(Self { contents })
    }

    /// Parse and validate a JSON array of content documents.
    ///
    /// A leading byte-order mark is ignored.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let items: Vec<ContentItem> = serde_json::from_str(strip_bom(json))?;
        Self::from_items(items)
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// Every scene of every content, in index order.
    pub fn scenes(&self) -> impl Iterator<Item = &Arc<Scene>> {
        self.contents.iter().flat_map(|c| c.scenes.iter())
    }

    pub fn scene_count(&self) -> usize {
        self.contents.iter().map(|c| c.scenes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
