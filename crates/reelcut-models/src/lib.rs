//! Shared data models for ReelCut.
//!
//! This crate provides:
//! - Serde/JSON Schema types for content index and scenario documents
//! - Validated, immutable scene, content and requirement models
//! - The subtitle and edit-list timecode codec

pub mod error;
pub mod scenario;
pub mod scene;
pub mod timecode;
pub mod utils;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use scenario::{
    scenario_schema, Requirement, RequirementRecord, Scenario, ScenarioDocument, ShotType,
};
pub use scene::{Content, ContentIndex, ContentItem, Scene, SceneRecord};
pub use timecode::{
    parse_edit_timecode, parse_subtitle_timecode, seconds_to_edit_timecode,
    seconds_to_subtitle_timecode, TimecodeError, TimecodeResult, DEFAULT_FRAME_RATE,
};
