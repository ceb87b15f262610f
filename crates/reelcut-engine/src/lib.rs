#![deny(unreachable_patterns)]
//! Scene selection and timeline assembly for ReelCut.
//!
//! This crate provides:
//! - Weighted scene × requirement scoring with swappable scoring tables
//! - Ranked, capacity-bounded scene selection per scenario section
//! - Contiguous record-timeline assembly
//! - Subtitle (SRT) and edit decision list rendering
//! - Atomic writing of the rendered artifacts
//!
//! The entry point is [`select_and_render`].

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod scoring;
pub mod selector;
pub mod telemetry;
pub mod timeline;

pub use config::EngineConfig;
pub use diagnostics::Diagnostic;
pub use error::{EngineError, EngineResult};
pub use output::{write_outputs, WrittenOutputs};
pub use pipeline::{
    render_selection, select_and_render, select_and_render_json, PipelineOutput, RenderedOutputs,
};
pub use render::{EditListRenderer, RenderContext, SubtitleRenderer, TimelineRenderer};
pub use scoring::{SceneScorer, ScoreBreakdown, ScoreWeights, ScoringStrategy};
pub use selector::{
    rank_order, SceneMatch, SceneSelector, SectionSelection, SelectedSceneRecord, Selection,
    SelectionOutcome,
};
pub use telemetry::init_tracing;
pub use timeline::{assemble, timeline_duration, TimelineEntry};

// Models are re-exported so callers need a single dependency.
pub use reelcut_models;
