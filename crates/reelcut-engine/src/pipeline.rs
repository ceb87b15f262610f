//! The `select_and_render` boundary operation.
//!
//! Content index + scenario -> selection -> timeline -> subtitle and edit-list
//! text. The whole run is pure: identical inputs and config give
//! byte-identical outputs.

use tracing::{info, info_span};

use reelcut_models::{ContentIndex, Scenario};

use crate::config::EngineConfig;
use crate::diagnostics::Diagnostic;
use crate::error::EngineResult;
use crate::render::{EditListRenderer, RenderContext, SubtitleRenderer, TimelineRenderer};
use crate::selector::{SceneSelector, Selection};
use crate::telemetry::metric_names;
use crate::timeline::{assemble, timeline_duration};

/// The two rendered artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    /// Subtitle (SRT) text
    pub subtitles: String,
    /// Edit decision list text
    pub edit_list: String,
}

/// Result of one `select_and_render` run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub selection: Selection,
    pub diagnostics: Vec<Diagnostic>,
    pub outputs: RenderedOutputs,
}

/// Assemble a selection and render both artifacts.
///
/// Either both texts are produced or an error is returned.
pub fn render_selection(
    title: &str,
    selection: &Selection,
    config: &EngineConfig,
) -> EngineResult<RenderedOutputs> {
    let entries = assemble(selection);
    let ctx = RenderContext {
        title,
        entries: &entries,
    };

    let subtitles = SubtitleRenderer::new().render(&ctx)?;
    let edit_list = EditListRenderer::new(config.frame_rate).render(&ctx)?;

    info!(
        entries = entries.len(),
        record_duration = timeline_duration(&entries),
        "Rendered subtitle and edit list"
    );
    metrics::counter!(metric_names::OUTPUTS_RENDERED_TOTAL).increment(2);

    Ok(RenderedOutputs {
        subtitles,
        edit_list,
    })
}

/// Select scenes for every scenario section and render the result.
pub fn select_and_render(
    index: &ContentIndex,
    scenario: &Scenario,
    config: &EngineConfig,
) -> EngineResult<PipelineOutput> {
    config.validate()?;

    let span = info_span!(
        "select_and_render",
        title = %scenario.title,
        contents = index.contents().len(),
        sections = scenario.requirements.len()
    );
    let _enter = span.enter();

    let outcome = SceneSelector::new(&config.scoring).select(index, scenario);
    let outputs = render_selection(&scenario.title, &outcome.selection, config)?;

    Ok(PipelineOutput {
        selection: outcome.selection,
        diagnostics: outcome.diagnostics,
        outputs,
    })
}

/// Parse and validate both JSON documents, then run [`select_and_render`].
///
/// Any schema violation rejects the run before scoring starts.
pub fn select_and_render_json(
    content_index_json: &str,
    scenario_json: &str,
    config: &EngineConfig,
) -> EngineResult<PipelineOutput> {
    let index = ContentIndex::from_json_str(content_index_json)?;
    let scenario = Scenario::from_json_str(scenario_json)?;
    select_and_render(&index, &scenario, config)
}
