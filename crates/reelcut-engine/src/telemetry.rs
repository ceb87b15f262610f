//! Tracing setup and metric names.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Metric names emitted by the engine.
pub mod metric_names {
    pub const CANDIDATES_SCORED_TOTAL: &str = "reelcut_candidates_scored_total";
    pub const SCENES_SELECTED_TOTAL: &str = "reelcut_scenes_selected_total";
    pub const UNDERFILLED_REQUIREMENTS_TOTAL: &str = "reelcut_underfilled_requirements_total";
    pub const OUTPUTS_RENDERED_TOTAL: &str = "reelcut_outputs_rendered_total";
}

/// Install a global tracing subscriber for embedding applications.
///
/// JSON output when `LOG_FORMAT=json`, colored text otherwise. `RUST_LOG`
/// directives are honored on top of the `reelcut=info` default. Returns
/// `false` if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reelcut=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .try_init()
            .is_ok()
    }
}
