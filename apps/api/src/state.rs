use std::sync::Arc;

use crate::config::Config;
use crate::items::LineScorer;
use crate::render::LatexRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Renders builds to LaTeX and estimates their height at the configured page settings.
    pub renderer: Arc<LatexRenderer>,
    /// Scores lines that arrive without a cached category score.
    pub scorer: Arc<dyn LineScorer>,
}
