use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::evaluator::CvEvaluator;
use crate::report::layout::LayoutConfig;
use crate::report::store::ReportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model seam — `LlmClient` in production, stubbed in handler tests.
    pub evaluator: Arc<dyn CvEvaluator>,
    /// Per-request report artifacts on local disk.
    pub reports: ReportStore,
    /// Page geometry and font metrics for report rendering.
    pub layout: LayoutConfig,
}
