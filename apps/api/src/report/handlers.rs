use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /download-report/:report_id
///
/// Streams the caller's own report; a request can never observe another
/// request's artifact because ids are generated per analysis.
pub async fn handle_download_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let path = state.reports.path_for(report_id);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("Report {report_id} not found")))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"cv-report-{report_id}.pdf\""),
        ),
    ];
    Ok((headers, bytes))
}
