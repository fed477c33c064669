use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::analysis::{extract, parser};
use crate::errors::AppError;
use crate::report::pdf::render_report;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCvResponse {
    pub score: Option<u32>,
    pub improvement_areas: String,
    pub report_id: Uuid,
    pub pdf_path: String,
}

/// POST /analyze-cv
///
/// Multipart fields: `cvFile` (the candidate document) and `jobDescription`.
/// The upload is spooled to a named temp file that is removed on drop, so
/// failure paths never leak the file.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeCvResponse>, AppError> {
    let mut cv_file: Option<(String, Vec<u8>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("cvFile") => {
                let file_name = field
                    .file_name()
                    .map(str::to_owned)
                    .ok_or_else(|| AppError::Validation("cvFile must be a file upload".into()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read cvFile: {e}")))?;
                cv_file = Some((file_name, data.to_vec()));
            }
            Some("jobDescription") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read jobDescription: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {} // unknown fields are ignored
        }
    }

    let (file_name, data) =
        cv_file.ok_or_else(|| AppError::Validation("missing cvFile field".into()))?;
    let job_description =
        job_description.ok_or_else(|| AppError::Validation("missing jobDescription field".into()))?;

    // MIME type is declared by the filename extension, not sniffed from content.
    let mime_type = extract::mime_for_filename(&file_name)
        .ok_or_else(|| AppError::Extraction(format!("unsupported file type: {file_name}")))?;

    let mut upload = NamedTempFile::new()
        .map_err(|e| AppError::Extraction(format!("could not spool upload: {e}")))?;
    upload
        .write_all(&data)
        .and_then(|_| upload.flush())
        .map_err(|e| AppError::Extraction(format!("could not spool upload: {e}")))?;

    let cv_text = extract::extract_text(upload.path(), mime_type).await?;

    let raw = state
        .evaluator
        .evaluate(&cv_text, &job_description)
        .await?;
    let evaluation = parser::parse_model_response(&raw);

    let pdf = render_report(&evaluation, &state.layout)?;
    let saved = state.reports.save(&pdf).await?;

    tracing::info!(
        report_id = %saved.report_id,
        score = ?evaluation.score,
        "CV analysis complete"
    );

    Ok(Json(AnalyzeCvResponse {
        score: evaluation.score,
        improvement_areas: evaluation.improvement_areas,
        report_id: saved.report_id,
        pdf_path: saved.path.display().to_string(),
    }))
}
