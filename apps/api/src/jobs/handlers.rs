use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::jobs::models::{JobPosting, NewJobPosting};
use crate::jobs::store;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PostJobResponse {
    pub message: String,
    pub job: JobPosting,
}

/// POST /post-job
pub async fn handle_post_job(
    State(state): State<AppState>,
    Json(posting): Json<NewJobPosting>,
) -> Result<(StatusCode, Json<PostJobResponse>), AppError> {
    posting.validate()?;
    let job = store::insert(&state.db, &posting).await?;
    tracing::info!("Posted job {} ({})", job.id, job.title);
    Ok((
        StatusCode::CREATED,
        Json(PostJobResponse {
            message: "Job posted successfully".to_string(),
            job,
        }),
    ))
}

/// GET /all-jobs
pub async fn handle_all_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let jobs = store::list_all(&state.db).await?;
    Ok(Json(jobs))
}
