//! The model seam for CV evaluation.
//!
//! `AppState` holds an `Arc<dyn CvEvaluator>`, so handler tests can stub the
//! external call without touching the network.

use async_trait::async_trait;

use crate::analysis::prompts::{build_cv_eval_prompt, CV_EVAL_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};

/// Produces the model's raw evaluation text for a CV / job-description pair.
#[async_trait]
pub trait CvEvaluator: Send + Sync {
    async fn evaluate(&self, cv_text: &str, job_description: &str) -> Result<String, AppError>;
}

#[async_trait]
impl CvEvaluator for LlmClient {
    async fn evaluate(&self, cv_text: &str, job_description: &str) -> Result<String, AppError> {
        let prompt = build_cv_eval_prompt(cv_text, job_description);
        let text = self
            .call(&prompt, CV_EVAL_SYSTEM)
            .await
            .and_then(|response| {
                response
                    .text()
                    .map(str::to_owned)
                    .ok_or(LlmError::EmptyContent)
            })
            .map_err(|e| AppError::Llm(format!("CV evaluation call failed: {e}")))?;
        Ok(text)
    }
}
