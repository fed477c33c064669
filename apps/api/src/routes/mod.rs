pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::jobs;
use crate::report;
use crate::state::AppState;

/// GET / — liveness placeholder.
async fn root_handler() -> &'static str {
    "Job Portal API is running"
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route("/post-job", post(jobs::handlers::handle_post_job))
        .route("/all-jobs", get(jobs::handlers::handle_all_jobs))
        .route("/analyze-cv", post(analysis::handlers::handle_analyze_cv))
        .route(
            "/download-report/:report_id",
            get(report::handlers::handle_download_report),
        )
        // CV uploads regularly exceed axum's 2MB default.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::analysis::evaluator::CvEvaluator;
    use crate::errors::AppError;
    use crate::report::layout::LayoutConfig;
    use crate::report::store::ReportStore;

    /// Canned model responses; no network involved.
    struct StubEvaluator(&'static str);

    #[async_trait::async_trait]
    impl CvEvaluator for StubEvaluator {
        async fn evaluate(&self, _cv: &str, _jd: &str) -> Result<String, AppError> {
            Ok(self.0.to_string())
        }
    }

    /// State with a lazy pool: nothing connects unless a handler hits the DB.
    fn test_state(reports_dir: &std::path::Path, model_reply: &'static str) -> AppState {
        AppState {
            db: PgPoolOptions::new().connect_lazy("postgres://localhost/jobs_test").unwrap(),
            evaluator: Arc::new(StubEvaluator(model_reply)),
            reports: ReportStore::new(reports_dir.to_path_buf()),
            layout: LayoutConfig::default(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(boundary: &str, file_name: &str, cv: &str, jd: &str) -> String {
        format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"cvFile\"; filename=\"{file_name}\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             {cv}\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"jobDescription\"\r\n\r\n\
             {jd}\r\n\
             --{boundary}--\r\n"
        )
    }

    #[tokio::test]
    async fn test_root_is_alive() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_post_job_rejects_empty_title_before_storage() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/post-job")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title": "  ", "description": "d", "company": "Acme"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_download_report_unknown_id_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/download-report/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_analyze_cv_end_to_end_with_stubbed_model() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(
            dir.path(),
            r#"{"score": 90, "improvement_areas": "Tighten the summary."}"#,
        ));

        let boundary = "test-boundary";
        let body = multipart_body(
            boundary,
            "cv.txt",
            "Rust engineer with ten years of backend experience.",
            "Backend engineer role",
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze-cv")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["score"], 90);
        assert_eq!(json["improvementAreas"], "Tighten the summary.");

        // The report was written under this request's own id.
        let pdf_path = json["pdfPath"].as_str().unwrap();
        let pdf = tokio::fs::read(pdf_path).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf_path.contains(json["reportId"].as_str().unwrap()));
    }

    #[tokio::test]
    async fn test_analyze_cv_grammar_fallback_reply() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), "Score: 64\nUse action verbs."));

        let boundary = "test-boundary";
        let body = multipart_body(boundary, "cv.txt", "Experienced engineer.", "Any role");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze-cv")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["score"], 64);
        assert_eq!(json["improvementAreas"], "Use action verbs.");
    }

    #[tokio::test]
    async fn test_analyze_cv_missing_job_description_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let boundary = "test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"cvFile\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Some CV text\r\n\
             --{boundary}--\r\n"
        );
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze-cv")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_analyze_cv_unsupported_file_type_is_500_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path(), ""));

        let boundary = "test-boundary";
        let body = multipart_body(boundary, "cv.rar", "binary blob", "Any role");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/analyze-cv")
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EXTRACTION_ERROR");
    }
}
