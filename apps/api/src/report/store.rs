//! Per-request report artifacts on local disk.
//!
//! Every analysis writes its PDF under a freshly generated id, so two
//! concurrent requests always receive distinct paths and can only ever
//! download their own result.

use std::path::PathBuf;

use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug)]
pub struct SavedReport {
    pub report_id: Uuid,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes the PDF under a new report id and returns the id and path.
    pub async fn save(&self, pdf: &[u8]) -> Result<SavedReport, AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Render(format!("could not create reports dir: {e}")))?;

        let report_id = Uuid::new_v4();
        let path = self.path_for(report_id);
        tokio::fs::write(&path, pdf)
            .await
            .map_err(|e| AppError::Render(format!("could not write report file: {e}")))?;

        Ok(SavedReport { report_id, path })
    }

    /// The canonical on-disk location for a report id. The id is a UUID, so
    /// paths cannot be steered outside the reports directory.
    pub fn path_for(&self, report_id: Uuid) -> PathBuf {
        self.dir.join(format!("cv-report-{report_id}.pdf"))
    }
}
