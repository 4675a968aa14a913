//! Manuscript-submission endpoints, the editorial side of the service.

use std::path::Path;

use quire_core::model::{ResourceKind, Submission, SubmissionStatus};

use crate::client::{ApiClient, json_at};
use crate::error::ApiError;
use crate::journals::{ListQuery, ManuscriptDraft};

impl ApiClient {
    /// `GET /submissions`.
    pub async fn submissions(&self, query: &ListQuery) -> Result<Vec<Submission>, ApiError> {
        let resp = self.send(self.get("/submissions").query(query)).await?;
        json_at(resp, &["submissions", "data"]).await
    }

    /// `GET /submissions/:id`.
    pub async fn submission(&self, id: &str) -> Result<Submission, ApiError> {
        let resp = self.send(self.get(&format!("/submissions/{id}"))).await?;
        json_at(resp, &["submission", "data"]).await
    }

    /// `POST /submissions` — multipart manuscript upload.
    pub async fn upload_submission(
        &self,
        draft: &ManuscriptDraft,
        file: &Path,
    ) -> Result<Submission, ApiError> {
        let resp = self
            .upload_manuscript(ResourceKind::Submissions, draft, file)
            .await?;
        json_at(resp, &["submission", "data"]).await
    }

    /// `PATCH /submissions/:id/status` — move a manuscript through review.
    pub async fn update_submission_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, ApiError> {
        let resp = self
            .send(
                self.patch(&format!("/submissions/{id}/status"))
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        json_at(resp, &["submission", "data"]).await
    }

    /// `DELETE /submissions/:id`.
    pub async fn delete_submission(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.delete(&format!("/submissions/{id}")))
            .await?;
        Ok(())
    }
}
