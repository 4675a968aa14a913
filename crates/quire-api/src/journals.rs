//! Published-article endpoints.

use std::path::Path;

use quire_core::model::{FileType, Journal, ResourceKind};
use quire_core::validate;
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, json_at};
use crate::error::ApiError;

#[derive(Debug, Default, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Metadata accompanying a manuscript upload.
#[derive(Debug, Clone, Default)]
pub struct ManuscriptDraft {
    pub title: String,
    pub abstract_text: String,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckFile {
    #[serde(default, alias = "cloudinaryUrl")]
    mirror_url: Option<String>,
}

impl ApiClient {
    /// `GET /journals`.
    pub async fn journals(&self, query: &ListQuery) -> Result<Vec<Journal>, ApiError> {
        let resp = self.send(self.get("/journals").query(query)).await?;
        json_at(resp, &["journals", "data"]).await
    }

    /// `GET /journals/:id`.
    pub async fn journal(&self, id: &str) -> Result<Journal, ApiError> {
        let resp = self.send(self.get(&format!("/journals/{id}"))).await?;
        json_at(resp, &["journal", "data"]).await
    }

    /// `POST /journals` — multipart upload of metadata plus the manuscript
    /// file. The file is validated locally before any bytes leave the
    /// machine.
    pub async fn upload_journal(
        &self,
        draft: &ManuscriptDraft,
        file: &Path,
    ) -> Result<Journal, ApiError> {
        let resp = self.upload_manuscript(ResourceKind::Journals, draft, file).await?;
        json_at(resp, &["journal", "data"]).await
    }

    /// `DELETE /journals/:id`.
    pub async fn delete_journal(&self, id: &str) -> Result<(), ApiError> {
        self.send(self.delete(&format!("/journals/{id}"))).await?;
        Ok(())
    }

    /// `GET /:collection/:id/check-file/:fileType` — ask the service whether
    /// a mirror holds this file, and where.
    pub async fn check_file(
        &self,
        kind: ResourceKind,
        id: &str,
        file_type: FileType,
    ) -> Result<Option<String>, ApiError> {
        let path = format!("/{}/{id}/check-file/{}", kind.segment(), file_type.ext());
        let resp = self.send(self.get(&path)).await?;
        let check: CheckFile = json_at(resp, &[]).await?;
        Ok(check.mirror_url)
    }

    /// Shared multipart POST for both collections.
    pub(crate) async fn upload_manuscript(
        &self,
        kind: ResourceKind,
        draft: &ManuscriptDraft,
        file: &Path,
    ) -> Result<reqwest::Response, ApiError> {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ApiError::Rejected("upload path has no file name".into()))?;

        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| ApiError::Rejected(format!("could not read {}: {e}", file.display())))?;

        validate::validate_upload(&file_name, bytes.len() as u64).map_err(|issues| {
            ApiError::Rejected(
                issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_for(&file_name))
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .text("title", draft.title.clone())
            .text("abstract", draft.abstract_text.clone())
            .text("authors", draft.authors.join(", "))
            .text("keywords", draft.keywords.join(", "))
            .part("file", part);
        if let Some(volume) = &draft.volume {
            form = form.text("volume", volume.clone());
        }
        if let Some(issue) = &draft.issue {
            form = form.text("issue", issue.clone());
        }

        // uploads are as heavy as downloads; the JSON timeout is too tight
        self.send(
            self.post(&format!("/{}", kind.segment()))
                .multipart(form)
                .timeout(self.config().download_timeout),
        )
        .await
    }
}

fn mime_for(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("doc") => "application/msword",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_covers_the_accepted_formats() {
        assert_eq!(mime_for("paper.pdf"), "application/pdf");
        assert_eq!(mime_for("paper.DOC"), "application/msword");
        assert_eq!(
            mime_for("paper.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime_for("paper"), "application/octet-stream");
    }

    #[test]
    fn check_file_reads_the_legacy_field_name() {
        let check: CheckFile =
            serde_json::from_str(r#"{"cloudinaryUrl":"https://cdn.example.org/42.pdf"}"#).unwrap();
        assert_eq!(
            check.mirror_url.as_deref(),
            Some("https://cdn.example.org/42.pdf")
        );

        let modern: CheckFile =
            serde_json::from_str(r#"{"mirrorUrl":"https://cdn.example.org/42.pdf"}"#).unwrap();
        assert!(modern.mirror_url.is_some());

        let absent: CheckFile = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert!(absent.mirror_url.is_none());
    }
}
