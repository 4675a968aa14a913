use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account roles known to the journal service.
///
/// The backend transmits roles as lowercase strings; anything else is a
/// deserialization error, not a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Author,
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Author => "author",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role `{0}`, expected admin, author or user")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "author" => Ok(Role::Author),
            "user" => Ok(Role::User),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// A signed-in account as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Binary formats the service stores per article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
}

impl FileType {
    /// File extension, which doubles as the URL path segment.
    pub fn ext(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Docx => "docx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

#[derive(Debug, Error)]
#[error("unknown file type `{0}`, expected pdf or docx")]
pub struct ParseFileTypeError(String);

impl FromStr for FileType {
    type Err = ParseFileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(FileType::Pdf),
            "docx" => Ok(FileType::Docx),
            other => Err(ParseFileTypeError(other.to_string())),
        }
    }
}

/// The two resource collections that share CRUD and download plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Journals,
    Submissions,
}

impl ResourceKind {
    /// URL path segment for this collection.
    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Journals => "journals",
            ResourceKind::Submissions => "submissions",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A published article.
///
/// Mirror URLs are explicit per-resource fields filled in by the backend
/// (third-party hosting of the same file); when absent the `check-file`
/// endpoint may still know one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journal {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
    #[serde(default, alias = "pdfCloudinaryUrl")]
    pub pdf_mirror_url: Option<String>,
    #[serde(default, alias = "docxCloudinaryUrl")]
    pub docx_mirror_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Journal {
    pub fn mirror_url(&self, file_type: FileType) -> Option<&str> {
        match file_type {
            FileType::Pdf => self.pdf_mirror_url.as_deref(),
            FileType::Docx => self.docx_mirror_url.as_deref(),
        }
    }
}

/// Review states of a submitted manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Published,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under_review",
            SubmissionStatus::Accepted => "accepted",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Published => "published",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown status `{0}`, expected submitted, under_review, accepted, rejected or published")]
pub struct ParseStatusError(String);

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "under_review" => Ok(SubmissionStatus::UnderReview),
            "accepted" => Ok(SubmissionStatus::Accepted),
            "rejected" => Ok(SubmissionStatus::Rejected),
            "published" => Ok(SubmissionStatus::Published),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A manuscript under review, one status field away from a [`Journal`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub status: SubmissionStatus,
    #[serde(default, alias = "pdfCloudinaryUrl")]
    pub pdf_mirror_url: Option<String>,
    #[serde(default, alias = "docxCloudinaryUrl")]
    pub docx_mirror_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn mirror_url(&self, file_type: FileType) -> Option<&str> {
        match file_type {
            FileType::Pdf => self.pdf_mirror_url.as_deref(),
            FileType::Docx => self.docx_mirror_url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [Role::Admin, Role::Author, Role::User] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("editor".parse::<Role>().is_err());
    }

    #[test]
    fn role_deserializes_lowercase() {
        let user: User = serde_json::from_str(
            r#"{"_id":"u1","name":"Ada","email":"ada@example.org","role":"author"}"#,
        )
        .unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Author);
    }

    #[test]
    fn unknown_role_is_an_error() {
        let err = serde_json::from_str::<User>(
            r#"{"id":"u1","name":"Ada","email":"ada@example.org","role":"root"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn journal_tolerates_sparse_payloads() {
        let journal: Journal =
            serde_json::from_str(r#"{"_id":"42","title":"On Sorting"}"#).unwrap();
        assert_eq!(journal.id, "42");
        assert!(journal.authors.is_empty());
        assert!(journal.mirror_url(FileType::Pdf).is_none());
    }

    #[test]
    fn journal_reads_legacy_mirror_field() {
        let journal: Journal = serde_json::from_str(
            r#"{"_id":"42","title":"On Sorting","pdfCloudinaryUrl":"https://cdn.example.org/42.pdf"}"#,
        )
        .unwrap();
        assert_eq!(
            journal.mirror_url(FileType::Pdf),
            Some("https://cdn.example.org/42.pdf")
        );
        assert_eq!(journal.mirror_url(FileType::Docx), None);
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            SubmissionStatus::Submitted,
            SubmissionStatus::UnderReview,
            SubmissionStatus::Accepted,
            SubmissionStatus::Rejected,
            SubmissionStatus::Published,
        ] {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn file_type_segments() {
        assert_eq!(FileType::Pdf.ext(), "pdf");
        assert_eq!("docx".parse::<FileType>().unwrap(), FileType::Docx);
        assert!("odt".parse::<FileType>().is_err());
    }
}
