//! Client-side input checks, mirroring what the service enforces.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name regex"));

pub fn valid_email(email: &str) -> bool {
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// 6-128 chars with at least one lowercase, one uppercase and one digit.
pub fn valid_password(password: &str) -> bool {
    (6..=128).contains(&password.len())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn valid_name(name: &str) -> bool {
    (2..=50).contains(&name.len()) && NAME_RE.is_match(name)
}

/// Upload cap enforced by the service.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

const DANGEROUS_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "scr", "pif", "js", "jar"];

/// Why a manuscript file was refused before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadIssue {
    UnsupportedType,
    TooLarge,
    UnsafeName,
}

impl fmt::Display for UploadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadIssue::UnsupportedType => {
                write!(f, "unsupported file type, only PDF, DOC and DOCX are accepted")
            }
            UploadIssue::TooLarge => write!(f, "file exceeds the 10 MiB upload limit"),
            UploadIssue::UnsafeName => write!(f, "file name is invalid or potentially dangerous"),
        }
    }
}

/// Check a manuscript file name and size before it is sent to the service.
pub fn validate_upload(file_name: &str, size: u64) -> Result<(), Vec<UploadIssue>> {
    let mut issues = Vec::new();

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some(e) if ALLOWED_EXTENSIONS.contains(&e) => {}
        _ => issues.push(UploadIssue::UnsupportedType),
    }

    if size > MAX_UPLOAD_BYTES {
        issues.push(UploadIssue::TooLarge);
    }

    if unsafe_name(file_name) {
        issues.push(UploadIssue::UnsafeName);
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

fn unsafe_name(file_name: &str) -> bool {
    if file_name.contains("..") || file_name.contains('/') || file_name.contains('\\') {
        return true;
    }
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| DANGEROUS_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
