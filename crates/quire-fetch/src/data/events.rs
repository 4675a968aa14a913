use std::path::PathBuf;

use super::sources::SourceKind;

/// How a file reached the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Body streamed to a local file.
    Saved { path: PathBuf, bytes: u64 },
    /// Mirror URL handed to the system browser.
    Opened { url: String },
}

/// Progress notifications emitted while a download action runs.
///
/// These feed the UI notification channel; they carry no control-flow
/// meaning and may be ignored entirely.
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Started { file_name: String, candidates: usize },
    TryingSource { url: String, kind: SourceKind },
    Received { bytes: u64, total: Option<u64> },
    SourceFailed { url: String, message: String },
    Delivered(Delivery),
    Failed { attempts: usize, message: String },
}
