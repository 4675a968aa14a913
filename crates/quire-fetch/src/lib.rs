//! Resilient file fetching for journal articles and manuscript submissions.
//!
//! The service's binary endpoints are inconsistent across deployments and its
//! mirrors come and go, so a download is an ordered list of candidates tried
//! strictly in sequence until one delivers. Layout follows the usual
//! data/effects split:
//!
//! - [`data`] - candidate lists, options and events (no I/O)
//! - [`effects`] - the HTTP client seam, the browser launcher and the engine
//!
//! Success means HTTP 200 with a non-empty body. API-origin bodies are
//! streamed to a local file; mirror URLs are handed to the system browser
//! instead of proxying bytes through this client.

mod data;
mod effects;
mod error;

pub use data::events::{Delivery, DownloadEvent};
pub use data::options::{DOWNLOAD_TIMEOUT, FetchOptions};
pub use data::sources::{DownloadSource, DownloadTarget, SourceKind, attachment_url, candidates};
pub use effects::engine::{FetchReport, Fetcher};
pub use effects::http::{BoxStream, FetchedResponse, HttpClient};
pub use effects::launcher::{Launcher, SystemLauncher};
pub use error::FetchError;

#[cfg(feature = "reqwest")]
pub use effects::http::ReqwestClient;
