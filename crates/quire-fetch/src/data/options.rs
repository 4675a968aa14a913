use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::events::DownloadEvent;

/// Per-candidate timeout. Deliberately generous: payloads are large and
/// free-tier backends cold-start.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for one download action.
#[derive(Clone)]
pub struct FetchOptions {
    /// Timeout applied to each candidate attempt independently.
    pub timeout: Duration,

    /// Headers sent with every API-origin attempt (mirrors are opened in the
    /// browser and get none of these).
    pub headers: Arc<[(String, String)]>,

    /// Event callback for the UI notification channel.
    pub on_event: Option<Arc<dyn Fn(&DownloadEvent) + Send + Sync>>,
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field("on_event", &self.on_event.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DOWNLOAD_TIMEOUT,
            headers: Arc::new([]),
            on_event: None,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Attach `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {token}"))
    }

    #[must_use]
    pub fn on_event(mut self, on_event: Arc<dyn Fn(&DownloadEvent) + Send + Sync>) -> Self {
        self.on_event = Some(on_event);
        self
    }

    pub(crate) fn emit(&self, event: &DownloadEvent) {
        if let Some(cb) = &self.on_event {
            cb(event);
        }
    }
}
