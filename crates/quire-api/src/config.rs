use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Hosted deployment of the journal service.
pub const PRODUCTION_BASE_URL: &str = "https://njestemebackend.onrender.com";

/// Local development backend.
pub const LOCAL_BASE_URL: &str = "http://localhost:5000";

/// Timeout for ordinary JSON calls.
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-candidate timeout for file downloads; large payloads on cold-starting
/// free-tier hosting need far more headroom than JSON calls.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved client configuration.
///
/// `base_url` is the backend root without the `/api` prefix; the client adds
/// the prefix for JSON endpoints, matching the service's URL layout.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_timeout: Duration,
    pub download_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: LOCAL_BASE_URL.to_string(),
            api_timeout: API_TIMEOUT,
            download_timeout: DOWNLOAD_TIMEOUT,
        }
    }
}

/// On-disk shape of `~/.config/quire/config.toml`. All fields optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    api_timeout_secs: Option<u64>,
    download_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Resolve configuration from the environment.
    ///
    /// Precedence: `QUIRE_API_URL` env var, then the config file, then the
    /// production default when `QUIRE_PRODUCTION` is set, then local
    /// development.
    pub fn load() -> Self {
        let file = config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|raw| toml::from_str::<FileConfig>(&raw).ok())
            .unwrap_or_default();

        let base_url = std::env::var("QUIRE_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.base_url)
            .unwrap_or_else(|| {
                if std::env::var_os("QUIRE_PRODUCTION").is_some() {
                    PRODUCTION_BASE_URL.to_string()
                } else {
                    LOCAL_BASE_URL.to_string()
                }
            });

        Self {
            base_url,
            api_timeout: file
                .api_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(API_TIMEOUT),
            download_timeout: file
                .download_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DOWNLOAD_TIMEOUT),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_production(&self) -> bool {
        self.base_url.contains("onrender.com")
    }
}

fn config_path() -> Option<PathBuf> {
    home::home_dir().map(|h| h.join(".config").join("quire").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_development() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, LOCAL_BASE_URL);
        assert!(!config.is_production());
        assert!(config.download_timeout > config.api_timeout);
    }

    #[test]
    fn production_is_detected_from_the_host() {
        let config = ApiConfig::default().with_base_url(PRODUCTION_BASE_URL);
        assert!(config.is_production());
    }

    #[test]
    fn file_config_tolerates_missing_fields() {
        let parsed: FileConfig = toml::from_str("base_url = \"http://10.0.0.2:5000\"").unwrap();
        assert_eq!(parsed.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert!(parsed.api_timeout_secs.is_none());
    }
}
