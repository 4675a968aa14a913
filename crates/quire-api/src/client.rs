use quire_core::access;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::session::{Session, SessionStore};

/// Error envelope the service uses for failed requests.
#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// REST client for the journal service.
///
/// Construction takes the resolved configuration and the session store; the
/// logical route of the surface driving the client is declared with
/// [`ApiClient::for_route`] so that 401 handling can decide between
/// "redirect to login" and "stay put".
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: SessionStore,
    route: &'static str,
}

impl ApiClient {
    pub fn new(config: ApiConfig, store: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .user_agent(concat!("quire/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            config,
            store,
            route: "/",
        })
    }

    /// Declare the logical route this client is acting for.
    #[must_use]
    pub fn for_route(mut self, route: &'static str) -> Self {
        self.route = route;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Current session as persisted; reloaded per call so that concurrent
    /// commands observe logouts.
    pub fn session(&self) -> Session {
        self.store.load()
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Build a request with the bearer token attached when one is present.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.http.request(method, self.api_url(path));
        match self.store.load().token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and convert any failure into the typed taxonomy.
    pub(crate) async fn send(&self, rb: RequestBuilder) -> Result<Response, ApiError> {
        let resp = rb.send().await.map_err(transport_error)?;
        let status = resp.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(resp);
        }
        let message = resp
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|m| m.message);
        Err(self.failure(status, message))
    }

    /// Map a non-success status to an [`ApiError`], performing the 401
    /// session teardown as a side effect.
    fn failure(&self, status: u16, message: Option<String>) -> ApiError {
        match status {
            401 => {
                // token is invalid from here on, whatever the route
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "could not clear the rejected session");
                }
                let redirect_to_login = access::is_protected_path(self.route);
                tracing::warn!(
                    route = self.route,
                    redirect_to_login,
                    "session rejected by the server"
                );
                ApiError::Unauthorized { redirect_to_login }
            }
            403 => {
                tracing::warn!(route = self.route, "permission denied");
                ApiError::Forbidden
            }
            404 => ApiError::NotFound,
            429 => {
                tracing::warn!(target: "security", route = self.route, "rate limited");
                ApiError::RateLimited
            }
            400..=499 => {
                ApiError::Rejected(message.unwrap_or_else(|| "request rejected".to_string()))
            }
            _ => ApiError::Server { status },
        }
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Decode a response body, unwrapping the first matching envelope key.
///
/// The service is inconsistent about envelopes (`{"journal": {...}}` here,
/// a bare object there); callers list the keys they expect and fall back to
/// the top-level value.
pub(crate) async fn json_at<T: DeserializeOwned>(
    resp: Response,
    keys: &[&str],
) -> Result<T, ApiError> {
    let value: serde_json::Value = resp
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    for key in keys {
        if let Some(inner) = value.get(key) {
            return serde_json::from_value(inner.clone())
                .map_err(|e| ApiError::Decode(e.to_string()));
        }
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::model::{Role, User};

    fn client_with_store(dir: &tempfile::TempDir, route: &'static str) -> ApiClient {
        let store = SessionStore::new(dir.path().join("session.json"));
        ApiClient::new(ApiConfig::default(), store)
            .unwrap()
            .for_route(route)
    }

    fn signed_in(store: &SessionStore) {
        let user = User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.org".into(),
            role: Role::Author,
        };
        store
            .save(&Session::begin("tok-123".into(), user).unwrap())
            .unwrap();
    }

    #[test]
    fn api_url_inserts_the_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/");
        assert_eq!(
            client.api_url("/journals/42"),
            "http://localhost:5000/api/journals/42"
        );

        let trailing = ApiClient::new(
            ApiConfig::default().with_base_url("http://localhost:5000/"),
            SessionStore::new(dir.path().join("s2.json")),
        )
        .unwrap();
        assert_eq!(
            trailing.api_url("/journals"),
            "http://localhost:5000/api/journals"
        );
    }

    #[test]
    fn bearer_token_is_attached_when_signed_in() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/");
        signed_in(client.store());

        let req = client.get("/journals").build().unwrap();
        let auth = req.headers().get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer tok-123");
    }

    #[test]
    fn no_token_means_no_auth_header() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/");

        let req = client.get("/journals").build().unwrap();
        assert!(req.headers().get("authorization").is_none());
    }

    #[test]
    fn unauthorized_on_protected_route_clears_and_redirects() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/manage-journals");
        signed_in(client.store());

        let err = client.failure(401, None);
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                redirect_to_login: true
            }
        ));
        assert!(!client.session().is_authenticated());
    }

    #[test]
    fn unauthorized_on_public_route_stays_put() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/journals");
        signed_in(client.store());

        let err = client.failure(401, None);
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                redirect_to_login: false
            }
        ));
        // token is still gone; only the redirect decision differs
        assert!(!client.session().is_authenticated());
    }

    #[test]
    fn remaining_statuses_map_to_the_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with_store(&dir, "/");

        assert!(matches!(client.failure(403, None), ApiError::Forbidden));
        assert!(matches!(client.failure(404, None), ApiError::NotFound));
        assert!(matches!(client.failure(429, None), ApiError::RateLimited));
        assert!(matches!(
            client.failure(500, None),
            ApiError::Server { status: 500 }
        ));
        match client.failure(400, Some("title is required".into())) {
            ApiError::Rejected(msg) => assert_eq!(msg, "title is required"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
