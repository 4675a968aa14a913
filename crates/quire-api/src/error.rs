use thiserror::Error;

use crate::session::SessionError;

/// Typed outcomes of an API call.
///
/// Transport and status-code handling stops at the client boundary; views
/// only ever see these variants and their human-readable messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("the request timed out")]
    Timeout,

    /// The token was rejected and has been cleared locally.
    /// `redirect_to_login` is true only when the current route is protected.
    #[error("authentication required")]
    Unauthorized { redirect_to_login: bool },

    #[error("permission denied")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("the server is rate limiting requests, try again shortly")]
    RateLimited,

    #[error("{0}")]
    Rejected(String),

    #[error("server error ({status})")]
    Server { status: u16 },

    #[error("unexpected response from the server: {0}")]
    Decode(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}
