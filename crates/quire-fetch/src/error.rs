use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no download candidates to try")]
    NoCandidates,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("received an empty file")]
    EmptyBody,

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not open the browser: {0}")]
    Launch(#[source] io::Error),

    #[error("all {attempts} download attempts failed: {last}")]
    AllCandidatesFailed {
        attempts: usize,
        #[source]
        last: Box<FetchError>,
    },
}
