//! Session context: who is signed in, and the token proving it.
//!
//! The session is an explicit value injected into [`crate::ApiClient`]
//! construction, with a defined lifecycle: begun on login or registration,
//! updated on profile changes, torn down on logout. Persistence is a single
//! JSON file under the user's state directory, the CLI stand-in for the
//! original tab-scoped browser storage.

use std::path::PathBuf;

use quire_core::model::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not locate a home directory for session state")]
    NoHomeDir,

    #[error("session file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode session state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not gather randomness for the CSRF token: {0}")]
    Random(#[from] getrandom::Error),
}

/// Authenticated state for one user of the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub csrf_token: Option<String>,
}

impl Session {
    /// Start a fresh session from a login/registration response.
    pub fn begin(token: String, user: User) -> Result<Self, SessionError> {
        Ok(Self {
            token: Some(token),
            user: Some(user),
            csrf_token: Some(generate_csrf_token()?),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// 32 random bytes, hex-encoded.
pub fn generate_csrf_token() -> Result<String, SessionError> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// File-backed session persistence.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under `~/.local/state/quire/session.json`.
    pub fn open_default() -> Result<Self, SessionError> {
        let home = home::home_dir().ok_or(SessionError::NoHomeDir)?;
        Ok(Self::new(
            home.join(".local")
                .join("state")
                .join("quire")
                .join("session.json"),
        ))
    }

    /// Read the current session. A missing or corrupt file is simply "not
    /// signed in", never an error.
    pub fn load(&self) -> Session {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Tear the session down, e.g. on logout or after a 401.
    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::model::Role;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.org".into(),
            role: Role::Author,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("session.json"))
    }

    #[test]
    fn begin_generates_a_csrf_token() {
        let session = Session::begin("tok".into(), user()).unwrap();
        assert!(session.is_authenticated());
        let csrf = session.csrf_token.unwrap();
        assert_eq!(csrf.len(), 64);
        assert!(csrf.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let session = Session::begin("tok".into(), user()).unwrap();
        store.save(&session).unwrap();
        assert_eq!(store.load(), session);
    }

    #[test]
    fn missing_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn corrupt_file_means_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("session.json"), "{not json").unwrap();
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&Session::begin("tok".into(), user()).unwrap())
            .unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(!store.load().is_authenticated());
    }
}
