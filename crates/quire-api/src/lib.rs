//! Typed REST client for the journal service.
//!
//! Everything network-shaped funnels through [`client::ApiClient`]: bearer
//! tokens are attached from the injected session, and transport failures are
//! converted into the [`error::ApiError`] taxonomy before any view code sees
//! them. Binary downloads live in `quire-fetch`; this crate is JSON-only.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod journals;
pub mod session;
pub mod submissions;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use session::{Session, SessionStore};
