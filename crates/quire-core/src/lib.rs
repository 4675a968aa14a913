//! Shared domain types and terminal UI primitives for the quire client.

pub mod access;
pub mod model;
pub mod ui;
pub mod validate;

pub use access::{Access, RouteGuard, authorize};
pub use model::{FileType, Journal, ResourceKind, Role, Submission, SubmissionStatus, User};
