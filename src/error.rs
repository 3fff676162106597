//! Crate-wide error type.
//!
//! Only persistence failures ever reach the user (as a notification); every other
//! absence or degenerate input is recovered locally with a default.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("goal provider error: {0}")]
    GoalFetch(String),

    #[error("task status update failed: {0}")]
    StatusUpdate(String),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown task type: {0}")]
    UnknownTaskType(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
