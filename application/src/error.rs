//! Application error taxonomy
//!
//! Every business-rule violation is detected and reported synchronously
//! with an explicit reason string; nothing is silently swallowed. Errors
//! map to an HTTP-style status/message pair surfaced directly to callers;
//! lower layers log diagnostics, but the returned message stays sanitized.

use crate::ports::store::StoreError;
use gatherly_domain::DomainError;
use thiserror::Error;

/// Caller-facing error taxonomy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Entity missing
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid input or a failed business-rule precondition
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authorization failure
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Lost race on a guarded mutation
    #[error("conflict: {0}")]
    Conflict(String),

    /// Unexpected persistence failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        CoreError::NotFound(reason.into())
    }

    pub fn bad_request(reason: impl Into<String>) -> Self {
        CoreError::BadRequest(reason.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        CoreError::Forbidden(reason.into())
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        CoreError::Conflict(reason.into())
    }

    pub fn internal(reason: impl Into<String>) -> Self {
        CoreError::Internal(reason.into())
    }

    /// Taxonomy label, without the reason string
    pub fn label(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NotFound",
            CoreError::BadRequest(_) => "BadRequest",
            CoreError::Forbidden(_) => "Forbidden",
            CoreError::Conflict(_) => "Conflict",
            CoreError::Internal(_) => "Internal",
        }
    }

    /// HTTP-style status code for API-route callers
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::NotFound(_) => 404,
            CoreError::BadRequest(_) => 400,
            CoreError::Forbidden(_) => 403,
            CoreError::Conflict(_) => 409,
            CoreError::Internal(_) => 500,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownOption | DomainError::UnknownParticipant(_) => {
                CoreError::NotFound(err.to_string())
            }
            DomainError::PollClosed
            | DomainError::PollExpired
            | DomainError::AlreadyFinalized
            | DomainError::InvalidTransition(_)
            | DomainError::InvalidConfig(_)
            | DomainError::InvalidOption(_) => CoreError::BadRequest(err.to_string()),
        }
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CoreError::NotFound("record not found".to_string()),
            StoreError::VersionConflict => {
                CoreError::Conflict("the poll changed since it was read".to_string())
            }
            StoreError::Domain(domain) => domain.into(),
            StoreError::Io(reason) => CoreError::Internal(reason),
        }
    }
}
