//! Shared error type across labwarden crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Caller lacks a sufficient role.
    NotAllowed,
    /// Rate limited within the current window.
    RateLimited,
    /// Caller is blocked after repeated violations.
    Blocked,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::RateLimited => "RATE_LIMITED",
            ClientCode::Blocked => "BLOCKED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WardenError>;

/// Unified error type used by core and the guard shell.
///
/// Admission verdicts (`Denied`/`Blocked` from the limiter, a `false` from
/// the policy) are values, not errors; these variants exist for the layers
/// that must render those verdicts to a client, plus the usual config and
/// handler failures.
#[derive(Debug, Error)]
pub enum WardenError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("rate limited, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
    #[error("caller is blocked")]
    Blocked,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl WardenError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            WardenError::BadRequest(_) => ClientCode::BadRequest,
            WardenError::NotAllowed(_) => ClientCode::NotAllowed,
            WardenError::RateLimited { .. } => ClientCode::RateLimited,
            WardenError::Blocked => ClientCode::Blocked,
            WardenError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            WardenError::Internal(_) => ClientCode::Internal,
        }
    }
}
