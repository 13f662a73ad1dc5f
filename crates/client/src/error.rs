//! Transport and backend error model.

use thiserror::Error;

use rentdesk_core::DomainError;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failures on the way to or from the backend.
///
/// Everything here is recoverable from the caller's point of view:
/// validation and backend errors leave session state intact for retry,
/// and `AuthExpired` means "navigate to login", not "crash".
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network/transport failure (connect, timeout, decode).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Status { status: reqwest::StatusCode },

    /// The backend accepted the call but reported a business failure.
    #[error("backend rejected the request: {0}")]
    Backend(String),

    /// The session cookie is gone and the refresh failed; the caller
    /// must send the user back to login.
    #[error("session expired; sign in again")]
    AuthExpired,

    /// A client-side validation or state error stopped the call before
    /// any network traffic.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
