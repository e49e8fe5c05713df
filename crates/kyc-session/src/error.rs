//! Error taxonomy of the service boundary.

use thiserror::Error;

use crate::service::SessionHandle;
use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or oversized submission. Reported synchronously; recoverable
    /// by re-submitting.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The handle was never issued or the session has been closed.
    #[error("unknown session: {0}")]
    UnknownSession(SessionHandle),

    /// The caller invoked an operation not valid in the current state. A
    /// programming error on the caller's side, always surfaced.
    #[error("operation {operation:?} is not valid in the {from} state")]
    InvalidTransition {
        from: SessionState,
        operation: &'static str,
    },
}
