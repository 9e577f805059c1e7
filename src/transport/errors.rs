//! Transport error types
//!
//! Two classes of failure reach the engine:
//! - call-level: the request never produced a response (DNS, timeout,
//!   connection reset). Never retried by the engine.
//! - protocol-level: the gateway answered with a non-success status. The
//!   numeric code is preserved so callers can distinguish 404/403/409/412/400
//!   without string matching.

use thiserror::Error;

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors surfaced by a `Transport` implementation
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The call itself failed before a response arrived
    #[error("transport call failed: {0}")]
    Call(String),

    /// The gateway returned a non-success status code
    #[error("gateway returned status {status}: {body}")]
    Protocol {
        /// HTTP status code (400, 403, 404, 409, 412, ...)
        status: u16,
        /// Raw response body, kept for diagnostics
        body: String,
    },
}

impl TransportError {
    /// Creates a call-level error
    pub fn call(reason: impl Into<String>) -> Self {
        TransportError::Call(reason.into())
    }

    /// Creates a protocol-level error
    pub fn protocol(status: u16, body: impl Into<String>) -> Self {
        TransportError::Protocol {
            status,
            body: body.into(),
        }
    }

    /// Returns true for protocol-level errors
    pub fn is_protocol(&self) -> bool {
        matches!(self, TransportError::Protocol { .. })
    }

    /// Returns the status code for protocol-level errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Protocol { status, .. } => Some(*status),
            TransportError::Call(_) => None,
        }
    }

    /// Returns the raw response body for protocol-level errors
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Protocol { body, .. } => Some(body),
            TransportError::Call(_) => None,
        }
    }

    /// Returns true for a 400 Bad Request response
    pub fn is_bad_request(&self) -> bool {
        self.status_code() == Some(400)
    }

    /// Returns true for a 403 Forbidden response
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Returns true for a 404 Not Found response
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// Returns true for a 409 Conflict response
    pub fn is_conflict(&self) -> bool {
        self.status_code() == Some(409)
    }

    /// Returns true for a 412 Precondition Failed response
    pub fn is_precondition_failed(&self) -> bool {
        self.status_code() == Some(412)
    }
}
