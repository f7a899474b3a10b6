//! RPC status codes and the error type surfaced to callers.
//!
//! Every failure in the wire layer is expressed as a [`StorageError`]
//! carrying an [`RpcCode`] and a message. Backend failures and translation
//! failures are converted into this type verbatim at the dispatch boundary;
//! nothing is remapped or swallowed below it.

use std::fmt;

/// Message for a write stream whose first frame is missing its data payload
/// or its object spec.
pub const UNSUPPORTED_WRITE_OPERATION: &str = "unsupported write operation";

// ---------------------------------------------------------------------------
// RpcCode
// ---------------------------------------------------------------------------

/// The subset of canonical RPC status codes this service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcCode {
    /// A request argument was malformed or violated the protocol.
    InvalidArgument,
    /// A referenced bucket or object does not exist.
    NotFound,
    /// The resource being created already exists.
    AlreadyExists,
    /// The request is valid but the system state does not allow it.
    FailedPrecondition,
    /// The method exists in the protocol but is not served here.
    Unimplemented,
    /// An internal invariant was violated.
    Internal,
    /// Anything that cannot be classified more precisely.
    Unknown,
}

impl RpcCode {
    /// Canonical status name, as spelled in the RPC status specification.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// HTTP status code used when the status is carried over HTTP.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidArgument | Self::FailedPrecondition => 400,
            Self::NotFound => 404,
            Self::AlreadyExists => 409,
            Self::Unimplemented => 501,
            Self::Internal | Self::Unknown => 500,
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StorageError
// ---------------------------------------------------------------------------

/// An RPC-surface error: a status code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct StorageError {
    /// The status code reported to the caller.
    pub code: RpcCode,
    /// The message reported to the caller.
    pub message: String,
}

impl StorageError {
    /// Create an error with an explicit code and message.
    #[must_use]
    pub fn with_message(code: RpcCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The fixed protocol-violation error for a write stream whose first
    /// frame lacks either its data payload or its object spec.
    #[must_use]
    pub fn unsupported_write_operation() -> Self {
        Self::with_message(RpcCode::InvalidArgument, UNSUPPORTED_WRITE_OPERATION)
    }

    /// Standard response for a protocol method this service does not serve.
    #[must_use]
    pub fn unimplemented(method: &str) -> Self {
        Self::with_message(RpcCode::Unimplemented, format!("{method} is not implemented"))
    }

    /// An invalid-argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(RpcCode::InvalidArgument, message)
    }

    /// A not-found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(RpcCode::NotFound, message)
    }

    /// An internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(RpcCode::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_build_fixed_unsupported_write_error() {
        let err = StorageError::unsupported_write_operation();
        assert_eq!(err.code, RpcCode::InvalidArgument);
        assert_eq!(err.message, "unsupported write operation");
    }

    #[test]
    fn test_should_display_code_and_message() {
        let err = StorageError::not_found("bucket b not found");
        assert_eq!(err.to_string(), "NOT_FOUND: bucket b not found");
    }

    #[test]
    fn test_should_map_codes_to_http_statuses() {
        assert_eq!(RpcCode::InvalidArgument.http_status(), 400);
        assert_eq!(RpcCode::NotFound.http_status(), 404);
        assert_eq!(RpcCode::AlreadyExists.http_status(), 409);
        assert_eq!(RpcCode::Unimplemented.http_status(), 501);
        assert_eq!(RpcCode::Internal.http_status(), 500);
        assert_eq!(RpcCode::Unknown.http_status(), 500);
    }

    #[test]
    fn test_should_name_unimplemented_method() {
        let err = StorageError::unimplemented("ReadObject");
        assert_eq!(err.code, RpcCode::Unimplemented);
        assert!(err.message.contains("ReadObject"));
    }
}
