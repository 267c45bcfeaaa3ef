//! Error types for the texture layer
//!
//! Operation-time failures are returned as values carrying a kind and a
//! human-readable message. Invariant violations that valid descriptors can
//! never trigger are asserted instead and never travel through this type.

use std::fmt;

/// Result type for texture layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Texture layer errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A descriptor, range or payload is malformed or out of bounds
    ArgumentInvalid(String),

    /// The device lacks a feature or format capability the request needs
    Unsupported(String),

    /// The request shape is valid but not handled by this layer
    Unimplemented(String),

    /// The request does not apply to this resource in its current state
    InvalidOperation(String),

    /// The native backend ran out of memory
    OutOfMemory,

    /// Any other native backend failure
    BackendError(String),
}

/// Failure class of an [`Error`], without its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ArgumentInvalid,
    Unsupported,
    Unimplemented,
    InvalidOperation,
    OutOfMemory,
    BackendError,
}

impl Error {
    /// Failure class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArgumentInvalid(_) => ErrorKind::ArgumentInvalid,
            Error::Unsupported(_) => ErrorKind::Unsupported,
            Error::Unimplemented(_) => ErrorKind::Unimplemented,
            Error::InvalidOperation(_) => ErrorKind::InvalidOperation,
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::BackendError(_) => ErrorKind::BackendError,
        }
    }

    /// Human-readable message attached to this error
    pub fn message(&self) -> &str {
        match self {
            Error::ArgumentInvalid(msg)
            | Error::Unsupported(msg)
            | Error::Unimplemented(msg)
            | Error::InvalidOperation(msg)
            | Error::BackendError(msg) => msg,
            Error::OutOfMemory => "Out of GPU memory",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ArgumentInvalid(msg) => write!(f, "Invalid argument: {}", msg),
            Error::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            Error::Unimplemented(msg) => write!(f, "Unimplemented: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
