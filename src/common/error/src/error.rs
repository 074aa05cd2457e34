//! Core error types for mohair.

use thiserror::Error;

/// Result type alias using `MohairError`.
pub type MohairResult<T> = std::result::Result<T, MohairError>;

/// Core error type for mohair operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MohairError {
    /// An operation's precondition on prior setup was violated.
    #[error("InvalidState: {0}")]
    InvalidState(String),

    /// A partition was encoded (or its schema requested) before a schema was set.
    #[error("MissingSchema: {0}")]
    MissingSchema(String),

    /// A partition was encoded without a slice collection.
    #[error("EmptyPartition: {0}")]
    EmptyPartition(String),

    /// Invalid value provided.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// No translator is registered for a table descriptor.
    #[error("NotImplemented: {0}")]
    NotImplemented(String),

    /// An extension payload has an unexpected type or shape.
    #[error("PayloadError: {0}")]
    PayloadError(String),

    /// IO error.
    #[error("IoError: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error.
    #[error("ArrowError: {0}")]
    ArrowError(#[from] arrow_schema::ArrowError),

    /// JSON serialization error.
    #[error("SerdeJsonError: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Protobuf decoding error.
    #[error("DecodeError: {0}")]
    DecodeError(#[from] prost::DecodeError),
}

impl MohairError {
    /// Create a new `InvalidState` error.
    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a new `MissingSchema` error.
    pub fn missing_schema<S: Into<String>>(msg: S) -> Self {
        Self::MissingSchema(msg.into())
    }

    /// Create a new `EmptyPartition` error.
    pub fn empty_partition<S: Into<String>>(msg: S) -> Self {
        Self::EmptyPartition(msg.into())
    }

    /// Create a new `ValueError`.
    pub fn value_error<S: Into<String>>(msg: S) -> Self {
        Self::ValueError(msg.into())
    }

    /// Create a new `NotImplemented` error.
    pub fn not_implemented<S: Into<String>>(msg: S) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Create a new `PayloadError`.
    pub fn payload<S: Into<String>>(msg: S) -> Self {
        Self::PayloadError(msg.into())
    }
}

/// Ensure a condition holds, returning early with an error if not.
///
/// `ensure!(cond, msg)` returns `InvalidState(msg)`;
/// `ensure!(cond, Variant: "fmt", args..)` returns the named variant with a
/// formatted message.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident: $($msg:tt)*) => {
        if !$cond {
            return Err($crate::MohairError::$variant(format!($($msg)*)));
        }
    };
    ($cond:expr, $msg:expr) => {
        if !$cond {
            return Err($crate::MohairError::InvalidState($msg.to_string()));
        }
    };
}

/// Return early with a `ValueError`.
#[macro_export]
macro_rules! value_err {
    ($($arg:tt)*) => {
        return Err($crate::MohairError::ValueError(format!($($arg)*)))
    };
}
