use thiserror::Error;

use crate::domain::Domain;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while packing or unpacking short codes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A short code failed its length, charset or range preconditions
    #[error("Invalid code {code:?}: {reason}")]
    InvalidCode { code: String, reason: String },

    /// A packed value does not fit the domain's bit layout
    #[error("Invalid {domain} value {value}: {reason}")]
    InvalidValue {
        domain: Domain,
        value: i32,
        reason: String,
    },

    /// Unrecognised domain name
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),
}

impl CodecError {
    /// Create an invalid code error
    pub fn invalid_code(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCode {
            code: code.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(domain: Domain, value: i32, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            domain,
            value,
            reason: reason.into(),
        }
    }
}
