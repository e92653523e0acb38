//! Error types for encoding and decoding payment requests.

use std::string::FromUtf8Error;

use crate::field::Field;
use crate::json::SyntaxError;

/// Errors returned by [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// A value handed to the encoder failed its field rule.
    #[error("{field} is invalid: {reason}")]
    InvalidField {
        /// The field that failed.
        field: Field,
        /// What the field must look like.
        reason: &'static str,
    },

    /// The request string is not `monero-request:<version>:<payload>`.
    #[error("malformed payment request: {0}")]
    MalformedInput(String),

    /// The version token has no decoding pipeline.
    #[error("unsupported payment request version {0:?}")]
    UnsupportedVersion(String),

    /// The payload could not be turned back into fields.
    #[error("failed to decode payment request: {0}")]
    Decode(#[from] DecodeError),
}

impl RequestError {
    /// Returns the machine-readable category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidField { .. } => ErrorKind::InvalidField,
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Self::Decode(_) => ErrorKind::DecodeFailure,
        }
    }

    pub(crate) const fn invalid(field: Field, reason: &'static str) -> Self {
        Self::InvalidField { field, reason }
    }
}

/// Failures while turning a version 1 payload back into fields.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is not padded standard base64.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a complete gzip stream.
    #[error("gzip decompression error: {0}")]
    Decompress(#[source] std::io::Error),

    /// The decompressed bytes are not UTF-8.
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// The decompressed text is not a flat JSON object.
    #[error("payload syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A counter could not be read as a non-negative integer.
    ///
    /// Only raised under [`CoercionPolicy::Strict`](crate::CoercionPolicy::Strict).
    #[error("{field} is not a non-negative integer: {value}")]
    Coercion {
        /// The field that failed.
        field: Field,
        /// The value as it appeared in the payload.
        value: String,
    },
}

/// Machine-readable error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RequestError::InvalidField`].
    InvalidField,
    /// See [`RequestError::MalformedInput`].
    MalformedInput,
    /// See [`RequestError::UnsupportedVersion`].
    UnsupportedVersion,
    /// See [`RequestError::Decode`].
    DecodeFailure,
}

impl ErrorKind {
    /// Returns the `snake_case` code for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidField => "invalid_field",
            Self::MalformedInput => "malformed_input",
            Self::UnsupportedVersion => "unsupported_version",
            Self::DecodeFailure => "decode_failure",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
