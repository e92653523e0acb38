//! Wire format versions.
//!
//! A request string is `monero-request:<version>:<payload>`. The version token
//! selects how the payload is serialized and compressed, so future schemes can
//! live next to the current one. A decoder rejects tokens it does not know
//! instead of guessing.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::RequestError;

/// The first colon-delimited part of every request string.
pub const PREFIX: &str = "monero-request";

/// A known wire format version.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum WireVersion {
    /// Flat JSON, gzip, padded standard base64.
    #[default]
    V1,
}

impl WireVersion {
    /// The version new requests are written in.
    pub const CURRENT: Self = Self::V1;

    /// Returns the token written between the prefix and the payload.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1",
        }
    }
}

impl Display for WireVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WireVersion {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self::V1),
            other => Err(RequestError::UnsupportedVersion(other.to_owned())),
        }
    }
}
