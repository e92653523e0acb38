//! Currencies a payment request can be denominated in.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported currency code.
///
/// Serialized as the uppercase ISO-style code (`"XMR"`, `"USD"`). Adding a
/// currency means adding a variant here; the validator has no list of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Monero.
    Xmr,
    /// United States dollar.
    Usd,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 2] = [Self::Xmr, Self::Usd];

    /// Returns the currency code as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Xmr => "XMR",
            Self::Usd => "USD",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The text was not one of the supported currency codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code: {0:?}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    /// Matches the code exactly; `"xmr"` is not `XMR`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.as_str() == s)
            .ok_or_else(|| UnknownCurrency(s.to_owned()))
    }
}
