//! Payment identifiers.
//!
//! A payment id lets the merchant correlate incoming transfers with the request
//! that asked for them. It is not a secret, so it only has to avoid
//! collisions in practice.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::RngExt;
use rand::rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a payment id in hex characters.
pub const PAYMENT_ID_LEN: usize = 16;

/// A 16-character lowercase hexadecimal payment id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentId(String);

impl PaymentId {
    /// Builds a payment id from eight raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; PAYMENT_ID_LEN / 2]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Returns the id as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The text is not 16 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected 16 lowercase hex characters, got {0:?}")]
pub struct InvalidPaymentId(pub String);

impl FromStr for PaymentId {
    type Err = InvalidPaymentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == PAYMENT_ID_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if well_formed {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidPaymentId(s.to_owned()))
        }
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PaymentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PaymentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PaymentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of payment ids for requests created without one.
pub trait PaymentIdSource {
    /// Produces a fresh payment id.
    fn next_payment_id(&self) -> PaymentId;
}

/// Draws payment ids from the thread-local random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPaymentIds;

impl PaymentIdSource for RandomPaymentIds {
    fn next_payment_id(&self) -> PaymentId {
        let bytes: [u8; PAYMENT_ID_LEN / 2] = rng().random();
        PaymentId::from_bytes(bytes)
    }
}

/// Hands out the same payment id every time.
#[derive(Debug, Clone)]
pub struct FixedPaymentId(pub PaymentId);

impl PaymentIdSource for FixedPaymentId {
    fn next_payment_id(&self) -> PaymentId {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_id_parse() {
        assert!("dbe976658bb5e55f".parse::<PaymentId>().is_ok());
        assert!("0123456789abcdef".parse::<PaymentId>().is_ok());
        assert!("dbe976658bb5e55".parse::<PaymentId>().is_err());
        assert!("dbe976658bb5e55f0".parse::<PaymentId>().is_err());
        assert!("DBE976658BB5E55F".parse::<PaymentId>().is_err());
        assert!("dbe976658bb5e55g".parse::<PaymentId>().is_err());
        assert!("".parse::<PaymentId>().is_err());
    }

    #[test]
    fn test_payment_id_from_bytes() {
        let id = PaymentId::from_bytes([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x0a, 0xff]);
        assert_eq!(id.as_str(), "deadbeef00010aff");
    }

    #[test]
    fn test_random_payment_ids_are_well_formed() {
        let source = RandomPaymentIds;
        let first = source.next_payment_id();
        let second = source.next_payment_id();
        assert!(first.as_str().parse::<PaymentId>().is_ok());
        assert!(second.as_str().parse::<PaymentId>().is_ok());
        assert_ne!(first, second);
    }
}
