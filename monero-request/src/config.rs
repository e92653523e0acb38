//! Codec configuration.
//!
//! Everything a [`PaymentRequestCodec`](crate::PaymentRequestCodec) can be
//! tuned with, in one serde-friendly struct so callers can load it from
//! whatever format they already use.

use serde::{Deserialize, Serialize};

use crate::validate::AddressPolicy;

/// What the decoder does when a counter is not a non-negative integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionPolicy {
    /// Replace the value with `0` and carry on.
    #[default]
    Lenient,
    /// Fail with [`DecodeError::Coercion`](crate::DecodeError::Coercion).
    Strict,
}

/// Settings for a [`PaymentRequestCodec`](crate::PaymentRequestCodec).
///
/// The defaults accept standard and integrated addresses but not
/// subaddresses, and decode counters leniently.
///
/// # Example
///
/// ```rust
/// use monero_request::config::{CodecConfig, CoercionPolicy};
/// use monero_request::validate::AddressPolicy;
///
/// let config = CodecConfig {
///     address_policy: AddressPolicy::ALL,
///     coercion: CoercionPolicy::Strict,
/// };
/// assert_ne!(config, CodecConfig::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CodecConfig {
    /// Wallet address forms the encoder accepts.
    pub address_policy: AddressPolicy,
    /// How the decoder reads `days_per_billing_cycle` and `number_of_payments`.
    pub coercion: CoercionPolicy,
}
