#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Monero payment requests.
//!
//! A payment request tells a payer where to send Monero, how much, in which
//! currency and on what schedule. This crate turns the nine fields of a
//! request into a compact string and back:
//!
//! ```text
//! monero-request:1:H4sIAAAAAAAA...
//! ```
//!
//! The string is the prefix `monero-request`, a version token, and the fields
//! as a flat JSON object, gzipped and base64-encoded. Nothing is signed: the
//! string carries terms, not proof of who wrote them.
//!
//! # Modules
//!
//! - [`codec`] - The encode and decode pipelines
//! - [`config`] - Address policy and counter coercion settings
//! - [`currency`] - Supported currency codes
//! - [`field`] - Field names and wire keys
//! - [`json`] - Flat JSON objects of primitive values
//! - [`payment_id`] - Payment ids and where new ones come from
//! - [`request`] - The request record as supplied, validated and decoded
//! - [`timestamp`] - Truncated RFC3339 start dates and clocks
//! - [`transform`] - Gzip and base64
//! - [`validate`] - One rule per field
//! - [`version`] - Wire format versions
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for debugging and monitoring

pub mod codec;
pub mod config;
pub mod currency;
pub mod error;
pub mod field;
pub mod json;
pub mod payment_id;
pub mod request;
pub mod timestamp;
pub mod transform;
pub mod validate;
pub mod version;

pub use codec::PaymentRequestCodec;
pub use config::{CodecConfig, CoercionPolicy};
pub use currency::Currency;
pub use error::{DecodeError, ErrorKind, RequestError};
pub use field::Field;
pub use payment_id::PaymentId;
pub use request::{DecodedRequest, NewPaymentRequest, PaymentRequest};
pub use timestamp::StartDate;
pub use validate::AddressPolicy;

/// Encodes a payment request with the default [`PaymentRequestCodec`].
///
/// # Errors
///
/// Returns [`RequestError::InvalidField`] naming the first field that fails
/// its rule.
pub fn encode(new: &NewPaymentRequest) -> Result<String, RequestError> {
    PaymentRequestCodec::new().encode(new)
}

/// Decodes a payment request string with the default [`PaymentRequestCodec`].
///
/// # Errors
///
/// Returns [`RequestError::MalformedInput`], [`RequestError::UnsupportedVersion`]
/// or [`RequestError::Decode`] depending on where decoding stopped.
pub fn decode(request: &str) -> Result<DecodedRequest, RequestError> {
    PaymentRequestCodec::new().decode(request)
}
