//! Encoding and decoding of payment request strings.
//!
//! Encode runs `fields → defaults → validate → serialize → gzip → base64` and
//! prefixes the result with `monero-request:<version>:`. Decode splits the
//! string, dispatches on the version and runs the inverse pipeline, then
//! coerces the two counters back to integers.

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::config::{CodecConfig, CoercionPolicy};
use crate::error::{DecodeError, RequestError};
use crate::field::Field;
use crate::json::{self, FieldMap, Value};
use crate::payment_id::{PaymentIdSource, RandomPaymentIds};
use crate::request::{DecodedRequest, NewPaymentRequest, PaymentRequest};
use crate::timestamp::{Clock, StartDate, SystemClock};
use crate::transform;
use crate::version::{PREFIX, WireVersion};

/// Largest magnitude of float the decoder will turn into an integer without losing digits.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

const COUNTERS: [Field; 2] = [Field::DaysPerBillingCycle, Field::NumberOfPayments];

/// Encodes and decodes payment request strings.
///
/// The clock and the payment id source are only consulted when a request is
/// encoded without a start date or payment id. Inject fixed ones for
/// reproducible output. A codec holds no state between calls.
///
/// # Example
///
/// ```rust
/// use monero_request::{Field, NewPaymentRequest, PaymentRequestCodec};
///
/// let codec = PaymentRequestCodec::new();
/// let encoded = codec
///     .encode(&NewPaymentRequest {
///         custom_label: "Rent".into(),
///         sellers_wallet: "4At3X5rvVypTofgmueN9s9QtrzdRe5BueFrskAZi17BoYbhzysozzoMFB6zWnTKdGC6AxEAbEE5czFR3hbEEJbsm4hCeX2S".into(),
///         currency: "XMR".into(),
///         amount: "1.5".into(),
///         days_per_billing_cycle: 30,
///         number_of_payments: 12,
///         ..NewPaymentRequest::default()
///     })
///     .unwrap();
/// assert!(encoded.starts_with("monero-request:1:"));
///
/// let decoded = codec.decode(&encoded).unwrap();
/// assert_eq!(decoded.text(Field::Amount), Some("1.5"));
/// assert_eq!(decoded.integer(Field::NumberOfPayments), Some(12));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PaymentRequestCodec<C = SystemClock, I = RandomPaymentIds> {
    clock: C,
    payment_ids: I,
    config: CodecConfig,
}

impl PaymentRequestCodec {
    /// Creates a codec with the system clock, random payment ids and the
    /// default [`CodecConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C, I> PaymentRequestCodec<C, I> {
    /// Replaces the clock used for default start dates.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PaymentRequestCodec<C2, I> {
        PaymentRequestCodec {
            clock,
            payment_ids: self.payment_ids,
            config: self.config,
        }
    }

    /// Replaces the source of default payment ids.
    #[must_use]
    pub fn with_payment_ids<I2: PaymentIdSource>(
        self,
        payment_ids: I2,
    ) -> PaymentRequestCodec<C, I2> {
        PaymentRequestCodec {
            clock: self.clock,
            payment_ids,
            config: self.config,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<C: Clock, I: PaymentIdSource> PaymentRequestCodec<C, I> {
    /// Fills in defaults, validates every field and encodes the request.
    ///
    /// An empty `payment_id` is replaced with a fresh one and an empty
    /// `start_date` with the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidField`] naming the first field that
    /// fails its rule. Nothing is encoded in that case.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub fn encode(&self, new: &NewPaymentRequest) -> Result<String, RequestError> {
        let mut new = new.clone();
        if new.payment_id.is_empty() {
            new.payment_id = self.payment_ids.next_payment_id().to_string();
        }
        if new.start_date.is_empty() {
            new.start_date = StartDate::from_datetime(self.clock.now()).to_string();
        }
        let request = PaymentRequest::validated(new, self.config.address_policy)?;
        Ok(self.encode_request(&request))
    }

    /// Encodes a record that has already been validated.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn encode_request(&self, request: &PaymentRequest) -> String {
        let version = WireVersion::CURRENT;
        let payload = match version {
            WireVersion::V1 => transform::compress_and_encode(&json::to_string(
                &request.to_field_map(),
            )),
        };
        format!("{PREFIX}:{version}:{payload}")
    }

    /// Decodes a request string into its fields.
    ///
    /// The two counters are coerced to integers. Under
    /// [`CoercionPolicy::Lenient`] a counter that is not an integer becomes
    /// `0`; under [`CoercionPolicy::Strict`] it is an error. Coercion does not
    /// range-check, so `-3` stays `-3` until [`DecodedRequest::validate`].
    /// A counter that is absent or `null` is left as it is.
    ///
    /// # Errors
    ///
    /// - [`RequestError::MalformedInput`] if the string is not three
    ///   colon-delimited parts starting with `monero-request`;
    /// - [`RequestError::UnsupportedVersion`] for an unknown version token;
    /// - [`RequestError::Decode`] if the payload cannot be read back.
    #[cfg_attr(feature = "telemetry", instrument(skip_all, err))]
    pub fn decode(&self, input: &str) -> Result<DecodedRequest, RequestError> {
        let parts: Vec<&str> = input.split(':').collect();
        let [prefix, version, payload] = parts.as_slice() else {
            return Err(RequestError::MalformedInput(format!(
                "expected 3 colon-delimited parts, found {}",
                parts.len()
            )));
        };
        if *prefix != PREFIX {
            return Err(RequestError::MalformedInput(format!(
                "expected prefix {PREFIX:?}, found {prefix:?}"
            )));
        }
        let fields = match version.parse::<WireVersion>()? {
            WireVersion::V1 => self.decode_v1(payload)?,
        };
        Ok(DecodedRequest::new(fields))
    }

    fn decode_v1(&self, payload: &str) -> Result<FieldMap, DecodeError> {
        let text = transform::decode_and_decompress(payload)?;
        let mut fields = json::parse(&text)?;
        for field in COUNTERS {
            let Some(value) = fields.get(field.as_str()) else {
                continue;
            };
            if matches!(value, Value::Null) {
                continue;
            }
            let count = match (coerce_counter(value), self.config.coercion) {
                (Some(count), _) => count,
                (None, CoercionPolicy::Lenient) => {
                    #[cfg(feature = "telemetry")]
                    tracing::warn!(%field, %value, "counter is not an integer, using 0");
                    0
                }
                (None, CoercionPolicy::Strict) => {
                    return Err(DecodeError::Coercion {
                        field,
                        value: value.to_string(),
                    });
                }
            };
            fields.insert(field.as_str(), count);
        }
        Ok(fields)
    }
}

/// Reads a transported counter as an integer.
///
/// The payload parser reads `30` as the float `30.0`, so integral floats are
/// accepted; text is accepted if it is an integer literal.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn coerce_counter(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(n) => Some(*n),
        Value::Number(n) => {
            ((-MAX_EXACT_FLOAT..=MAX_EXACT_FLOAT).contains(n) && n.trunc() == *n)
                .then_some(*n as i64)
        }
        Value::Text(s) => s.parse::<i64>().ok(),
        Value::Null | Value::Bool(_) => None,
    }
}
