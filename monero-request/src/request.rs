//! The payment request record in its three shapes.
//!
//! - [`NewPaymentRequest`]: what a caller hands to the encoder. Raw text and
//!   integers, with empty `payment_id` / `start_date` meaning "generate one".
//! - [`PaymentRequest`]: a record that passed every field rule.
//! - [`DecodedRequest`]: what the decoder returns. Values are typed only as far
//!   as the payload parser could infer; call [`DecodedRequest::validate`] for
//!   a [`PaymentRequest`].

use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::RequestError;
use crate::field::Field;
use crate::json::{FieldMap, Value};
use crate::payment_id::PaymentId;
use crate::timestamp::StartDate;
use crate::validate::{self, AddressPolicy};

/// Field values supplied by the creator of a payment request.
///
/// # Example
///
/// ```rust
/// use monero_request::NewPaymentRequest;
///
/// let new = NewPaymentRequest {
///     custom_label: "Coffee subscription".into(),
///     sellers_wallet: "4At3X5rvVypTofgmueN9s9QtrzdRe5BueFrskAZi17BoYbhzysozzoMFB6zWnTKdGC6AxEAbEE5czFR3hbEEJbsm4hCeX2S".into(),
///     currency: "USD".into(),
///     amount: "25.99".into(),
///     days_per_billing_cycle: 30,
///     number_of_payments: 12,
///     ..NewPaymentRequest::default()
/// };
/// assert!(new.payment_id.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewPaymentRequest {
    /// Label shown to the payer.
    pub custom_label: String,
    /// Address receiving the funds.
    pub sellers_wallet: String,
    /// Currency code, `XMR` or `USD`.
    pub currency: String,
    /// Decimal amount using digits, `,` and `.` only.
    pub amount: String,
    /// 16 lowercase hex characters, or empty to generate one.
    pub payment_id: String,
    /// Truncated RFC3339 timestamp, or empty for "now".
    pub start_date: String,
    /// Days between payments.
    pub days_per_billing_cycle: i64,
    /// Number of payments in the schedule.
    pub number_of_payments: i64,
    /// Empty, or a URL with a scheme and a host.
    pub change_indicator_url: String,
}

/// A payment request whose every field satisfies its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Label shown to the payer.
    pub custom_label: String,
    /// Address receiving the funds.
    pub sellers_wallet: String,
    /// Currency the amount is denominated in.
    pub currency: Currency,
    /// Decimal amount, never parsed as a number.
    pub amount: String,
    /// Correlation token for incoming transfers.
    pub payment_id: PaymentId,
    /// Start of the billing schedule.
    pub start_date: StartDate,
    /// Days between payments; never negative.
    pub days_per_billing_cycle: i64,
    /// Number of payments in the schedule; never negative.
    pub number_of_payments: i64,
    /// Where the payer can check for changes; may be empty.
    pub change_indicator_url: String,
}

const LABEL_RULE: &str = "must be text";
const WALLET_RULE: &str = "must be a Monero address of an allowed form";
const CURRENCY_RULE: &str = "must be one of XMR, USD";
const AMOUNT_RULE: &str = "may only contain digits, ',' and '.'";
const PAYMENT_ID_RULE: &str = "must be exactly 16 lowercase hex characters";
const START_DATE_RULE: &str = "must be a yyyy-MM-ddTHH:mm:ss.SSSZ timestamp";
const START_DATE_MISSING: &str = "must not be empty once defaults are applied";
const COUNTER_RULE: &str = "must be an integer no lower than 0";
const URL_RULE: &str = "must be empty or a URL with a scheme and a host";

fn require(ok: bool, field: Field, rule: &'static str) -> Result<(), RequestError> {
    if ok {
        Ok(())
    } else {
        Err(RequestError::invalid(field, rule))
    }
}

impl PaymentRequest {
    /// Checks every field of `new` in wire order and builds the typed record.
    ///
    /// Empty `payment_id` and `start_date` are not filled in here; the codec
    /// does that before calling this. An empty `start_date` passes
    /// [`validate::is_start_date`] but still fails here, with its own reason,
    /// because a [`PaymentRequest`] always has a concrete start date.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidField`] for the first field that fails.
    pub fn validated(new: NewPaymentRequest, policy: AddressPolicy) -> Result<Self, RequestError> {
        require(
            validate::is_label(&new.custom_label),
            Field::CustomLabel,
            LABEL_RULE,
        )?;
        require(
            validate::is_wallet(&new.sellers_wallet, policy),
            Field::SellersWallet,
            WALLET_RULE,
        )?;
        require(
            validate::is_currency(&new.currency),
            Field::Currency,
            CURRENCY_RULE,
        )?;
        let currency = new
            .currency
            .parse::<Currency>()
            .map_err(|_| RequestError::invalid(Field::Currency, CURRENCY_RULE))?;
        require(validate::is_amount(&new.amount), Field::Amount, AMOUNT_RULE)?;
        require(
            validate::is_payment_id(&new.payment_id),
            Field::PaymentId,
            PAYMENT_ID_RULE,
        )?;
        let payment_id = new
            .payment_id
            .parse::<PaymentId>()
            .map_err(|_| RequestError::invalid(Field::PaymentId, PAYMENT_ID_RULE))?;
        require(
            validate::is_start_date(&new.start_date),
            Field::StartDate,
            START_DATE_RULE,
        )?;
        if new.start_date.is_empty() {
            return Err(RequestError::invalid(Field::StartDate, START_DATE_MISSING));
        }
        let start_date = new
            .start_date
            .parse::<StartDate>()
            .map_err(|_| RequestError::invalid(Field::StartDate, START_DATE_RULE))?;
        require(
            validate::is_days_per_billing_cycle(new.days_per_billing_cycle),
            Field::DaysPerBillingCycle,
            COUNTER_RULE,
        )?;
        require(
            validate::is_number_of_payments(new.number_of_payments),
            Field::NumberOfPayments,
            COUNTER_RULE,
        )?;
        require(
            validate::is_change_indicator_url(&new.change_indicator_url),
            Field::ChangeIndicatorUrl,
            URL_RULE,
        )?;

        Ok(Self {
            custom_label: new.custom_label,
            sellers_wallet: new.sellers_wallet,
            currency,
            amount: new.amount,
            payment_id,
            start_date,
            days_per_billing_cycle: new.days_per_billing_cycle,
            number_of_payments: new.number_of_payments,
            change_indicator_url: new.change_indicator_url,
        })
    }

    /// Lays the record out as the flat map that goes on the wire.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        Field::ALL
            .into_iter()
            .map(|field| {
                let value = match field {
                    Field::CustomLabel => Value::from(self.custom_label.as_str()),
                    Field::SellersWallet => Value::from(self.sellers_wallet.as_str()),
                    Field::Currency => Value::from(self.currency.as_str()),
                    Field::Amount => Value::from(self.amount.as_str()),
                    Field::PaymentId => Value::from(self.payment_id.as_str()),
                    Field::StartDate => Value::from(self.start_date.to_string()),
                    Field::DaysPerBillingCycle => Value::from(self.days_per_billing_cycle),
                    Field::NumberOfPayments => Value::from(self.number_of_payments),
                    Field::ChangeIndicatorUrl => Value::from(self.change_indicator_url.as_str()),
                };
                (field.as_str(), value)
            })
            .collect()
    }
}

/// The fields read back from a request string.
///
/// Counters have been coerced to [`Value::Integer`]; everything else is as the
/// payload parser inferred it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedRequest(FieldMap);

impl DecodedRequest {
    pub(crate) const fn new(fields: FieldMap) -> Self {
        Self(fields)
    }

    /// Returns the raw field map.
    #[must_use]
    pub const fn fields(&self) -> &FieldMap {
        &self.0
    }

    /// Consumes the request, returning the raw field map.
    #[must_use]
    pub fn into_fields(self) -> FieldMap {
        self.0
    }

    /// Returns the value of `field`, if present.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.as_str())
    }

    /// Returns `field` if it was decoded as text.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(Value::as_text)
    }

    /// Returns `field` if it holds an integer.
    #[must_use]
    pub fn integer(&self, field: Field) -> Option<i64> {
        self.get(field).and_then(Value::as_integer)
    }

    /// Re-runs every field rule over the decoded values.
    ///
    /// A missing field, or one of the wrong type, fails like an invalid one.
    /// So does an empty `start_date`: the typed record needs a concrete date.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidField`] for the first field that fails.
    pub fn validate(&self, policy: AddressPolicy) -> Result<PaymentRequest, RequestError> {
        let text = |field: Field, rule: &'static str| {
            self.text(field)
                .map(str::to_owned)
                .ok_or_else(|| RequestError::invalid(field, rule))
        };
        let integer = |field: Field| {
            self.integer(field)
                .ok_or_else(|| RequestError::invalid(field, COUNTER_RULE))
        };
        let new = NewPaymentRequest {
            custom_label: text(Field::CustomLabel, LABEL_RULE)?,
            sellers_wallet: text(Field::SellersWallet, WALLET_RULE)?,
            currency: text(Field::Currency, CURRENCY_RULE)?,
            amount: text(Field::Amount, AMOUNT_RULE)?,
            payment_id: text(Field::PaymentId, PAYMENT_ID_RULE)?,
            start_date: text(Field::StartDate, START_DATE_RULE)?,
            days_per_billing_cycle: integer(Field::DaysPerBillingCycle)?,
            number_of_payments: integer(Field::NumberOfPayments)?,
            change_indicator_url: text(Field::ChangeIndicatorUrl, URL_RULE)?,
        };
        PaymentRequest::validated(new, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const WALLET: &str = "4At3X5rvVypTofgmueN9s9QtrzdRe5BueFrskAZi17BoYbhzysozzoMFB6zWnTKdGC6AxEAbEE5czFR3hbEEJbsm4hCeX2S";

    fn new_request() -> NewPaymentRequest {
        NewPaymentRequest {
            custom_label: "Unlabeled Monero Payment Request".into(),
            sellers_wallet: WALLET.into(),
            currency: "USD".into(),
            amount: "25.99".into(),
            payment_id: "dbe976658bb5e55f".into(),
            start_date: "2024-02-20T09:59:58.030Z".into(),
            days_per_billing_cycle: 30,
            number_of_payments: 1,
            change_indicator_url: String::new(),
        }
    }

    fn failing_field(new: NewPaymentRequest) -> Field {
        match PaymentRequest::validated(new, AddressPolicy::PRIMARY) {
            Err(RequestError::InvalidField { field, .. }) => field,
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_validated_builds_typed_record() {
        let request = PaymentRequest::validated(new_request(), AddressPolicy::PRIMARY).unwrap();
        assert_eq!(request.currency, Currency::Usd);
        assert_eq!(request.payment_id.as_str(), "dbe976658bb5e55f");
        assert_eq!(request.start_date.to_string(), "2024-02-20T09:59:58.030Z");
    }

    #[test]
    fn test_validated_names_failing_field() {
        let mut new = new_request();
        new.sellers_wallet.pop();
        assert_eq!(failing_field(new), Field::SellersWallet);

        let mut new = new_request();
        new.currency = "EUR".into();
        assert_eq!(failing_field(new), Field::Currency);

        let mut new = new_request();
        new.amount = "-5".into();
        assert_eq!(failing_field(new), Field::Amount);

        let mut new = new_request();
        new.payment_id = "DBE976658BB5E55F".into();
        assert_eq!(failing_field(new), Field::PaymentId);

        let mut new = new_request();
        new.start_date = "2024-02-20".into();
        assert_eq!(failing_field(new), Field::StartDate);

        let mut new = new_request();
        new.days_per_billing_cycle = -1;
        assert_eq!(failing_field(new), Field::DaysPerBillingCycle);

        let mut new = new_request();
        new.number_of_payments = -1;
        assert_eq!(failing_field(new), Field::NumberOfPayments);

        let mut new = new_request();
        new.change_indicator_url = "nowhere".into();
        assert_eq!(failing_field(new), Field::ChangeIndicatorUrl);
    }

    #[test]
    fn test_validated_reports_first_failure_in_wire_order() {
        let mut new = new_request();
        new.currency = "EUR".into();
        new.amount = "abc".into();
        assert_eq!(failing_field(new), Field::Currency);
    }

    #[test]
    fn test_field_map_layout() {
        let request = PaymentRequest::validated(new_request(), AddressPolicy::PRIMARY).unwrap();
        let map = request.to_field_map();
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        let expected: Vec<&str> = Field::ALL.iter().map(Field::as_str).collect();
        assert_eq!(keys, expected);
        assert_eq!(map.get("days_per_billing_cycle"), Some(&Value::Integer(30)));
        assert_eq!(map.get("currency"), Some(&Value::Text("USD".into())));
    }

    #[test]
    fn test_decoded_validate() {
        let request = PaymentRequest::validated(new_request(), AddressPolicy::PRIMARY).unwrap();
        let decoded = DecodedRequest::new(request.to_field_map());
        assert_eq!(decoded.validate(AddressPolicy::PRIMARY).unwrap(), request);
        assert_eq!(decoded.text(Field::Amount), Some("25.99"));
        assert_eq!(decoded.integer(Field::NumberOfPayments), Some(1));
    }

    #[test]
    fn test_decoded_validate_rejects_missing_and_mistyped() {
        let mut map = PaymentRequest::validated(new_request(), AddressPolicy::PRIMARY)
            .unwrap()
            .to_field_map();
        map.insert("amount", 25_i64);
        let err = DecodedRequest::new(map).validate(AddressPolicy::PRIMARY).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField);
        assert!(matches!(
            err,
            RequestError::InvalidField {
                field: Field::Amount,
                ..
            }
        ));

        let mut map = PaymentRequest::validated(new_request(), AddressPolicy::PRIMARY)
            .unwrap()
            .to_field_map();
        map.insert("start_date", "");
        let err = DecodedRequest::new(map).validate(AddressPolicy::PRIMARY).unwrap_err();
        assert!(matches!(
            err,
            RequestError::InvalidField {
                field: Field::StartDate,
                reason: START_DATE_MISSING,
            }
        ));

        let empty = DecodedRequest::new(FieldMap::new());
        assert!(matches!(
            empty.validate(AddressPolicy::PRIMARY),
            Err(RequestError::InvalidField {
                field: Field::CustomLabel,
                ..
            })
        ));
    }
}
