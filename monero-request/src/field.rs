//! Names of the fields carried by a payment request.

use std::fmt::{self, Display, Formatter};

/// One of the nine fields of a payment request.
///
/// The [`as_str`](Field::as_str) form is the key used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Free-form label shown to the payer.
    CustomLabel,
    /// Address of the wallet receiving the funds.
    SellersWallet,
    /// Currency the amount is denominated in.
    Currency,
    /// Decimal amount, kept as text.
    Amount,
    /// 16-character lowercase hex correlation token.
    PaymentId,
    /// Truncated RFC3339 start of the billing schedule.
    StartDate,
    /// Length of one billing cycle in days.
    DaysPerBillingCycle,
    /// How many payments the schedule contains.
    NumberOfPayments,
    /// URL the payer polls for changes to the request.
    ChangeIndicatorUrl,
}

impl Field {
    /// Every field, in the order the encoder writes them.
    pub const ALL: [Self; 9] = [
        Self::CustomLabel,
        Self::SellersWallet,
        Self::Currency,
        Self::Amount,
        Self::PaymentId,
        Self::StartDate,
        Self::DaysPerBillingCycle,
        Self::NumberOfPayments,
        Self::ChangeIndicatorUrl,
    ];

    /// Returns the wire key of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CustomLabel => "custom_label",
            Self::SellersWallet => "sellers_wallet",
            Self::Currency => "currency",
            Self::Amount => "amount",
            Self::PaymentId => "payment_id",
            Self::StartDate => "start_date",
            Self::DaysPerBillingCycle => "days_per_billing_cycle",
            Self::NumberOfPayments => "number_of_payments",
            Self::ChangeIndicatorUrl => "change_indicator_url",
        }
    }

    /// Looks a field up by its wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
