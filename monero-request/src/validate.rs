//! Field-level validation rules.
//!
//! One predicate per payment request field. Every predicate is pure and
//! returns `false` instead of failing; the codec turns a `false` into
//! [`RequestError::InvalidField`](crate::RequestError::InvalidField) naming the
//! field.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::currency::Currency;
use crate::payment_id::PaymentId;
use crate::timestamp::StartDate;

/// Length of a standard address or a subaddress.
pub const STANDARD_ADDRESS_LEN: usize = 95;

/// Length of an integrated address (a standard address with an embedded payment id).
pub const INTEGRATED_ADDRESS_LEN: usize = 106;

/// The 58 symbols a Monero address is written in: no `0`, `I`, `O` or `l`.
const ADDRESS_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9,.]+$").expect("valid regex"));

/// Which wallet address forms a caller is willing to accept.
///
/// Standard and integrated addresses both start with `4` and differ only in
/// length; subaddresses start with `8` and share the standard length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressPolicy {
    /// Accept 95-character addresses starting with `4`.
    pub standard: bool,
    /// Accept 106-character addresses starting with `4`.
    pub integrated: bool,
    /// Accept 95-character addresses starting with `8`.
    pub subaddress: bool,
}

impl AddressPolicy {
    /// Accepts every address form.
    pub const ALL: Self = Self {
        standard: true,
        integrated: true,
        subaddress: true,
    };

    /// Accepts standard and integrated addresses, but not subaddresses.
    pub const PRIMARY: Self = Self {
        standard: true,
        integrated: true,
        subaddress: false,
    };

    fn allows_first_char(self, c: char) -> bool {
        match c {
            '4' => self.standard || self.integrated,
            '8' => self.subaddress,
            _ => false,
        }
    }

    fn allows_len(self, len: usize) -> bool {
        match len {
            STANDARD_ADDRESS_LEN => self.standard || self.subaddress,
            INTEGRATED_ADDRESS_LEN => self.integrated,
            _ => false,
        }
    }
}

impl Default for AddressPolicy {
    fn default() -> Self {
        Self::PRIMARY
    }
}

/// Any text is a valid label.
#[must_use]
pub const fn is_label(_label: &str) -> bool {
    true
}

/// Checks that `currency` is one of the [`Currency`] codes.
#[must_use]
pub fn is_currency(currency: &str) -> bool {
    currency.parse::<Currency>().is_ok()
}

/// Checks the shape of a wallet address against the forms `policy` allows.
///
/// Only the leading character, the length and the alphabet are checked; the
/// checksum and the embedded keys are not.
#[must_use]
pub fn is_wallet(address: &str, policy: AddressPolicy) -> bool {
    let Some(first) = address.chars().next() else {
        return false;
    };
    policy.allows_first_char(first)
        && policy.allows_len(address.len())
        && address.chars().all(|c| ADDRESS_ALPHABET.contains(c))
}

/// Checks for exactly 16 lowercase hex characters.
#[must_use]
pub fn is_payment_id(payment_id: &str) -> bool {
    payment_id.parse::<PaymentId>().is_ok()
}

/// Accepts an empty string or a truncated RFC3339 timestamp.
#[must_use]
pub fn is_start_date(start_date: &str) -> bool {
    start_date.is_empty() || start_date.parse::<StartDate>().is_ok()
}

/// Accepts one or more digits, commas and periods.
///
/// The amount is never parsed as a number, so `"1,234.56"` and `"1.234,56"`
/// are both fine.
#[must_use]
pub fn is_amount(amount: &str) -> bool {
    AMOUNT.is_match(amount)
}

/// Accepts any non-negative cycle length.
#[must_use]
pub const fn is_days_per_billing_cycle(days: i64) -> bool {
    days >= 0
}

/// Accepts any non-negative payment count.
#[must_use]
pub const fn is_number_of_payments(count: i64) -> bool {
    count >= 0
}

/// Accepts an empty string or a URL with both a scheme and a host.
#[must_use]
pub fn is_change_indicator_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    Url::parse(url).is_ok_and(|parsed| {
        !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|host| !host.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD: &str = "4At3X5rvVypTofgmueN9s9QtrzdRe5BueFrskAZi17BoYbhzysozzoMFB6zWnTKdGC6AxEAbEE5czFR3hbEEJbsm4hCeX2S";

    fn address(first: char, len: usize) -> String {
        let mut s = String::with_capacity(len);
        s.push(first);
        s.extend(STANDARD.chars().cycle().skip(1).take(len - 1));
        s
    }

    #[test]
    fn test_wallet_sample_address() {
        assert_eq!(STANDARD.len(), STANDARD_ADDRESS_LEN);
        assert!(is_wallet(STANDARD, AddressPolicy::PRIMARY));
    }

    #[test]
    fn test_wallet_standard_length_boundaries() {
        let policy = AddressPolicy {
            standard: true,
            integrated: false,
            subaddress: false,
        };
        assert!(!is_wallet(&address('4', 94), policy));
        assert!(is_wallet(&address('4', 95), policy));
        assert!(!is_wallet(&address('4', 96), policy));
        assert!(!is_wallet(&address('4', 106), policy));
    }

    #[test]
    fn test_wallet_integrated_length_boundaries() {
        let policy = AddressPolicy {
            standard: false,
            integrated: true,
            subaddress: false,
        };
        assert!(!is_wallet(&address('4', 105), policy));
        assert!(is_wallet(&address('4', 106), policy));
        assert!(!is_wallet(&address('4', 107), policy));
        assert!(!is_wallet(&address('4', 95), policy));
    }

    #[test]
    fn test_wallet_subaddress() {
        let sub = address('8', 95);
        assert!(!is_wallet(&sub, AddressPolicy::PRIMARY));
        assert!(is_wallet(&sub, AddressPolicy::ALL));

        let only_sub = AddressPolicy {
            standard: false,
            integrated: false,
            subaddress: true,
        };
        assert!(is_wallet(&sub, only_sub));
        assert!(!is_wallet(&address('4', 95), only_sub));
        assert!(!is_wallet(&address('8', 106), AddressPolicy::ALL));
    }

    #[test]
    fn test_wallet_leading_character() {
        for first in ['1', '5', '9', 'A', 'z'] {
            assert!(!is_wallet(&address(first, 95), AddressPolicy::ALL));
        }
    }

    #[test]
    fn test_wallet_alphabet() {
        for bad in ['0', 'I', 'O', 'l', '+', ' '] {
            let mut s = address('4', 94);
            s.push(bad);
            assert!(!is_wallet(&s, AddressPolicy::ALL), "{bad:?}");
        }
        assert!(!is_wallet("", AddressPolicy::ALL));
    }

    #[test]
    fn test_payment_id_lengths() {
        assert!(!is_payment_id("0123456789abcde"));
        assert!(is_payment_id("0123456789abcdef"));
        assert!(!is_payment_id("0123456789abcdef0"));
        assert!(!is_payment_id("0123456789abcdeF"));
    }

    #[test]
    fn test_currency() {
        assert!(is_currency("XMR"));
        assert!(is_currency("USD"));
        assert!(!is_currency("EUR"));
        assert!(!is_currency(""));
    }

    #[test]
    fn test_amount() {
        assert!(is_amount("25.99"));
        assert!(is_amount("1,234.56"));
        assert!(is_amount("0"));
        assert!(!is_amount("25.99$"));
        assert!(!is_amount("-5"));
        assert!(!is_amount("1e5"));
        assert!(!is_amount(" 5"));
        assert!(!is_amount(""));
    }

    #[test]
    fn test_start_date() {
        assert!(is_start_date(""));
        assert!(is_start_date("2024-02-20T09:59:58.030Z"));
        assert!(!is_start_date("2024-02-20T09:59:58Z"));
        assert!(!is_start_date("2024-02-20T09:59:58.030+01:00"));
    }

    #[test]
    fn test_counters() {
        assert!(is_days_per_billing_cycle(0));
        assert!(is_days_per_billing_cycle(30));
        assert!(!is_days_per_billing_cycle(-1));
        assert!(is_number_of_payments(0));
        assert!(!is_number_of_payments(i64::MIN));
    }

    #[test]
    fn test_change_indicator_url() {
        assert!(is_change_indicator_url(""));
        assert!(is_change_indicator_url("https://example.com/changes"));
        assert!(is_change_indicator_url("http://localhost:8080"));
        assert!(!is_change_indicator_url("example.com/changes"));
        assert!(!is_change_indicator_url("mailto:shop@example.com"));
        assert!(!is_change_indicator_url("not a url"));
    }

    #[test]
    fn test_label() {
        assert!(is_label(""));
        assert!(is_label("Unlabeled Monero Payment Request"));
    }
}
