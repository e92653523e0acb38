//! End-to-end tests through the public API.

use monero_request::{
    AddressPolicy, Currency, ErrorKind, Field, NewPaymentRequest, RequestError, StartDate, decode,
    encode,
};

const WALLET: &str = "4At3X5rvVypTofgmueN9s9QtrzdRe5BueFrskAZi17BoYbhzysozzoMFB6zWnTKdGC6AxEAbEE5czFR3hbEEJbsm4hCeX2S";

const SAMPLE: &str = "monero-request:1:H4sIAAAAAAACEy2OYUvDMBCG/4rk8zaytunWfWtHKygTrEPrvoSkua3BNBlJqrbifzcdwsHd+z7H3fuDWG8G7dEOrVcYE7RAbcf0BajUQrbMG0sHqwKeyWAt6HYMqjnUN8N501PFOMwrXnoFd76T+hKgYKOjV7CUS6WCRduxVYB2eIH00PMAzJle2diD9u5m/wsqRTgmOGSbNCVbzgkQcg4XHSgF1tEvFvocOcl93BD7+Tpej+Z86Qd4ylz27O0kaiDFAJV1H/lJrjeFeefdNDozTeZQFen0po+P4n6f5t9lzsuStFNVx12YHrjrk24PTfQyv/TMeiqYD8FRhKNkiaNlhI8425FQ2xWO8Qn9/gGlA0vcRwEAAA==";

fn unlabeled() -> NewPaymentRequest {
    NewPaymentRequest {
        custom_label: "Unlabeled Monero Payment Request".into(),
        sellers_wallet: WALLET.into(),
        currency: "USD".into(),
        amount: "25.99".into(),
        payment_id: String::new(),
        start_date: String::new(),
        days_per_billing_cycle: 30,
        number_of_payments: 1,
        change_indicator_url: String::new(),
    }
}

#[test]
fn test_unlabeled_request_scenario() {
    let encoded = encode(&unlabeled()).unwrap();
    assert!(encoded.starts_with("monero-request:1:"), "{encoded}");

    let decoded = decode(&encoded).unwrap();
    assert_eq!(
        decoded.text(Field::CustomLabel),
        Some("Unlabeled Monero Payment Request")
    );
    assert_eq!(decoded.text(Field::SellersWallet), Some(WALLET));
    assert_eq!(decoded.text(Field::Currency), Some("USD"));
    assert_eq!(decoded.text(Field::Amount), Some("25.99"));
    assert_eq!(decoded.text(Field::ChangeIndicatorUrl), Some(""));
    assert_eq!(decoded.integer(Field::DaysPerBillingCycle), Some(30));
    assert_eq!(decoded.integer(Field::NumberOfPayments), Some(1));

    let payment_id = decoded.text(Field::PaymentId).unwrap();
    assert_eq!(payment_id.len(), 16);
    assert!(payment_id.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));

    let start_date = decoded.text(Field::StartDate).unwrap();
    assert!(start_date.parse::<StartDate>().is_ok(), "{start_date}");
}

#[test]
fn test_round_trip_preserves_every_field() {
    let cases = [
        NewPaymentRequest {
            custom_label: "Invoice #42: \"coffee\", beans, and a \\ backslash\n\tthanks!".into(),
            currency: "XMR".into(),
            amount: "1.234,56".into(),
            payment_id: "0123456789abcdef".into(),
            start_date: "2024-02-29T23:59:59.999Z".into(),
            days_per_billing_cycle: 0,
            number_of_payments: 0,
            change_indicator_url: "https://shop.example.com:8443/requests/42?a=1,2".into(),
            ..unlabeled()
        },
        NewPaymentRequest {
            custom_label: String::new(),
            amount: "0".into(),
            payment_id: "ffffffffffffffff".into(),
            start_date: "1970-01-01T00:00:00.000Z".into(),
            days_per_billing_cycle: 365,
            number_of_payments: 1_000_000,
            ..unlabeled()
        },
        NewPaymentRequest {
            custom_label: "Zahlung für März ✓".into(),
            sellers_wallet: format!("{WALLET}{}", &WALLET[1..12]),
            payment_id: "a1b2c3d4e5f60718".into(),
            start_date: "2031-07-04T12:00:00.500Z".into(),
            ..unlabeled()
        },
    ];

    for new in cases {
        let expected = monero_request::PaymentRequest::validated(new.clone(), AddressPolicy::PRIMARY)
            .unwrap();
        let decoded = decode(&encode(&new).unwrap()).unwrap();
        assert_eq!(decoded.validate(AddressPolicy::PRIMARY).unwrap(), expected);
    }
}

#[test]
fn test_reads_sample_request() {
    let decoded = decode(SAMPLE).unwrap();
    assert_eq!(decoded.text(Field::CustomLabel), Some("title thing"));
    assert_eq!(decoded.text(Field::SellersWallet), Some(WALLET));
    assert_eq!(decoded.text(Field::Currency), Some("XMR"));
    assert_eq!(decoded.text(Field::Amount), Some("1.005"));
    assert_eq!(decoded.text(Field::PaymentId), Some("dbe976658bb5e55f"));
    assert_eq!(
        decoded.text(Field::StartDate),
        Some("2024-02-20T09:59:58.030Z")
    );
    assert_eq!(decoded.integer(Field::DaysPerBillingCycle), Some(0));
    assert_eq!(decoded.integer(Field::NumberOfPayments), Some(0));
    assert_eq!(decoded.text(Field::ChangeIndicatorUrl), Some(""));

    let request = decoded.validate(AddressPolicy::PRIMARY).unwrap();
    assert_eq!(request.currency, Currency::Xmr);
}

#[test]
fn test_encode_rejects_invalid_fields() {
    let cases: [(fn(&mut NewPaymentRequest), Field); 5] = [
        (|n| n.currency = "EUR".into(), Field::Currency),
        (|n| n.amount = "25.99$".into(), Field::Amount),
        (|n| n.payment_id = "0123456789ABCDEF".into(), Field::PaymentId),
        (|n| n.sellers_wallet = format!("1{}", &WALLET[1..]), Field::SellersWallet),
        (|n| n.change_indicator_url = "/relative/path".into(), Field::ChangeIndicatorUrl),
    ];
    for (mutate, expected) in cases {
        let mut new = unlabeled();
        mutate(&mut new);
        match encode(&new) {
            Err(RequestError::InvalidField { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected InvalidField for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_decode_error_kinds() {
    assert_eq!(decode("garbage").unwrap_err().kind(), ErrorKind::MalformedInput);
    assert_eq!(
        decode("monero-request:2:anything").unwrap_err().kind(),
        ErrorKind::UnsupportedVersion
    );
    assert_eq!(
        decode("monero-request:1:not-base64").unwrap_err().kind(),
        ErrorKind::DecodeFailure
    );
    assert_eq!(
        decode(&SAMPLE[..SAMPLE.len() - 12]).unwrap_err().kind(),
        ErrorKind::DecodeFailure
    );
    assert_eq!(
        decode(&format!("{SAMPLE}\n")).unwrap_err().kind(),
        ErrorKind::DecodeFailure
    );
}

#[test]
fn test_decoded_fields_serialize_for_display() {
    let decoded = decode(SAMPLE).unwrap();
    let json = serde_json::to_value(&decoded).unwrap();
    assert_eq!(json["amount"], "1.005");
    assert_eq!(json["days_per_billing_cycle"], 0);
    assert_eq!(json["payment_id"], "dbe976658bb5e55f");
}
