//! Property-based tests for token encoding and verification.
//!
//! Property 1: Round-trip
//! Property 2: Tamper detection
//! Property 3: Cross-key rejection
//! Property 4: Determinism

use hr_token::{Payload, SubjectClaims, TokenError, TokenService};
use proptest::prelude::*;
use serde_json::{json, Value};

const BASE64URL_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Generate arbitrary secrets.
fn arb_secret() -> impl Strategy<Value = String> {
    "[ -~]{1,64}"
}

/// Generate arbitrary user ids.
fn arb_uid() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,64}"
}

/// Generate arbitrary flat payloads of scalar values.
fn arb_payload() -> impl Strategy<Value = Value> {
    let scalar = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON numbers are finite", |f| f.is_finite())
            .prop_map(Value::from),
        "\\PC{0,32}".prop_map(Value::from),
        Just(Value::Null),
    ];
    prop::collection::btree_map("[a-z_]{1,16}", scalar, 0..8)
        .prop_map(|map| Value::Object(map.into_iter().collect()))
}

/// Generate a replacement character for tampering.
fn arb_replacement() -> impl Strategy<Value = char> {
    prop::sample::select(format!("{BASE64URL_ALPHABET}.").chars().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: decode(encode(P)) == P
    #[test]
    fn prop_round_trip(secret in arb_secret(), payload in arb_payload()) {
        let service = TokenService::new(&secret);
        let token = service.encode(&payload).unwrap();

        let decoded = service.decode_payload(&token).unwrap();
        prop_assert_eq!(Value::Object(decoded), payload);
    }

    /// Property 1: typed subject claims survive a round-trip.
    #[test]
    fn prop_subject_round_trip(secret in arb_secret(), uid in arb_uid()) {
        let service = TokenService::new(&secret);
        let token = service.issue_for_subject(uid.clone()).unwrap();

        let claims: SubjectClaims = service.decode(&token).unwrap();
        prop_assert_eq!(claims.uid, uid);
    }

    /// Structure: three non-empty segments, no padding anywhere.
    #[test]
    fn prop_token_structure(secret in arb_secret(), payload in arb_payload()) {
        let token = TokenService::new(&secret).encode(&payload).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        prop_assert_eq!(parts.len(), 3);
        prop_assert!(parts.iter().all(|part| !part.is_empty()));
        prop_assert!(token.chars().all(|c| c == '.' || BASE64URL_ALPHABET.contains(c)));
    }

    /// Property 2: any single-character mutation is rejected.
    #[test]
    fn prop_tamper_detection(
        secret in arb_secret(),
        uid in arb_uid(),
        index in any::<prop::sample::Index>(),
        replacement in arb_replacement(),
    ) {
        let service = TokenService::new(&secret);
        let token = service.issue_for_subject(uid).unwrap();

        let mut chars: Vec<char> = token.chars().collect();
        let position = index.index(chars.len());
        let original = chars[position];
        prop_assume!(original != replacement);
        chars[position] = replacement;
        let tampered: String = chars.into_iter().collect();

        let err = service.decode::<Payload>(&tampered).unwrap_err();
        if original == '.' || replacement == '.' {
            prop_assert_eq!(err, TokenError::InvalidFormat);
        } else {
            prop_assert_eq!(err, TokenError::InvalidSignature);
        }
    }

    /// Property 3: tokens from one secret never verify under another.
    #[test]
    fn prop_cross_key_rejection(
        secret_a in arb_secret(),
        secret_b in arb_secret(),
        uid in arb_uid(),
    ) {
        prop_assume!(secret_a != secret_b);

        let token = TokenService::new(&secret_a).issue_for_subject(uid).unwrap();
        let err = TokenService::new(&secret_b).decode::<Payload>(&token).unwrap_err();

        prop_assert_eq!(err, TokenError::InvalidSignature);
    }

    /// Property 4: identical inputs yield byte-identical tokens.
    #[test]
    fn prop_determinism(secret in arb_secret(), payload in arb_payload()) {
        let first = TokenService::new(&secret).encode(&payload).unwrap();
        let second = TokenService::new(&secret).encode(&payload).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Arbitrary strings never panic and never yield a payload.
    #[test]
    fn prop_garbage_rejected(secret in arb_secret(), raw in "\\PC{0,128}") {
        let result = TokenService::new(&secret).decode::<Payload>(&raw);
        prop_assert!(matches!(
            result,
            Err(TokenError::InvalidFormat | TokenError::InvalidSignature)
        ));
    }

    /// Wrong segment counts are format errors regardless of content.
    #[test]
    fn prop_segment_count(
        segments in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 0..8),
    ) {
        prop_assume!(segments.len() != 3);
        let raw = segments.join(".");

        let err = TokenService::new("mysecretkey").decode::<Payload>(&raw).unwrap_err();
        prop_assert_eq!(err, TokenError::InvalidFormat);
    }
}

#[test]
fn header_segment_is_fixed() {
    let token = TokenService::new("mysecretkey")
        .encode(&json!({ "uid": "12345" }))
        .unwrap();
    let header = token.split('.').next().unwrap();

    let decoded = base64::Engine::decode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        header,
    )
    .unwrap();
    let header: Value = serde_json::from_slice(&decoded).unwrap();

    assert_eq!(header, json!({ "alg": "HS256", "typ": "JWT" }));
}

#[test]
fn float_payloads_round_trip_exactly() {
    let service = TokenService::new("mysecretkey");

    for value in [
        1.071_566_039_146_582_6e-75_f64,
        -1.819_967_304_027_17e-179,
        -1.603_964_615_428_183e143,
    ] {
        let token = service.encode(&json!({ "v": value })).unwrap();
        let decoded = service.decode_payload(&token).unwrap();

        let round_tripped = decoded["v"].as_f64().unwrap();
        assert_eq!(round_tripped.to_bits(), value.to_bits(), "{value:e}");
    }
}
