//! Prometheus metrics for the token service.

use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};

/// Tokens minted.
pub static TOKENS_ISSUED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hr_token_tokens_issued_total",
        "Total number of tokens issued",
        &["algorithm"]
    )
    .expect("Failed to register tokens_issued metric")
});

/// Decode attempts by outcome.
pub static VERIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hr_token_verifications_total",
        "Total number of token verifications",
        &["outcome"]
    )
    .expect("Failed to register verifications metric")
});

/// Bearer gate decisions.
pub static AUTH_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hr_token_auth_decisions_total",
        "Total number of request authentication decisions",
        &["decision"]
    )
    .expect("Failed to register auth_decisions metric")
});

/// Record a token issuance.
pub fn record_token_issued(algorithm: &str) {
    TOKENS_ISSUED.with_label_values(&[algorithm]).inc();
}

/// Record a verification outcome (`valid`, `invalid_format`, `invalid_signature`).
pub fn record_verification(outcome: &str) {
    VERIFICATIONS.with_label_values(&[outcome]).inc();
}

/// Record an authentication decision.
pub fn record_auth_decision(decision: &str) {
    AUTH_DECISIONS.with_label_values(&[decision]).inc();
}
