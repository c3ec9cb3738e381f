//! Tests for [`BudgetStatus`] and [`ErrorClass`].

use chrono::{Duration as ChronoDuration, TimeZone, Utc};

use litellm_budget::{
    BudgetStatus, CredentialError, ErrorClass, ErrorSummary, FetchError, KeyInfo, ResetCountdown,
    Severity,
};

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

fn status(spend: Option<f64>, max_budget: Option<f64>) -> BudgetStatus {
    BudgetStatus::from_key_info(&KeyInfo::new(spend, max_budget, None), now())
}

// ============================================================================
// Severity thresholds
// ============================================================================

#[test]
fn severity_by_percentage() {
    assert_eq!(status(Some(25.0), Some(100.0)).severity, Severity::Normal);
    assert_eq!(status(Some(74.9), Some(100.0)).severity, Severity::Normal);
    assert_eq!(status(Some(75.0), Some(100.0)).severity, Severity::Warning);
    assert_eq!(status(Some(90.0), Some(100.0)).severity, Severity::Critical);
    assert_eq!(status(Some(150.0), Some(100.0)).severity, Severity::Critical);
}

#[test]
fn no_limit_is_always_normal() {
    for max_budget in [None, Some(0.0), Some(-5.0)] {
        let s = status(Some(1_000.0), max_budget);
        assert_eq!(s.limit, None);
        assert_eq!(s.percent, None);
        assert_eq!(s.severity, Severity::Normal);
    }
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn display_with_limit() {
    assert_eq!(
        status(Some(25.0), Some(100.0)).to_string(),
        "LiteLLM: $25.00/$100.00 (25%)"
    );
}

#[test]
fn display_without_limit() {
    assert_eq!(status(Some(10.0), Some(0.0)).to_string(), "LiteLLM: $10.00");
    assert_eq!(status(Some(25.0), None).to_string(), "LiteLLM: $25.00");
}

#[test]
fn missing_spend_reads_as_zero() {
    assert_eq!(
        status(None, Some(100.0)).to_string(),
        "LiteLLM: $0.00/$100.00 (0%)"
    );
}

#[test]
fn display_with_reset_countdown() {
    let reset = (now() + ChronoDuration::hours(50)).format("%Y-%m-%dT%H:%M:%SZ");
    let info = KeyInfo::new(Some(25.0), Some(100.0), Some(reset.to_string()));
    let s = BudgetStatus::from_key_info(&info, now());
    assert_eq!(s.reset, Some(ResetCountdown::Remaining(std::time::Duration::from_secs(50 * 3600))));
    assert_eq!(s.to_string(), "LiteLLM: $25.00/$100.00 (25%) | reset: 2d2h");
}

#[test]
fn past_reset_shows_resetting() {
    let info = KeyInfo::new(Some(25.0), Some(100.0), Some("2020-01-01T00:00:00Z".into()));
    let s = BudgetStatus::from_key_info(&info, now());
    assert!(s.to_string().ends_with("| reset: resetting"));
}

#[test]
fn empty_reset_is_omitted_but_garbage_is_unknown() {
    let empty = KeyInfo::new(Some(1.0), None, Some(String::new()));
    assert_eq!(BudgetStatus::from_key_info(&empty, now()).reset, None);

    let garbage = KeyInfo::new(Some(1.0), None, Some("next tuesday".into()));
    let s = BudgetStatus::from_key_info(&garbage, now());
    assert_eq!(s.reset, Some(ResetCountdown::Unknown));
    assert_eq!(s.to_string(), "LiteLLM: $1.00 | reset: unknown");
}

#[test]
fn status_serializes_to_json() {
    let value = serde_json::to_value(status(Some(95.0), Some(100.0))).unwrap();
    assert_eq!(value["severity"], "critical");
    assert!((value["percent"].as_f64().unwrap() - 95.0).abs() < 1e-9);
    assert!(value.get("reset").is_none());
}

// ============================================================================
// Error classification
// ============================================================================

#[test]
fn five_way_error_split() {
    assert_eq!(
        ErrorClass::from(&CredentialError::MissingToken),
        ErrorClass::NoCredential
    );
    assert_eq!(
        ErrorClass::from(&CredentialError::MissingBaseUrl),
        ErrorClass::NoCredential
    );
    assert_eq!(
        ErrorClass::from(&FetchError::Cooldown {
            remaining: std::time::Duration::from_secs(10)
        }),
        ErrorClass::Cooldown
    );
    assert_eq!(
        ErrorClass::from(&FetchError::Auth { status: 403 }),
        ErrorClass::Auth
    );
    assert_eq!(
        ErrorClass::from(&FetchError::Transport {
            message: "dns error".into(),
            timed_out: false
        }),
        ErrorClass::Connectivity
    );
    assert_eq!(
        ErrorClass::from(&FetchError::Http { status: 500 }),
        ErrorClass::Other
    );
    assert_eq!(
        ErrorClass::from(&FetchError::Decode("eof".into())),
        ErrorClass::Other
    );
}

#[test]
fn error_class_messages() {
    assert_eq!(ErrorClass::NoCredential.to_string(), "LiteLLM: No API key");
    assert_eq!(
        ErrorClass::Cooldown.to_string(),
        "LiteLLM: Cooldown (retrying in 5m)"
    );
    assert_eq!(ErrorClass::Auth.message(), "Auth error");
    assert_eq!(ErrorClass::Connectivity.message(), "Connection error");
    assert_eq!(ErrorClass::Other.message(), "Error");
}

#[test]
fn cooldown_summary_shows_time_left() {
    let summary = |secs| {
        ErrorSummary::from(&FetchError::Cooldown {
            remaining: std::time::Duration::from_secs(secs),
        })
        .to_string()
    };
    assert_eq!(summary(300), "LiteLLM: Cooldown (retrying in 5m)");
    assert_eq!(summary(90), "LiteLLM: Cooldown (retrying in 1m)");
    assert_eq!(summary(42), "LiteLLM: Cooldown (retrying in 42s)");
    assert_eq!(summary(0), "LiteLLM: Cooldown (retrying in 1s)");
    assert_eq!(summary(2 * 3600), "LiteLLM: Cooldown (retrying in 2h)");
}

#[test]
fn credential_summaries_name_what_is_missing() {
    let no_token = ErrorSummary::from(&CredentialError::MissingToken);
    assert_eq!(no_token.class, ErrorClass::NoCredential);
    assert_eq!(no_token.to_string(), "LiteLLM: No API key");

    let no_url = ErrorSummary::from(&CredentialError::MissingBaseUrl);
    assert_eq!(no_url.class, ErrorClass::NoCredential);
    assert_eq!(no_url.to_string(), "LiteLLM: No proxy URL");
}

#[test]
fn other_summaries_use_the_class_message() {
    let summary = ErrorSummary::from(&FetchError::Auth { status: 401 });
    assert_eq!(summary.class, ErrorClass::Auth);
    assert_eq!(summary.message, "Auth error");

    let summary = ErrorSummary::from(&FetchError::Http { status: 502 });
    let value = serde_json::to_value(summary).unwrap();
    assert_eq!(value["class"], "other");
    assert_eq!(value["message"], "Error");
}
