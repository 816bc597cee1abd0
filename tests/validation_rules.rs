use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;

use fitclub::auth::{verify_password, Role, SessionSigner, SessionUser};
use fitclub::services::billing::{validate_payment, BillingError};
use fitclub::services::booking::{day_name, intervals_overlap, window_covers};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Trainer availability Mon 09:00-12:00: a 10:00-11:00 request fits the
/// window, and a second 10:30-11:30 request conflicts with the first.
#[test]
fn booking_scenario_overlapping_requests() {
    let window = (t(9, 0), t(12, 0));

    let first = (t(10, 0), t(11, 0));
    assert!(window_covers(window.0, window.1, first.0, first.1));

    let second = (t(10, 30), t(11, 30));
    assert!(window_covers(window.0, window.1, second.0, second.1));
    assert!(intervals_overlap(first.0, first.1, second.0, second.1));
}

#[test]
fn booking_outside_availability_is_rejected() {
    let window = (t(9, 0), t(12, 0));
    assert!(!window_covers(window.0, window.1, t(11, 30), t(12, 30)));
    assert!(!window_covers(window.0, window.1, t(8, 0), t(9, 30)));
}

#[test]
fn adjacent_sessions_do_not_conflict() {
    assert!(!intervals_overlap(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
}

#[test]
fn availability_windows_are_keyed_by_weekday_name() {
    // 2024-01-15 was a Monday.
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    assert_eq!(day_name(date), "Monday");
}

/// Bill total 100 with 60 paid: a 50 payment exceeds the remaining 40 and
/// is rejected; the exact 40 settles the bill.
#[test]
fn payment_scenario_overpayment_rejected() {
    let total = BigDecimal::from(100);
    let paid = BigDecimal::from(60);

    let rejected = validate_payment(&total, &paid, &BigDecimal::from(50));
    assert!(matches!(
        rejected,
        Err(BillingError::ExceedsBalance { .. })
    ));

    assert!(validate_payment(&total, &paid, &BigDecimal::from(40)).is_ok());
}

#[test]
fn fractional_payments_respect_the_balance() {
    let total: BigDecimal = "99.90".parse().unwrap();
    let paid: BigDecimal = "99.89".parse().unwrap();

    assert!(validate_payment(&total, &paid, &"0.01".parse().unwrap()).is_ok());
    assert!(validate_payment(&total, &paid, &"0.02".parse().unwrap()).is_err());
}

#[test]
fn session_cookie_round_trips_identity_and_role() {
    let signer = SessionSigner::new("test-secret");
    let user = SessionUser {
        id: 7,
        role: Role::Trainer,
        name: "Marco Silva".to_string(),
    };

    let token = signer.issue(&user).unwrap();
    let restored = signer.validate(&token).unwrap();

    assert_eq!(restored.id, 7);
    assert_eq!(restored.role, Role::Trainer);
    assert_eq!(restored.name, "Marco Silva");
}

#[test]
fn forged_session_cookies_are_rejected() {
    let signer = SessionSigner::new("test-secret");
    let forger = SessionSigner::new("guessed-secret");
    let user = SessionUser {
        id: 1,
        role: Role::Admin,
        name: "Mallory".to_string(),
    };

    let forged = forger.issue(&user).unwrap();
    assert!(signer.validate(&forged).is_err());
}

#[test]
fn legacy_seed_passwords_still_verify() {
    // Pre-seeded demo rows store plaintext; the fallback only accepts an
    // exact match and never treats hashes as plaintext.
    assert!(verify_password("admin123", "admin123").unwrap());
    assert!(!verify_password("admin1234", "admin123").unwrap());
}
