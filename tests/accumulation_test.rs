//! Tests for accumulate vs fail-fast evaluation.

use std::sync::Arc;

use kova::{
    ComparableExt, LogEntry, NumberExt, Schema, StringExt, ValidationConfig, ValidatorExt,
};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq)]
struct Signup {
    username: String,
    age: i32,
    referral: String,
}

fn signup_schema() -> kova::ObjectSchema<Signup> {
    Schema::object("Signup")
        .field(
            "username",
            |s: &Signup| &s.username,
            Schema::string().min_len(3).max_len(12),
        )
        .field("age", |s: &Signup| &s.age, Schema::int().positive().max(130))
        .field(
            "referral",
            |s: &Signup| &s.referral,
            Schema::string().starts_with("REF-"),
        )
}

fn signup(username: &str, age: i32, referral: &str) -> Signup {
    Signup {
        username: username.to_string(),
        age,
        referral: referral.to_string(),
    }
}

#[test]
fn test_valid_input_succeeds_with_value() {
    let input = signup("alice", 30, "REF-1");
    let result = signup_schema()
        .try_validate(&input, &ValidationConfig::default())
        .unwrap();
    assert_eq!(result.into_result().ok(), Some(input));
}

#[test]
fn test_single_violation_reports_one_message() {
    let input = signup("alice", 0, "REF-1");
    let messages = signup_schema()
        .try_validate(&input, &ValidationConfig::default())
        .unwrap()
        .into_result()
        .unwrap_err();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages.first().constraint_id, "kova.number.positive");
    assert_eq!(messages.first().location(), "Signup.age");
}

#[test]
fn test_accumulate_reports_every_violation_in_order() {
    let input = signup("al", -1, "X");
    let messages = signup_schema()
        .try_validate(&input, &ValidationConfig::default())
        .unwrap()
        .into_result()
        .unwrap_err();

    assert_eq!(
        messages.constraint_ids(),
        vec![
            "kova.string.min",
            "kova.number.positive",
            "kova.string.startsWith"
        ]
    );
}

#[test]
fn test_fail_fast_reports_first_violation_only() {
    let input = signup("al", -1, "X");
    let config = ValidationConfig::new().fail_fast(true);
    let messages = signup_schema()
        .try_validate(&input, &config)
        .unwrap()
        .into_result()
        .unwrap_err();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages.first().constraint_id, "kova.string.min");
}

#[test]
fn test_fail_fast_never_invokes_later_constraints() {
    let log = Arc::new(Mutex::new(Vec::<LogEntry>::new()));
    let sink = Arc::clone(&log);
    let config = ValidationConfig::new()
        .fail_fast(true)
        .logger(move |entry| sink.lock().push(entry.clone()));

    let input = signup("al", -1, "X");
    signup_schema().try_validate(&input, &config).unwrap();

    let ids: Vec<String> = log
        .lock()
        .iter()
        .map(|e| e.constraint_id().to_string())
        .collect();
    assert_eq!(ids, vec!["kova.string.min"]);
}

#[test]
fn test_accumulate_logs_every_constraint() {
    let log = Arc::new(Mutex::new(Vec::<LogEntry>::new()));
    let sink = Arc::clone(&log);
    let config = ValidationConfig::new().logger(move |entry| sink.lock().push(entry.clone()));

    let input = signup("alice", 30, "REF-1");
    signup_schema().try_validate(&input, &config).unwrap();

    let entries = log.lock();
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(LogEntry::is_satisfied));
    assert_eq!(entries[0].root(), "Signup");
    assert_eq!(entries[0].path(), "username");
    assert_eq!(entries[0].input(), "\"alice\"");
}

#[test]
fn test_internal_fault_is_not_a_message() {
    let schema = Schema::int().try_constrain("app.lookup", |n, _| {
        if *n < 0 {
            Err(kova::Error::constraint("app.lookup", "negative ids are not indexed"))
        } else {
            Ok(kova::ConstraintResult::Satisfied)
        }
    });

    let err = schema
        .try_validate(&-1, &ValidationConfig::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "constraint 'app.lookup' failed: negative ids are not indexed"
    );
}
