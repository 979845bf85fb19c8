//! Tests for Option handling: null checks, defaults and as_nullable.

use std::sync::Arc;

use kova::{
    ComparableExt, LogEntry, NullableExt, Schema, StringExt, ValidationConfig, ValidatorExt,
};
use parking_lot::Mutex;

fn recording() -> (ValidationConfig, Arc<Mutex<Vec<LogEntry>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let config = ValidationConfig::new().logger(move |entry| sink.lock().push(entry.clone()));
    (config, log)
}

#[test]
fn test_with_default_and_skips_validator_for_none() {
    let (config, log) = recording();
    let schema = Schema::nullable::<i32>()
        .with_default(0)
        .and(Schema::int().min(3));

    let result = schema.try_validate(&None, &config).unwrap();
    assert_eq!(result.into_result().ok(), Some(0));
    assert!(log.lock().is_empty());
}

#[test]
fn test_with_default_and_checks_present_value() {
    let schema = Schema::nullable::<i32>()
        .with_default(0)
        .and(Schema::int().min(3));
    let config = ValidationConfig::default();

    let messages = schema
        .try_validate(&Some(2), &config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(messages.constraint_ids(), vec!["kova.comparable.min"]);
    assert_eq!(
        schema.try_validate(&Some(5), &config).unwrap().into_result().ok(),
        Some(5)
    );
}

#[test]
fn test_with_default_then_always_runs() {
    let (config, log) = recording();
    let schema = Schema::nullable::<i32>()
        .with_default(10)
        .then(Schema::int().min(3));

    let result = schema.try_validate(&None, &config).unwrap();
    assert_eq!(result.into_result().ok(), Some(10));
    assert_eq!(log.lock().len(), 1);
}

#[test]
fn test_with_default_fn_is_called_per_null() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let schema = Schema::nullable::<String>().with_default_fn(move || {
        *counter.lock() += 1;
        "guest".to_string()
    });
    let config = ValidationConfig::default();

    schema.try_validate(&None, &config).unwrap();
    schema.try_validate(&Some("bob".to_string()), &config).unwrap();
    schema.try_validate(&None, &config).unwrap();
    assert_eq!(*calls.lock(), 2);
}

#[test]
fn test_as_nullable_accepts_none_and_checks_some() {
    let schema = Schema::string().min_len(3).as_nullable();
    let config = ValidationConfig::default();

    assert_eq!(
        schema.try_validate(&None, &config).unwrap().into_result().ok(),
        Some(None)
    );
    assert!(schema
        .try_validate(&Some("abc".to_string()), &config)
        .unwrap()
        .is_success());

    let messages = schema
        .try_validate(&Some("ab".to_string()), &config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(messages.first().constraint_id, "kova.or");
    assert_eq!(
        messages.first().text,
        concat!(
            "at least one constraint must be satisfied: ",
            "[[must be null], [must be at least 3 characters]]"
        )
    );
}

#[test]
fn test_as_nullable_logs_like_or() {
    let (config, log) = recording();
    let schema = Schema::int().min(1).as_nullable();

    schema.try_validate(&Some(4), &config).unwrap();
    let entries: Vec<(String, bool)> = log
        .lock()
        .iter()
        .map(|e| (e.constraint_id().to_string(), e.is_satisfied()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("kova.nullable.isNull".to_string(), false),
            ("kova.comparable.min".to_string(), true),
        ]
    );
}

#[test]
fn test_as_nullable_with_default() {
    let schema = Schema::int().min(1).as_nullable_with_default(1);
    let config = ValidationConfig::default();

    assert_eq!(
        schema.try_validate(&None, &config).unwrap().into_result().ok(),
        Some(1)
    );
    let messages = schema
        .try_validate(&Some(0), &config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(messages.constraint_ids(), vec!["kova.or"]);
}

#[test]
fn test_as_nullable_with_default_logs_like_or() {
    let (config, log) = recording();
    let schema = Schema::int().min(1).as_nullable_with_default(7);

    let result = schema.try_validate(&None, &config).unwrap();
    assert_eq!(result.into_result().ok(), Some(7));
    schema.try_validate(&Some(0), &config).unwrap();

    let entries: Vec<(String, bool)> = log
        .lock()
        .iter()
        .map(|e| (e.constraint_id().to_string(), e.is_satisfied()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("kova.nullable.isNull".to_string(), true),
            ("kova.nullable.isNull".to_string(), false),
            ("kova.comparable.min".to_string(), false),
        ]
    );
}

#[test]
fn test_not_null_then_if_present() {
    let schema = Schema::nullable::<String>()
        .not_null()
        .if_present(Schema::string().not_blank());
    let config = ValidationConfig::default();

    let messages = schema
        .try_validate(&None, &config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(messages.constraint_ids(), vec!["kova.nullable.notNull"]);

    let messages = schema
        .try_validate(&Some(" ".to_string()), &config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert_eq!(messages.constraint_ids(), vec!["kova.string.notBlank"]);
}
