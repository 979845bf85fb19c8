//! String constraints.
//!
//! This module provides [`StringExt`] for validators of `String`, `&str` or
//! any other `AsRef<str>` value. Lengths count `char`s, not bytes.

use std::fmt::Debug;

use regex::Regex;

use crate::constraint::Rule;
use crate::message::MessageArg;
use crate::schema::combinators::And;
use crate::schema::traits::Validator;

/// Length, content and pattern checks for strings.
///
/// # Example
///
/// ```rust
/// use kova::{Schema, StringExt, ValidationConfig, ValidatorExt};
///
/// let schema = Schema::string().min_len(3).max_len(5);
///
/// let result = schema.try_validate(&"hi".to_string(), &ValidationConfig::default()).unwrap();
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().text, "must be at least 3 characters");
/// ```
pub trait StringExt<T>: Validator<Input = T, Output = T> + Sized
where
    T: AsRef<str> + Clone + Debug + Send + Sync + 'static,
{
    /// Requires at least `min` characters.
    fn min_len(self, min: usize) -> And<Self, Rule<T>> {
        And::new(
            self,
            Rule::predicate("kova.string.min", vec![min.into()], move |s: &T| {
                char_len(s) >= min
            }),
        )
    }

    /// Requires at most `max` characters.
    fn max_len(self, max: usize) -> And<Self, Rule<T>> {
        And::new(
            self,
            Rule::predicate("kova.string.max", vec![max.into()], move |s: &T| {
                char_len(s) <= max
            }),
        )
    }

    /// Requires exactly `len` characters.
    fn len(self, len: usize) -> And<Self, Rule<T>> {
        And::new(
            self,
            Rule::predicate("kova.string.length", vec![len.into()], move |s: &T| {
                char_len(s) == len
            }),
        )
    }

    /// Requires at least one non-whitespace character.
    fn not_blank(self) -> And<Self, Rule<T>> {
        And::new(
            self,
            Rule::predicate("kova.string.notBlank", Vec::new(), |s: &T| {
                !s.as_ref().trim().is_empty()
            }),
        )
    }

    /// Requires at least one character.
    fn not_empty(self) -> And<Self, Rule<T>> {
        And::new(
            self,
            Rule::predicate("kova.string.notEmpty", Vec::new(), |s: &T| {
                !s.as_ref().is_empty()
            }),
        )
    }

    fn starts_with(self, prefix: impl Into<String>) -> And<Self, Rule<T>> {
        let prefix = prefix.into();
        And::new(
            self,
            Rule::predicate(
                "kova.string.startsWith",
                vec![MessageArg::from(&prefix)],
                move |s: &T| s.as_ref().starts_with(prefix.as_str()),
            ),
        )
    }

    fn ends_with(self, suffix: impl Into<String>) -> And<Self, Rule<T>> {
        let suffix = suffix.into();
        And::new(
            self,
            Rule::predicate(
                "kova.string.endsWith",
                vec![MessageArg::from(&suffix)],
                move |s: &T| s.as_ref().ends_with(suffix.as_str()),
            ),
        )
    }

    fn contains(self, needle: impl Into<String>) -> And<Self, Rule<T>> {
        let needle = needle.into();
        And::new(
            self,
            Rule::predicate(
                "kova.string.contains",
                vec![MessageArg::from(&needle)],
                move |s: &T| s.as_ref().contains(needle.as_str()),
            ),
        )
    }

    /// Requires the whole string to match `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regular expression.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{Schema, StringExt, ValidationConfig, ValidatorExt};
    ///
    /// let zip = Schema::string().matches(r"\d{3}-\d{4}").unwrap();
    ///
    /// let config = ValidationConfig::default();
    /// assert!(zip.try_validate(&"123-4567".to_string(), &config).unwrap().is_success());
    /// assert!(zip.try_validate(&"x123-4567".to_string(), &config).unwrap().is_failure());
    /// ```
    fn matches(self, pattern: &str) -> Result<And<Self, Rule<T>>, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(And::new(
            self,
            Rule::predicate(
                "kova.string.matches",
                vec![MessageArg::from(pattern)],
                move |s: &T| regex.is_match(s.as_ref()),
            ),
        ))
    }
}

impl<T, V> StringExt<T> for V
where
    V: Validator<Input = T, Output = T>,
    T: AsRef<str> + Clone + Debug + Send + Sync + 'static,
{
}

fn char_len<T: AsRef<str>>(s: &T) -> usize {
    s.as_ref().chars().count()
}
