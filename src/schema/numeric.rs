//! Sign constraints for numbers.
//!
//! This module provides the closed [`Number`] capability implemented for the
//! primitive integer and float types, and [`NumberExt`] with the sign rules
//! built on it.

use std::fmt::Debug;

use crate::constraint::Rule;
use crate::message::MessageArg;
use crate::schema::combinators::And;
use crate::schema::traits::Validator;

/// A primitive number with a zero value.
pub trait Number:
    PartialOrd + Copy + Debug + Into<MessageArg> + Send + Sync + 'static
{
    const ZERO: Self;
}

macro_rules! impl_number {
    ($($t:ty => $zero:expr),* $(,)?) => {
        $(impl Number for $t {
            const ZERO: Self = $zero;
        })*
    };
}

impl_number!(
    i8 => 0, i16 => 0, i32 => 0, i64 => 0, isize => 0,
    u8 => 0, u16 => 0, u32 => 0, u64 => 0, usize => 0,
    f32 => 0.0, f64 => 0.0,
);

/// Sign checks for numbers.
///
/// # Example
///
/// ```rust
/// use kova::{NumberExt, Schema, ValidationConfig, ValidatorExt};
///
/// let schema = Schema::of::<f64>().positive();
///
/// let config = ValidationConfig::default();
/// assert!(schema.try_validate(&0.5, &config).unwrap().is_success());
/// assert!(schema.try_validate(&0.0, &config).unwrap().is_failure());
/// ```
pub trait NumberExt<T: Number>: Validator<Input = T, Output = T> + Sized {
    /// Requires `value > 0`.
    fn positive(self) -> And<Self, Rule<T>> {
        And::new(self, sign_rule("kova.number.positive", |v| v > T::ZERO))
    }

    /// Requires `value < 0`.
    fn negative(self) -> And<Self, Rule<T>> {
        And::new(self, sign_rule("kova.number.negative", |v| v < T::ZERO))
    }

    /// Requires `value <= 0`.
    fn not_positive(self) -> And<Self, Rule<T>> {
        And::new(self, sign_rule("kova.number.notPositive", |v| v <= T::ZERO))
    }

    /// Requires `value >= 0`.
    fn not_negative(self) -> And<Self, Rule<T>> {
        And::new(self, sign_rule("kova.number.notNegative", |v| v >= T::ZERO))
    }
}

impl<T: Number, V> NumberExt<T> for V where V: Validator<Input = T, Output = T> {}

fn sign_rule<T: Number>(id: &str, ok: fn(T) -> bool) -> Rule<T> {
    Rule::predicate(id, Vec::new(), move |value: &T| ok(*value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, ValidatorExt};
    use crate::{ValidationConfig, ValidationResult};

    fn check<V: Validator>(v: &V, input: &V::Input) -> ValidationResult<V::Output> {
        v.try_validate(input, &ValidationConfig::default()).unwrap()
    }

    #[test]
    fn test_positive_excludes_zero() {
        let schema = Schema::int().positive();
        assert!(check(&schema, &1).is_success());
        let messages = check(&schema, &0).into_result().unwrap_err();
        assert_eq!(messages.first().constraint_id, "kova.number.positive");
        assert_eq!(messages.first().text, "must be positive");
        assert!(messages.first().args.is_empty());
    }

    #[test]
    fn test_negative() {
        let schema = Schema::of::<i64>().negative();
        assert!(check(&schema, &-1).is_success());
        assert!(check(&schema, &0).is_failure());
    }

    #[test]
    fn test_not_positive_and_not_negative_include_zero() {
        assert!(check(&Schema::int().not_positive(), &0).is_success());
        assert!(check(&Schema::int().not_positive(), &1).is_failure());
        assert!(check(&Schema::of::<u8>().not_negative(), &0).is_success());
        assert!(check(&Schema::of::<f32>().not_negative(), &-0.5).is_failure());
    }
}
