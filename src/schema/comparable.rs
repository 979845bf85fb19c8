//! Ordering constraints.
//!
//! [`ComparableExt`] adds bound checks to any validator whose value is
//! `PartialOrd`: numbers, strings, dates, or user types.

use std::fmt::Debug;

use crate::constraint::Rule;
use crate::message::MessageArg;
use crate::schema::combinators::And;
use crate::schema::traits::Validator;

/// Bound checks for ordered values.
///
/// Each rule reports `kova.comparable.<rule>` with the bound as its only
/// argument.
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, Schema, ValidationConfig, ValidatorExt};
///
/// let schema = Schema::int().min(0).max(100);
///
/// let result = schema.try_validate(&150, &ValidationConfig::default()).unwrap();
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().text, "must be less than or equal to 100");
/// ```
pub trait ComparableExt<T>: Validator<Input = T, Output = T> + Sized
where
    T: PartialOrd + Clone + Debug + Into<MessageArg> + Send + Sync + 'static,
{
    /// Requires `value >= bound`.
    fn min(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.min", bound, |v, b| v >= b))
    }

    /// Requires `value <= bound`.
    fn max(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.max", bound, |v, b| v <= b))
    }

    /// Requires `value > bound`.
    fn gt(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.gt", bound, |v, b| v > b))
    }

    /// Requires `value >= bound`.
    fn gte(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.gte", bound, |v, b| v >= b))
    }

    /// Requires `value < bound`.
    fn lt(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.lt", bound, |v, b| v < b))
    }

    /// Requires `value <= bound`.
    fn lte(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.lte", bound, |v, b| v <= b))
    }

    /// Requires `value == bound`.
    fn eq(self, bound: T) -> And<Self, Rule<T>> {
        And::new(self, bound_rule("kova.comparable.eq", bound, |v, b| v == b))
    }
}

impl<T, V> ComparableExt<T> for V
where
    V: Validator<Input = T, Output = T>,
    T: PartialOrd + Clone + Debug + Into<MessageArg> + Send + Sync + 'static,
{
}

fn bound_rule<T>(id: &str, bound: T, cmp: fn(&T, &T) -> bool) -> Rule<T>
where
    T: PartialOrd + Clone + Into<MessageArg> + Send + Sync + 'static,
{
    let arg = bound.clone().into();
    Rule::predicate(id, vec![arg], move |value: &T| cmp(value, &bound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, ValidatorExt};
    use crate::{ValidationConfig, ValidationResult};

    fn unwrap_failure<T: Debug>(v: ValidationResult<T>) -> crate::Messages {
        v.into_result().unwrap_err()
    }

    fn check<V: Validator>(v: &V, input: &V::Input) -> ValidationResult<V::Output> {
        v.try_validate(input, &ValidationConfig::default()).unwrap()
    }

    #[test]
    fn test_min_max_inclusive() {
        let schema = Schema::int().min(1).max(3);
        assert!(check(&schema, &1).is_success());
        assert!(check(&schema, &3).is_success());
        assert!(check(&schema, &0).is_failure());
        assert!(check(&schema, &4).is_failure());
    }

    #[test]
    fn test_exclusive_bounds() {
        let schema = Schema::of::<f64>().gt(0.0).lt(1.0);
        assert!(check(&schema, &0.5).is_success());
        let messages = unwrap_failure(check(&schema, &0.0));
        assert_eq!(messages.constraint_ids(), vec!["kova.comparable.gt"]);
        assert_eq!(messages.first().text, "must be greater than 0");
    }

    #[test]
    fn test_eq_and_args() {
        let schema = Schema::int().eq(42);
        let messages = unwrap_failure(check(&schema, &41));
        assert_eq!(messages.first().args, vec![MessageArg::Int(42)]);
        assert_eq!(messages.first().text, "must be equal to 42");
    }

    #[test]
    fn test_strings_compare_lexicographically() {
        let schema = Schema::string().gte("b".to_string()).lte("d".to_string());
        assert!(check(&schema, &"c".to_string()).is_success());
        assert!(check(&schema, &"a".to_string()).is_failure());
    }

    #[test]
    fn test_large_bounds_are_grouped() {
        let schema = Schema::of::<u64>().max(1_000_000);
        let messages = unwrap_failure(check(&schema, &2_000_000));
        assert_eq!(messages.first().text, "must be less than or equal to 1,000,000");
    }
}
