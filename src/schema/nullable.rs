//! Validators over `Option<T>`.
//!
//! `None` plays the role of a null value. [`NullableExt`] adds null checks,
//! [`IfPresent`] runs a validator only on a present value, and
//! [`WithDefault`] resolves `None` to a default so that later validators
//! only ever see a present value.

use std::fmt::Debug;
use std::sync::Arc;

use stillwater::Validation;

use crate::constraint::Rule;
use crate::schema::traits::Validator;
use crate::validation::ValidationContext;
use crate::Outcome;

use super::combinators::And;

pub(crate) fn is_null_rule<T: Clone + Debug>() -> Rule<Option<T>> {
    Rule::predicate("kova.nullable.isNull", Vec::new(), |input: &Option<T>| {
        input.is_none()
    })
}

fn not_null_rule<T: Clone + Debug>() -> Rule<Option<T>> {
    Rule::predicate("kova.nullable.notNull", Vec::new(), |input: &Option<T>| {
        input.is_some()
    })
}

/// Null checks and defaults for validators of `Option<T>`.
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, NullableExt, Schema, ValidationConfig, ValidatorExt};
///
/// let count = Schema::nullable::<i32>().with_default(0).and(Schema::int().min(3));
///
/// let config = ValidationConfig::default();
/// assert_eq!(count.try_validate(&None, &config).unwrap().into_result().ok(), Some(0));
/// assert!(count.try_validate(&Some(2), &config).unwrap().is_failure());
/// ```
pub trait NullableExt<T>: Validator<Input = Option<T>, Output = Option<T>> + Sized {
    /// Requires the value to be `None`.
    fn is_null(self) -> And<Self, Rule<Option<T>>>
    where
        T: Clone + Debug,
    {
        And::new(self, is_null_rule())
    }

    /// Requires the value to be present.
    fn not_null(self) -> And<Self, Rule<Option<T>>>
    where
        T: Clone + Debug,
    {
        And::new(self, not_null_rule())
    }

    /// Runs `validator` on a present value; `None` passes through.
    fn if_present<W>(self, validator: W) -> And<Self, IfPresent<W>>
    where
        W: Validator<Input = T, Output = T>,
    {
        And::new(self, IfPresent::new(validator))
    }

    /// Resolves `None` to a clone of `default`.
    fn with_default(self, default: T) -> WithDefault<Self, T>
    where
        T: Clone + Send + Sync + 'static,
    {
        WithDefault::new(self, default)
    }

    /// Resolves `None` to the value produced by `supplier`.
    fn with_default_fn<F>(self, supplier: F) -> WithDefault<Self, T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        WithDefault::from_fn(self, supplier)
    }
}

impl<T, V> NullableExt<T> for V where V: Validator<Input = Option<T>, Output = Option<T>> {}

/// Runs the wrapped validator on `Some`, passing `None` through unchecked.
#[derive(Debug, Clone)]
pub struct IfPresent<V> {
    inner: V,
}

impl<V> IfPresent<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }
}

impl<T, V> Validator for IfPresent<V>
where
    V: Validator<Input = T, Output = T>,
{
    type Input = Option<T>;
    type Output = Option<T>;

    fn execute(&self, input: &Option<T>, ctx: &ValidationContext) -> Outcome<Option<T>> {
        match input {
            None => Ok(Validation::Success(None)),
            Some(value) => Ok(self.inner.execute(value, ctx)?.map(Some)),
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs);
    }
}

type Supplier<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Resolves `None` to a default value.
///
/// As a validator it yields `T`: the inner result when present, the default
/// otherwise. Use [`and`](WithDefault::and) to check only present values, or
/// [`then`](crate::ValidatorExt::then) to check the resolved value.
pub struct WithDefault<V, T> {
    inner: V,
    default: Supplier<T>,
}

impl<V, T> WithDefault<V, T> {
    pub fn new(inner: V, default: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        Self::from_fn(inner, move || default.clone())
    }

    pub fn from_fn<F>(inner: V, supplier: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            inner,
            default: Arc::new(supplier),
        }
    }

    /// Runs `validator` on a present value only.
    ///
    /// `None` resolves to the default without running `validator`.
    pub fn and<W>(self, validator: W) -> WithDefaultAnd<V, W>
    where
        W: Validator<Input = T>,
    {
        WithDefaultAnd {
            inner: self.inner,
            default: self.default,
            validator,
        }
    }
}

impl<V: Clone, T> Clone for WithDefault<V, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            default: Arc::clone(&self.default),
        }
    }
}

impl<T, V> Validator for WithDefault<V, T>
where
    V: Validator<Input = Option<T>, Output = Option<T>>,
{
    type Input = Option<T>;
    type Output = T;

    fn execute(&self, input: &Option<T>, ctx: &ValidationContext) -> Outcome<T> {
        Ok(self
            .inner
            .execute(input, ctx)?
            .map(|value| value.unwrap_or_else(|| (self.default)())))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs);
    }
}

/// A defaulted validator followed by a check on present values.
///
/// Created by [`WithDefault::and`].
pub struct WithDefaultAnd<V, W: Validator> {
    inner: V,
    default: Supplier<W::Input>,
    validator: W,
}

impl<V, W> Validator for WithDefaultAnd<V, W>
where
    W: Validator,
    V: Validator<Input = Option<W::Input>, Output = Option<W::Input>>,
    W::Input: Into<W::Output>,
{
    type Input = Option<W::Input>;
    type Output = W::Output;

    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<W::Output> {
        match self.inner.execute(input, ctx)? {
            Validation::Failure(messages) => Ok(Validation::Failure(messages)),
            Validation::Success(None) => Ok(Validation::Success((self.default)().into())),
            Validation::Success(Some(value)) => self.validator.execute(&value, ctx),
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs);
        self.validator.collect_refs(refs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ComparableExt, Schema, ValidatorExt};
    use crate::ValidationConfig;

    #[test]
    fn test_is_null_and_not_null() {
        let config = ValidationConfig::default();
        let null = Schema::nullable::<i32>().is_null();
        let present = Schema::nullable::<i32>().not_null();

        assert!(null.try_validate(&None, &config).unwrap().is_success());
        let messages = null.try_validate(&Some(1), &config).unwrap().into_result().unwrap_err();
        assert_eq!(messages.first().constraint_id, "kova.nullable.isNull");

        assert!(present.try_validate(&Some(1), &config).unwrap().is_success());
        let messages = present.try_validate(&None, &config).unwrap().into_result().unwrap_err();
        assert_eq!(messages.first().text, "must not be null");
    }

    #[test]
    fn test_if_present_skips_none() {
        let config = ValidationConfig::default();
        let v = Schema::nullable::<i32>().if_present(Schema::int().min(3));
        assert_eq!(v.try_validate(&None, &config).unwrap().into_result().ok(), Some(None));
        assert!(v.try_validate(&Some(1), &config).unwrap().is_failure());
    }

    #[test]
    fn test_with_default_then_checks_resolved_value() {
        let config = ValidationConfig::default();
        let v = Schema::nullable::<i32>()
            .with_default(0)
            .then(Schema::int().min(3));
        let messages = v.try_validate(&None, &config).unwrap().into_result().unwrap_err();
        assert_eq!(messages.first().constraint_id, "kova.comparable.min");
    }

    #[test]
    fn test_with_default_fn() {
        let config = ValidationConfig::default();
        let v = Schema::nullable::<String>().with_default_fn(|| "anonymous".to_string());
        assert_eq!(
            v.try_validate(&None, &config).unwrap().into_result().ok(),
            Some("anonymous".to_string())
        );
    }
}
