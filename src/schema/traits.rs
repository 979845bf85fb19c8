//! Traits for validator polymorphism.
//!
//! This module provides the [`Validator`] trait every schema, leaf rule and
//! combinator implements, and [`ValidatorExt`], the builder methods shared by
//! all of them.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::sync::Arc;

use stillwater::Validation;

use crate::constraint::{ConstraintResult, Rule};
use crate::error::Error;
use crate::schema::combinators::{And, Map, OnlyIf, Or, Then};
use crate::schema::nullable::{IfPresent, WithDefault};
use crate::validation::{ValidationConfig, ValidationContext};
use crate::Outcome;

/// A typed validator.
///
/// `execute` checks `input` under `ctx` and yields either a validated output
/// or the violation messages. An `Err` is reserved for programming and
/// configuration mistakes and aborts the whole run.
///
/// The `Send + Sync` bounds allow validators to be shared across threads and
/// stored as `Arc<dyn Validator>`.
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, Schema, ValidationConfig, ValidatorExt};
///
/// let age = Schema::int().min(0).max(150);
///
/// let result = age.try_validate(&42, &ValidationConfig::default()).unwrap();
/// assert!(result.is_success());
/// ```
pub trait Validator: Send + Sync {
    /// The type being validated.
    type Input;

    /// The type produced by successful validation.
    type Output;

    /// Validates `input` in the given context.
    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<Self::Output>;

    /// Collects the names of all registry references used by this validator.
    ///
    /// Used by [`SchemaRegistry::validate_refs`](crate::SchemaRegistry::validate_refs).
    /// Validators without nested references keep the default.
    fn collect_refs(&self, _refs: &mut Vec<String>) {}
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    type Input = V::Input;
    type Output = V::Output;

    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<Self::Output> {
        (**self).execute(input, ctx)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        (**self).collect_refs(refs)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    type Input = V::Input;
    type Output = V::Output;

    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<Self::Output> {
        (**self).execute(input, ctx)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        (**self).collect_refs(refs)
    }
}

/// A shared, type-erased validator that checks a `T` and yields it back.
pub type DynValidator<T> = Arc<dyn Validator<Input = T, Output = T>>;

/// Validates `input` with a fresh context built from `config`.
///
/// # Example
///
/// ```rust
/// use kova::{try_validate, Schema, StringExt, ValidationConfig};
///
/// let name = Schema::string().not_blank();
/// let result = try_validate(&name, &"  ".to_string(), &ValidationConfig::default()).unwrap();
/// assert!(result.is_failure());
/// ```
pub fn try_validate<V: Validator + ?Sized>(
    validator: &V,
    input: &V::Input,
    config: &ValidationConfig,
) -> Outcome<V::Output> {
    let ctx = ValidationContext::new(config.clone());
    let result = validator.execute(input, &ctx)?;
    tracing::debug!(
        success = result.is_success(),
        fail_fast = config.is_fail_fast(),
        locale = %config.get_locale(),
        "validation finished"
    );
    Ok(result)
}

/// Builder methods available on every [`Validator`].
pub trait ValidatorExt: Validator + Sized {
    /// Runs `self` and `other` on the same input.
    ///
    /// Both failures are kept unless the run is fail-fast, in which case
    /// `other` is skipped once `self` fails. The output is `other`'s.
    fn and<W>(self, other: W) -> And<Self, W>
    where
        W: Validator<Input = Self::Input>,
    {
        And::new(self, other)
    }

    /// Tries `self`, then `other`; the first success wins.
    fn or<W>(self, other: W) -> Or<Self, W>
    where
        W: Validator<Input = Self::Input, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Feeds the output of `self` into `next`.
    fn then<W>(self, next: W) -> Then<Self, W>
    where
        W: Validator<Input = Self::Output>,
    {
        Then::new(self, next)
    }

    /// Transforms the success value.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Map::new(self, f)
    }

    /// Runs `self` only when `predicate` holds; otherwise the input passes
    /// through unchanged and nothing is logged.
    fn only_if<P>(self, predicate: P) -> OnlyIf<Self, P>
    where
        Self: Validator<Output = <Self as Validator>::Input>,
        P: Fn(&Self::Input) -> bool + Send + Sync,
    {
        OnlyIf::new(self, predicate)
    }

    /// Adds a custom rule with the given constraint id.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{ConstraintResult, Schema, ValidationConfig, ValidatorExt};
    ///
    /// let even = Schema::int().constrain("app.even", |n, _| {
    ///     ConstraintResult::satisfies(n % 2 == 0, "must be even")
    /// });
    ///
    /// let messages = even
    ///     .try_validate(&3, &ValidationConfig::default())
    ///     .unwrap()
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(messages.first().text, "must be even");
    /// ```
    fn constrain<F>(self, id: impl Into<String>, check: F) -> And<Self, Rule<Self::Input>>
    where
        Self: Validator<Output = <Self as Validator>::Input>,
        Self::Input: Clone + Debug,
        F: Fn(&Self::Input, &ValidationContext) -> ConstraintResult + Send + Sync + 'static,
    {
        self.and(Rule::new(id, check))
    }

    /// Adds a custom rule whose check may fail internally.
    fn try_constrain<F>(self, id: impl Into<String>, check: F) -> And<Self, Rule<Self::Input>>
    where
        Self: Validator<Output = <Self as Validator>::Input>,
        Self::Input: Clone + Debug,
        F: Fn(&Self::Input, &ValidationContext) -> Result<ConstraintResult, Error>
            + Send
            + Sync
            + 'static,
    {
        self.and(Rule::fallible(id, check))
    }

    /// Accepts `None` and runs `self` on `Some`.
    ///
    /// Behaves as `is_null().or(self)`: a failing `Some` reports `kova.or`.
    fn as_nullable(self) -> Or<Rule<Option<Self::Input>>, IfPresent<Self>>
    where
        Self: Validator<Output = <Self as Validator>::Input>,
        Self::Input: Clone + Debug,
    {
        Or::new(crate::schema::nullable::is_null_rule(), IfPresent::new(self))
    }

    /// Like [`as_nullable`](ValidatorExt::as_nullable), then resolves `None`
    /// to `default`. Logs and failures are those of the `or` form.
    fn as_nullable_with_default(
        self,
        default: Self::Input,
    ) -> WithDefault<Or<Rule<Option<Self::Input>>, IfPresent<Self>>, Self::Input>
    where
        Self: Validator<Output = <Self as Validator>::Input>,
        Self::Input: Clone + Debug + Send + Sync + 'static,
    {
        WithDefault::new(self.as_nullable(), default)
    }

    /// Erases the concrete type behind an `Arc`.
    fn into_dyn(self) -> DynValidator<Self::Input>
    where
        Self: Validator<Output = <Self as Validator>::Input> + 'static,
    {
        Arc::new(self)
    }

    /// Validates `input` with a fresh context built from `config`.
    fn try_validate(
        &self,
        input: &Self::Input,
        config: &ValidationConfig,
    ) -> Outcome<Self::Output> {
        try_validate(self, input, config)
    }
}

impl<V: Validator> ValidatorExt for V {}

/// The validator that accepts every `T` and yields it back.
///
/// Starting point of every builder chain; see [`Schema`](crate::Schema).
pub struct Identity<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> Identity<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity<{}>", std::any::type_name::<T>())
    }
}

impl<T: Clone> Validator for Identity<T> {
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, _ctx: &ValidationContext) -> Outcome<T> {
        Ok(Validation::Success(input.clone()))
    }
}
