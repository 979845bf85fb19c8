//! Validator combinators.
//!
//! - [`And`]: both validators run on the same input
//! - [`Or`]: the first successful alternative wins
//! - [`Then`]: the output of one validator feeds the next
//! - [`Map`]: transforms the success value
//! - [`OnlyIf`]: runs a validator only when a predicate holds
//!
//! # Example
//!
//! ```rust
//! use kova::{ComparableExt, Schema, ValidationConfig, ValidatorExt};
//!
//! // Either small or large, never in between.
//! let extreme = Schema::int().max(5).or(Schema::int().min(100));
//!
//! let config = ValidationConfig::default();
//! assert!(extreme.try_validate(&3, &config).unwrap().is_success());
//! assert!(extreme.try_validate(&50, &config).unwrap().is_failure());
//! ```

use stillwater::Validation;

use crate::accumulator;
use crate::constraint::Violation;
use crate::error::Messages;
use crate::message::MessageArg;
use crate::schema::traits::Validator;
use crate::validation::ValidationContext;
use crate::Outcome;

/// Constraint id reported when every alternative of an [`Or`] fails.
pub const OR_CONSTRAINT_ID: &str = "kova.or";

/// Sequential composition on the same input.
///
/// Created by [`ValidatorExt::and`](crate::ValidatorExt::and).
#[derive(Debug, Clone)]
pub struct And<L, R> {
    left: L,
    right: R,
}

impl<L, R> And<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validator for And<L, R>
where
    L: Validator,
    R: Validator<Input = L::Input>,
{
    type Input = L::Input;
    type Output = R::Output;

    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<R::Output> {
        match self.left.execute(input, ctx)? {
            Validation::Success(_) => self.right.execute(input, ctx),
            Validation::Failure(messages) if ctx.is_fail_fast() => {
                Ok(Validation::Failure(messages))
            }
            left => {
                let right = self.right.execute(input, ctx)?;
                Ok(accumulator::combine(left, right))
            }
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.left.collect_refs(refs);
        self.right.collect_refs(refs);
    }
}

/// Alternation: the first alternative that succeeds provides the value.
///
/// Alternatives that fail before a success still reach the logger, but
/// their messages are discarded. When both fail, the result is a single
/// `kova.or` message whose arguments are the message lists of each side.
#[derive(Debug, Clone)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> Validator for Or<L, R>
where
    L: Validator,
    R: Validator<Input = L::Input, Output = L::Output>,
{
    type Input = L::Input;
    type Output = L::Output;

    fn execute(&self, input: &Self::Input, ctx: &ValidationContext) -> Outcome<L::Output> {
        let left = match self.left.execute(input, ctx)? {
            Validation::Success(value) => return Ok(Validation::Success(value)),
            Validation::Failure(messages) => messages,
        };
        let right = match self.right.execute(input, ctx)? {
            Validation::Success(value) => return Ok(Validation::Success(value)),
            Validation::Failure(messages) => messages,
        };

        let violation = Violation::resource(vec![
            MessageArg::Messages(left.into_vec()),
            MessageArg::Messages(right.into_vec()),
        ]);
        let message = ctx.message(OR_CONSTRAINT_ID, &violation)?;
        Ok(Validation::Failure(Messages::single(message)))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.left.collect_refs(refs);
        self.right.collect_refs(refs);
    }
}

/// Pipes the output of `first` into `next`.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A, B> Then<A, B> {
    pub fn new(first: A, next: B) -> Self {
        Self { first, next }
    }
}

impl<A, B> Validator for Then<A, B>
where
    A: Validator,
    B: Validator<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    fn execute(&self, input: &A::Input, ctx: &ValidationContext) -> Outcome<B::Output> {
        match self.first.execute(input, ctx)? {
            Validation::Success(value) => self.next.execute(&value, ctx),
            Validation::Failure(messages) => Ok(Validation::Failure(messages)),
        }
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.first.collect_refs(refs);
        self.next.collect_refs(refs);
    }
}

/// Transforms the success value of a validator.
#[derive(Clone)]
pub struct Map<V, F> {
    inner: V,
    f: F,
}

impl<V, F> Map<V, F> {
    pub fn new(inner: V, f: F) -> Self {
        Self { inner, f }
    }
}

impl<V, F, U> Validator for Map<V, F>
where
    V: Validator,
    F: Fn(V::Output) -> U + Send + Sync,
{
    type Input = V::Input;
    type Output = U;

    fn execute(&self, input: &V::Input, ctx: &ValidationContext) -> Outcome<U> {
        Ok(self.inner.execute(input, ctx)?.map(&self.f))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs);
    }
}

/// Runs a validator only when a predicate over the input holds.
#[derive(Clone)]
pub struct OnlyIf<V, P> {
    inner: V,
    predicate: P,
}

impl<V, P> OnlyIf<V, P> {
    pub fn new(inner: V, predicate: P) -> Self {
        Self { inner, predicate }
    }
}

impl<T, V, P> Validator for OnlyIf<V, P>
where
    T: Clone,
    V: Validator<Input = T, Output = T>,
    P: Fn(&T) -> bool + Send + Sync,
{
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, ctx: &ValidationContext) -> Outcome<T> {
        if !(self.predicate)(input) {
            return Ok(Validation::Success(input.clone()));
        }
        self.inner.execute(input, ctx)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        self.inner.collect_refs(refs);
    }
}
