//! Message accumulation for sequences of checks.
//!
//! Composite validators (objects, collections) run a sequence of sub-checks
//! and need the same policy everywhere: collect every failure in order, or
//! stop after the first one when the run is fail-fast.

use stillwater::prelude::*;
use stillwater::Validation;

use crate::error::{Message, Messages};
use crate::validation::ValidationContext;
use crate::ValidationResult;

pub(crate) struct Accumulator {
    messages: Vec<Message>,
    fail_fast: bool,
}

impl Accumulator {
    pub(crate) fn new(ctx: &ValidationContext) -> Self {
        Self {
            messages: Vec::new(),
            fail_fast: ctx.is_fail_fast(),
        }
    }

    /// Records the outcome of one sub-check, returning its value on success.
    pub(crate) fn push<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Validation::Success(value) => Some(value),
            Validation::Failure(messages) => {
                self.messages.extend(messages);
                None
            }
        }
    }

    /// True once a failure has been seen under fail-fast.
    pub(crate) fn should_stop(&self) -> bool {
        self.fail_fast && !self.messages.is_empty()
    }

    pub(crate) fn finish<T>(self, value: T) -> ValidationResult<T> {
        match Messages::from_vec(self.messages) {
            None => Validation::Success(value),
            Some(messages) => Validation::Failure(messages),
        }
    }
}

/// Combines two results, keeping the right value and every message.
pub(crate) fn combine<A, B>(
    left: ValidationResult<A>,
    right: ValidationResult<B>,
) -> ValidationResult<B> {
    match (left, right) {
        (Validation::Success(_), right) => right,
        (Validation::Failure(left), Validation::Success(_)) => Validation::Failure(left),
        (Validation::Failure(left), Validation::Failure(right)) => {
            Validation::Failure(left.combine(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationConfig;

    fn failure(id: &str) -> ValidationResult<i32> {
        Validation::Failure(Messages::single(Message::new(id, id)))
    }

    #[test]
    fn test_accumulates_in_order() {
        let ctx = ValidationContext::new(ValidationConfig::default());
        let mut acc = Accumulator::new(&ctx);
        assert_eq!(acc.push(Validation::Success(1)), Some(1));
        assert_eq!(acc.push(failure("a")), None);
        assert!(!acc.should_stop());
        acc.push(failure("b"));

        let messages = acc.finish(()).into_result().unwrap_err();
        assert_eq!(messages.constraint_ids(), vec!["a", "b"]);
    }

    #[test]
    fn test_stops_after_first_failure_when_fail_fast() {
        let ctx = ValidationContext::new(ValidationConfig::new().fail_fast(true));
        let mut acc = Accumulator::new(&ctx);
        acc.push(Validation::Success(1));
        assert!(!acc.should_stop());
        acc.push(failure("a"));
        assert!(acc.should_stop());
    }

    #[test]
    fn test_finish_without_failures_succeeds() {
        let ctx = ValidationContext::new(ValidationConfig::default());
        let acc = Accumulator::new(&ctx);
        assert_eq!(acc.finish(7).into_result().ok(), Some(7));
    }

    #[test]
    fn test_combine_keeps_both_sides() {
        let combined = combine(failure("a"), failure("b"));
        let messages = combined.into_result().unwrap_err();
        assert_eq!(messages.constraint_ids(), vec!["a", "b"]);
        let both = combine(Validation::Success(1), Validation::Success(2));
        assert_eq!(both.into_result().ok(), Some(2));
    }
}
