//! Leaf constraints.
//!
//! A constraint is a pure function of the input and the context that yields a
//! [`ConstraintResult`]. [`Rule`] wraps such a function with its constraint id
//! and plugs it into the engine as a [`Validator`].

use std::fmt::Debug;
use std::sync::Arc;

use stillwater::Validation;

use crate::error::{Error, Messages};
use crate::message::MessageArg;
use crate::schema::Validator;
use crate::validation::ValidationContext;
use crate::Outcome;

/// The outcome of evaluating one constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintResult {
    Satisfied,
    Violated(Violation),
}

impl ConstraintResult {
    /// `Satisfied` if `ok`, otherwise a violation built by `violation`.
    pub fn require(ok: bool, violation: impl FnOnce() -> Violation) -> Self {
        if ok {
            ConstraintResult::Satisfied
        } else {
            ConstraintResult::Violated(violation())
        }
    }

    /// `Satisfied` if `ok`, otherwise a violation with literal `text`.
    pub fn satisfies(ok: bool, text: impl Into<String>) -> Self {
        Self::require(ok, || Violation::text(text))
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, ConstraintResult::Satisfied)
    }
}

/// What a violated constraint reports.
///
/// A resource violation is rendered through the message bundles; its key
/// defaults to the constraint id. A text violation carries its final text.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    Resource {
        key: Option<String>,
        args: Vec<MessageArg>,
    },
    Text {
        text: String,
        args: Vec<MessageArg>,
    },
}

impl Violation {
    /// A violation rendered from the bundle entry named by the constraint id.
    pub fn resource(args: Vec<MessageArg>) -> Self {
        Violation::Resource { key: None, args }
    }

    /// A violation rendered from an explicit bundle key.
    pub fn resource_key(key: impl Into<String>, args: Vec<MessageArg>) -> Self {
        Violation::Resource {
            key: Some(key.into()),
            args,
        }
    }

    /// A violation with literal text.
    pub fn text(text: impl Into<String>) -> Self {
        Violation::Text {
            text: text.into(),
            args: Vec::new(),
        }
    }

    /// Replaces the arguments and returns self for chaining.
    pub fn with_args(self, args: Vec<MessageArg>) -> Self {
        match self {
            Violation::Resource { key, .. } => Violation::Resource { key, args },
            Violation::Text { text, .. } => Violation::Text { text, args },
        }
    }

    pub fn args(&self) -> &[MessageArg] {
        match self {
            Violation::Resource { args, .. } | Violation::Text { args, .. } => args,
        }
    }
}

type CheckFn<T> =
    Arc<dyn Fn(&T, &ValidationContext) -> Result<ConstraintResult, Error> + Send + Sync>;

/// A named leaf constraint.
///
/// Every evaluation is recorded: it is reported to the logger, and a violation
/// becomes exactly one [`Message`](crate::Message).
///
/// # Example
///
/// ```rust
/// use kova::{ConstraintResult, Rule, ValidationConfig, ValidatorExt};
///
/// let even = Rule::new("app.even", |n: &i32, _| {
///     ConstraintResult::satisfies(n % 2 == 0, "must be even")
/// });
///
/// let result = even.try_validate(&3, &ValidationConfig::default()).unwrap();
/// assert!(result.is_failure());
/// ```
pub struct Rule<T> {
    id: String,
    check: CheckFn<T>,
}

impl<T> Rule<T> {
    /// Creates a rule from an infallible check.
    pub fn new<F>(id: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &ValidationContext) -> ConstraintResult + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            check: Arc::new(move |input: &T, ctx: &ValidationContext| Ok(check(input, ctx))),
        }
    }

    /// Creates a rule whose check may fail internally.
    ///
    /// An `Err` aborts the whole validation run; it is never reported as a
    /// message.
    pub fn fallible<F>(id: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T, &ValidationContext) -> Result<ConstraintResult, Error> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            check: Arc::new(check),
        }
    }

    /// Creates a rule reporting the bundle message for `id` with `args`.
    pub(crate) fn predicate<F>(id: impl Into<String>, args: Vec<MessageArg>, ok: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(id, move |input, _| {
            ConstraintResult::require(ok(input), || Violation::resource(args.clone()))
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Evaluates the check without recording anything.
    pub fn check(&self, input: &T, ctx: &ValidationContext) -> Result<ConstraintResult, Error> {
        (self.check)(input, ctx)
    }
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: Clone + Debug> Validator for Rule<T> {
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, ctx: &ValidationContext) -> Outcome<T> {
        let result = self.check(input, ctx)?;
        Ok(match ctx.record(&self.id, input, result)? {
            None => Validation::Success(input.clone()),
            Some(message) => Validation::Failure(Messages::single(message)),
        })
    }
}
