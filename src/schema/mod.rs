//! Schema definitions for validation.
//!
//! Every schema is a [`Validator`]. Schemas start from a [`Schema`] factory
//! method and grow through builder methods supplied by extension traits:
//! [`ValidatorExt`] for composition, and [`ComparableExt`], [`NumberExt`],
//! [`StringExt`], [`CollectionExt`] and [`NullableExt`] for the built-in
//! constraints. Violations accumulate unless the run is fail-fast.
//!
//! # Example
//!
//! ```rust
//! use kova::{Schema, StringExt, ValidationConfig, ValidatorExt};
//!
//! let schema = Schema::string().min_len(1).max_len(100);
//!
//! let result = schema.try_validate(&"hello".to_string(), &ValidationConfig::default()).unwrap();
//! assert!(result.is_success());
//! ```

mod collection;
mod combinators;
mod comparable;
mod nullable;
mod numeric;
mod object;
mod ref_schema;
mod string;
mod traits;

use std::collections::HashMap;
use std::fmt::Debug;

pub use collection::{Collection, CollectionExt, MapLike, OnEach, OnEachKey, OnEachValue};
pub use combinators::{And, Map, OnlyIf, Or, Then, OR_CONSTRAINT_ID};
pub use comparable::ComparableExt;
pub use nullable::{IfPresent, NullableExt, WithDefault, WithDefaultAnd};
pub use numeric::{Number, NumberExt};
pub use object::ObjectSchema;
pub use ref_schema::{Lazy, RefSchema};
pub use string::StringExt;
pub use traits::{try_validate, DynValidator, Identity, Validator, ValidatorExt};

use crate::constraint::{ConstraintResult, Rule};
use crate::validation::ValidationContext;

/// Entry point for creating validation schemas.
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, Schema, StringExt};
///
/// let name = Schema::string().not_blank().max_len(50);
/// let age = Schema::int().min(0).max(150);
/// let price = Schema::of::<f64>().gt(0.0);
/// ```
pub struct Schema;

impl Schema {
    /// Creates a schema accepting any `T`.
    pub fn of<T>() -> Identity<T> {
        Identity::new()
    }

    /// Creates a schema for `String` values.
    pub fn string() -> Identity<String> {
        Identity::new()
    }

    /// Creates a schema for `i32` values.
    pub fn int() -> Identity<i32> {
        Identity::new()
    }

    /// Creates a schema for `Option<T>` values, where `None` is null.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{NullableExt, Schema, StringExt, ValidationConfig, ValidatorExt};
    ///
    /// let nickname = Schema::nullable::<String>().if_present(Schema::string().min_len(2));
    ///
    /// let config = ValidationConfig::default();
    /// assert!(nickname.try_validate(&None, &config).unwrap().is_success());
    /// assert!(nickname.try_validate(&Some("x".to_string()), &config).unwrap().is_failure());
    /// ```
    pub fn nullable<T>() -> Identity<Option<T>> {
        Identity::new()
    }

    /// Creates a schema for `Vec<E>` values.
    pub fn list<E>() -> Identity<Vec<E>> {
        Identity::new()
    }

    /// Creates a schema for `HashMap<K, V>` values.
    pub fn map<K, V>() -> Identity<HashMap<K, V>> {
        Identity::new()
    }

    /// Creates an object schema whose messages are rooted at `name`.
    pub fn object<T>(name: impl Into<String>) -> ObjectSchema<T> {
        ObjectSchema::new(name)
    }

    /// Creates a reference to a schema registered under `name`.
    pub fn ref_<T>(name: impl Into<String>) -> RefSchema<T> {
        RefSchema::new(name)
    }

    /// Creates a schema resolved by calling `resolve` at validation time.
    pub fn lazy<T, F>(resolve: F) -> Lazy<T, F>
    where
        F: Fn() -> DynValidator<T>,
    {
        Lazy::new(resolve)
    }

    /// Creates a single custom rule over `T`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{ConstraintResult, Schema, ValidationConfig, ValidatorExt};
    ///
    /// let even = Schema::constrain("app.even", |n: &u32, _| {
    ///     ConstraintResult::satisfies(n % 2 == 0, "must be even")
    /// });
    /// assert!(even.try_validate(&4, &ValidationConfig::default()).unwrap().is_success());
    /// ```
    pub fn constrain<T, F>(id: impl Into<String>, check: F) -> Rule<T>
    where
        T: Clone + Debug,
        F: Fn(&T, &ValidationContext) -> ConstraintResult + Send + Sync + 'static,
    {
        Rule::new(id, check)
    }
}
