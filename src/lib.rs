//! # Kova
//!
//! A validation-combinator library that reports every violated constraint as
//! a localized, path-annotated message.
//!
//! ## Overview
//!
//! Validators are small typed values composed with `and`, `or`, `then` and
//! `only_if`. Running one produces stillwater's `Validation`: either the
//! validated value, or a non-empty ordered list of [`Messages`]. By default
//! every constraint runs and all violations are collected; a fail-fast
//! [`ValidationConfig`] stops at the first one.
//!
//! Message texts come from properties bundles with user overrides and locale
//! fallback. Programming and configuration mistakes, such as a missing
//! message resource or an unresolved schema reference, are reported as an
//! [`Error`] instead of a message.
//!
//! ## Core Types
//!
//! - [`Validator`]: the trait every schema, rule and combinator implements
//! - [`Schema`]: entry point for creating schemas
//! - [`ValidationConfig`]: fail-fast policy, locale, logger and message overrides
//! - [`Message`] / [`Messages`]: violations with their root label and [`Path`]
//! - [`SchemaRegistry`]: named schemas for references and recursion
//!
//! ## Example
//!
//! ```rust
//! use kova::{
//!     CollectionExt, ComparableExt, Schema, StringExt, ValidationConfig, ValidatorExt,
//! };
//!
//! #[derive(Debug, Clone)]
//! struct Team {
//!     name: String,
//!     scores: Vec<i32>,
//! }
//!
//! let schema = Schema::object::<Team>("Team")
//!     .field("name", |t: &Team| &t.name, Schema::string().not_blank())
//!     .field(
//!         "scores",
//!         |t: &Team| &t.scores,
//!         Schema::list::<i32>().on_each(Schema::int().min(0)),
//!     );
//!
//! let team = Team { name: "".into(), scores: vec![3, -1] };
//! let messages = schema
//!     .try_validate(&team, &ValidationConfig::default())
//!     .unwrap()
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages.first().to_string(), "Team.name: must not be blank");
//! assert_eq!(
//!     messages.iter().nth(1).unwrap().location(),
//!     "Team.scores[1]<collection element>"
//! );
//! ```

mod accumulator;
pub mod constraint;
pub mod error;
pub mod interop;
pub mod log;
pub mod message;
pub mod path;
pub mod registry;
pub mod schema;
pub mod validation;

pub use constraint::{ConstraintResult, Rule, Violation};
pub use error::{Error, Message, Messages};
pub use interop::ToJson;
pub use log::{LogEntry, Logger};
pub use message::{
    format_template, render_arg, Locale, MessageArg, MessageBundle, MessageCatalog,
    MessageResolver, DEFAULT_BUNDLE_NAME, USER_BUNDLE_NAME,
};
pub use path::Path;
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    try_validate, And, Collection, CollectionExt, ComparableExt, DynValidator, Identity,
    IfPresent, Lazy, Map, MapLike, NullableExt, Number, NumberExt, ObjectSchema, OnEach,
    OnEachKey, OnEachValue, OnlyIf, Or, RefSchema, Schema, StringExt, Then, Validator,
    ValidatorExt, WithDefault, WithDefaultAnd, OR_CONSTRAINT_ID,
};
pub use validation::{
    RegistryAccess, ValidationConfig, ValidationContext, DEFAULT_MAX_DEPTH, DEPTH_ERROR_PATH_NAMES,
};

/// Type alias for validation results using Messages
pub type ValidationResult<T> = stillwater::Validation<T, Messages>;

/// The outcome of running a validator: a validation result, or a fatal error.
pub type Outcome<T> = Result<ValidationResult<T>, Error>;
