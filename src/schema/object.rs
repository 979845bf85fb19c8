//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating structs field by
//! field. Each field is read through an accessor and checked by its own
//! validator under a path named after the field.

use std::fmt::{self, Debug};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::accumulator::Accumulator;
use crate::constraint::{ConstraintResult, Rule};
use crate::validation::ValidationContext;
use crate::{Outcome, ValidationResult};

use super::traits::Validator;

type FieldCheck<T> = Arc<dyn Fn(&T, &ValidationContext) -> Outcome<()> + Send + Sync>;

/// Definition of a field within an object schema.
struct FieldDef<T> {
    check: FieldCheck<T>,
    refs: Vec<String>,
}

impl<T> Clone for FieldDef<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            refs: self.refs.clone(),
        }
    }
}

/// A schema for validating a struct.
///
/// The schema name becomes the root label of every message, unless an
/// enclosing schema already set one. Fields run in declaration order and
/// their failures accumulate, or stop at the first one under fail-fast.
/// Success yields the input unchanged.
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, Schema, StringExt, ValidationConfig, ValidatorExt};
///
/// #[derive(Debug, Clone)]
/// struct User {
///     name: String,
///     age: i32,
/// }
///
/// let schema = Schema::object::<User>("User")
///     .field("name", |u: &User| &u.name, Schema::string().not_blank())
///     .field("age", |u: &User| &u.age, Schema::int().min(0));
///
/// let user = User { name: " ".to_string(), age: -1 };
/// let result = schema.try_validate(&user, &ValidationConfig::default()).unwrap();
///
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages.first().to_string(), "User.name: must not be blank");
/// ```
pub struct ObjectSchema<T> {
    name: String,
    fields: IndexMap<String, FieldDef<T>>,
    rules: Vec<FieldCheck<T>>,
}

impl<T> ObjectSchema<T> {
    /// Creates a new object schema with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            rules: Vec::new(),
        }
    }

    /// Adds a field read through `accessor` and checked by `validator`.
    ///
    /// Adding a field under an existing name replaces its validator and keeps
    /// its position.
    pub fn field<F, V, A>(mut self, name: impl Into<String>, accessor: A, validator: V) -> Self
    where
        V: Validator<Input = F> + 'static,
        A: for<'a> Fn(&'a T) -> &'a F + Send + Sync + 'static,
    {
        let mut refs = Vec::new();
        validator.collect_refs(&mut refs);

        let check: FieldCheck<T> = Arc::new(move |input: &T, ctx: &ValidationContext| {
            let result = validator.execute(accessor(input), ctx)?;
            Ok(result.map(|_| ()))
        });
        self.fields.insert(name.into(), FieldDef { check, refs });
        self
    }

    /// Adds a rule over the whole object, checked after the fields.
    ///
    /// Its messages carry the schema's root label and no field path.
    pub fn constrain<F>(mut self, id: impl Into<String>, check: F) -> Self
    where
        T: Clone + Debug + 'static,
        F: Fn(&T, &ValidationContext) -> ConstraintResult + Send + Sync + 'static,
    {
        let rule = Rule::new(id, check);
        self.rules.push(Arc::new(move |input: &T, ctx: &ValidationContext| {
            Ok(rule.execute(input, ctx)?.map(|_| ()))
        }));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    fn check_fields(&self, input: &T, ctx: &ValidationContext) -> Outcome<()> {
        let mut acc = Accumulator::new(ctx);
        for (name, field) in &self.fields {
            let field_ctx = ctx.add_path(name.as_str());
            acc.push((field.check)(input, &field_ctx)?);
            if acc.should_stop() {
                return Ok(acc.finish(()));
            }
        }
        for rule in &self.rules {
            acc.push(rule(input, ctx)?);
            if acc.should_stop() {
                break;
            }
        }
        Ok(acc.finish(()))
    }
}

impl<T> Clone for ObjectSchema<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fields: self.fields.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<T> Debug for ObjectSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSchema")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl<T: Clone> Validator for ObjectSchema<T> {
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, ctx: &ValidationContext) -> Outcome<T> {
        let ctx = ctx.add_root(&self.name);
        let result: ValidationResult<()> = self.check_fields(input, &ctx)?;
        Ok(result.map(|_| input.clone()))
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        for field in self.fields.values() {
            refs.extend(field.refs.iter().cloned());
        }
    }
}
