//! Deferred schema references.
//!
//! This module provides [`Lazy`], which binds a schema through a function
//! called at validation time, and [`RefSchema`], which binds a schema by name
//! through the registry in the [`ValidationConfig`](crate::ValidationConfig).
//! Both enable recursive and mutually recursive schemas; recursion depth
//! follows the structure of the validated value.

use std::any::type_name;
use std::fmt::{self, Debug};
use std::marker::PhantomData;

use crate::registry::RegistryError;
use crate::validation::ValidationContext;
use crate::Outcome;

use super::traits::{DynValidator, Validator};

/// A schema resolved by calling a function at validation time.
///
/// Each resolution counts towards the configured maximum depth
/// ([`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH) unless set with
/// [`ValidationConfig::max_depth`](crate::ValidationConfig::max_depth)).
/// Values nested deeper than that fail with
/// [`Error::DepthExceeded`](crate::Error::DepthExceeded), cyclic or not.
///
/// # Example
///
/// ```rust
/// use kova::{CollectionExt, DynValidator, Schema, StringExt, ValidationConfig, ValidatorExt};
///
/// #[derive(Debug, Clone)]
/// struct Category {
///     name: String,
///     children: Vec<Category>,
/// }
///
/// fn category_schema() -> DynValidator<Category> {
///     Schema::object::<Category>("Category")
///         .field("name", |c: &Category| &c.name, Schema::string().not_blank())
///         .field(
///             "children",
///             |c: &Category| &c.children,
///             Schema::list::<Category>().on_each(Schema::lazy(category_schema)),
///         )
///         .into_dyn()
/// }
///
/// let tree = Category {
///     name: "root".into(),
///     children: vec![Category { name: " ".into(), children: Vec::new() }],
/// };
/// let result = category_schema().try_validate(&tree, &ValidationConfig::default()).unwrap();
/// let messages = result.into_result().unwrap_err();
/// assert_eq!(messages.first().path.full_name(), "children[0]<collection element>.name");
/// ```
pub struct Lazy<T, F> {
    resolve: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> Lazy<T, F>
where
    F: Fn() -> DynValidator<T>,
{
    pub fn new(resolve: F) -> Self {
        Self {
            resolve,
            _marker: PhantomData,
        }
    }
}

impl<T, F: Clone> Clone for Lazy<T, F> {
    fn clone(&self) -> Self {
        Self {
            resolve: self.resolve.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, F> Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lazy<{}>", type_name::<T>())
    }
}

impl<T, F> Validator for Lazy<T, F>
where
    F: Fn() -> DynValidator<T> + Send + Sync,
{
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, ctx: &ValidationContext) -> Outcome<T> {
        let ctx = ctx.increment_depth()?;
        (self.resolve)().execute(input, &ctx)
    }

    // Resolving here would recurse forever on cyclic schemas.
    fn collect_refs(&self, _refs: &mut Vec<String>) {}
}

/// A schema that references another schema by name.
///
/// The name is resolved on every execution through the registry set with
/// [`ValidationConfig::registry`](crate::ValidationConfig::registry);
/// [`SchemaRegistry::try_validate`](crate::SchemaRegistry::try_validate) sets
/// it automatically. A missing registry, an unknown name or a schema of a
/// different type is a fatal [`RegistryError`].
///
/// # Example
///
/// ```rust
/// use kova::{ComparableExt, Schema, SchemaRegistry, ValidationConfig};
///
/// #[derive(Debug, Clone)]
/// struct Order {
///     quantity: i32,
/// }
///
/// let registry = SchemaRegistry::new();
/// registry.register("Quantity", Schema::int().min(1)).unwrap();
/// registry
///     .register(
///         "Order",
///         Schema::object::<Order>("Order")
///             .field("quantity", |o: &Order| &o.quantity, Schema::ref_::<i32>("Quantity")),
///     )
///     .unwrap();
///
/// let result = registry
///     .try_validate("Order", &Order { quantity: 0 }, ValidationConfig::default())
///     .unwrap();
/// assert!(result.is_failure());
/// ```
pub struct RefSchema<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RefSchema<T> {
    /// Creates a new schema reference.
    ///
    /// This is typically called via `Schema::ref_()` rather than directly.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }

    /// Returns the name of the referenced schema.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for RefSchema<T> {
    fn clone(&self) -> Self {
        Self::new(self.name.clone())
    }
}

impl<T> Debug for RefSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefSchema").field("name", &self.name).finish()
    }
}

impl<T: 'static> Validator for RefSchema<T> {
    type Input = T;
    type Output = T;

    fn execute(&self, input: &T, ctx: &ValidationContext) -> Outcome<T> {
        let ctx = ctx.increment_depth()?;
        let registry = ctx
            .registry()
            .ok_or_else(|| RegistryError::MissingRegistry(self.name.clone()))?;
        let schema = registry
            .get_schema(&self.name)
            .ok_or_else(|| RegistryError::SchemaNotFound(self.name.clone()))?;
        let schema = schema
            .downcast::<DynValidator<T>>()
            .map_err(|_| RegistryError::TypeMismatch {
                name: self.name.clone(),
                expected: type_name::<T>(),
            })?;

        schema.execute(input, &ctx)
    }

    fn collect_refs(&self, refs: &mut Vec<String>) {
        refs.push(self.name.clone());
    }
}
