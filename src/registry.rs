//! Schema registry for named schema storage and reference resolution.
//!
//! This module provides the [`SchemaRegistry`] type that stores named schemas
//! and resolves [`RefSchema`](crate::RefSchema) references during validation.

use std::any::{type_name, Any};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::schema::{DynValidator, Validator};
use crate::validation::{RegistryAccess, ValidationConfig};
use crate::Outcome;

/// A registered schema, type-erased.
#[derive(Clone)]
struct Entry {
    schema: Arc<dyn Any + Send + Sync>,
    refs: Vec<String>,
    type_name: &'static str,
}

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<IndexMap<String, Entry>>>;

/// A thread-safe registry for storing and retrieving named schemas.
///
/// Schemas are registered under a name together with the type they validate.
/// Other schemas refer to them with `Schema::ref_()`, which also allows
/// mutually recursive schemas.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Multiple threads can validate concurrently (read-only access)
/// - Registration operations are serialized (write access)
///
/// Clones share the same storage.
///
/// # Example
///
/// ```rust
/// use kova::{Schema, SchemaRegistry, StringExt};
///
/// let registry = SchemaRegistry::new();
///
/// registry.register("Email", Schema::string().contains("@")).unwrap();
/// registry.register("Contacts", Schema::list::<String>()).unwrap();
///
/// // Duplicate registration fails
/// assert!(registry.register("Email", Schema::string()).is_err());
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    /// Creates a new empty schema registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register<T, V>(&self, name: impl Into<String>, schema: V) -> Result<(), RegistryError>
    where
        T: 'static,
        V: Validator<Input = T, Output = T> + 'static,
    {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        let mut refs = Vec::new();
        schema.collect_refs(&mut refs);
        let schema: DynValidator<T> = Arc::new(schema);

        tracing::debug!(
            name = %name,
            input = type_name::<T>(),
            refs = refs.len(),
            "schema registered"
        );
        schemas.insert(
            name,
            Entry {
                schema: Arc::new(schema),
                refs,
                type_name: type_name::<T>(),
            },
        );
        Ok(())
    }

    /// Retrieves a schema by name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the name is unknown, and
    /// `RegistryError::TypeMismatch` if the schema validates another type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{ComparableExt, Schema, SchemaRegistry};
    ///
    /// let registry = SchemaRegistry::new();
    /// registry.register("Age", Schema::int().min(0)).unwrap();
    ///
    /// assert!(registry.get::<i32>("Age").is_ok());
    /// assert!(registry.get::<String>("Age").is_err());
    /// assert!(registry.get::<i32>("Unknown").is_err());
    /// ```
    pub fn get<T: 'static>(&self, name: &str) -> Result<DynValidator<T>, RegistryError> {
        let entry = self
            .schemas
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))?;

        entry
            .schema
            .downcast::<DynValidator<T>>()
            .map(|schema| (*schema).clone())
            .map_err(|_| RegistryError::TypeMismatch {
                name: name.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Returns true if a schema is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.schemas.read().keys().cloned().collect()
    }

    /// Returns the type a registered schema validates.
    pub fn type_name_of(&self, name: &str) -> Option<&'static str> {
        self.schemas.read().get(name).map(|entry| entry.type_name)
    }

    /// Validates that all schema references can be resolved.
    ///
    /// Returns the reference names that don't exist in the registry, sorted
    /// and deduplicated. Call it after all schemas are registered.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::{Schema, SchemaRegistry};
    ///
    /// #[derive(Debug, Clone)]
    /// struct User {
    ///     id: i64,
    /// }
    ///
    /// let registry = SchemaRegistry::new();
    /// registry
    ///     .register(
    ///         "User",
    ///         Schema::object::<User>("User")
    ///             .field("id", |u: &User| &u.id, Schema::ref_::<i64>("UserId")),
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(registry.validate_refs(), vec!["UserId"]);
    /// ```
    pub fn validate_refs(&self) -> Vec<String> {
        let schemas = self.schemas.read();

        let mut unresolved: Vec<String> = schemas
            .values()
            .flat_map(|entry| entry.refs.iter())
            .filter(|name| !schemas.contains_key(name.as_str()))
            .cloned()
            .collect();

        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Validates a value against a named schema.
    ///
    /// The registry is installed in `config`, so references inside the
    /// schema resolve against it.
    ///
    /// # Errors
    ///
    /// Returns a registry error if the name is unknown or bound to another
    /// type, and any fatal error raised during validation.
    pub fn try_validate<T: 'static>(
        &self,
        name: &str,
        input: &T,
        config: ValidationConfig,
    ) -> Outcome<T> {
        let schema = self.get::<T>(name)?;
        let config = config.registry(Arc::new(self.clone()));
        crate::schema::try_validate(&schema, input, &config)
    }
}

impl RegistryAccess for SchemaRegistry {
    fn get_schema(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.schemas
            .read()
            .get(name)
            .map(|entry| Arc::clone(&entry.schema))
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Referenced a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// The named schema validates a different type.
    #[error("schema '{name}' does not validate {expected}")]
    TypeMismatch { name: String, expected: &'static str },

    /// Resolved a reference without a registry in the configuration.
    #[error("reference to '{0}' cannot be resolved without a registry")]
    MissingRegistry(String),
}
