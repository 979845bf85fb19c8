//! Validation configuration and context.
//!
//! [`ValidationConfig`] holds the run-wide policy (fail-fast, locale, logger,
//! message overrides, registry). [`ValidationContext`] layers the current root
//! label, path and reference depth on top of it. Contexts are immutable: every
//! descent derives a new one and the parent is left untouched.

use std::any::Any;
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::constraint::{ConstraintResult, Violation};
use crate::error::{Error, Message};
use crate::log::{LogEntry, Logger};
use crate::message::{Locale, MessageCatalog, MessageResolver};
use crate::path::Path;

/// Default limit for nested lazy or named schema references.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Path names kept in an [`Error::DepthExceeded`] report.
pub const DEPTH_ERROR_PATH_NAMES: usize = 8;

/// Run-wide validation settings.
///
/// # Example
///
/// ```rust
/// use kova::{Locale, ValidationConfig};
///
/// let config = ValidationConfig::new()
///     .fail_fast(true)
///     .locale(Locale::japanese())
///     .logger(|entry| println!("{:?}", entry));
///
/// assert!(config.is_fail_fast());
/// ```
#[derive(Clone)]
pub struct ValidationConfig {
    fail_fast: bool,
    locale: Locale,
    logger: Option<Logger>,
    resolver: MessageResolver,
    registry: Option<Arc<dyn RegistryAccess>>,
    max_depth: usize,
}

impl ValidationConfig {
    /// Accumulate mode, English, no logger, built-in messages only.
    pub fn new() -> Self {
        Self {
            fail_fast: false,
            locale: Locale::default(),
            logger: None,
            resolver: MessageResolver::default(),
            registry: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Stops at the first violation when `true`.
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Sets the locale used to resolve and format messages.
    pub fn locale(mut self, locale: impl Into<Locale>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Sets a callback that observes every constraint evaluation.
    pub fn logger<F>(mut self, logger: F) -> Self
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Sets user message overrides, consulted before the built-in bundles.
    pub fn messages(mut self, overrides: MessageCatalog) -> Self {
        self.resolver = self.resolver.with_overrides(overrides);
        self
    }

    /// Replaces the message resolver entirely.
    pub fn resolver(mut self, resolver: MessageResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sets the registry used to resolve named schema references.
    pub fn registry(mut self, registry: Arc<dyn RegistryAccess>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the maximum depth of nested schema references.
    ///
    /// Every [`Lazy`](crate::Lazy) or [`RefSchema`](crate::RefSchema)
    /// resolution counts as one level, so a finite value nested more than
    /// `max_depth` references deep fails with [`Error::DepthExceeded`] even
    /// though it is not cyclic. Defaults to [`DEFAULT_MAX_DEPTH`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn get_locale(&self) -> &Locale {
        &self.locale
    }

    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn message_resolver(&self) -> &MessageResolver {
        &self.resolver
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ValidationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationConfig")
            .field("fail_fast", &self.fail_fast)
            .field("locale", &self.locale)
            .field("logger", &self.logger.is_some())
            .field("registry", &self.registry.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// The state threaded through one validation run.
///
/// # Example
///
/// ```rust
/// use kova::{ValidationConfig, ValidationContext};
///
/// let ctx = ValidationContext::new(ValidationConfig::default())
///     .add_root("City")
///     .add_root("User")
///     .add_path("users")
///     .append_path("[0]<collection element>")
///     .add_path("name");
///
/// assert_eq!(ctx.root(), Some("City"));
/// assert_eq!(ctx.path_name(), "users[0]<collection element>.name");
/// ```
#[derive(Clone)]
pub struct ValidationContext {
    root: Option<Arc<str>>,
    path: Option<Path>,
    depth: usize,
    config: Arc<ValidationConfig>,
}

impl ValidationContext {
    /// Creates a context with no root, no path and depth zero.
    pub fn new(config: ValidationConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Creates a context sharing an existing configuration.
    pub fn from_shared(config: Arc<ValidationConfig>) -> Self {
        Self {
            root: None,
            path: None,
            depth: 0,
            config,
        }
    }

    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Returns the full name of the current path, `""` if there is none.
    pub fn path_name(&self) -> String {
        self.path.as_ref().map(Path::full_name).unwrap_or_default()
    }

    fn tail_path_name(&self, shown: usize) -> String {
        let Some(path) = &self.path else {
            return String::new();
        };
        let total = path.names().count();
        if total <= shown {
            return path.full_name();
        }
        let mut names: Vec<&str> = path.names().take(shown).collect();
        names.reverse();
        format!("<{} more>.{}", total - shown, names.join("."))
    }

    /// Returns the number of schema references followed so far.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn is_fail_fast(&self) -> bool {
        self.config.fail_fast
    }

    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    pub fn registry(&self) -> Option<&dyn RegistryAccess> {
        self.config.registry.as_deref()
    }

    /// Sets the root label unless one is already set.
    pub fn add_root(&self, label: &str) -> Self {
        if self.root.is_some() {
            return self.clone();
        }
        Self {
            root: Some(Arc::from(label)),
            ..self.clone()
        }
    }

    /// Descends into a named child.
    pub fn add_path(&self, name: impl Into<String>) -> Self {
        let parent = self.path.clone().unwrap_or_default();
        Self {
            path: Some(parent.child(name)),
            ..self.clone()
        }
    }

    /// Extends the innermost path name in place.
    pub fn append_path(&self, suffix: &str) -> Self {
        let current = self.path.clone().unwrap_or_default();
        Self {
            path: Some(current.append(suffix)),
            ..self.clone()
        }
    }

    /// Follows one schema reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DepthExceeded`] once the configured maximum is reached.
    /// The error names at most the innermost [`DEPTH_ERROR_PATH_NAMES`] path
    /// names; outer ones are summarized as `<N more>`.
    pub fn increment_depth(&self) -> Result<Self, Error> {
        if self.depth >= self.config.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.config.max_depth,
                path: self.tail_path_name(DEPTH_ERROR_PATH_NAMES),
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    /// Builds the message for a violation at the current location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResource`] if a resource violation names a key
    /// no bundle defines.
    pub fn message(&self, constraint_id: &str, violation: &Violation) -> Result<Message, Error> {
        let text = match violation {
            Violation::Resource { key, args } => {
                let key = key.as_deref().unwrap_or(constraint_id);
                self.config.resolver.resolve(key, &self.config.locale, args)?
            }
            Violation::Text { text, .. } => text.clone(),
        };

        Ok(Message {
            constraint_id: constraint_id.to_string(),
            text,
            root: self.root().unwrap_or_default().to_string(),
            path: self.path.clone().unwrap_or_default(),
            args: violation.args().to_vec(),
        })
    }

    /// Records one constraint evaluation.
    ///
    /// The evaluation is always logged; a violation is also turned into the
    /// message that is returned.
    pub fn record<T: Debug + ?Sized>(
        &self,
        constraint_id: &str,
        input: &T,
        result: ConstraintResult,
    ) -> Result<Option<Message>, Error> {
        let path = self.path_name();
        let root = self.root().unwrap_or_default();

        match result {
            ConstraintResult::Satisfied => {
                tracing::trace!(constraint_id, root, path = %path, "constraint satisfied");
                self.log(|| LogEntry::Satisfied {
                    constraint_id: constraint_id.to_string(),
                    root: root.to_string(),
                    path: path.clone(),
                    input: format!("{:?}", input),
                });
                Ok(None)
            }
            ConstraintResult::Violated(violation) => {
                let message = self.message(constraint_id, &violation)?;
                tracing::trace!(
                    constraint_id,
                    root,
                    path = %path,
                    text = %message.text,
                    "constraint violated"
                );
                self.log(|| LogEntry::Violated {
                    constraint_id: constraint_id.to_string(),
                    root: root.to_string(),
                    path: path.clone(),
                    input: format!("{:?}", input),
                    args: violation.args().to_vec(),
                });
                Ok(Some(message))
            }
        }
    }

    fn log(&self, entry: impl FnOnce() -> LogEntry) {
        if let Some(logger) = &self.config.logger {
            logger(&entry());
        }
    }
}

impl Debug for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("root", &self.root)
            .field("path", &self.path_name())
            .field("depth", &self.depth)
            .field("config", &self.config)
            .finish()
    }
}

/// Access to named schemas.
///
/// Schemas are stored type-erased; [`RefSchema`](crate::RefSchema) downcasts
/// them back to the validator type it expects.
pub trait RegistryAccess: Send + Sync {
    /// Gets a schema by name.
    fn get_schema(&self, name: &str) -> Option<Arc<dyn Any + Send + Sync>>;
}
