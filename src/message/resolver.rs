//! Message lookup with user overrides and locale fallback.

use std::sync::Arc;

use crate::error::Error;

use super::arg::MessageArg;
use super::bundle::MessageCatalog;
use super::format::format_template;
use super::locale::Locale;

/// Resolves constraint ids to localized text.
///
/// Lookup order for a key under locale `fr_FR`:
///
/// 1. user override bundle `fr_FR`
/// 2. user override bundle `fr`
/// 3. built-in bundle `fr_FR`
/// 4. built-in bundle `fr`
/// 5. user root bundle, then the built-in root bundle
///
/// A key found nowhere is a configuration error ([`Error::MissingResource`]).
///
/// # Example
///
/// ```rust
/// use kova::{Locale, MessageArg, MessageBundle, MessageCatalog, MessageResolver};
///
/// let resolver = MessageResolver::default().with_overrides(
///     MessageCatalog::new().with_root(
///         MessageBundle::new().with("kova.comparable.min", "too small, need {0}"),
///     ),
/// );
///
/// let text = resolver
///     .resolve("kova.comparable.min", &Locale::english(), &[MessageArg::Int(3)])
///     .unwrap();
/// assert_eq!(text, "too small, need 3");
/// ```
#[derive(Debug, Clone)]
pub struct MessageResolver {
    overrides: Arc<MessageCatalog>,
    defaults: Arc<MessageCatalog>,
}

impl MessageResolver {
    /// Creates a resolver from explicit user and default catalogs.
    pub fn new(overrides: MessageCatalog, defaults: MessageCatalog) -> Self {
        Self {
            overrides: Arc::new(overrides),
            defaults: Arc::new(defaults),
        }
    }

    /// Replaces the user override catalog.
    pub fn with_overrides(mut self, overrides: MessageCatalog) -> Self {
        self.overrides = Arc::new(overrides);
        self
    }

    /// Returns the raw template for `key`, following the lookup order.
    pub fn template(&self, key: &str, locale: &Locale) -> Option<&str> {
        self.overrides
            .lookup_localized(key, locale)
            .or_else(|| self.defaults.lookup_localized(key, locale))
            .or_else(|| self.overrides.lookup_root(key))
            .or_else(|| self.defaults.lookup_root(key))
    }

    /// Resolves `key` and interpolates `args`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingResource`] if no bundle defines `key`.
    pub fn resolve(
        &self,
        key: &str,
        locale: &Locale,
        args: &[MessageArg],
    ) -> Result<String, Error> {
        let template = self
            .template(key, locale)
            .ok_or_else(|| Error::MissingResource {
                key: key.to_string(),
                locale: locale.clone(),
            })?;
        Ok(format_template(template, args, locale))
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self {
            overrides: Arc::new(MessageCatalog::new()),
            defaults: MessageCatalog::builtin(),
        }
    }
}
