//! Message bundles and catalogs.
//!
//! A [`MessageBundle`] maps constraint ids to message templates for one locale.
//! A [`MessageCatalog`] groups bundles by locale tag: `""` for the root bundle,
//! `fr` for a language, `fr_FR` for a language and country.

use std::collections::HashMap;
use std::fs;
use std::path::Path as FsPath;
use std::sync::{Arc, OnceLock};

use crate::error::Error;

use super::locale::Locale;

/// File stem of user override bundles discovered by [`MessageCatalog::load_dir`].
pub const USER_BUNDLE_NAME: &str = "kova";

/// File stem of the built-in bundles.
pub const DEFAULT_BUNDLE_NAME: &str = "kova-default";

const DEFAULT_ROOT: &str = include_str!("resources/kova-default.properties");
const DEFAULT_JA: &str = include_str!("resources/kova-default_ja.properties");

/// Message templates for a single locale, keyed by constraint id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBundle {
    entries: HashMap<String, String>,
}

impl MessageBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `.properties` text.
    ///
    /// Supports `key=value`, `key: value` and `key value` pairs, `#` and
    /// `!` comments, trailing-backslash continuation lines and the `\n`,
    /// `\t`, `\\` and `\uXXXX` escapes. A key alone maps to an empty
    /// template.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::MessageBundle;
    ///
    /// let bundle = MessageBundle::parse("# comment\nkova.or = one of: {0}\n");
    /// assert_eq!(bundle.get("kova.or"), Some("one of: {0}"));
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();
        let mut logical = String::new();

        for raw in text.lines() {
            let line = raw.trim_start();
            let is_comment = line.starts_with('#') || line.starts_with('!');
            if logical.is_empty() && (line.is_empty() || is_comment) {
                continue;
            }

            if ends_with_continuation(line) {
                logical.push_str(&line[..line.len() - 1]);
                continue;
            }

            logical.push_str(line);
            if let Some((key, value)) = split_entry(&logical) {
                entries.insert(unescape(key), unescape(value));
            }
            logical.clear();
        }

        if !logical.is_empty() {
            if let Some((key, value)) = split_entry(&logical) {
                entries.insert(unescape(key), unescape(value));
            }
        }

        Self { entries }
    }

    /// Adds or replaces a template and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// Adds or replaces a template.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Returns the template for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A set of bundles keyed by locale tag.
///
/// # Example
///
/// ```rust
/// use kova::{Locale, MessageBundle, MessageCatalog};
///
/// let catalog = MessageCatalog::new()
///     .with_root(MessageBundle::new().with("kova.string.notBlank", "required"))
///     .with_bundle(
///         Locale::new("fr"),
///         MessageBundle::new().with("kova.string.notBlank", "obligatoire"),
///     );
///
/// assert_eq!(catalog.bundle_for_tag("fr").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    bundles: HashMap<String, MessageBundle>,
}

impl MessageCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the catalog of messages shipped with the crate.
    ///
    /// The root bundle is English; a Japanese bundle is also provided.
    pub fn builtin() -> Arc<MessageCatalog> {
        static BUILTIN: OnceLock<Arc<MessageCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(
                    MessageCatalog::new()
                        .with_root(MessageBundle::parse(DEFAULT_ROOT))
                        .with_bundle(Locale::japanese(), MessageBundle::parse(DEFAULT_JA)),
                )
            })
            .clone()
    }

    /// Loads user bundles from a directory.
    ///
    /// Files are discovered by name: `kova.properties` is the root bundle,
    /// `kova_<lang>.properties` and `kova_<lang>_<COUNTRY>.properties` are
    /// locale bundles. Other files are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory or a matching file can't be read.
    pub fn load_dir(dir: impl AsRef<FsPath>) -> Result<Self, Error> {
        let dir = dir.as_ref();
        let read_err = |source| Error::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut catalog = Self::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let file_name = entry.file_name();
            let Some(tag) = file_name.to_str().and_then(user_bundle_tag) else {
                continue;
            };

            let path = entry.path();
            let text = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let bundle = MessageBundle::parse(&text);
            tracing::debug!(
                path = %path.display(),
                tag = %tag,
                keys = bundle.len(),
                "loaded message bundle"
            );
            catalog.bundles.insert(tag, bundle);
        }

        Ok(catalog)
    }

    /// Sets the root bundle and returns self for chaining.
    pub fn with_root(mut self, bundle: MessageBundle) -> Self {
        self.bundles.insert(String::new(), bundle);
        self
    }

    /// Sets the bundle for `locale` and returns self for chaining.
    pub fn with_bundle(mut self, locale: Locale, bundle: MessageBundle) -> Self {
        self.bundles.insert(locale.tag(), bundle);
        self
    }

    /// Returns the root bundle.
    pub fn root(&self) -> Option<&MessageBundle> {
        self.bundles.get("")
    }

    /// Returns the bundle registered for exactly this locale.
    pub fn bundle(&self, locale: &Locale) -> Option<&MessageBundle> {
        self.bundles.get(&locale.tag())
    }

    /// Returns the bundle registered under a raw tag (`""` is the root).
    pub fn bundle_for_tag(&self, tag: &str) -> Option<&MessageBundle> {
        self.bundles.get(tag)
    }

    /// Looks `key` up in the exact-locale bundle, then the base-language bundle.
    pub(crate) fn lookup_localized(&self, key: &str, locale: &Locale) -> Option<&str> {
        let exact = self.bundle(locale).and_then(|b| b.get(key));
        if exact.is_some() || !locale.has_country() {
            return exact;
        }
        self.bundle(&locale.base()).and_then(|b| b.get(key))
    }

    /// Looks `key` up in the root bundle.
    pub(crate) fn lookup_root(&self, key: &str) -> Option<&str> {
        self.root().and_then(|b| b.get(key))
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Maps `kova.properties` → `""`, `kova_fr_FR.properties` → `fr_FR`.
fn user_bundle_tag(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".properties")?;
    if stem == USER_BUNDLE_NAME {
        return Some(String::new());
    }
    let tag = stem.strip_prefix(USER_BUNDLE_NAME)?.strip_prefix('_')?;
    if tag.is_empty() {
        return None;
    }
    Some(Locale::parse(tag).tag())
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    trailing % 2 == 1
}

/// The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
/// and at most one `=` or `:` separate it from the value.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if c.is_whitespace() => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    if key.is_empty() {
        return None;
    }
    let rest = line[key_end..].trim_start();
    let value = rest
        .strip_prefix(|c: char| c == '=' || c == ':')
        .unwrap_or(rest)
        .trim_start();
    Some((key, value))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
