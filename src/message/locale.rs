//! Locale identifiers used for message lookup and number formatting.

use std::fmt::{self, Display};

/// A language with an optional country, e.g. `fr` or `fr_FR`.
///
/// Locales are passed explicitly through [`ValidationConfig`](crate::ValidationConfig);
/// there is no process-wide default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    /// Creates a language-only locale. The language is lower-cased.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            country: None,
        }
    }

    /// Returns this locale with a country. The country is upper-cased.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        let country = country.into();
        self.country = if country.is_empty() {
            None
        } else {
            Some(country.to_ascii_uppercase())
        };
        self
    }

    /// Parses `fr`, `fr_FR` or `fr-FR`. Anything after the country is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kova::Locale;
    ///
    /// let locale = Locale::parse("fr-fr");
    /// assert_eq!(locale.tag(), "fr_FR");
    /// assert_eq!(locale.base().tag(), "fr");
    /// ```
    pub fn parse(tag: &str) -> Self {
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        match parts.next() {
            Some(country) => Self::new(language).with_country(country),
            None => Self::new(language),
        }
    }

    /// English, the language of the built-in root bundle.
    pub fn english() -> Self {
        Self::new("en")
    }

    /// Japanese.
    pub fn japanese() -> Self {
        Self::new("ja")
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Returns the language-only form of this locale.
    pub fn base(&self) -> Self {
        Self::new(self.language.clone())
    }

    /// Returns true if the locale has a country part.
    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }

    /// Returns the bundle tag, `fr` or `fr_FR`.
    pub fn tag(&self) -> String {
        match &self.country {
            Some(country) => format!("{}_{}", self.language, country),
            None => self.language.clone(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::english()
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}
