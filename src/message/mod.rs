//! Localized message resolution.
//!
//! Constraint ids double as message keys. Templates live in `.properties`
//! bundles: the crate ships a root (English) and a Japanese bundle, and users
//! override individual keys with their own bundles.

mod arg;
mod bundle;
mod format;
mod locale;
mod resolver;

pub use arg::MessageArg;
pub use bundle::{MessageBundle, MessageCatalog, DEFAULT_BUNDLE_NAME, USER_BUNDLE_NAME};
pub use format::{format_template, render_arg};
pub use locale::Locale;
pub use resolver::MessageResolver;
