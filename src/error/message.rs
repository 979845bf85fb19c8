//! Violation messages.
//!
//! This module provides [`Message`] for a single violation and [`Messages`]
//! for the non-empty, ordered list carried by a failed validation.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::message::MessageArg;
use crate::path::Path;

/// A single violation with full context.
///
/// - **constraint_id**: machine-readable id of the violated rule (`kova.comparable.min`)
/// - **text**: the localized, interpolated message
/// - **root**: label of the outermost schema, or `""`
/// - **path**: where in the value graph the violation happened
/// - **args**: the arguments the text was rendered from
///
/// # Example
///
/// ```rust
/// use kova::{Message, MessageArg, Path};
///
/// let message = Message::new("kova.comparable.min", "must be greater than or equal to 3")
///     .with_root("User")
///     .with_path(Path::root().child("age"))
///     .with_args(vec![MessageArg::Int(3)]);
///
/// assert_eq!(message.location(), "User.age");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub constraint_id: String,
    pub text: String,
    pub root: String,
    pub path: Path,
    pub args: Vec<MessageArg>,
}

impl Message {
    /// Creates a message at the root path with no root label and no arguments.
    pub fn new(constraint_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            constraint_id: constraint_id.into(),
            text: text.into(),
            root: String::new(),
            path: Path::root(),
            args: Vec::new(),
        }
    }

    /// Sets the root label and returns self for chaining.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the path and returns self for chaining.
    pub fn with_path(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Sets the arguments and returns self for chaining.
    pub fn with_args(mut self, args: Vec<MessageArg>) -> Self {
        self.args = args;
        self
    }

    /// Returns `root.path`, omitting whichever part is empty.
    pub fn location(&self) -> String {
        let path = self.path.full_name();
        match (self.root.is_empty(), path.is_empty()) {
            (true, _) => path,
            (false, true) => self.root.clone(),
            (false, false) => format!("{}.{}", self.root, path),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        if location.is_empty() {
            write!(f, "(root): {}", self.text)
        } else {
            write!(f, "{}: {}", location, self.text)
        }
    }
}

// Messages cross thread boundaries when validations run in parallel.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Message>();
    assert_sync::<Message>();
};

/// A non-empty, ordered collection of violation messages.
///
/// Order is the order in which violations were recorded. `Messages`
/// implements `Semigroup`, so failures combine by concatenation:
///
/// ```rust
/// use kova::{Message, Messages};
/// use stillwater::prelude::*;
///
/// let first = Messages::single(Message::new("a", "first"));
/// let second = Messages::single(Message::new("b", "second"));
///
/// let combined = first.combine(second);
/// assert_eq!(combined.constraint_ids(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Messages(NonEmptyVec<Message>);

impl Messages {
    /// Creates a collection holding a single message.
    pub fn single(message: Message) -> Self {
        Self(NonEmptyVec::singleton(message))
    }

    /// Creates a collection from a `NonEmptyVec`.
    pub fn from_non_empty(messages: NonEmptyVec<Message>) -> Self {
        Self(messages)
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(messages: Vec<Message>) -> Option<Self> {
        let mut iter = messages.into_iter();
        let head = Self::single(iter.next()?);
        Some(iter.fold(head, |acc, message| acc.combine(Self::single(message))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.0.iter()
    }

    /// Returns the first recorded message.
    pub fn first(&self) -> &Message {
        self.0.head()
    }

    /// Returns all messages whose full path name equals `path`.
    pub fn at_path(&self, path: &str) -> Vec<&Message> {
        self.0.iter().filter(|m| m.path.full_name() == path).collect()
    }

    /// Returns all messages with the given constraint id.
    pub fn with_constraint_id(&self, constraint_id: &str) -> Vec<&Message> {
        self.0
            .iter()
            .filter(|m| m.constraint_id == constraint_id)
            .collect()
    }

    /// Returns the constraint ids in recorded order.
    pub fn constraint_ids(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.constraint_id.as_str()).collect()
    }

    /// Returns the rendered texts in recorded order.
    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(|m| m.text.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Message> {
        self.0.into_vec()
    }

    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<Message> {
        &self.0
    }
}

impl Semigroup for Messages {
    fn combine(self, other: Self) -> Self {
        Messages(self.0.combine(other.0))
    }
}

impl Display for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} message(s):", self.len())?;
        for (i, message) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Messages {}

impl IntoIterator for Messages {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Messages {
    type Item = &'a Message;
    type IntoIter = Box<dyn Iterator<Item = &'a Message> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Messages>();
    assert_sync::<Messages>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults() {
        let message = Message::new("kova.string.notBlank", "must not be blank");
        assert_eq!(message.root, "");
        assert!(message.path.is_root());
        assert!(message.args.is_empty());
        assert_eq!(message.to_string(), "(root): must not be blank");
    }

    #[test]
    fn test_message_location() {
        let base = Message::new("id", "text");
        assert_eq!(base.clone().with_root("City").location(), "City");
        assert_eq!(
            base.clone().with_path(Path::root().child("name")).location(),
            "name"
        );
        let full = base.with_root("City").with_path(Path::root().child("name"));
        assert_eq!(full.to_string(), "City.name: text");
    }

    #[test]
    fn test_from_vec_rejects_empty() {
        assert!(Messages::from_vec(Vec::new()).is_none());
        let messages = Messages::from_vec(vec![Message::new("a", "x")]).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(!messages.is_empty());
    }

    #[test]
    fn test_filters() {
        let messages = Messages::single(
            Message::new("min", "1").with_path(Path::root().child("a")),
        )
        .combine(Messages::single(
            Message::new("max", "2").with_path(Path::root().child("a")),
        ))
        .combine(Messages::single(
            Message::new("min", "3").with_path(Path::root().child("b")),
        ));

        assert_eq!(messages.at_path("a").len(), 2);
        assert_eq!(messages.with_constraint_id("min").len(), 2);
        assert_eq!(messages.texts(), vec!["1", "2", "3"]);
        assert_eq!(messages.first().text, "1");
    }

    #[test]
    fn test_display_lists_every_message() {
        let messages = Messages::single(Message::new("a", "first"))
            .combine(Messages::single(Message::new("b", "second")));
        let display = messages.to_string();
        assert!(display.contains("2 message(s)"));
        assert!(display.contains("1. (root): first"));
        assert!(display.contains("2. (root): second"));
    }

    #[test]
    fn test_semigroup_associativity() {
        let m1 = Messages::single(Message::new("1", "1"));
        let m2 = Messages::single(Message::new("2", "2"));
        let m3 = Messages::single(Message::new("3", "3"));

        let left = m1.clone().combine(m2.clone()).combine(m3.clone());
        let right = m1.combine(m2.combine(m3));
        assert_eq!(left, right);
    }
}
