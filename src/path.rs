//! Path representation for locating violations in nested values.
//!
//! This module provides [`Path`], a backward-linked chain of named nodes. Each
//! descent into a field adds a node; collection elements and map entries
//! annotate the innermost node in place (see [`Path::append`]).

use std::fmt::{self, Display};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq, Hash)]
struct PathNode {
    name: String,
    parent: Option<Path>,
}

/// A location inside a validated value graph.
///
/// Paths are immutable and cheap to clone: nodes are shared with every path
/// derived from them, so siblings reuse their common ancestors.
///
/// # Example
///
/// ```rust
/// use kova::Path;
///
/// let path = Path::root()
///     .child("users")
///     .append("[1]<collection element>")
///     .child("city");
///
/// assert_eq!(path.full_name(), "users[1]<collection element>.city");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    node: Arc<PathNode>,
}

impl Path {
    /// Creates the implicit root node, which has an empty name and no parent.
    pub fn root() -> Self {
        Self::new("", None)
    }

    /// Creates a node with the given name and parent.
    pub fn new(name: impl Into<String>, parent: Option<Path>) -> Self {
        Self {
            node: Arc::new(PathNode {
                name: name.into(),
                parent,
            }),
        }
    }

    /// Returns a new path whose innermost node is `name`, parented to `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self::new(name, Some(self.clone()))
    }

    /// Returns a new path whose innermost name is extended by `suffix`.
    ///
    /// No node is added: the result has the same parent as `self`.
    pub fn append(&self, suffix: &str) -> Self {
        let mut name = String::with_capacity(self.node.name.len() + suffix.len());
        name.push_str(&self.node.name);
        name.push_str(suffix);
        Self::new(name, self.node.parent.clone())
    }

    /// Returns the name of the innermost node.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Returns the parent path, or `None` for an outermost node.
    pub fn parent(&self) -> Option<&Path> {
        self.node.parent.as_ref()
    }

    /// Returns true if no node on the chain has a non-empty name.
    pub fn is_root(&self) -> bool {
        self.names().next().is_none()
    }

    /// Returns the number of nodes on the chain, including empty ones.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    /// Iterates over the nodes from the innermost outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = &Path> {
        std::iter::successors(Some(self), |p| p.parent())
    }

    /// Iterates over the non-empty names from the innermost outwards.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ancestors()
            .map(|p| p.name())
            .filter(|name| !name.is_empty())
    }

    /// Joins the non-empty names from the outermost node inwards with `.`.
    ///
    /// Empty names are skipped; their ancestors are still visited.
    pub fn full_name(&self) -> String {
        let mut names: Vec<&str> = self.names().collect();
        names.reverse();
        names.join(".")
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::root()
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = Path::root();
        assert!(path.is_root());
        assert_eq!(path.depth(), 1);
        assert_eq!(path.full_name(), "");
        assert!(path.parent().is_none());
    }

    #[test]
    fn test_single_child() {
        let path = Path::root().child("user");
        assert_eq!(path.full_name(), "user");
        assert_eq!(path.name(), "user");
        assert!(!path.is_root());
    }

    #[test]
    fn test_nested_children() {
        let path = Path::root().child("user").child("email");
        assert_eq!(path.to_string(), "user.email");
        assert_eq!(path.depth(), 3);
    }

    #[test]
    fn test_append_extends_innermost_name() {
        let path = Path::root().child("users").append("[0]<collection element>");
        assert_eq!(path.full_name(), "users[0]<collection element>");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.parent().map(|p| p.name()), Some(""));
    }

    #[test]
    fn test_append_on_root() {
        let path = Path::root().append("[2]<collection element>");
        assert_eq!(path.full_name(), "[2]<collection element>");
        assert_eq!(path.depth(), 1);
    }

    #[test]
    fn test_empty_name_in_the_middle_keeps_ancestors() {
        let path = Path::new("c", Some(Path::new("", Some(Path::new("a", None)))));
        assert_eq!(path.full_name(), "a.c");
    }

    #[test]
    fn test_path_immutability() {
        let base = Path::root().child("items");
        let first = base.append("[0]<collection element>");
        let second = base.append("[1]<collection element>");

        assert_eq!(base.full_name(), "items");
        assert_eq!(first.full_name(), "items[0]<collection element>");
        assert_eq!(second.full_name(), "items[1]<collection element>");
    }

    #[test]
    fn test_names_iterate_inside_out() {
        let path = Path::root().child("a").child("b").child("c");
        let names: Vec<_> = path.names().collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_equality() {
        let a = Path::root().child("a").child("b");
        let b = Path::root().child("a").child("b");
        let c = Path::root().child("a").child("c");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
