//! Per-constraint evaluation log.
//!
//! A [`Logger`] set on [`ValidationConfig`](crate::ValidationConfig) observes
//! every leaf constraint that actually runs, whether or not it ends up in the
//! final result. Combinators such as `or` rely on this to expose the
//! alternatives they tried and discarded.

use std::sync::Arc;

use crate::message::MessageArg;

/// Callback receiving one entry per evaluated constraint.
pub type Logger = Arc<dyn Fn(&LogEntry) + Send + Sync>;

/// The outcome of one constraint evaluation.
///
/// `input` is the `Debug` rendering of the checked value.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Satisfied {
        constraint_id: String,
        root: String,
        path: String,
        input: String,
    },
    Violated {
        constraint_id: String,
        root: String,
        path: String,
        input: String,
        args: Vec<MessageArg>,
    },
}

impl LogEntry {
    pub fn constraint_id(&self) -> &str {
        match self {
            LogEntry::Satisfied { constraint_id, .. }
            | LogEntry::Violated { constraint_id, .. } => constraint_id,
        }
    }

    pub fn root(&self) -> &str {
        match self {
            LogEntry::Satisfied { root, .. } | LogEntry::Violated { root, .. } => root,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            LogEntry::Satisfied { path, .. } | LogEntry::Violated { path, .. } => path,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            LogEntry::Satisfied { input, .. } | LogEntry::Violated { input, .. } => input,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, LogEntry::Satisfied { .. })
    }
}
