//! Error and message types.
//!
//! Validation failures are data: a [`Messages`] list inside
//! `Validation::Failure`. Programming and configuration mistakes are [`Error`]s
//! and propagate out of the run.

mod fatal;
mod message;

pub use fatal::Error;
pub use message::{Message, Messages};
