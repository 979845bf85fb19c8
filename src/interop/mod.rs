//! Interoperability with other formats.
//!
//! This module renders validation results as JSON for reporting and logging
//! pipelines.

pub mod json;

pub use json::ToJson;
