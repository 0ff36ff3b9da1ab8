//! Regular-expression search over zipped bill-status XML archives.
//!
//! The [`search`] module holds the extraction, matching and highlighting
//! pipeline; [`cli`] wraps it for the `bill-search` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod search;

pub use error::{AppError, Result};
