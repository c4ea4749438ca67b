#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

//! This crate provides a Searcher structure that locates a file
//! by exact name under a directory tree, fanning subtree walks
//! across a worker thread pool

mod error;
mod search;
pub mod thread_pool;

#[macro_use]
extern crate failure;
pub use error::SearchError;
pub use error::SearchErrorKind;
pub use search::{display_path, Searcher, DEFAULT_WORKERS};

/// Result type used by this crate
pub type Result<T> = core::result::Result<T, SearchError>;
