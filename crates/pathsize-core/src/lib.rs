/// pathsize Core: path registry, lazy traversal, and size aggregation.
///
/// This crate contains all business logic with zero terminal I/O.
/// It is designed to be reusable across different frontends (CLI, TUI).
///
/// # Modules
///
/// - [`model`]: Path registry, lazily-expanded path nodes, and byte humanization.
/// - [`scanner`]: Traversal policy: exclusion patterns and cycle tracking.
/// - [`analysis`]: Report building over an expanded node (sorted listing).
/// - [`platform`]: The filesystem capability trait and its local implementation.
/// - [`config`]: Serde-backed scan configuration.
/// - [`error`]: The crate-wide error type.
pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod scanner;

pub use error::{Result, TreeError};
