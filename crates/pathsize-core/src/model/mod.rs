/// Data model for the pathsize tree.
///
/// Re-exports the path registry, the lazily-expanded node type, and the
/// size formatting helpers.
pub mod path_node;
pub mod registry;
pub mod size;

pub use path_node::PathNode;
pub use registry::{Deleted, PathRegistry};
pub use size::{humanize, ColumnWidths};
