/// Scanner module: the policy half of lazy traversal.
///
/// Traversal itself is driven by [`crate::model::PathNode`], one level at a
/// time, on demand. This module holds what decides *which* entries are
/// visited and guards the recursion:
/// - [`exclusion`]: ordered, start-anchored regular expressions that prune
///   paths before a node is ever constructed.
/// - [`guard`]: the set of directories currently being aggregated, used to
///   turn a symlink loop into an error instead of unbounded recursion.
pub mod exclusion;
pub mod guard;

pub use exclusion::ExclusionSet;
pub use guard::{AggregationGuard, InProgress};
