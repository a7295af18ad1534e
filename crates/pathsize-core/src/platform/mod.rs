/// Platform-specific functionality: the filesystem capability consumed by
/// the core, its local implementation, and path normalization helpers.
/// An in-memory implementation backs the unit tests.

pub mod fs;
#[cfg(test)]
pub mod memory;
pub mod paths;

pub use fs::{EntryInfo, FileSystem, LocalFs, Metadata};
#[cfg(test)]
pub use memory::MemoryFs;
