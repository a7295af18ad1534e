/// In-progress tracking for recursive size aggregation.
///
/// A directory is entered into [`InProgress`] while its children are being
/// summed and removed when the sum finishes (or fails). Re-entering a path
/// that is still present means the tree loops back on itself.
use crate::error::{Result, TreeError};
use parking_lot::Mutex;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct InProgress {
    paths: Mutex<HashSet<String>>,
}

impl InProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as being aggregated. Fails with
    /// [`TreeError::CycleDetected`] if it already is.
    pub fn enter<'a>(&'a self, path: &str) -> Result<AggregationGuard<'a>> {
        if !self.paths.lock().insert(path.to_string()) {
            return Err(TreeError::CycleDetected {
                path: path.to_string(),
            });
        }
        Ok(AggregationGuard {
            set: self,
            path: path.to_string(),
        })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.lock().contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.lock().is_empty()
    }
}

/// Removes its path from the [`InProgress`] set on drop.
#[must_use]
pub struct AggregationGuard<'a> {
    set: &'a InProgress,
    path: String,
}

impl Drop for AggregationGuard<'_> {
    fn drop(&mut self) {
        self.set.paths.lock().remove(&self.path);
    }
}
