/// Scan configuration: exclusion patterns and report layout.
///
/// Loaded from a JSON file; every field is optional and falls back to the
/// built-in defaults, so `{}` is a valid configuration.
use crate::error::{Result, TreeError};
use crate::model::ColumnWidths;
use crate::scanner::ExclusionSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paths that are irrelevant, unreadable, or recursion hazards on a typical
/// desktop machine.
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    // Recurses into every mounted volume.
    "/Volumes",
    // Device nodes, not files.
    "/dev",
    // Duplicated under /private on macOS.
    "/var",
    "/tmp",
    // Sandbox containers link back into the home directory.
    r"/Users/[^/]*/Library/Containers/.*",
    // Kernel pseudo-filesystems.
    "/proc",
    "/sys",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Regular expressions matched against full paths, anchored at the start.
    pub exclusions: Vec<String>,
    /// Minimum width of the left-justified path column.
    pub path_width: usize,
    /// Minimum width of the right-justified size column.
    pub size_width: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let widths = ColumnWidths::default();
        Self {
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            path_width: widths.path,
            size_width: widths.size,
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TreeError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TreeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&text, path)?;
        tracing::debug!(
            "loaded {} exclusion patterns from {}",
            config.exclusions.len(),
            path.display()
        );
        Ok(config)
    }

    /// Compile the exclusion patterns.
    pub fn exclusion_set(&self) -> Result<ExclusionSet> {
        ExclusionSet::new(&self.exclusions)
    }

    pub fn widths(&self) -> ColumnWidths {
        ColumnWidths {
            path: self.path_width,
            size: self.size_width,
        }
    }
}
