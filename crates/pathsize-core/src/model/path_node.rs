/// A single lazily-expanded file or directory.
///
/// Only the canonical path is fixed at construction. Everything else
/// (parent, metadata, children, size) is derived on first request and then
/// cached in a [`OnceLock`] for the node's lifetime. Cached values are never
/// refreshed: if the disk changes after a query, the node keeps reporting
/// what it saw the first time.
///
/// Nodes carry no back-pointer to their registry. Every derivation that
/// needs the filesystem or the identity cache takes `&PathRegistry`.
use super::registry::PathRegistry;
use super::size::{humanize, ColumnWidths};
use crate::error::{Result, TreeError};
use crate::platform::{paths, Metadata};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

pub struct PathNode {
    /// Canonical absolute path. The identity key in the registry.
    path: String,
    parent_path: OnceLock<String>,
    parent: OnceLock<Arc<PathNode>>,
    /// `Some(None)` once stat has been attempted and failed.
    metadata: OnceLock<Option<Metadata>>,
    children: OnceLock<Vec<Arc<PathNode>>>,
    size: OnceLock<u64>,
}

impl PathNode {
    /// Construct an unregistered node. Only the registry calls this, with a
    /// path it has already canonicalised.
    pub(crate) fn new(canonical_path: String) -> Self {
        Self {
            path: canonical_path,
            parent_path: OnceLock::new(),
            parent: OnceLock::new(),
            metadata: OnceLock::new(),
            children: OnceLock::new(),
            size: OnceLock::new(),
        }
    }

    /// The canonical absolute path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component, or "/" for the root.
    pub fn name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(paths::ROOT)
    }

    /// Containing directory. "/" is its own parent path.
    pub fn parent_path(&self) -> &str {
        self.parent_path
            .get_or_init(|| paths::parent_path(&self.path))
    }

    /// The node for [`parent_path`](Self::parent_path), created through the
    /// registry if nobody has asked for it yet.
    pub fn parent(&self, registry: &PathRegistry) -> Result<Arc<PathNode>> {
        if let Some(parent) = self.parent.get() {
            return Ok(parent.clone());
        }
        let parent = registry.get_or_create(self.parent_path())?;
        Ok(self.parent.get_or_init(|| parent).clone())
    }

    /// Stat result, or `None` if the entry could not be stat'ed.
    pub fn metadata(&self, registry: &PathRegistry) -> Option<&Metadata> {
        self.metadata
            .get_or_init(|| {
                let meta = registry.fs().stat(&self.path);
                if meta.is_none() {
                    debug!("no metadata for {}; counting as empty", self.path);
                }
                meta
            })
            .as_ref()
    }

    /// `true` only if metadata was obtained and says directory.
    pub fn is_dir(&self, registry: &PathRegistry) -> bool {
        self.metadata(registry).is_some_and(|m| m.is_dir)
    }

    /// Immediate, non-excluded children. Empty for files and for
    /// directories that could not be read.
    pub fn children(&self, registry: &PathRegistry) -> &[Arc<PathNode>] {
        self.children.get_or_init(|| self.enumerate_children(registry))
    }

    /// One-level enumeration. Excluded entries are skipped before any node
    /// is constructed for them.
    fn enumerate_children(&self, registry: &PathRegistry) -> Vec<Arc<PathNode>> {
        if !self.is_dir(registry) {
            return Vec::new();
        }

        let entries = registry.fs().list_immediate_entries(&self.path);
        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            let full_path = paths::join(&self.path, &entry.name);
            if let Some(pattern) = registry.exclusions().matching(&full_path) {
                info!("skipping {full_path} (excluded by {pattern:?})");
                continue;
            }
            match registry.get_or_create(&full_path) {
                Ok(child) => children.push(child),
                Err(err) => warn!("skipping {full_path}: {err}"),
            }
        }
        debug!("{}: {} children", self.path, children.len());
        children
    }

    /// Cumulative size in bytes.
    ///
    /// Files report their metadata length (0 if metadata is absent).
    /// Directories report the saturating sum of their children's sizes,
    /// forcing those to be computed. A directory reached again while it is
    /// still being summed fails with [`TreeError::CycleDetected`], and no
    /// size is cached for any node on that chain.
    pub fn size(&self, registry: &PathRegistry) -> Result<u64> {
        if let Some(&size) = self.size.get() {
            return Ok(size);
        }

        let size = if self.is_dir(registry) {
            let _guard = registry.in_progress().enter(&self.path)?;
            let mut total: u64 = 0;
            for child in self.children(registry) {
                total = total.saturating_add(child.size(registry)?);
            }
            total
        } else {
            self.metadata(registry).map_or(0, |m| m.len)
        };

        Ok(*self.size.get_or_init(|| size))
    }

    /// [`size`](Self::size) rendered with [`humanize`].
    pub fn human_size(&self, registry: &PathRegistry) -> Result<String> {
        Ok(humanize(self.size(registry)?))
    }

    /// One report row using the default column widths.
    pub fn listing(&self, registry: &PathRegistry) -> Result<String> {
        self.listing_with(registry, ColumnWidths::default())
    }

    /// One report row using `widths`.
    pub fn listing_with(&self, registry: &PathRegistry, widths: ColumnWidths) -> Result<String> {
        Ok(widths.format_row(&self.path, &self.human_size(registry)?))
    }

    /// Remove the entry from disk, then from the registry.
    ///
    /// Cached values elsewhere (an ancestor's size, a parent's child list)
    /// are left as they were.
    pub fn delete(&self, registry: &PathRegistry) -> Result<()> {
        registry
            .fs()
            .remove_file(&self.path)
            .map_err(|source| TreeError::Deletion {
                path: self.path.clone(),
                source,
            })?;
        info!("deleted {}", self.path);
        registry.unregister(&self.path)?;
        Ok(())
    }

    /// `true` once [`size`](Self::size) has been computed and cached.
    pub fn is_size_cached(&self) -> bool {
        self.size.get().is_some()
    }
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Path \"{}\">", self.path)
    }
}

// Manual impl: deriving would walk `parent` and `children`, and the root
// is its own parent.
impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("path", &self.path)
            .field("metadata", &self.metadata.get())
            .field("children", &self.children.get().map(Vec::len))
            .field("size", &self.size.get())
            .finish()
    }
}
