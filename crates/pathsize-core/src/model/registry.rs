/// The identity cache: one [`PathNode`] per canonical path.
///
/// The registry is the single construction point for nodes
/// ([`PathRegistry::get_or_create`]) and the only shared mutable state in
/// the core. It also owns the filesystem capability and the exclusion set
/// so that nodes can stay plain data.
///
/// # Lifecycle
///
/// A registry is created once per run (see [`PathRegistry::from_config`])
/// and lives until the report is printed. Nodes enter it on first
/// reference if their entry exists on disk and leave it only through
/// [`PathRegistry::unregister`] (normally via [`PathNode::delete`]).
/// Nodes hold `Arc`s to their parent and children, so a registry is not
/// meant to be cleared and reused for a second, unrelated scan.
use super::path_node::PathNode;
use crate::config::ScanConfig;
use crate::error::{Result, TreeError};
use crate::platform::{paths, FileSystem, LocalFs};
use crate::scanner::{ExclusionSet, InProgress};
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use tracing::{debug, info};

/// What [`PathRegistry::delete_path`] removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Deleted {
    /// A regular file, with the size it had.
    File { path: String, size: u64 },
    /// A symlink. Its target is untouched.
    Link { path: String },
}

pub struct PathRegistry {
    fs: Arc<dyn FileSystem>,
    exclusions: ExclusionSet,
    /// Canonical path → node. Lookup and insertion happen under one lock.
    nodes: Mutex<HashMap<String, Arc<PathNode>>>,
    /// Directories whose size is currently being summed.
    in_progress: InProgress,
}

impl PathRegistry {
    /// Create an empty registry over `fs`.
    pub fn new(fs: Arc<dyn FileSystem>, exclusions: ExclusionSet) -> Self {
        Self {
            fs,
            exclusions,
            nodes: Mutex::new(HashMap::new()),
            in_progress: InProgress::new(),
        }
    }

    /// Create an empty registry over the local disk.
    pub fn with_local_fs(exclusions: ExclusionSet) -> Self {
        Self::new(Arc::new(LocalFs::new()), exclusions)
    }

    /// Create a local-disk registry with the exclusions from `config`.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Ok(Self::with_local_fs(config.exclusion_set()?))
    }

    /// The filesystem capability nodes derive their values from.
    #[inline]
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    #[inline]
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    #[inline]
    pub(crate) fn in_progress(&self) -> &InProgress {
        &self.in_progress
    }

    fn canonical(&self, raw: &str) -> Result<String> {
        self.fs
            .normalize_to_absolute(raw)
            .map_err(|source| TreeError::Normalize {
                path: raw.to_string(),
                source,
            })
    }

    /// Look up `path` after normalising it.
    ///
    /// - An empty `path` means the root: returns the registered "/" node or
    ///   fails with [`TreeError::UnregisteredRoot`].
    /// - A registered path returns its node.
    /// - Otherwise, with `create_if_absent`, a new node is constructed (and
    ///   registered if it exists on disk); without it, `None` is returned.
    pub fn resolve(&self, path: &str, create_if_absent: bool) -> Result<Option<Arc<PathNode>>> {
        if path.is_empty() {
            return self
                .nodes
                .lock()
                .get(paths::ROOT)
                .cloned()
                .map(Some)
                .ok_or(TreeError::UnregisteredRoot);
        }
        if create_if_absent {
            return self.get_or_create(path).map(Some);
        }
        let key = self.canonical(path)?;
        Ok(self.nodes.lock().get(&key).cloned())
    }

    /// Return the node for `path`, constructing it if needed.
    ///
    /// This is the only way nodes come into existence. A path that does not
    /// exist on disk still yields a node, but it is not registered, so a
    /// second call yields a different instance.
    pub fn get_or_create(&self, path: &str) -> Result<Arc<PathNode>> {
        let key = self.canonical(path)?;
        let mut nodes = self.nodes.lock();
        if let Some(existing) = nodes.get(&key) {
            return Ok(existing.clone());
        }
        let node = Arc::new(PathNode::new(key));
        self.insert_if_exists(&mut nodes, &node);
        Ok(node)
    }

    /// Register `node` under its canonical path if the entry exists on disk.
    ///
    /// Returns `true` if the registry now holds this exact instance. A path
    /// already held by a different instance is left alone, keeping one node
    /// per path.
    pub fn register(&self, node: Arc<PathNode>) -> bool {
        let mut nodes = self.nodes.lock();
        self.insert_if_exists(&mut nodes, &node)
    }

    fn insert_if_exists(
        &self,
        nodes: &mut HashMap<String, Arc<PathNode>>,
        node: &Arc<PathNode>,
    ) -> bool {
        if !self.fs.exists(node.path()) {
            debug!("{} vanished before registration; dropping", node.path());
            return false;
        }
        match nodes.entry(node.path().to_string()) {
            Entry::Occupied(held) => Arc::ptr_eq(held.get(), node),
            Entry::Vacant(slot) => {
                slot.insert(node.clone());
                true
            }
        }
    }

    /// Remove the entry for a canonical path (as returned by
    /// [`PathNode::path`]).
    pub fn unregister(&self, path: &str) -> Result<Arc<PathNode>> {
        self.nodes
            .lock()
            .remove(path)
            .ok_or_else(|| TreeError::NotFound {
                path: path.to_string(),
            })
    }

    /// Delete the file named by raw user input.
    ///
    /// A symlink is removed itself, never its target. Directories are
    /// refused before anything below them is read.
    pub fn delete_path(&self, raw: &str) -> Result<Deleted> {
        let literal = self.fs.absolute(raw).map_err(|source| TreeError::Normalize {
            path: raw.to_string(),
            source,
        })?;
        if self.fs.is_symlink(&literal) {
            self.fs
                .remove_file(&literal)
                .map_err(|source| TreeError::Deletion {
                    path: literal.clone(),
                    source,
                })?;
            info!("deleted link {literal}");
            return Ok(Deleted::Link { path: literal });
        }

        let node = self.get_or_create(raw)?;
        if node.is_dir(self) {
            return Err(TreeError::Deletion {
                path: node.path().to_string(),
                source: io::Error::other("is a directory"),
            });
        }
        let size = node.size(self)?;
        node.delete(self)?;
        Ok(Deleted::File {
            path: node.path().to_string(),
            size,
        })
    }

    /// `true` if a node is registered under the canonical path.
    pub fn contains(&self, path: &str) -> bool {
        self.nodes.lock().contains_key(path)
    }

    /// Registered canonical paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.nodes.lock().keys().cloned().collect();
        paths.sort_unstable();
        paths
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.lock().is_empty()
    }
}
