/// The filesystem capability consumed by the core.
///
/// Everything the registry and nodes know about the disk comes through
/// [`FileSystem`]. The trait is small and infallible where the
/// core treats failure as absence: `stat` returns `None`, and enumeration
/// returns an empty list. Only removal and normalization report errors.
use super::paths;
use std::io;
use std::path::Path;
use tracing::debug;

/// Stat result for a single entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Metadata {
    /// `true` if the entry (after following symlinks) is a directory.
    pub is_dir: bool,
    /// Logical size in bytes as reported by the OS.
    pub len: u64,
    /// Unix mode word (type and permission bits). `0` on platforms without one.
    pub mode: u32,
}

/// One immediate entry of a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryInfo {
    /// Entry name only (NOT the full path).
    pub name: String,
    /// `true` if the entry is a directory. A symlink counts as whatever it
    /// points at.
    pub is_dir: bool,
}

/// Abstract filesystem access.
///
/// Implementations must be `Send + Sync` so a registry can be shared.
pub trait FileSystem: Send + Sync {
    /// Stat `path`, following symlinks. Missing or unreadable paths yield `None`.
    fn stat(&self, path: &str) -> Option<Metadata>;

    /// List the immediate entries of `path`. One level only, never recursive.
    /// Unreadable directories yield an empty list.
    fn list_immediate_entries(&self, path: &str) -> Vec<EntryInfo>;

    /// Remove a single file.
    fn remove_file(&self, path: &str) -> io::Result<()>;

    /// `true` if something exists at `path` right now.
    fn exists(&self, path: &str) -> bool;

    /// `true` if `path` itself is a symlink. The link is not followed.
    fn is_symlink(&self, path: &str) -> bool;

    /// Turn raw user input into an absolute path string with `.`/`..`
    /// collapsed, leaving symlinks in place.
    fn absolute(&self, path: &str) -> io::Result<String>;

    /// Turn raw user input into a canonical absolute path string.
    fn normalize_to_absolute(&self, path: &str) -> io::Result<String>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode()
}

#[cfg(not(unix))]
fn mode_of(_meta: &std::fs::Metadata) -> u32 {
    0
}

impl FileSystem for LocalFs {
    fn stat(&self, path: &str) -> Option<Metadata> {
        match std::fs::metadata(path) {
            Ok(meta) => Some(Metadata {
                is_dir: meta.is_dir(),
                len: meta.len(),
                mode: mode_of(&meta),
            }),
            Err(err) => {
                debug!("stat failed for {path}: {err}");
                None
            }
        }
    }

    fn list_immediate_entries(&self, path: &str) -> Vec<EntryInfo> {
        // Serial, exactly one level deep, sorted by name.
        let walker = jwalk::WalkDir::new(Path::new(path))
            .min_depth(1)
            .max_depth(1)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true)
            .parallelism(jwalk::Parallelism::Serial);

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    debug!("enumeration error under {path}: {err}");
                    continue;
                }
            };
            let file_type = entry.file_type();
            let is_dir = if file_type.is_symlink() {
                std::fs::metadata(entry.path()).is_ok_and(|meta| meta.is_dir())
            } else {
                file_type.is_dir()
            };
            let info = EntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            };
            if info.is_dir {
                dirs.push(info);
            } else {
                files.push(info);
            }
        }

        // Directories first, then everything else.
        dirs.extend(files);
        dirs
    }

    fn remove_file(&self, path: &str) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_symlink(&self, path: &str) -> bool {
        std::fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
    }

    fn absolute(&self, path: &str) -> io::Result<String> {
        paths::to_absolute(path).map(|p| p.to_string_lossy().into_owned())
    }

    fn normalize_to_absolute(&self, path: &str) -> io::Result<String> {
        paths::canonicalize(path)
    }
}
