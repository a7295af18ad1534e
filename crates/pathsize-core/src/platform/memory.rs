/// In-memory [`FileSystem`] for unit tests.
///
/// Paths are plain absolute strings. Adding an entry creates its missing
/// ancestors as directories. Symlinks are resolved during normalization and
/// stat, the way the local disk resolves them. Call counters make the
/// memoization of node values observable.
use super::fs::{EntryInfo, FileSystem, Metadata};
use super::paths;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Upper bound on link hops before normalization gives up.
const MAX_LINK_HOPS: usize = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
enum MemEntry {
    File { len: u64 },
    Dir,
    /// Present in listings but stat fails (permission denied).
    Unreadable,
    Symlink { target: String },
}

#[derive(Debug)]
pub struct MemoryFs {
    entries: Mutex<BTreeMap<String, MemEntry>>,
    stat_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl Default for MemoryFs {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(paths::ROOT.to_string(), MemEntry::Dir);
        Self {
            entries: Mutex::new(entries),
            stat_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }
}

impl MemoryFs {
    /// An empty filesystem containing only "/".
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, path: &str, entry: MemEntry) {
        let path = Self::lexical(path);
        let mut entries = self.entries.lock();
        let mut parent = paths::parent_path(&path);
        while parent != paths::ROOT && !entries.contains_key(&parent) {
            entries.insert(parent.clone(), MemEntry::Dir);
            parent = paths::parent_path(&parent);
        }
        entries.insert(path, entry);
    }

    pub fn add_file(&self, path: &str, len: u64) {
        self.insert(path, MemEntry::File { len });
    }

    pub fn add_dir(&self, path: &str) {
        self.insert(path, MemEntry::Dir);
    }

    /// An entry that shows up in its parent's listing but cannot be stat'ed.
    pub fn add_unreadable(&self, path: &str) {
        self.insert(path, MemEntry::Unreadable);
    }

    pub fn add_symlink(&self, path: &str, target: &str) {
        self.insert(
            path,
            MemEntry::Symlink {
                target: Self::lexical(target),
            },
        );
    }

    /// Change a file's length in place. No-op for anything but a file.
    pub fn set_len(&self, path: &str, new_len: u64) {
        if let Some(MemEntry::File { len }) = self.entries.lock().get_mut(&Self::lexical(path)) {
            *len = new_len;
        }
    }

    /// Number of [`FileSystem::stat`] calls so far.
    pub fn stat_calls(&self) -> usize {
        self.stat_calls.load(Ordering::Relaxed)
    }

    /// Number of [`FileSystem::list_immediate_entries`] calls so far.
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::Relaxed)
    }

    /// Absolute (relative input is taken from "/") with `.`/`..` collapsed.
    fn lexical(raw: &str) -> String {
        let joined = Path::new(paths::ROOT).join(raw);
        paths::lexically_normalize(&joined)
            .to_string_lossy()
            .into_owned()
    }

    /// Expand symlinks in every prefix of `path`. `None` on a link loop.
    fn resolve_links(entries: &BTreeMap<String, MemEntry>, path: &str) -> Option<String> {
        let mut current = path.to_string();
        'hops: for _ in 0..MAX_LINK_HOPS {
            let mut prefix = String::new();
            for component in current.split('/').filter(|c| !c.is_empty()) {
                prefix.push('/');
                prefix.push_str(component);
                if let Some(MemEntry::Symlink { target }) = entries.get(&prefix) {
                    let rest = &current[prefix.len()..];
                    current = Self::lexical(&format!("{target}{rest}"));
                    continue 'hops;
                }
            }
            return Some(current);
        }
        None
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &str) -> Option<Metadata> {
        self.stat_calls.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.lock();
        let resolved = Self::resolve_links(&entries, &Self::lexical(path))?;
        match entries.get(&resolved)? {
            MemEntry::File { len } => Some(Metadata {
                is_dir: false,
                len: *len,
                mode: 0o100644,
            }),
            MemEntry::Dir => Some(Metadata {
                is_dir: true,
                len: 0,
                mode: 0o040755,
            }),
            MemEntry::Unreadable | MemEntry::Symlink { .. } => None,
        }
    }

    fn list_immediate_entries(&self, path: &str) -> Vec<EntryInfo> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        let dir = Self::lexical(path);
        let entries = self.entries.lock();
        let points_at_dir = |path: &str| {
            Self::resolve_links(&entries, path)
                .is_some_and(|resolved| entries.get(&resolved) == Some(&MemEntry::Dir))
        };
        let (mut dirs, files): (Vec<EntryInfo>, Vec<EntryInfo>) = entries
            .iter()
            .filter(|(p, _)| p.as_str() != paths::ROOT && paths::parent_path(p) == dir)
            .map(|(p, entry)| EntryInfo {
                name: p.rsplit('/').next().unwrap_or_default().to_string(),
                is_dir: match entry {
                    MemEntry::Dir => true,
                    MemEntry::Symlink { .. } => points_at_dir(p),
                    _ => false,
                },
            })
            .partition(|e| e.is_dir);
        dirs.extend(files);
        dirs
    }

    fn remove_file(&self, path: &str) -> io::Result<()> {
        let path = Self::lexical(path);
        let mut entries = self.entries.lock();
        match entries.get(&path) {
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            )),
            Some(MemEntry::Dir) => Err(io::Error::other("Is a directory")),
            Some(_) => {
                entries.remove(&path);
                Ok(())
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        let entries = self.entries.lock();
        Self::resolve_links(&entries, &Self::lexical(path))
            .is_some_and(|resolved| entries.contains_key(&resolved))
    }

    fn is_symlink(&self, path: &str) -> bool {
        matches!(
            self.entries.lock().get(&Self::lexical(path)),
            Some(MemEntry::Symlink { .. })
        )
    }

    fn absolute(&self, path: &str) -> io::Result<String> {
        Ok(Self::lexical(path))
    }

    fn normalize_to_absolute(&self, path: &str) -> io::Result<String> {
        let lexical = Self::lexical(path);
        let entries = self.entries.lock();
        Self::resolve_links(&entries, &lexical).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("too many levels of symbolic links: {lexical}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ancestors_are_created() {
        let fs = MemoryFs::new();
        fs.add_file("/a/b/c.txt", 3);
        assert!(fs.stat("/a").unwrap().is_dir);
        assert!(fs.stat("/a/b").unwrap().is_dir);
        assert_eq!(fs.stat("/a/b/c.txt").unwrap().len, 3);
    }

    #[test]
    fn test_listing_is_one_level() {
        let fs = MemoryFs::new();
        fs.add_file("/a/z.txt", 1);
        fs.add_file("/a/sub/deep.txt", 1);
        let names: Vec<String> = fs
            .list_immediate_entries("/a")
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["sub", "z.txt"]);
        assert_eq!(fs.list_calls(), 1);
    }

    #[test]
    fn test_symlinks_resolve_in_prefixes() {
        let fs = MemoryFs::new();
        fs.add_file("/real/f", 5);
        fs.add_symlink("/link", "/real");
        assert_eq!(fs.normalize_to_absolute("/link/f").unwrap(), "/real/f");
        assert_eq!(fs.stat("/link/f").unwrap().len, 5);
    }

    #[test]
    fn test_link_to_dir_is_listed_with_dirs() {
        let fs = MemoryFs::new();
        fs.add_dir("/r/real");
        fs.add_file("/r/a.txt", 1);
        fs.add_symlink("/r/alias", "/r/real");
        fs.add_symlink("/r/b_file", "/r/a.txt");
        let listed: Vec<(String, bool)> = fs
            .list_immediate_entries("/r")
            .into_iter()
            .map(|e| (e.name, e.is_dir))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("alias".to_string(), true),
                ("real".to_string(), true),
                ("a.txt".to_string(), false),
                ("b_file".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_symlink_is_not_followed_by_is_symlink() {
        let fs = MemoryFs::new();
        fs.add_file("/t", 1);
        fs.add_symlink("/l", "/t");
        assert!(fs.is_symlink("/l"));
        assert!(!fs.is_symlink("/t"));
        assert_eq!(fs.absolute("/x/../l").unwrap(), "/l");
    }

    #[test]
    fn test_link_loop_fails_normalization() {
        let fs = MemoryFs::new();
        fs.add_symlink("/a", "/b");
        fs.add_symlink("/b", "/a");
        assert!(fs.normalize_to_absolute("/a").is_err());
        assert!(!fs.exists("/a"));
    }

    #[test]
    fn test_remove_file_only() {
        let fs = MemoryFs::new();
        fs.add_file("/d/f", 1);
        assert!(fs.remove_file("/d").is_err());
        assert!(fs.remove_file("/d/f").is_ok());
        assert!(!fs.exists("/d/f"));
        assert_eq!(
            fs.remove_file("/d/f").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
