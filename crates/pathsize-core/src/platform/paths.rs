/// Path normalization: turns raw user input into canonical identity keys.
///
/// A canonical path is absolute, has a leading `~` expanded to the user's
/// home directory, has `.` and `..` collapsed, and has symlinks expanded
/// when the entry exists on disk. Paths that do not exist keep their
/// lexical form so the registry can still look them up (and miss).
use std::io;
use std::path::{Component, Path, PathBuf};

/// The filesystem root, and the answer for any parent lookup that runs out
/// of components.
pub const ROOT: &str = "/";

/// Expand a leading `~` or `~/` to the current user's home directory.
///
/// `~user` forms are left untouched.
pub fn expand_home(raw: &str) -> io::Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return Ok(PathBuf::from(raw)),
    };
    let base = directories::BaseDirs::new().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "home directory is not available")
    })?;
    Ok(base.home_dir().join(rest.trim_start_matches('/')))
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(ROOT);
    }
    out
}

/// Home-expand, absolutise against the current directory, and collapse.
pub fn to_absolute(raw: &str) -> io::Result<PathBuf> {
    let expanded = expand_home(raw)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };
    Ok(lexically_normalize(&absolute))
}

/// Produce the canonical identity key for `raw`.
///
/// Symlinks are expanded only when the path resolves; a dangling or missing
/// path falls back to its absolute lexical form.
pub fn canonicalize(raw: &str) -> io::Result<String> {
    let absolute = to_absolute(raw)?;
    let resolved = dunce::canonicalize(&absolute).unwrap_or(absolute);
    Ok(resolved.to_string_lossy().into_owned())
}

/// The containing directory of a canonical path. "/" is its own parent.
pub fn parent_path(canonical: &str) -> String {
    match Path::new(canonical).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ROOT.to_string(),
    }
}

/// Join a directory's canonical path with one entry name.
pub fn join(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().into_owned()
}
