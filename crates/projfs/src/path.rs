use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// The root folder's own logical path: "here", not a real segment.
pub const ROOT_PATH: &str = ".";

/// Rejects paths that could escape the project root.
///
/// Every public facade operation runs this before touching storage: a
/// logical path must be relative and free of parent-traversal segments.
/// Virtual-folder *targets* are the one deliberate exception and are
/// handled by [`crate::Backend::add_virtual_folder`] directly.
pub fn check_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Err(Error::path_security(path));
    }
    for component in path.components() {
        match component {
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::path_security(path));
            }
            _ => {}
        }
    }
    Ok(())
}

/// True when `path` is the logical root.
pub fn is_root<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.as_os_str().is_empty() || path == Path::new(ROOT_PATH)
}

/// Extracts the final component of a path as a string, if possible.
pub fn basename<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().components().next_back().and_then(|c| match c {
        Component::Normal(name) => Some(name.to_string_lossy().to_string()),
        _ => None,
    })
}

/// The logical parent of a path; the root for top-level entries.
pub fn dirname<P: AsRef<Path>>(path: P) -> PathBuf {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from(ROOT_PATH),
    }
}

/// Joins a name under a logical directory, treating the root as "here".
pub fn join<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    if is_root(&dir) {
        PathBuf::from(name)
    } else {
        dir.as_ref().join(name)
    }
}

/// Splits the first segment off a logical path.
///
/// Returns the top-level name and the remainder (empty for a one-segment
/// path). This is the seam where virtual-folder redirection plugs in.
pub fn split_first<P: AsRef<Path>>(path: P) -> Option<(String, PathBuf)> {
    let mut components = path.as_ref().components();
    let first = match components.next()? {
        Component::Normal(name) => name.to_string_lossy().to_string(),
        _ => return None,
    };
    Some((first, components.as_path().to_path_buf()))
}

/// True when a rename target is acceptable as a bare name.
///
/// A name must normalize to exactly one real path segment, so `.` and
/// `..` are out along with blanks and separators.
pub fn valid_name(name: &str) -> bool {
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    matches!(
        Path::new(name).components().next(),
        Some(Component::Normal(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_path() {
        assert_eq!(check_path("a/b/c"), Ok(()));
        assert_eq!(check_path("file.txt"), Ok(()));
        assert_eq!(
            check_path("../escape"),
            Err(Error::path_security("../escape"))
        );
        assert_eq!(
            check_path("a/../../b"),
            Err(Error::path_security("a/../../b"))
        );
        #[cfg(unix)]
        assert_eq!(
            check_path("/absolute"),
            Err(Error::path_security("/absolute"))
        );
    }

    #[test]
    fn test_root_detection() {
        assert!(is_root("."));
        assert!(is_root(""));
        assert!(!is_root("a"));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("a/b/file.txt"), Some("file.txt".to_string()));
        assert_eq!(basename("dir"), Some("dir".to_string()));
        assert_eq!(basename(""), None);
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("a/b/c"), PathBuf::from("a/b"));
        assert_eq!(dirname("top"), PathBuf::from(ROOT_PATH));
    }

    #[test]
    fn test_join_under_root() {
        assert_eq!(join(".", "Foo"), PathBuf::from("Foo"));
        assert_eq!(join("Foo", "Bar"), PathBuf::from("Foo").join("Bar"));
    }

    #[test]
    fn test_split_first() {
        let (root, rest) = split_first("Foo/Bar/baz.txt").unwrap();
        assert_eq!(root, "Foo");
        assert_eq!(rest, PathBuf::from("Bar/baz.txt"));

        let (root, rest) = split_first("Foo").unwrap();
        assert_eq!(root, "Foo");
        assert_eq!(rest, PathBuf::new());

        assert!(split_first("").is_none());
    }

    #[test]
    fn test_valid_name() {
        assert!(valid_name("data.txt"));
        assert!(!valid_name(""));
        assert!(!valid_name("   "));
        assert!(!valid_name("a/b"));
        assert!(!valid_name("a\\b"));
        assert!(!valid_name("."));
        assert!(!valid_name(".."));
    }
}
