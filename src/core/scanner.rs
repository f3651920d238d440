//! Directory scanner: finds every file whose name contains the base name.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Collect matching files under `root`, depth-first, in file-name order.
///
/// `excludes` are glob patterns matched against the root-relative path
/// (`/`-separated). An excluded directory is not descended into.
pub fn find_matching_files(root: &Path, base_name: &str, excludes: &[String]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "root",
            format!("Not a directory: {}", root.display()),
            None,
            None,
        ));
    }

    let root = absolute(root)?;
    let mut files = Vec::new();
    walk_recursive(&root, &root, base_name, excludes, &mut files);
    Ok(files)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("resolve {}", path.display())))
    })
}

fn walk_recursive(
    dir: &Path,
    root: &Path,
    base_name: &str,
    excludes: &[String],
    files: &mut Vec<PathBuf>,
) {
    // Unreadable directories are skipped.
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if is_excluded(&path, root, excludes) {
            continue;
        }

        // Symlinked directories are not followed; symlinked files are.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            walk_recursive(&path, root, base_name, excludes, files);
        } else if path.is_file() && entry.file_name().to_string_lossy().contains(base_name) {
            files.push(path);
        }
    }
}

fn is_excluded(path: &Path, root: &Path, excludes: &[String]) -> bool {
    if excludes.is_empty() {
        return false;
    }

    let relative = path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    excludes
        .iter()
        .any(|pattern| glob_match::glob_match(pattern, &relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "k=v\n").unwrap();
    }

    fn relative(files: &[PathBuf], root: &Path) -> Vec<String> {
        let root = std::path::absolute(root).unwrap();
        files
            .iter()
            .map(|f| {
                f.strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_nested_matches_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("MessageBundle.properties"));
        touch(&root.join("a/MessageBundle.properties"));
        touch(&root.join("a/b/c/MessageBundle.properties"));
        touch(&root.join("a/Other.properties"));
        touch(&root.join("b/messages.txt"));

        let files = find_matching_files(root, "MessageBundle.properties", &[]).unwrap();

        assert_eq!(
            relative(&files, root),
            vec![
                "MessageBundle.properties",
                "a/MessageBundle.properties",
                "a/b/c/MessageBundle.properties",
            ]
        );
    }

    #[test]
    fn matches_base_name_as_substring() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("old_MessageBundle.properties"));
        touch(&root.join("MessageBundle.properties.bak"));
        touch(&root.join("MessageBundle_fr.properties"));

        let files = find_matching_files(root, "MessageBundle.properties", &[]).unwrap();

        assert_eq!(
            relative(&files, root),
            vec!["MessageBundle.properties.bak", "old_MessageBundle.properties"]
        );
    }

    #[test]
    fn directories_named_like_base_are_not_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("MessageBundle.properties")).unwrap();

        let files = find_matching_files(root, "MessageBundle.properties", &[]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn returns_absolute_paths() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("x/MessageBundle.properties"));

        let files = find_matching_files(dir.path(), "MessageBundle.properties", &[]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
    }

    #[test]
    fn excludes_skip_directories_and_files() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("src/MessageBundle.properties"));
        touch(&root.join("build/MessageBundle.properties"));
        touch(&root.join("src/test/MessageBundle.properties"));

        let excludes = vec!["build".to_string(), "**/test/**".to_string()];
        let files = find_matching_files(root, "MessageBundle.properties", &excludes).unwrap();

        assert_eq!(relative(&files, root), vec!["src/MessageBundle.properties"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_descended() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a/MessageBundle.properties"));
        std::os::unix::fs::symlink(root, root.join("a/loop")).unwrap();

        let files = find_matching_files(root, "MessageBundle.properties", &[]).unwrap();

        assert_eq!(relative(&files, root), vec!["a/MessageBundle.properties"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_matched() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("shared/Labels.txt"));
        fs::create_dir_all(root.join("app")).unwrap();
        std::os::unix::fs::symlink(
            root.join("shared/Labels.txt"),
            root.join("app/MessageBundle.properties"),
        )
        .unwrap();

        let files = find_matching_files(root, "MessageBundle.properties", &[]).unwrap();

        assert_eq!(relative(&files, root), vec!["app/MessageBundle.properties"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = find_matching_files(&dir.path().join("nope"), "x", &[]).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}
