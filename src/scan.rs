//! Directory scanning utilities for discovering wallpaper files.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Extensions accepted when no override is configured (lowercase, without dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Return `true` if `path` has an allowed image extension.
#[must_use]
pub fn is_supported_image<S: AsRef<str>>(path: &Path, exts: &[S]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| exts.iter().any(|e| e.as_ref().eq_ignore_ascii_case(ext)))
}

/// Recursively collect every entry below `root` whose extension is in `exts`,
/// hidden directories included.
///
/// Entries are not checked for readability here; a candidate that turns out
/// not to be a readable file (e.g. a directory named `x.jpg`) is skipped at
/// ingest. A root that does not exist (or cannot be read) yields an empty
/// list. Order follows directory enumeration and is not otherwise guaranteed.
pub fn scan_root<S: AsRef<str>>(root: &Path, exts: &[S]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_map(Result::ok)
        .map(DirEntry::into_path)
        .filter(|p| is_supported_image(p, exts))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(is_supported_image(Path::new("/a/B.JPG"), DEFAULT_EXTENSIONS));
        assert!(is_supported_image(Path::new("/a/b.WebP"), DEFAULT_EXTENSIONS));
        assert!(!is_supported_image(Path::new("/a/b.gif"), DEFAULT_EXTENSIONS));
        assert!(!is_supported_image(Path::new("/a/jpg"), DEFAULT_EXTENSIONS));
    }

    #[test]
    fn missing_root_scans_empty() {
        let tmp = tempdir().unwrap();
        assert!(scan_root(&tmp.path().join("nope"), DEFAULT_EXTENSIONS).is_empty());
    }

    #[test]
    fn hidden_subdirectories_are_scanned() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join(".favs")).unwrap();
        fs::create_dir_all(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join(".favs").join("x.jpg"), b"x").unwrap();
        fs::write(tmp.path().join("sub").join("y.png"), b"y").unwrap();

        let mut found = scan_root(tmp.path(), DEFAULT_EXTENSIONS);
        found.sort();
        assert_eq!(
            found,
            vec![
                tmp.path().join(".favs").join("x.jpg"),
                tmp.path().join("sub").join("y.png"),
            ]
        );
    }

    #[test]
    fn matching_directory_names_are_candidates() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("odd.jpg")).unwrap();
        fs::write(tmp.path().join("odd.jpg").join("inner.png"), b"i").unwrap();

        let mut found = scan_root(tmp.path(), DEFAULT_EXTENSIONS);
        found.sort();
        assert_eq!(
            found,
            vec![
                tmp.path().join("odd.jpg"),
                tmp.path().join("odd.jpg").join("inner.png"),
            ]
        );
    }
}
