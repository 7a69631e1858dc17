//! Helpers for building Zim exports on disk.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary export containing the given `(relative path, content)` pairs.
pub fn export(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for (path, content) in files {
        write(dir.path(), path, content);
    }
    dir
}

pub fn write(root: &Path, path: &str, content: &str) -> PathBuf {
    let full = root.join(path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&full, content).expect("write fixture");
    full
}

pub fn read(root: &Path, path: &str) -> String {
    let full = root.join(path);
    fs::read_to_string(&full).unwrap_or_else(|e| panic!("Failed to read {full:?}: {e}"))
}
