//! Recursive directory enumeration for schema and asset discovery.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

fn walk(dir: &Path, callback: &mut impl FnMut(&Path)) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, callback)?;
        } else if path.is_file() {
            callback(&path);
        }
    }
    Ok(())
}

/// Lists every file under `root` with extension `extension` (no leading dot).
///
/// Paths are relative to `root` and sorted by file name, not full path;
/// ties on file name fall back to the full relative path.
///
/// # Errors
///
/// Returns the first I/O error hit while reading a directory.
pub fn scan_directory(root: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let wanted = extension.trim_start_matches('.');
    let mut found = Vec::new();

    walk(root, &mut |path| {
        if path.extension() == Some(OsStr::new(wanted)) {
            if let Ok(relative) = path.strip_prefix(root) {
                found.push(relative.to_path_buf());
            }
        }
    })?;

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()).then_with(|| a.cmp(b)));
    tracing::debug!(root = %root.display(), extension = wanted, count = found.len(), "scanned directory");
    Ok(found)
}
