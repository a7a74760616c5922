//! Pruned, non-following directory walk shared by every analyzer operation.

use std::{ffi::OsStr, path::Path};

use walkdir::{DirEntry, WalkDir};

use crate::{
    config::IgnoreSet,
    errors::{AnalyzerError, Result},
};

/// Walks `root` and calls `visit(path, ext)` for every regular file that has an
/// extension. `ext` is lower-cased and includes the leading dot.
///
/// Directories whose basename is in `ignore` are never entered. Directory
/// symlinks are not followed; file symlinks count as files. The first walk
/// error aborts the scan.
pub(crate) fn walk_files<F>(root: &Path, ignore: &IgnoreSet, mut visit: F) -> Result<()>
where
    F: FnMut(&Path, &str),
{
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| keep_entry(e, ignore));

    for entry in walker {
        let entry = entry.map_err(|err| AnalyzerError::Traversal {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: err,
        })?;

        if !is_file_like(&entry) {
            continue;
        }
        if let Some(ext) = extension_of(entry.file_name()) {
            visit(entry.path(), &ext);
        }
    }
    Ok(())
}

/// Prune ignored directories before descending. The root is always kept.
fn keep_entry(entry: &DirEntry, ignore: &IgnoreSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    !ignore.contains(&entry.file_name().to_string_lossy())
}

fn is_file_like(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

/// Substring from the last `.` of the basename to its end, lower-cased.
pub(crate) fn extension_of(name: &OsStr) -> Option<String> {
    let name = name.to_string_lossy();
    let dot = name.rfind('.')?;
    Some(name[dot..].to_lowercase())
}
