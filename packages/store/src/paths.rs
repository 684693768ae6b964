//! On-disk path derivation.
//!
//! A record for `(collection, resource)` lives at
//! `<base>/<collection>/<resource>.json`, with `<resource>.json.tmp` as the
//! transient path used during the write-commit window. Lookup is
//! extension-optional: a bare name and a name with `.json` appended resolve
//! to the same record.

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub(crate) const JSON_EXT: &str = ".json";
pub(crate) const TMP_EXT: &str = ".tmp";

/// Lexically normalizes a path: collapses redundant separators and drops
/// interior `.` components. Does not touch the filesystem.
pub(crate) fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Appends a literal suffix to the final path component, `foo` -> `foo.json`.
///
/// `PathBuf::set_extension` would replace an existing extension instead of
/// appending, which is wrong for names like `alice.v2`.
fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

pub(crate) fn append_json(path: &Path) -> PathBuf {
    append_suffix(path, JSON_EXT)
}

pub(crate) fn append_tmp(path: &Path) -> PathBuf {
    append_suffix(path, TMP_EXT)
}

/// Extension-optional stat: checks `path` as given, then with `.json`
/// appended. Returns the path that exists together with its metadata, or
/// `None` when neither form does.
pub(crate) fn resolve(path: &Path) -> Option<(PathBuf, fs::Metadata)> {
    if let Ok(meta) = fs::metadata(path) {
        return Some((path.to_path_buf(), meta));
    }
    let with_ext = append_json(path);
    fs::metadata(&with_ext).ok().map(|meta| (with_ext, meta))
}
