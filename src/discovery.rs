//! Input resolution: watermark validation and candidate enumeration.
//!
//! Matching is by name only. No file signatures are inspected.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name suffixes accepted as source images (case-sensitive).
pub const SUPPORTED_SUFFIXES: [&str; 3] = ["png", "jpg", "jpeg"];

/// Check whether the file name of `path` ends with a supported suffix.
///
/// The comparison is a plain, case-sensitive string suffix match.
#[must_use]
pub fn has_supported_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| SUPPORTED_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Ensure `path` is an existing regular file whose name ends in `.png`.
///
/// # Errors
///
/// Returns [`Error::InvalidWatermark`] otherwise.
pub fn validate_watermark(path: &Path) -> Result<()> {
    let is_png = path.to_str().is_some_and(|s| s.ends_with(".png"));
    if path.is_file() && is_png {
        Ok(())
    } else {
        Err(Error::InvalidWatermark(path.to_path_buf()))
    }
}

/// Resolve `source` into the list of images to process.
///
/// A file yields itself when its name has a supported suffix, and nothing
/// otherwise. A directory yields its supported entries (non-recursive) in
/// listing order.
///
/// # Errors
///
/// Returns [`Error::InvalidSource`] if `source` is neither a file nor a
/// directory, or [`Error::Io`] if the directory cannot be listed.
pub fn collect_candidates(source: &Path) -> Result<Vec<PathBuf>> {
    if source.is_file() {
        if has_supported_suffix(source) {
            return Ok(vec![source.to_path_buf()]);
        }
        tracing::debug!("{} has no supported suffix, nothing to do", source.display());
        return Ok(Vec::new());
    }

    if source.is_dir() {
        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(source)? {
            let path = entry?.path();
            if has_supported_suffix(&path) {
                candidates.push(path);
            }
        }
        return Ok(candidates);
    }

    Err(Error::InvalidSource(source.to_path_buf()))
}
