//! Path canonicalization, normalization, and home-prefix handling

use crate::error::TagError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize and normalize an existing path.
///
/// Resolves symlinks, `..` and `.` on disk, then applies [`normalize_path`].
/// A path that does not exist yields `PathNotFound`.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, TagError> {
    let canonical =
        dunce::canonicalize(path).map_err(|_| TagError::PathNotFound(path.to_path_buf()))?;
    Ok(normalize_path(&canonical))
}

/// Normalize a path without filesystem access: Unicode NFC and no trailing
/// slashes (except for the root).
pub fn normalize_path(path: &Path) -> PathBuf {
    let normalized: String = path.to_string_lossy().nfc().collect();

    let mut result = normalized;
    if result.len() > 1 {
        while result.ends_with('/') || (cfg!(windows) && result.ends_with('\\')) {
            result.pop();
        }
    }

    PathBuf::from(result)
}

/// Resolve a user-supplied target against `cwd` and fold `.`/`..` lexically.
pub fn resolve_target(cwd: &Path, target: &Path) -> PathBuf {
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        cwd.join(target)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    normalize_path(&resolved)
}

/// Abbreviate the home prefix to `~`, only at a path-component boundary.
pub fn display_path(path: &Path, home: &Path) -> String {
    let text = path.to_string_lossy();
    let home = home.to_string_lossy();
    let home = home.trim_end_matches('/');

    if home.is_empty() {
        return text.into_owned();
    }
    if text == home {
        return "~".to_string();
    }
    match text.strip_prefix(home) {
        Some(rest) if rest.starts_with('/') => format!("~{}", rest),
        _ => text.into_owned(),
    }
}

/// Expand a leading `~` or `~/` to the home prefix. Anything else is left alone.
pub fn expand_home(text: &str, home: &Path) -> PathBuf {
    if text == "~" {
        return home.to_path_buf();
    }
    match text.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(text),
    }
}
