//! Resolution of `url(...)` references found inside stylesheets.
//!
//! A sheet loaded from disk refers to images and imports relative to its own
//! directory. The parser rewrites such references to absolute paths so that
//! declarations stay meaningful once the sheet is detached from its file.

use std::path::{Path, PathBuf};

/// Returns `true` for references that must not be rewritten: absolute
/// filesystem paths, URL-like schemes (`file:`, `data:`, `http:` ...) and
/// resource paths starting with `:`.
#[must_use]
pub fn is_absolute_reference(reference: &str) -> bool {
    if reference.starts_with(':') || Path::new(reference).is_absolute() {
        return true;
    }
    // "scheme:" prefix, but not a drive letter such as "c:"
    reference.find(':').is_some_and(|colon| {
        colon > 1
            && reference[..colon]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Resolve a potentially relative reference against the directory of the
/// sheet it appeared in.
///
/// Absolute references are returned unchanged, as are all references when no
/// base directory is known (in-memory sheets).
#[must_use]
pub fn resolve_reference(reference: &str, base_dir: Option<&Path>) -> String {
    if reference.is_empty() || is_absolute_reference(reference) {
        return reference.to_string();
    }
    let Some(base) = base_dir else {
        return reference.to_string();
    };
    normalize(&base.join(reference)).to_string_lossy().into_owned()
}

/// Lexically collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
