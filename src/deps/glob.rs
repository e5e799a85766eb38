//! Glob expansion over the `FileSystem` port.
//!
//! Only the last path component may hold wildcards (`*`, `?`, `[...]`),
//! which covers source lists such as `../src/*.cxx`.

use std::path::Path;

use ::glob::{MatchOptions, Pattern};

use crate::ports::FileSystem;

/// Returns `true` if `text` contains a glob metacharacter.
#[must_use]
pub fn has_wildcard(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// Expands `pattern` into the matching paths, sorted case-insensitively.
///
/// Matches keep the directory prefix exactly as written in the pattern.
/// A directory part that is missing or is not a directory yields no
/// matches rather than an error. Names starting with `.` only match a
/// pattern that starts with `.`.
///
/// # Errors
///
/// Returns an error if the directory part contains a wildcard, the name
/// pattern is malformed, or the directory cannot be listed.
pub fn expand(fs: &dyn FileSystem, pattern: &str) -> Result<Vec<String>, String> {
    let (prefix, name) = match pattern.rfind(['/', '\\']) {
        Some(idx) => pattern.split_at(idx + 1),
        None => ("", pattern),
    };

    if has_wildcard(prefix) {
        return Err(format!("{pattern}: wildcards are only supported in the file name"));
    }

    if !has_wildcard(name) {
        let exists = fs.exists(Path::new(pattern));
        return Ok(if exists { vec![pattern.to_string()] } else { Vec::new() });
    }

    let dir = match prefix {
        "" => ".",
        "/" => "/",
        p => &p[..p.len() - 1],
    };
    if !fs.is_dir(Path::new(dir)) {
        return Ok(Vec::new());
    }

    let matcher = Pattern::new(name).map_err(|e| format!("invalid glob {pattern}: {e}"))?;
    let options = MatchOptions { require_literal_leading_dot: true, ..MatchOptions::new() };
    let entries = fs
        .list_dir(Path::new(dir))
        .map_err(|e| format!("failed to list {dir} for {pattern}: {e}"))?;

    let mut matches: Vec<String> = entries
        .into_iter()
        .filter(|entry| matcher.matches_with(entry, options))
        .map(|entry| format!("{prefix}{entry}"))
        .collect();
    matches.sort_by_key(|m| m.to_lowercase());
    Ok(matches)
}
