//! Include scanning: the `DependencyFinder` backed by a `FileSystem`.

use std::collections::BTreeMap;
use std::path::Path;

use super::glob;
use super::{Dependency, DependencyMap};
use crate::ports::{DependencyFinder, FileSystem};

/// Finds header dependencies by reading `#include` lines.
///
/// Only quoted includes are followed; `<...>` includes are system headers
/// and never appear in the output. A quoted include is resolved against the
/// include directories in order and the first existing candidate wins.
/// Includes that resolve nowhere are skipped silently.
pub struct IncludeScanner<'a> {
    fs: &'a dyn FileSystem,
    start_directory: String,
    renames: BTreeMap<String, String>,
    verbose: bool,
}

impl<'a> IncludeScanner<'a> {
    /// Creates a scanner reading through `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs, start_directory: String::new(), renames: BTreeMap::new(), verbose: false }
    }

    /// Strips `start_directory` from the front of every reported path.
    #[must_use]
    pub fn with_start_directory(mut self, start_directory: impl Into<String>) -> Self {
        self.start_directory = start_directory.into();
        self
    }

    /// Substitutes include names before resolution (`from` -> `to`).
    #[must_use]
    pub fn with_renames(mut self, renames: BTreeMap<String, String>) -> Self {
        self.renames = renames;
        self
    }

    /// Reports each scanned source on stderr.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns every header reachable from `file`, depth first, each once.
    ///
    /// # Errors
    ///
    /// Returns an error if `file` or any resolved header cannot be read.
    pub fn headers_of(&self, file: &str, include_dirs: &[String]) -> Result<Vec<String>, String> {
        let mut found = Vec::new();
        self.collect(file, include_dirs, &mut found)?;
        Ok(found)
    }

    fn collect(
        &self,
        file: &str,
        include_dirs: &[String],
        found: &mut Vec<String>,
    ) -> Result<(), String> {
        let bytes =
            self.fs.read(Path::new(file)).map_err(|e| format!("failed to read {file}: {e}"))?;
        // Legacy sources carry Latin-1 text in comments; only the include lines matter.
        let text = String::from_utf8_lossy(&bytes);

        for name in included_names(&text) {
            let name = self.renames.get(&name).cloned().unwrap_or(name);
            let Some(path) = self.resolve(&name, include_dirs) else {
                continue;
            };
            // Already visited headers are not rescanned, which also breaks cycles.
            if found.contains(&path) {
                continue;
            }
            found.push(path.clone());
            self.collect(&path, include_dirs, found)?;
        }
        Ok(())
    }

    fn resolve(&self, name: &str, include_dirs: &[String]) -> Option<String> {
        include_dirs
            .iter()
            .map(|dir| Path::new(dir).join(name))
            .find(|candidate| self.fs.exists(candidate))
            .map(|candidate| candidate.to_string_lossy().into_owned())
    }

    fn normalize(&self, path: &str) -> String {
        let path = path.replace('\\', "/");
        match path.strip_prefix(self.start_directory.as_str()) {
            Some(rest) if !self.start_directory.is_empty() => rest.to_string(),
            _ => path,
        }
    }
}

impl DependencyFinder for IncludeScanner<'_> {
    fn find(
        &self,
        source_globs: &[String],
        include_dirs: &[String],
        object_suffix: &str,
    ) -> Result<DependencyMap, String> {
        let mut deps = Vec::new();
        for pattern in source_globs {
            for source in glob::expand(self.fs, pattern)? {
                let headers = self.headers_of(&source, include_dirs)?;
                if self.verbose {
                    eprintln!("{source}: {} headers", headers.len());
                }
                let object = object_name(&source, object_suffix);
                let mut dep = Dependency::new(object, self.normalize(&source));
                dep.headers = headers.iter().map(|h| self.normalize(h)).collect();
                deps.push(dep);
            }
        }
        Ok(deps)
    }
}

/// Extracts the quoted include names from source text, in order.
///
/// A line counts when, once trimmed, it starts with `#include`; the name is
/// the next whitespace-separated token. `# include` and `#include"x.h"` are
/// not recognized.
#[must_use]
pub fn included_names(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("#include"))
        .filter_map(|line| line.split_whitespace().nth(1))
        .filter(|token| !token.starts_with('<'))
        .map(|token| token.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Object file name for `source`: its file stem followed by `suffix`.
#[must_use]
pub fn object_name(source: &str, suffix: &str) -> String {
    let stem = Path::new(source).file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    format!("{stem}{suffix}")
}
