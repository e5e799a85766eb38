//! Dependency finder port.

use crate::deps::DependencyMap;

/// Computes per-object header dependencies for a set of sources.
pub trait DependencyFinder {
    /// Scans every file matched by `source_globs`, resolving quoted includes
    /// against `include_dirs` in order. Object names are the source stem
    /// followed by `object_suffix`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed or a matched file cannot
    /// be read.
    fn find(
        &self,
        source_globs: &[String],
        include_dirs: &[String],
        object_suffix: &str,
    ) -> Result<DependencyMap, String>;
}
