//! Dependency writer port.

use std::fmt;
use std::path::Path;

use crate::deps::DependencyMap;

/// What happened to the output file during a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No file existed; one was created.
    New,
    /// The file existed with different content and was replaced.
    Changed,
    /// The file already held identical content and was not touched.
    Unchanged,
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::New => "New",
            Self::Changed => "Changed",
            Self::Unchanged => "Unchanged",
        };
        f.write_str(label)
    }
}

/// Persists a dependency map as a makefile fragment.
pub trait DependencyWriter {
    /// Writes `deps` to `output` beneath `header_comment`.
    ///
    /// Implementations must be idempotent: when the file already holds the
    /// rendered content it is left alone and [`UpdateOutcome::Unchanged`]
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing file cannot be compared or the new
    /// content cannot be written.
    fn write(
        &self,
        output: &Path,
        deps: &DependencyMap,
        header_comment: &str,
    ) -> Result<UpdateOutcome, String>;
}
