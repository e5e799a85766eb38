//! Idempotent output: the `DependencyWriter` backed by a `FileSystem`.

use std::path::Path;

use super::makefile;
use super::DependencyMap;
use crate::ports::{DependencyWriter, FileSystem, UpdateOutcome};

/// Replaces `path` with `contents` unless it already holds exactly that.
///
/// Leaving an unchanged file alone keeps its timestamp, so make and version
/// control do not see it as modified.
///
/// # Errors
///
/// Returns an error if an existing file cannot be read or the new contents
/// cannot be written.
pub fn update_file(
    fs: &dyn FileSystem,
    path: &Path,
    contents: &str,
) -> Result<UpdateOutcome, String> {
    let outcome = if fs.exists(path) {
        let current = fs
            .read(path)
            .map_err(|e| format!("failed to read existing {}: {e}", path.display()))?;
        if current == contents.as_bytes() {
            return Ok(UpdateOutcome::Unchanged);
        }
        UpdateOutcome::Changed
    } else {
        UpdateOutcome::New
    };

    fs.write(path, contents).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(outcome)
}

/// Writes dependency maps as makefile fragments through a `FileSystem`.
pub struct MakefileWriter<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> MakefileWriter<'a> {
    /// Creates a writer over `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }
}

impl DependencyWriter for MakefileWriter<'_> {
    fn write(
        &self,
        output: &Path,
        deps: &DependencyMap,
        header_comment: &str,
    ) -> Result<UpdateOutcome, String> {
        let text = makefile::render_with_comment(deps, header_comment);
        update_file(self.fs, output, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::deps::Dependency;

    const COMMENT: &str = "# Created by DepGen.py. To recreate, run DepGen.py.\n";

    fn deps() -> DependencyMap {
        let mut dep = Dependency::new("Editor.o", "../src/Editor.cxx");
        dep.headers.push("../src/Editor.h".into());
        vec![dep]
    }

    #[test]
    fn first_write_creates_the_file() {
        let fs = MemoryFileSystem::new();
        let writer = MakefileWriter::new(&fs);
        let outcome = writer.write(Path::new("deps.mak"), &deps(), COMMENT).unwrap();
        assert_eq!(outcome, UpdateOutcome::New);
        let text = fs.contents("deps.mak").unwrap();
        assert!(text.starts_with(COMMENT));
    }

    #[test]
    fn identical_content_is_not_rewritten() {
        let fs = MemoryFileSystem::new();
        let writer = MakefileWriter::new(&fs);
        writer.write(Path::new("deps.mak"), &deps(), COMMENT).unwrap();
        let first = fs.contents("deps.mak").unwrap();

        let outcome = writer.write(Path::new("deps.mak"), &deps(), COMMENT).unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert_eq!(fs.write_count(), 1);
        assert_eq!(fs.contents("deps.mak").unwrap(), first);
    }

    #[test]
    fn different_content_is_replaced() {
        let fs = MemoryFileSystem::new().with_file("deps.mak", "stale\n");
        let writer = MakefileWriter::new(&fs);
        let outcome = writer.write(Path::new("deps.mak"), &deps(), COMMENT).unwrap();
        assert_eq!(outcome, UpdateOutcome::Changed);
        assert!(fs.contents("deps.mak").unwrap().contains("Editor.o:"));
    }

    #[test]
    fn non_utf8_existing_file_is_replaced() {
        let fs = MemoryFileSystem::new().with_file("deps.mak", b"# \xA9 old\n".as_slice());
        let outcome = update_file(&fs, Path::new("deps.mak"), "# new\n").unwrap();
        assert_eq!(outcome, UpdateOutcome::Changed);
        assert_eq!(fs.contents("deps.mak").unwrap(), "# new\n");
    }

    #[test]
    fn update_file_reports_write_failures() {
        struct ReadOnly;
        impl FileSystem for ReadOnly {
            fn read_to_string(&self, _path: &Path) -> Result<String, crate::ports::PortError> {
                Ok(String::new())
            }
            fn read(&self, _path: &Path) -> Result<Vec<u8>, crate::ports::PortError> {
                Ok(Vec::new())
            }
            fn write(&self, _path: &Path, _contents: &str) -> Result<(), crate::ports::PortError> {
                Err("read-only filesystem".into())
            }
            fn exists(&self, _path: &Path) -> bool {
                false
            }
            fn is_dir(&self, _path: &Path) -> bool {
                false
            }
            fn list_dir(&self, _path: &Path) -> Result<Vec<String>, crate::ports::PortError> {
                Ok(Vec::new())
            }
        }

        let err = update_file(&ReadOnly, Path::new("out/deps.mak"), "x").unwrap_err();
        assert!(err.contains("out/deps.mak"));
        assert!(err.contains("read-only"));
    }
}
