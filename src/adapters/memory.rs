//! In-memory filesystem adapter.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::{FileSystem, PortError};

/// Filesystem held entirely in memory, keyed by lexically normalized path.
///
/// Directories are implied by the files beneath them. Every successful
/// `write` is counted so callers can assert that nothing was rewritten.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
    writes: Mutex<usize>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper that adds a file.
    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds or replaces a file without counting it as a write.
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .expect("memory fs lock poisoned")
            .insert(normalize(path.as_ref()), contents.into());
    }

    /// Returns the contents of a file as text, if present.
    #[must_use]
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.bytes(path).map(|b| String::from_utf8_lossy(&b).into_owned())
    }

    /// Returns the raw contents of a file, if present.
    #[must_use]
    pub fn bytes(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.lock().expect("memory fs lock poisoned").get(&normalize(path.as_ref())).cloned()
    }

    /// Number of successful `write` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.lock().expect("memory fs lock poisoned")
    }
}

/// Resolves `.` and `..` lexically so `../src/a.h` and `../gtk4/../src/a.h`
/// name the same entry.
fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(String::from_utf8(self.read(path)?)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        self.bytes(path).ok_or_else(|| format!("{}: no such file", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        self.insert(path, contents);
        *self.writes.lock().expect("memory fs lock poisoned") += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let target = normalize(path);
        let files = self.files.lock().expect("memory fs lock poisoned");
        target.as_os_str().is_empty() || files.keys().any(|p| p.starts_with(&target))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let target = normalize(path);
        let files = self.files.lock().expect("memory fs lock poisoned");
        target.as_os_str().is_empty()
            || files.keys().any(|p| p != &target && p.starts_with(&target))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        if !self.is_dir(path) {
            return Err(format!("{}: not a directory", path.display()).into());
        }
        let dir = normalize(path);
        let files = self.files.lock().expect("memory fs lock poisoned");
        let mut entries: Vec<String> = files
            .keys()
            .filter_map(|p| p.strip_prefix(&dir).ok())
            .filter_map(|rest| rest.components().next())
            .filter_map(|c| c.as_os_str().to_str().map(String::from))
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }
}
