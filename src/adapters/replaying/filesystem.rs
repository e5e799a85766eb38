//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::{FileSystem, PortError};

/// Serves filesystem calls from a cassette instead of the disk.
///
/// Each method answers in the order its calls were recorded, and each call
/// must ask for the path it was recorded with.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn answer(&self, method: &str, path: &Path) -> serde_json::Value {
        self.replayer.lock().expect("replayer lock poisoned").take(method, path)
    }

    /// Replays a fallible call recorded as `{"ok": value}` or `{"err": message}`.
    fn fallible<T: DeserializeOwned>(&self, method: &str, path: &Path) -> Result<T, PortError> {
        let mut output = self.answer(method, path);
        if let Some(err) = output.get("err") {
            return Err(err.as_str().unwrap_or("unknown error").into());
        }
        let value = output.get_mut("ok").map_or(serde_json::Value::Null, serde_json::Value::take);
        serde_json::from_value(value)
            .map_err(|e| format!("fs::{method} {}: bad recorded output: {e}", path.display()).into())
    }

    fn flag(&self, method: &str, path: &Path) -> bool {
        let output = self.answer(method, path);
        output.as_bool().unwrap_or_else(|| panic!("fs::{method}: expected a boolean, got {output}"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.fallible("read_to_string", path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        self.fallible("read", path)
    }

    fn write(&self, path: &Path, _contents: &str) -> Result<(), PortError> {
        self.fallible("write", path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.flag("exists", path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.flag("is_dir", path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        self.fallible("list_dir", path)
    }
}
