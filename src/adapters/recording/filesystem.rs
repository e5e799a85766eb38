//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::FS_PORT;
use crate::ports::filesystem::{FileSystem, PortError};

/// Passes calls through to an inner filesystem and logs each one.
///
/// Every call becomes one interaction whose input holds the path (plus the
/// written text for `write`). Fallible calls are stored as `{"ok": value}`
/// or `{"err": message}`; `exists` and `is_dir` store the bare boolean.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Wraps `inner`, recording every call into `recorder`.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }

    fn log(&self, method: &str, input: Value, output: Value) {
        self.recorder.lock().expect("recorder lock poisoned").record(FS_PORT, method, input, output);
    }

    fn logged<T: Serialize>(
        &self,
        method: &str,
        path: &Path,
        result: Result<T, PortError>,
    ) -> Result<T, PortError> {
        let output = match &result {
            Ok(value) => json!({ "ok": value }),
            Err(e) => json!({ "err": e.to_string() }),
        };
        self.log(method, json!({ "path": path.display().to_string() }), output);
        result
    }

    fn logged_flag(&self, method: &str, path: &Path, flag: bool) -> bool {
        self.log(method, json!({ "path": path.display().to_string() }), json!(flag));
        flag
    }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        self.logged("read_to_string", path, self.inner.read_to_string(path))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        self.logged("read", path, self.inner.read(path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let output = match &result {
            Ok(()) => json!({ "ok": null }),
            Err(e) => json!({ "err": e.to_string() }),
        };
        let input = json!({ "path": path.display().to_string(), "contents": contents });
        self.log("write", input, output);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        self.logged_flag("exists", path, self.inner.exists(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.logged_flag("is_dir", path, self.inner.is_dir(path))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        self.logged("list_dir", path, self.inner.list_dir(path))
    }
}
