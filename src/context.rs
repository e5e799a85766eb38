//! Service context bundling the filesystem port for a run.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingFileSystem;
use crate::adapters::replaying::ReplayingFileSystem;
use crate::cassette::format::Cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Everything a command needs from the outside world.
///
/// Constructors wire up different adapters (live, recording, replaying).
pub struct ServiceContext {
    /// Filesystem for scanning sources and writing dependency files.
    pub fs: Box<dyn FileSystem>,
    /// Report per-source scan results on stderr.
    pub verbose: bool,
    /// Recorder shared with a recording adapter; saved on drop.
    recorder: Option<Arc<Mutex<CassetteRecorder>>>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::with_fs(Box::new(LiveFileSystem))
    }

    /// Creates a context around any filesystem implementation.
    #[must_use]
    pub fn with_fs(fs: Box<dyn FileSystem>) -> Self {
        Self { fs, verbose: false, recorder: None }
    }

    /// Creates a live context that records every filesystem call.
    ///
    /// The cassette is written to `path` when the context is dropped.
    #[must_use]
    pub fn recording(path: &Path) -> Self {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(path, "depgen-session")));
        let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
        Self { fs: Box::new(fs), verbose: false, recorder: Some(recorder) }
    }

    /// Creates a context that answers filesystem calls from a cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette =
            Cassette::from_yaml(&content).map_err(|e| format!("{}: {e}", path.display()))?;
        Ok(Self::with_fs(Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette)))))
    }

    /// Sets whether scans are reported on stderr.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let Some(recorder) = self.recorder.take() else {
            return;
        };
        let guard = recorder.lock().expect("recorder lock poisoned");
        match guard.save() {
            Ok(path) => eprintln!("Recording saved to: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to write cassette: {e}"),
        }
    }
}
