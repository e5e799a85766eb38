//! Cassettes: YAML recordings of filesystem interactions for replay.

pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name that filesystem calls are recorded under.
pub const FS_PORT: &str = "fs";
