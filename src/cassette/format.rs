//! Cassette data structures for recording and replaying interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded call on a port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number, assigned by the recorder.
    pub seq: u64,
    /// Port name, e.g. `fs`.
    pub port: String,
    /// Method invoked on the port.
    pub method: String,
    /// Arguments of the call.
    pub input: serde_json::Value,
    /// Return value, with `Result`s stored as `{"ok": ..}` / `{"err": ..}`.
    pub output: serde_json::Value,
}

/// An ordered recording of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name.
    pub name: String,
    /// When the run was recorded.
    pub recorded_at: DateTime<Utc>,
    /// `depgen` version that produced the recording.
    pub tool_version: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Parses cassette YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML does not describe a cassette.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        serde_yaml::from_str(text).map_err(|e| format!("failed to parse cassette: {e}"))
    }
}
