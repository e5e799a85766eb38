//! Serves recorded filesystem calls back to a replayed run.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction};
use super::FS_PORT;

/// Pending filesystem calls of one cassette, queued per method.
///
/// Methods are independent: a run may interleave `exists` and `read`
/// differently from the recording as long as each method sees the same
/// sequence of paths.
pub struct CassetteReplayer {
    name: String,
    pending: BTreeMap<String, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Queues the cassette's filesystem calls. Other ports are ignored.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: BTreeMap<String, VecDeque<Interaction>> = BTreeMap::new();
        for interaction in cassette.interactions.iter().filter(|i| i.port == FS_PORT) {
            pending.entry(interaction.method.clone()).or_default().push_back(interaction.clone());
        }
        Self { name: cassette.name.clone(), pending }
    }

    /// Takes the next recorded `method` call and returns its output.
    ///
    /// Calls recorded without a path (hand-written cassettes) match any path.
    ///
    /// # Panics
    ///
    /// Panics if no `method` call is left, or if the next one was recorded
    /// for another path. Either way the run no longer matches the recording.
    pub fn take(&mut self, method: &str, path: &Path) -> serde_json::Value {
        let wanted = path.display().to_string();
        let Some(next) = self.pending.get_mut(method).and_then(VecDeque::pop_front) else {
            panic!("cassette {:?} has no more fs::{method} calls (wanted {wanted})", self.name);
        };
        if let Some(recorded) = next.input.get("path").and_then(serde_json::Value::as_str) {
            assert!(
                recorded == wanted,
                "cassette {:?} diverged at seq {}: fs::{method} was recorded for {recorded}, \
                 replayed for {wanted}",
                self.name,
                next.seq,
            );
        }
        next.output
    }
}
