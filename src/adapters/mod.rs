//! `FileSystem` implementations: live disk, in-memory, recording, replaying.

pub mod live;
pub mod memory;
pub mod recording;
pub mod replaying;
