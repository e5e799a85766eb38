//! Port traits defining external boundaries.
//!
//! `FileSystem` is the only boundary with the outside world. The finder and
//! writer traits are the two collaborators the driver is wired against.
//! Implementations live in `src/adapters/` and `src/deps/`.

pub mod filesystem;
pub mod finder;
pub mod writer;

pub use filesystem::{FileSystem, PortError};
pub use finder::DependencyFinder;
pub use writer::{DependencyWriter, UpdateOutcome};
