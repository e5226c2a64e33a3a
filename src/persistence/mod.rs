//! Save/load of the player profile
//!
//! Features:
//! - Pretty JSON document, 4-space indented
//! - Atomic replace (write tmp, then rename over the save)
//! - Typed errors: missing, I/O, corrupt, invalid profile

pub mod store;

pub use store::{DEFAULT_SAVE_PATH, ProfileStore};
