//! Loading and saving snapshot files

pub mod snapshot;

pub use snapshot::{load_snapshot, save_snapshot, Snapshot};
