//! gm_adapter: storage side of the guild roster core.
//!
//! Translates between `gm_core` domain types and the flat table rows the
//! hosted database uses, implements the [`gm_core::DataStore`] boundary over
//! an in-memory table set, and persists that set as a versioned, checksummed
//! snapshot file.

pub mod mapper;
pub mod rows;
pub mod snapshot;
pub mod store;

pub use snapshot::{
    decode_snapshot, default_snapshot_path, encode_snapshot, load_from_path, save_to_path,
    Snapshot, SnapshotError, SNAPSHOT_VERSION,
};
pub use store::{GuildTables, TableStore};
