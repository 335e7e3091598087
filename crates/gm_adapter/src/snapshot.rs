//! On-disk snapshots of the guild tables.
//!
//! Format: MessagePack (named fields) → LZ4 with prepended size → SHA-256
//! checksum appended. Writes go to a temp file first and are renamed into
//! place, so a crash never leaves a torn snapshot behind.

use crate::store::GuildTables;
use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SNAPSHOT_VERSION: u32 = 1;

const CHECKSUM_LEN: usize = 32;
const SIZE_HEADER_LEN: usize = 4;

/// Environment variable overriding where snapshots live.
pub const DATA_DIR_ENV: &str = "GM_DATA_DIR";

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Corrupted snapshot")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Snapshot not found: {path}")]
    NotFound { path: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Unix milliseconds at encode time.
    pub timestamp: u64,
    pub tables: GuildTables,
}

pub fn encode_snapshot(tables: &GuildTables) -> Result<Vec<u8>, SnapshotError> {
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        timestamp: Utc::now().timestamp_millis() as u64,
        tables: tables.clone(),
    };

    let msgpack = to_vec_named(&snapshot)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
    if bytes.len() < SIZE_HEADER_LEN + CHECKSUM_LEN {
        return Err(SnapshotError::Corrupted);
    }

    let (payload, stored_checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let checksum = hasher.finalize();
    if checksum.as_slice() != stored_checksum {
        return Err(SnapshotError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SnapshotError::Corrupted)?;
    let snapshot: Snapshot = from_slice(&msgpack)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: snapshot.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(snapshot)
}

/// Snapshot directory: `$GM_DATA_DIR`, else `./data`.
pub fn snapshot_dir() -> PathBuf {
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join("data"),
    }
}

pub fn default_snapshot_path() -> PathBuf {
    snapshot_dir().join("guild.dat")
}

pub fn save_to_path(path: &Path, tables: &GuildTables) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let data = encode_snapshot(tables)?;
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(&data)?;
        file.flush()?;
        file.sync_all()?;
    }
    rename(&temp_path, path)?;

    log::debug!("wrote snapshot: {} bytes to {:?}", data.len(), path);
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<GuildTables, SnapshotError> {
    if !path.exists() {
        return Err(SnapshotError::NotFound {
            path: path.display().to_string(),
        });
    }

    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;
    let snapshot = decode_snapshot(&bytes)?;
    log::info!(
        "loaded snapshot from {:?} ({} users, {} activities)",
        path,
        snapshot.tables.users.len(),
        snapshot.tables.activities.len()
    );
    Ok(snapshot.tables)
}

pub fn delete_at_path(path: &Path) -> Result<(), SnapshotError> {
    if path.exists() {
        remove_file(path)?;
        log::info!("deleted snapshot {:?}", path);
    }
    Ok(())
}
