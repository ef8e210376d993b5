mod drop_row;
mod json_store;
mod memory_store;

pub use drop_row::{DropRow, GlobalDropRow};
pub use json_store::{JsonDropStore, DROP_TABLE_FILE_NAME, GLOBAL_DROP_TABLE_FILE_NAME};
pub use memory_store::MemoryDropStore;

use std::path::PathBuf;

use loot_data::MonsterId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DropStoreError {
    #[error("Drop store unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to read drop table {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse drop table {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Drop store lock poisoned")]
    LockPoisoned,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Persistent source of raw drop table rows.
pub trait DropSource: Send + Sync {
    /// All rows dropped by `monster_id`, in source order.
    fn monster_drops(&self, monster_id: MonsterId) -> Result<Vec<DropRow>, DropStoreError>;

    /// All global rows with a chance above zero.
    fn global_drops(&self) -> Result<Vec<GlobalDropRow>, DropStoreError>;
}
