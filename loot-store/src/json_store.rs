use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};

use loot_data::MonsterId;

use crate::{DropRow, DropSource, DropStoreError, GlobalDropRow};

pub const DROP_TABLE_FILE_NAME: &str = "drop_data.json";
pub const GLOBAL_DROP_TABLE_FILE_NAME: &str = "drop_data_global.json";

/// Drop tables stored as JSON files in a directory.
///
/// Every query reads the table from disk so edits made through
/// [`JsonDropStore::save_drop_table`] or by hand are picked up by the next
/// query.
pub struct JsonDropStore {
    path: PathBuf,
}

impl JsonDropStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_drop_table(&self) -> Result<Vec<DropRow>, DropStoreError> {
        read_table(&self.path.join(DROP_TABLE_FILE_NAME))
    }

    pub fn load_global_drop_table(&self) -> Result<Vec<GlobalDropRow>, DropStoreError> {
        read_table(&self.path.join(GLOBAL_DROP_TABLE_FILE_NAME))
    }

    pub fn save_drop_table(&self, rows: &[DropRow]) -> Result<(), DropStoreError> {
        self.write_table(DROP_TABLE_FILE_NAME, rows)
    }

    pub fn save_global_drop_table(&self, rows: &[GlobalDropRow]) -> Result<(), DropStoreError> {
        self.write_table(GLOBAL_DROP_TABLE_FILE_NAME, rows)
    }

    fn write_table<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<(), DropStoreError> {
        let path = self.path.join(file_name);

        std::fs::create_dir_all(&self.path).with_context(|| {
            format!(
                "Failed to create drop table directory {}",
                self.path.to_string_lossy()
            )
        })?;

        let json = serde_json::to_string_pretty(rows)
            .with_context(|| format!("Failed to serialise drop table {}", file_name))?;
        let mut file = tempfile::NamedTempFile::new_in(&self.path).with_context(|| {
            format!(
                "Failed to create temporary file whilst saving drop table {}",
                file_name
            )
        })?;
        file.write_all(json.as_bytes()).with_context(|| {
            format!(
                "Failed to write data to temporary file whilst saving drop table {}",
                file_name
            )
        })?;
        file.persist(&path).with_context(|| {
            format!(
                "Failed to persist temporary drop table file to path {}",
                path.to_string_lossy()
            )
        })?;

        log::debug!("Saved {} rows to {}", rows.len(), path.to_string_lossy());
        Ok(())
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DropStoreError> {
    let str = std::fs::read_to_string(path).map_err(|source| DropStoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&str).map_err(|source| DropStoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl DropSource for JsonDropStore {
    fn monster_drops(&self, monster_id: MonsterId) -> Result<Vec<DropRow>, DropStoreError> {
        Ok(self
            .load_drop_table()?
            .into_iter()
            .filter(|row| row.dropper_id == monster_id)
            .collect())
    }

    fn global_drops(&self) -> Result<Vec<GlobalDropRow>, DropStoreError> {
        Ok(self
            .load_global_drop_table()?
            .into_iter()
            .filter(|row| row.chance > 0)
            .collect())
    }
}
