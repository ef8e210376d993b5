use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        RwLock,
    },
};

use loot_data::{ItemId, MonsterId};

use crate::{DropRow, DropSource, DropStoreError, GlobalDropRow};

/// Drop tables held in memory, editable at runtime.
///
/// Besides the edit operations the store can simulate an outage of the
/// backing database with [`MemoryDropStore::set_unavailable`] and reports how
/// often it was queried, so callers can observe their caching.
#[derive(Default)]
pub struct MemoryDropStore {
    monster_drops: RwLock<HashMap<MonsterId, Vec<DropRow>>>,
    global_drops: RwLock<Vec<GlobalDropRow>>,
    unavailable: AtomicBool,
    monster_queries: AtomicUsize,
    global_queries: AtomicUsize,
}

impl MemoryDropStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(
        rows: impl IntoIterator<Item = DropRow>,
        global_rows: impl IntoIterator<Item = GlobalDropRow>,
    ) -> Self {
        let store = Self::new();
        for row in rows {
            store.add_monster_drop(row);
        }
        store.set_global_drops(global_rows.into_iter().collect());
        store
    }

    pub fn set_monster_drops(&self, monster_id: MonsterId, rows: Vec<DropRow>) {
        let mut monster_drops = self
            .monster_drops
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        monster_drops.insert(monster_id, rows);
    }

    pub fn add_monster_drop(&self, row: DropRow) {
        let mut monster_drops = self
            .monster_drops
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        monster_drops.entry(row.dropper_id).or_default().push(row);
    }

    /// Removes every row of `item_id` dropped by `monster_id`, returns the
    /// number of rows removed.
    pub fn remove_monster_drop(&self, monster_id: MonsterId, item_id: ItemId) -> usize {
        let mut monster_drops = self
            .monster_drops
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        monster_drops.get_mut(&monster_id).map_or(0, |rows| {
            let before = rows.len();
            rows.retain(|row| row.item_id != item_id);
            before - rows.len()
        })
    }

    pub fn set_global_drops(&self, rows: Vec<GlobalDropRow>) {
        let mut global_drops = self
            .global_drops
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *global_drops = rows;
    }

    /// Simulates an outage, every query fails with
    /// [`DropStoreError::Unavailable`] until called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `monster_drops` queries made, including failed ones.
    pub fn monster_query_count(&self) -> usize {
        self.monster_queries.load(Ordering::SeqCst)
    }

    /// Number of `global_drops` queries made, including failed ones.
    pub fn global_query_count(&self) -> usize {
        self.global_queries.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), DropStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(DropStoreError::Unavailable(String::from(
                "memory store marked unavailable",
            )))
        } else {
            Ok(())
        }
    }
}

impl DropSource for MemoryDropStore {
    fn monster_drops(&self, monster_id: MonsterId) -> Result<Vec<DropRow>, DropStoreError> {
        self.monster_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let monster_drops = self
            .monster_drops
            .read()
            .map_err(|_| DropStoreError::LockPoisoned)?;
        Ok(monster_drops.get(&monster_id).cloned().unwrap_or_default())
    }

    fn global_drops(&self) -> Result<Vec<GlobalDropRow>, DropStoreError> {
        self.global_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let global_drops = self
            .global_drops
            .read()
            .map_err(|_| DropStoreError::LockPoisoned)?;
        Ok(global_drops
            .iter()
            .filter(|row| row.chance > 0)
            .copied()
            .collect())
    }
}
