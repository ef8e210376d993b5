use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use loot_data::{ContinentId, DropEntry, GlobalDropEntry, ItemClassifier, MapId, MonsterId};
use loot_store::DropSource;

use super::{
    compile_drop_pool, find_multi_equip_drops, is_denied_drop, rescale_drop_chance,
    roll_extra_equip_drops, QuantityRng,
};
use crate::config::DropConfig;

/// Every cache derived from the drop tables.
///
/// All tables live behind one lock so a reset swaps them together. Each reset
/// bumps `generation`, results computed from an older generation are returned
/// to their caller but never cached.
struct DropCaches {
    generation: u64,
    drops: HashMap<MonsterId, Arc<[DropEntry]>>,
    no_multi_equip_drops: HashSet<MonsterId>,
    multi_equip_drops: HashMap<MonsterId, Arc<[DropEntry]>>,
    drop_pools: HashMap<MonsterId, Arc<[u64]>>,
    global_drops: Arc<[GlobalDropEntry]>,
    continent_drops: HashMap<ContinentId, Arc<[GlobalDropEntry]>>,
}

impl DropCaches {
    fn new(generation: u64, global_drops: Arc<[GlobalDropEntry]>) -> Self {
        Self {
            generation,
            drops: HashMap::new(),
            no_multi_equip_drops: HashSet::new(),
            multi_equip_drops: HashMap::new(),
            drop_pools: HashMap::new(),
            global_drops,
            continent_drops: HashMap::new(),
        }
    }
}

/// Resolves the drops of monsters, caching everything derived from the drop
/// tables until [`MonsterDropProvider::clear_drops`] is called.
pub struct MonsterDropProvider {
    config: DropConfig,
    source: Arc<dyn DropSource>,
    classifier: Box<dyn ItemClassifier + Send + Sync>,
    rng: QuantityRng,
    caches: RwLock<DropCaches>,
}

impl MonsterDropProvider {
    pub fn new(
        config: DropConfig,
        source: Arc<dyn DropSource>,
        classifier: Box<dyn ItemClassifier + Send + Sync>,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => QuantityRng::from_seed(seed),
            None => QuantityRng::from_entropy(),
        };
        let global_drops = retrieve_global(source.as_ref());

        Self {
            config,
            source,
            classifier,
            rng,
            caches: RwLock::new(DropCaches::new(0, global_drops)),
        }
    }

    pub fn with_quantity_rng(mut self, rng: QuantityRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &DropConfig {
        &self.config
    }

    fn read_caches(&self) -> RwLockReadGuard<'_, DropCaches> {
        self.caches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_caches(&self) -> RwLockWriteGuard<'_, DropCaches> {
        self.caches
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The rescaled drop list of `monster_id`.
    ///
    /// With `reload_drops_on_cache_hit` set, finding the monster already
    /// cached empties the whole drop list cache and the list is queried
    /// again. Otherwise the cached list is returned.
    pub fn retrieve_drop(&self, monster_id: MonsterId) -> Arc<[DropEntry]> {
        self.retrieve_cacheable_drop(monster_id).1
    }

    /// Returns the drop list with the generation it was loaded in, the
    /// generation is `None` when the source query failed and nothing derived
    /// from the list may be cached.
    fn retrieve_cacheable_drop(&self, monster_id: MonsterId) -> (Option<u64>, Arc<[DropEntry]>) {
        let generation = {
            let caches = self.read_caches();
            match caches.drops.get(&monster_id) {
                Some(drops) if !self.config.reload_drops_on_cache_hit => {
                    return (Some(caches.generation), drops.clone());
                }
                Some(_) => None,
                None => Some(caches.generation),
            }
        };

        let generation = match generation {
            Some(generation) => generation,
            None => {
                let mut caches = self.write_caches();
                caches.drops.clear();
                caches.generation
            }
        };

        let drops: Arc<[DropEntry]> = match self.source.monster_drops(monster_id) {
            Ok(rows) => rows
                .iter()
                .filter(|row| !is_denied_drop(row.item_id))
                .map(|row| {
                    row.to_entry().with_chance(rescale_drop_chance(
                        self.classifier.as_ref(),
                        row.item_id,
                        row.chance,
                    ))
                })
                .collect(),
            Err(error) => {
                log::error!(
                    "Failed to retrieve drops for monster {} with error {:?}",
                    monster_id,
                    error
                );
                return (None, Arc::from(Vec::new()));
            }
        };

        let mut caches = self.write_caches();
        if caches.generation == generation {
            caches.drops.insert(monster_id, drops.clone());
        }
        (Some(generation), drops)
    }

    /// The drop list of `monster_id` with extra copies of multi-equip drops
    /// appended, quantities are rolled again on every call.
    pub fn retrieve_effective_drop(&self, monster_id: MonsterId) -> Vec<DropEntry> {
        let (generation, drops) = self.retrieve_cacheable_drop(monster_id);
        if !self.config.use_multiple_same_equip_drop {
            return drops.to_vec();
        }

        // Multi-equip state cached by another generation does not describe
        // `drops`, it is derived again from `drops` instead.
        let cached_multi_drops = {
            let caches = self.read_caches();
            if generation != Some(caches.generation) {
                None
            } else if caches.no_multi_equip_drops.contains(&monster_id) {
                return drops.to_vec();
            } else {
                caches.multi_equip_drops.get(&monster_id).cloned()
            }
        };

        let multi_drops = match cached_multi_drops {
            Some(multi_drops) => multi_drops,
            None => {
                let multi_drops: Arc<[DropEntry]> =
                    find_multi_equip_drops(&drops, self.classifier.as_ref()).into();

                let mut caches = self.write_caches();
                if generation == Some(caches.generation) {
                    if multi_drops.is_empty() {
                        caches.no_multi_equip_drops.insert(monster_id);
                    } else {
                        caches
                            .multi_equip_drops
                            .insert(monster_id, multi_drops.clone());
                    }
                }
                multi_drops
            }
        };

        let mut effective_drops = drops.to_vec();
        effective_drops.extend(roll_extra_equip_drops(&multi_drops, &self.rng));
        effective_drops
    }

    /// Cumulative chance pool aligned with [`MonsterDropProvider::retrieve_drop`],
    /// empty when the monster has no weighted drops.
    pub fn retrieve_drop_pool(&self, monster_id: MonsterId) -> Arc<[u64]> {
        if let Some(pool) = self.read_caches().drop_pools.get(&monster_id) {
            return pool.clone();
        }

        let (generation, drops) = self.retrieve_cacheable_drop(monster_id);
        let pool: Arc<[u64]> = compile_drop_pool(&drops, self.classifier.as_ref()).into();

        let mut caches = self.write_caches();
        if generation == Some(caches.generation) {
            caches.drop_pools.insert(monster_id, pool.clone());
        }
        pool
    }

    /// Global drops which apply to monsters on `map_id`.
    pub fn get_relevant_global_drops(&self, map_id: MapId) -> Arc<[GlobalDropEntry]> {
        let continent = map_id.continent();
        let (generation, global_drops) = {
            let caches = self.read_caches();
            if let Some(continent_drops) = caches.continent_drops.get(&continent) {
                return continent_drops.clone();
            }
            (caches.generation, caches.global_drops.clone())
        };

        let continent_drops: Arc<[GlobalDropEntry]> = global_drops
            .iter()
            .filter(|drop| drop.continent.applies_to(continent))
            .copied()
            .collect();

        let mut caches = self.write_caches();
        if caches.generation == generation {
            caches
                .continent_drops
                .insert(continent, continent_drops.clone());
        }
        continent_drops
    }

    /// Discards every cached drop and reloads the global drop table.
    ///
    /// Must be called after the drop tables are edited at runtime.
    pub fn clear_drops(&self) {
        let global_drops = retrieve_global(self.source.as_ref());
        let global_count = global_drops.len();

        {
            let mut caches = self.write_caches();
            let generation = caches.generation.wrapping_add(1);
            *caches = DropCaches::new(generation, global_drops);
        }

        log::info!("Cleared drop caches, reloaded {} global drops", global_count);
    }
}

fn retrieve_global(source: &dyn DropSource) -> Arc<[GlobalDropEntry]> {
    match source.global_drops() {
        Ok(rows) => rows
            .into_iter()
            .filter(|row| row.chance > 0)
            .map(GlobalDropEntry::from)
            .collect(),
        Err(error) => {
            log::error!("Failed to retrieve global drops with error {:?}", error);
            Arc::from(Vec::new())
        }
    }
}
