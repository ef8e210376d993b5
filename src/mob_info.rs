use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, RwLock},
};

use thiserror::Error;

use loot_data::MonsterId;

const MAX_ATTACK_POSITION: u8 = 7;

#[derive(Error, Debug)]
pub enum MonsterLookupError {
    #[error("Monster {0} not found")]
    NotFound(MonsterId),
    #[error("Failed to load monster {0}: {1}")]
    LoadFailed(MonsterId, String),
}

#[derive(Clone, Debug)]
pub struct MonsterStats {
    pub name: String,
    pub is_boss: bool,
}

/// Monster metadata, usually backed by the game data files.
pub trait MonsterLookup: Send + Sync {
    fn monster_stats(&self, monster_id: MonsterId) -> Result<MonsterStats, MonsterLookupError>;

    fn monster_names(&self) -> Vec<(MonsterId, String)>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MobSkillId {
    pub skill_id: u16,
    pub level: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MobAttackInfo {
    pub mp_cost: u32,
    pub cooldown: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BossLookup {
    Boss,
    NotBoss,
    NotFound,
}

impl BossLookup {
    pub fn is_boss(self) -> bool {
        matches!(self, BossLookup::Boss)
    }
}

struct MemoTable<K, V> {
    values: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V: Clone> MemoTable<K, V> {
    fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    fn get(&self, key: &K) -> Option<V> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn insert(&self, key: K, value: V) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, value);
    }
}

/// Combat timing and metadata caches for monsters.
pub struct MobInfoCache {
    lookup: Arc<dyn MonsterLookup>,
    attack_animation_time: MemoTable<(MonsterId, u8), u32>,
    skill_animation_time: MemoTable<MobSkillId, u32>,
    attack_info: MemoTable<(MonsterId, u8), MobAttackInfo>,
    boss: MemoTable<MonsterId, BossLookup>,
    names: MemoTable<MonsterId, String>,
}

impl MobInfoCache {
    pub fn new(lookup: Arc<dyn MonsterLookup>) -> Self {
        Self {
            lookup,
            attack_animation_time: MemoTable::new(),
            skill_animation_time: MemoTable::new(),
            attack_info: MemoTable::new(),
            boss: MemoTable::new(),
            names: MemoTable::new(),
        }
    }

    pub fn set_attack_animation_time(
        &self,
        monster_id: MonsterId,
        attack_position: u8,
        animation_time: u32,
    ) {
        self.attack_animation_time
            .insert((monster_id, attack_position), animation_time);
    }

    /// Animation time in milliseconds, 0 when unknown.
    pub fn get_attack_animation_time(&self, monster_id: MonsterId, attack_position: u8) -> u32 {
        self.attack_animation_time
            .get(&(monster_id, attack_position))
            .unwrap_or(0)
    }

    pub fn set_skill_animation_time(&self, skill: MobSkillId, animation_time: u32) {
        self.skill_animation_time.insert(skill, animation_time);
    }

    pub fn get_skill_animation_time(&self, skill: MobSkillId) -> u32 {
        self.skill_animation_time.get(&skill).unwrap_or(0)
    }

    pub fn set_attack_info(
        &self,
        monster_id: MonsterId,
        attack_position: u8,
        info: MobAttackInfo,
    ) {
        self.attack_info.insert((monster_id, attack_position), info);
    }

    pub fn get_attack_info(
        &self,
        monster_id: MonsterId,
        attack_position: u8,
    ) -> Option<MobAttackInfo> {
        if attack_position > MAX_ATTACK_POSITION {
            return None;
        }
        self.attack_info.get(&(monster_id, attack_position))
    }

    pub fn boss_lookup(&self, monster_id: MonsterId) -> BossLookup {
        if let Some(boss) = self.boss.get(&monster_id) {
            return boss;
        }

        let boss = match self.lookup.monster_stats(monster_id) {
            Ok(stats) if stats.is_boss => BossLookup::Boss,
            Ok(_) => BossLookup::NotBoss,
            Err(MonsterLookupError::NotFound(_)) => BossLookup::NotFound,
            Err(error) => {
                log::warn!("Failed to look up monster {}: {}", monster_id, error);
                BossLookup::NotBoss
            }
        };
        self.boss.insert(monster_id, boss);
        boss
    }

    pub fn is_boss(&self, monster_id: MonsterId) -> bool {
        self.boss_lookup(monster_id).is_boss()
    }

    /// Display name of the monster, empty when unknown.
    pub fn get_name(&self, monster_id: MonsterId) -> String {
        if let Some(name) = self.names.get(&monster_id) {
            return name;
        }

        let name = self
            .lookup
            .monster_stats(monster_id)
            .map(|stats| stats.name)
            .unwrap_or_default();
        self.names.insert(monster_id, name.clone());
        name
    }

    /// Monsters whose name contains `search`, ignoring case.
    pub fn search_by_name(&self, search: &str) -> Vec<(MonsterId, String)> {
        let search = search.to_lowercase();
        self.lookup
            .monster_names()
            .into_iter()
            .filter(|(_, name)| name.to_lowercase().contains(&search))
            .collect()
    }
}
