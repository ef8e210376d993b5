use serde::{Deserialize, Serialize};

use crate::{ContinentId, ItemId, QuestId};

/// One possible loot outcome of a monster.
///
/// `chance` is a relative weight, once loaded through the drop provider it is
/// always the category adjusted value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DropEntry {
    pub item_id: ItemId,
    pub chance: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub quest_id: QuestId,
}

impl DropEntry {
    pub fn new(
        item_id: ItemId,
        chance: u32,
        min_quantity: u32,
        max_quantity: u32,
        quest_id: QuestId,
    ) -> Self {
        Self {
            item_id,
            chance,
            min_quantity,
            max_quantity,
            quest_id,
        }
    }

    pub fn with_chance(&self, chance: u32) -> Self {
        Self { chance, ..*self }
    }
}

/// A drop shared by every monster of a continent, or all continents when the
/// continent is a wildcard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalDropEntry {
    pub item_id: ItemId,
    pub chance: u32,
    pub continent: ContinentId,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub quest_id: QuestId,
}
