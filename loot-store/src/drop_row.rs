use serde::{Deserialize, Serialize};

use loot_data::{ContinentId, DropEntry, GlobalDropEntry, ItemId, MonsterId, QuestId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DropRow {
    pub dropper_id: MonsterId,
    pub item_id: ItemId,
    pub chance: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
    #[serde(default)]
    pub quest_id: QuestId,
}

impl DropRow {
    pub fn new(
        dropper_id: MonsterId,
        item_id: ItemId,
        chance: u32,
        min_quantity: u32,
        max_quantity: u32,
    ) -> Self {
        Self {
            dropper_id,
            item_id,
            chance,
            min_quantity,
            max_quantity,
            quest_id: QuestId::default(),
        }
    }

    pub fn with_quest(self, quest_id: QuestId) -> Self {
        Self { quest_id, ..self }
    }

    /// The row as a drop entry, with the chance as stored.
    pub fn to_entry(&self) -> DropEntry {
        DropEntry::new(
            self.item_id,
            self.chance,
            self.min_quantity,
            self.max_quantity,
            self.quest_id,
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalDropRow {
    pub item_id: ItemId,
    pub chance: u32,
    pub continent: ContinentId,
    pub min_quantity: u32,
    pub max_quantity: u32,
    #[serde(default)]
    pub quest_id: QuestId,
}

impl From<GlobalDropRow> for GlobalDropEntry {
    fn from(row: GlobalDropRow) -> Self {
        GlobalDropEntry {
            item_id: row.item_id,
            chance: row.chance,
            continent: row.continent,
            min_quantity: row.min_quantity,
            max_quantity: row.max_quantity,
            quest_id: row.quest_id,
        }
    }
}
