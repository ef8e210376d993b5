use std::collections::HashSet;

use crate::{ItemId, ItemInventoryType};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    ChaosScroll,
    CleanSlate,
    Bullet,
    MagicPowder,
    MonsterCard,
    Accessory,
    Equipment,
    Weapon,
    Scroll,
    Rechargeable,
    ThrowingStar,
    Arrow,
    QuestItem,
    PartyQuestItem,
}

pub trait ItemClassifier {
    fn is_category(&self, item_id: ItemId, category: ItemCategory) -> bool;

    fn is_any_category(&self, item_id: ItemId, categories: &[ItemCategory]) -> bool {
        categories
            .iter()
            .any(|category| self.is_category(item_id, *category))
    }

    fn is_equipment(&self, item_id: ItemId) -> bool {
        self.is_category(item_id, ItemCategory::Equipment)
    }

    /// Quest and party quest items are handed out by quest logic, not by
    /// weighted selection.
    fn is_quest_gated(&self, item_id: ItemId) -> bool {
        self.is_any_category(
            item_id,
            &[ItemCategory::QuestItem, ItemCategory::PartyQuestItem],
        )
    }
}

/// Classifies items by their id numbering, quest items are supplied
/// explicitly as they are not derivable from the id.
#[derive(Default)]
pub struct ItemIdClassifier {
    quest_items: HashSet<ItemId>,
    party_quest_items: HashSet<ItemId>,
}

impl ItemIdClassifier {
    pub fn new(
        quest_items: impl IntoIterator<Item = ItemId>,
        party_quest_items: impl IntoIterator<Item = ItemId>,
    ) -> Self {
        Self {
            quest_items: quest_items.into_iter().collect(),
            party_quest_items: party_quest_items.into_iter().collect(),
        }
    }
}

fn is_throwing_star(id: u32) -> bool {
    id / 10_000 == 207
}

fn is_bullet(id: u32) -> bool {
    id / 10_000 == 233
}

impl ItemClassifier for ItemIdClassifier {
    fn is_category(&self, item_id: ItemId, category: ItemCategory) -> bool {
        let id = item_id.get();
        match category {
            ItemCategory::ChaosScroll => (2_049_100..2_049_200).contains(&id),
            ItemCategory::CleanSlate => id / 100 == 20_490,
            ItemCategory::Bullet => is_bullet(id),
            ItemCategory::MagicPowder => id / 1_000 == 4_006,
            ItemCategory::MonsterCard => id / 10_000 == 238,
            ItemCategory::Accessory => {
                (1_010_000..1_040_000).contains(&id)
                    || (1_102_000..1_103_000).contains(&id)
                    || (1_110_000..1_140_000).contains(&id)
            }
            ItemCategory::Equipment => {
                matches!(item_id.inventory_type(), Some(ItemInventoryType::Equip))
            }
            ItemCategory::Weapon => (1_300_000..1_800_000).contains(&id),
            ItemCategory::Scroll => id / 10_000 == 204,
            ItemCategory::Rechargeable => is_throwing_star(id) || is_bullet(id),
            ItemCategory::ThrowingStar => is_throwing_star(id),
            ItemCategory::Arrow => matches!(id / 1_000, 2_060 | 2_061),
            ItemCategory::QuestItem => self.quest_items.contains(&item_id),
            ItemCategory::PartyQuestItem => self.party_quest_items.contains(&item_id),
        }
    }
}
