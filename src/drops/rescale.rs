use loot_data::{ItemCategory, ItemClassifier, ItemId};

const NEVER_DROPPED: &[ItemCategory] = &[
    ItemCategory::ChaosScroll,
    ItemCategory::CleanSlate,
    ItemCategory::Bullet,
    ItemCategory::MagicPowder,
    ItemCategory::MonsterCard,
];

const EQUIPMENT_LIKE: &[ItemCategory] = &[
    ItemCategory::Accessory,
    ItemCategory::Equipment,
    ItemCategory::Weapon,
    ItemCategory::Scroll,
];

const PROJECTILES: &[ItemCategory] = &[
    ItemCategory::Rechargeable,
    ItemCategory::ThrowingStar,
    ItemCategory::Arrow,
];

// Round half up, computed in single precision to match the tuned tables.
fn round_chance(chance: f32) -> u32 {
    (chance + 0.5).floor() as u32
}

/// Applies the server drop rate tuning to a raw drop table chance.
pub fn rescale_drop_chance(classifier: &dyn ItemClassifier, item_id: ItemId, chance: u32) -> u32 {
    if classifier.is_any_category(item_id, NEVER_DROPPED) {
        0
    } else if classifier.is_any_category(item_id, EQUIPMENT_LIKE) {
        round_chance(chance as f32 / 7.0)
    } else if classifier.is_any_category(item_id, PROJECTILES) {
        round_chance(chance as f32 / 10.0 * 4.0)
    } else {
        chance
    }
}
