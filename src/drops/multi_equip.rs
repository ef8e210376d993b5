use loot_data::{DropEntry, ItemClassifier};

use super::QuantityRng;

/// Equipment drops that may be dropped more than once per kill.
pub fn find_multi_equip_drops(
    drops: &[DropEntry],
    classifier: &dyn ItemClassifier,
) -> Vec<DropEntry> {
    drops
        .iter()
        .filter(|drop| classifier.is_equipment(drop.item_id) && drop.max_quantity > 1)
        .copied()
        .collect()
}

/// Rolls a quantity for each multi-equip drop and returns one extra copy of
/// the drop for every unit above the first.
pub fn roll_extra_equip_drops(multi_drops: &[DropEntry], rng: &QuantityRng) -> Vec<DropEntry> {
    let mut extra = Vec::new();
    for drop in multi_drops {
        let quantity = rng.roll(drop.min_quantity, drop.max_quantity);
        extra.extend(std::iter::repeat(*drop).take(quantity.saturating_sub(1) as usize));
    }
    extra
}
