use loot_data::{DropEntry, ItemClassifier};

/// Builds the cumulative chance pool for `drops`.
///
/// The pool has one element per drop so a picked index maps straight back to
/// the drop list, quest gated items add nothing to the running total. A drop
/// list with no weighted entries produces an empty pool.
pub fn compile_drop_pool(drops: &[DropEntry], classifier: &dyn ItemClassifier) -> Vec<u64> {
    let mut total = 0u64;
    let pool: Vec<u64> = drops
        .iter()
        .map(|drop| {
            if !classifier.is_quest_gated(drop.item_id) {
                total += drop.chance as u64;
            }
            total
        })
        .collect();

    if total == 0 {
        Vec::new()
    } else {
        pool
    }
}
