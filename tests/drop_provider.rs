use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    thread,
};

use loot_data::{
    ContinentId, DropEntry, ItemCategory, ItemClassifier, ItemId, MapId, MonsterId, QuestId,
};
use loot_server::{DropConfig, MonsterDropProvider, QuantityRng};
use loot_store::{DropRow, GlobalDropRow, MemoryDropStore};

const WEAPON: u32 = 2000001;
const QUEST_ITEM: u32 = 4000001;
const PARTY_QUEST_ITEM: u32 = 4001007;
const ETC_ITEM: u32 = 4000019;
const EQUIP: u32 = 1040002;
const STAR: u32 = 2070000;
const CHAOS_SCROLL: u32 = 2049100;

struct TestClassifier {
    categories: HashMap<ItemId, Vec<ItemCategory>>,
}

impl TestClassifier {
    fn new() -> Self {
        let categories = [
            (WEAPON, vec![ItemCategory::Weapon]),
            (QUEST_ITEM, vec![ItemCategory::QuestItem]),
            (PARTY_QUEST_ITEM, vec![ItemCategory::PartyQuestItem]),
            (EQUIP, vec![ItemCategory::Equipment]),
            (
                STAR,
                vec![ItemCategory::ThrowingStar, ItemCategory::Rechargeable],
            ),
            (CHAOS_SCROLL, vec![ItemCategory::ChaosScroll, ItemCategory::Scroll]),
        ]
        .into_iter()
        .map(|(id, categories)| (ItemId::new(id), categories))
        .collect();
        Self { categories }
    }
}

impl ItemClassifier for TestClassifier {
    fn is_category(&self, item_id: ItemId, category: ItemCategory) -> bool {
        self.categories
            .get(&item_id)
            .map_or(false, |categories| categories.contains(&category))
    }
}

fn row(monster_id: u32, item_id: u32, chance: u32, min: u32, max: u32) -> DropRow {
    DropRow::new(MonsterId::new(monster_id), ItemId::new(item_id), chance, min, max)
}

fn global_row(item_id: u32, chance: u32, continent: i8) -> GlobalDropRow {
    GlobalDropRow {
        item_id: ItemId::new(item_id),
        chance,
        continent: ContinentId::new(continent),
        min_quantity: 1,
        max_quantity: 1,
        quest_id: QuestId::default(),
    }
}

fn provider(config: DropConfig, store: &Arc<MemoryDropStore>) -> MonsterDropProvider {
    MonsterDropProvider::new(config, store.clone(), Box::new(TestClassifier::new()))
}

fn return_cached() -> DropConfig {
    DropConfig {
        reload_drops_on_cache_hit: false,
        ..Default::default()
    }
}

fn multi_equip() -> DropConfig {
    DropConfig {
        use_multiple_same_equip_drop: true,
        rng_seed: Some(1),
        ..Default::default()
    }
}

fn chances(drops: &[DropEntry]) -> Vec<(u32, u32)> {
    drops
        .iter()
        .map(|drop| (drop.item_id.get(), drop.chance))
        .collect()
}

#[test]
fn weapon_rescaled_and_quest_item_excluded_from_pool() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, WEAPON, 700, 1, 1), row(100, QUEST_ITEM, 500, 1, 1)],
        [],
    ));
    let provider = provider(DropConfig::default(), &store);

    let drops = provider.retrieve_drop(MonsterId::new(100));
    assert_eq!(chances(&drops), vec![(WEAPON, 100), (QUEST_ITEM, 500)]);
    assert_eq!(&*provider.retrieve_drop_pool(MonsterId::new(100)), &[100, 100]);
}

#[test]
fn pool_is_aligned_with_drop_list() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [
            row(100, ETC_ITEM, 600000, 1, 1),
            row(100, QUEST_ITEM, 5000, 1, 1),
            row(100, EQUIP, 7000, 1, 1),
            row(100, CHAOS_SCROLL, 300, 1, 1),
            row(100, PARTY_QUEST_ITEM, 9000, 1, 1),
            row(100, STAR, 1000, 1, 1),
        ],
        [],
    ));
    let provider = provider(DropConfig::default(), &store);
    let classifier = TestClassifier::new();

    let drops = provider.retrieve_drop(MonsterId::new(100));
    let pool = provider.retrieve_drop_pool(MonsterId::new(100));
    assert_eq!(pool.len(), drops.len());
    assert!(pool.windows(2).all(|pair| pair[0] <= pair[1]));

    let weighted: u64 = drops
        .iter()
        .filter(|drop| !classifier.is_quest_gated(drop.item_id))
        .map(|drop| drop.chance as u64)
        .sum();
    assert_eq!(pool.last().copied(), Some(weighted));
    assert_eq!(weighted, 600000 + 1000 + 400);
}

#[test]
fn only_quest_drops_give_empty_pool() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [
            row(100, QUEST_ITEM, 500, 1, 1),
            row(100, PARTY_QUEST_ITEM, 500, 1, 1),
            row(100, CHAOS_SCROLL, 500, 1, 1),
        ],
        [],
    ));
    let provider = provider(DropConfig::default(), &store);

    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 3);
    assert!(provider.retrieve_drop_pool(MonsterId::new(100)).is_empty());
    assert!(provider.retrieve_drop_pool(MonsterId::new(200)).is_empty());
}

#[test]
fn denied_items_never_returned() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [
            row(100, 1302020, 1000, 1, 1),
            row(100, ETC_ITEM, 1000, 1, 1),
            row(100, 4130000, 1000, 1, 1),
            row(100, 2040008, 1000, 1, 1),
            row(100, 2040315, 1000, 1, 1),
        ],
        [],
    ));
    let provider = provider(DropConfig::default(), &store);

    let drops = provider.retrieve_drop(MonsterId::new(100));
    assert_eq!(chances(&drops), vec![(ETC_ITEM, 1000)]);
}

#[test]
fn rescaled_chance_stable_between_calls() {
    for config in [DropConfig::default(), return_cached()] {
        let store = Arc::new(MemoryDropStore::with_rows(
            [row(100, WEAPON, 700, 1, 1), row(100, STAR, 1000, 1, 1)],
            [],
        ));
        let provider = provider(config, &store);

        let first = provider.retrieve_drop(MonsterId::new(100));
        for _ in 0..5 {
            assert_eq!(provider.retrieve_drop(MonsterId::new(100)), first);
        }
        assert_eq!(chances(&first), vec![(WEAPON, 100), (STAR, 400)]);
    }
}

#[test]
fn cache_hit_reloads_drop_list_by_default() {
    let store = Arc::new(MemoryDropStore::with_rows([row(100, ETC_ITEM, 10, 1, 1)], []));
    let provider = provider(DropConfig::default(), &store);

    provider.retrieve_drop(MonsterId::new(100));
    provider.retrieve_drop(MonsterId::new(100));
    assert_eq!(store.monster_query_count(), 2);

    store.add_monster_drop(row(100, QUEST_ITEM, 20, 1, 1));
    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 2);
}

#[test]
fn cache_hit_returns_cached_list_when_configured() {
    let store = Arc::new(MemoryDropStore::with_rows([row(100, ETC_ITEM, 10, 1, 1)], []));
    let provider = provider(return_cached(), &store);

    provider.retrieve_drop(MonsterId::new(100));
    provider.retrieve_drop(MonsterId::new(100));
    assert_eq!(store.monster_query_count(), 1);

    store.add_monster_drop(row(100, QUEST_ITEM, 20, 1, 1));
    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 1);

    provider.clear_drops();
    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 2);
}

#[test]
fn pool_cached_until_clear() {
    let store = Arc::new(MemoryDropStore::with_rows([row(100, ETC_ITEM, 10, 1, 1)], []));
    let provider = provider(DropConfig::default(), &store);

    assert_eq!(&*provider.retrieve_drop_pool(MonsterId::new(100)), &[10]);
    store.add_monster_drop(row(100, ETC_ITEM, 15, 1, 1));
    assert_eq!(&*provider.retrieve_drop_pool(MonsterId::new(100)), &[10]);

    provider.clear_drops();
    assert_eq!(&*provider.retrieve_drop_pool(MonsterId::new(100)), &[10, 25]);
}

#[test]
fn global_drops_scoped_by_continent() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [],
        [
            global_row(4001126, 8000, -1),
            global_row(4031203, 500, 1),
            global_row(4031204, 500, 2),
            global_row(4031205, 0, 1),
        ],
    ));
    let provider = provider(DropConfig::default(), &store);

    let victoria = provider.get_relevant_global_drops(MapId::new(100000000));
    let henesys_hunting = provider.get_relevant_global_drops(MapId::new(104040000));
    assert_eq!(victoria, henesys_hunting);
    let items: HashSet<u32> = victoria.iter().map(|drop| drop.item_id.get()).collect();
    assert_eq!(items, HashSet::from([4001126, 4031203]));

    let ossyria = provider.get_relevant_global_drops(MapId::new(211000000));
    let items: Vec<u32> = ossyria.iter().map(|drop| drop.item_id.get()).collect();
    assert_eq!(items, vec![4001126, 4031204]);

    for map_id in [0, 300000000, 540000000, 990000000] {
        assert!(provider
            .get_relevant_global_drops(MapId::new(map_id))
            .iter()
            .any(|drop| drop.item_id == ItemId::new(4001126)));
    }
}

#[test]
fn global_drops_reloaded_only_after_clear() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [],
        [global_row(4001126, 8000, -1)],
    ));
    let provider = provider(DropConfig::default(), &store);
    assert_eq!(provider.get_relevant_global_drops(MapId::new(100000000)).len(), 1);

    store.set_global_drops(vec![
        global_row(4001126, 8000, -1),
        global_row(4031203, 500, 1),
    ]);
    assert_eq!(provider.get_relevant_global_drops(MapId::new(100000000)).len(), 1);
    assert_eq!(provider.get_relevant_global_drops(MapId::new(101000000)).len(), 1);

    provider.clear_drops();
    assert_eq!(provider.get_relevant_global_drops(MapId::new(100000000)).len(), 2);
    assert_eq!(provider.get_relevant_global_drops(MapId::new(211000000)).len(), 1);
    assert_eq!(store.global_query_count(), 2);
}

#[test]
fn multi_equip_disabled_returns_drop_list() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, EQUIP, 700, 1, 5), row(100, ETC_ITEM, 1000, 1, 3)],
        [],
    ));
    let provider = provider(DropConfig::default(), &store);

    let drops = provider.retrieve_drop(MonsterId::new(100));
    for _ in 0..10 {
        assert_eq!(provider.retrieve_effective_drop(MonsterId::new(100)), drops.to_vec());
    }
}

#[test]
fn multi_equip_copies_rerolled_each_call() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, ETC_ITEM, 1000, 1, 3), row(100, EQUIP, 700, 1, 5)],
        [],
    ));
    let provider = provider(multi_equip(), &store);

    let mut counts = HashSet::new();
    for _ in 0..100 {
        let drops = provider.retrieve_effective_drop(MonsterId::new(100));
        assert_eq!(drops[0].item_id, ItemId::new(ETC_ITEM));
        assert_eq!(drops[1].item_id, ItemId::new(EQUIP));

        let equips: Vec<&DropEntry> = drops
            .iter()
            .filter(|drop| drop.item_id == ItemId::new(EQUIP))
            .collect();
        assert!((1..=5).contains(&equips.len()));
        assert!(equips.iter().all(|drop| drop.chance == 100));
        assert!(drops[2..].iter().all(|drop| drop.item_id == ItemId::new(EQUIP)));
        counts.insert(equips.len());
    }
    assert!(counts.len() > 1);

    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 2);
}

#[test]
fn monster_without_multi_equip_returns_drop_list() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, EQUIP, 700, 1, 1), row(100, ETC_ITEM, 1000, 1, 5)],
        [],
    ));
    let provider = provider(multi_equip(), &store);

    let drops = provider.retrieve_drop(MonsterId::new(100));
    for _ in 0..10 {
        assert_eq!(provider.retrieve_effective_drop(MonsterId::new(100)), drops.to_vec());
    }
}

#[test]
fn seeded_rolls_are_reproducible() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, EQUIP, 700, 1, 5), row(100, WEAPON, 700, 2, 4)],
        [],
    ));
    let a = provider(multi_equip(), &store).with_quantity_rng(QuantityRng::from_seed(99));
    let b = provider(multi_equip(), &store).with_quantity_rng(QuantityRng::from_seed(99));

    for _ in 0..20 {
        assert_eq!(
            a.retrieve_effective_drop(MonsterId::new(100)),
            b.retrieve_effective_drop(MonsterId::new(100))
        );
    }
}

#[test]
fn unavailable_source_degrades_to_empty() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, ETC_ITEM, 1000, 1, 1)],
        [global_row(4001126, 8000, -1)],
    ));
    store.set_unavailable(true);
    let provider = provider(return_cached(), &store);

    assert!(provider.retrieve_drop(MonsterId::new(100)).is_empty());
    assert!(provider.retrieve_effective_drop(MonsterId::new(100)).is_empty());
    assert!(provider
        .get_relevant_global_drops(MapId::new(100000000))
        .is_empty());

    store.set_unavailable(false);
    assert_eq!(provider.retrieve_drop(MonsterId::new(100)).len(), 1);

    provider.clear_drops();
    assert_eq!(provider.get_relevant_global_drops(MapId::new(100000000)).len(), 1);
}

#[test]
fn failed_query_does_not_cache_derived_drops() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, ETC_ITEM, 1000, 1, 1), row(100, EQUIP, 700, 3, 3)],
        [],
    ));
    store.set_unavailable(true);
    let config = DropConfig {
        reload_drops_on_cache_hit: false,
        ..multi_equip()
    };
    let provider = provider(config, &store);

    assert!(provider.retrieve_drop_pool(MonsterId::new(100)).is_empty());
    assert!(provider.retrieve_effective_drop(MonsterId::new(100)).is_empty());

    store.set_unavailable(false);
    let drops = provider.retrieve_drop(MonsterId::new(100));
    assert_eq!(drops.len(), 2);
    assert_eq!(&*provider.retrieve_drop_pool(MonsterId::new(100)), &[1000, 1100]);

    let effective = provider.retrieve_effective_drop(MonsterId::new(100));
    assert_eq!(effective.len(), 4);
    assert!(effective[2..]
        .iter()
        .all(|drop| drop.item_id == ItemId::new(EQUIP)));
}

#[test]
fn clear_drops_resets_missing_multi_equip() {
    let store = Arc::new(MemoryDropStore::with_rows([row(100, EQUIP, 700, 1, 1)], []));
    let provider = provider(multi_equip(), &store);
    assert_eq!(provider.retrieve_effective_drop(MonsterId::new(100)).len(), 1);

    store.set_monster_drops(MonsterId::new(100), vec![row(100, EQUIP, 700, 3, 3)]);
    let drops = provider.retrieve_effective_drop(MonsterId::new(100));
    assert_eq!(drops.len(), 1);
    assert_eq!(drops[0].max_quantity, 3);

    provider.clear_drops();
    let drops = provider.retrieve_effective_drop(MonsterId::new(100));
    assert_eq!(drops.len(), 3);
    assert!(drops.iter().all(|drop| drop.item_id == ItemId::new(EQUIP)));
}

#[test]
fn clear_drops_resets_cached_multi_equip() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [row(100, ETC_ITEM, 1000, 1, 1), row(100, EQUIP, 700, 3, 3)],
        [],
    ));
    let provider = provider(multi_equip(), &store);
    assert_eq!(provider.retrieve_effective_drop(MonsterId::new(100)).len(), 4);

    assert_eq!(
        store.remove_monster_drop(MonsterId::new(100), ItemId::new(EQUIP)),
        1
    );
    let drops = provider.retrieve_effective_drop(MonsterId::new(100));
    assert_eq!(drops[0].item_id, ItemId::new(ETC_ITEM));
    assert_eq!(drops.len(), 3);

    provider.clear_drops();
    let drops = provider.retrieve_effective_drop(MonsterId::new(100));
    assert_eq!(chances(&drops), vec![(ETC_ITEM, 1000)]);
}

#[test]
fn failed_reload_leaves_empty_global_list() {
    let store = Arc::new(MemoryDropStore::with_rows(
        [],
        [global_row(4001126, 8000, -1)],
    ));
    let provider = provider(DropConfig::default(), &store);
    assert_eq!(provider.get_relevant_global_drops(MapId::new(0)).len(), 1);

    store.set_unavailable(true);
    provider.clear_drops();
    assert!(provider.get_relevant_global_drops(MapId::new(0)).is_empty());
}

#[test]
fn concurrent_reads_and_clears() {
    let store = Arc::new(MemoryDropStore::with_rows(
        (0..20).flat_map(|monster| {
            [
                row(monster, ETC_ITEM, 1000, 1, 1),
                row(monster, QUEST_ITEM, 500, 1, 1),
                row(monster, EQUIP, 700, 1, 3),
            ]
        }),
        [global_row(4001126, 8000, -1), global_row(4031203, 500, 1)],
    ));
    let provider = Arc::new(provider(multi_equip(), &store));

    let handles: Vec<_> = (0..8)
        .map(|thread_index| {
            let provider = provider.clone();
            thread::spawn(move || {
                for i in 0..200u32 {
                    let monster_id = MonsterId::new((i + thread_index) % 20);
                    if thread_index == 0 && i % 50 == 0 {
                        provider.clear_drops();
                    }

                    let pool = provider.retrieve_drop_pool(monster_id);
                    assert_eq!(&*pool, &[1000, 1000, 1100]);

                    let drops = provider.retrieve_effective_drop(monster_id);
                    assert!((3..=5).contains(&drops.len()));

                    let global = provider.get_relevant_global_drops(MapId::new(100000000));
                    assert_eq!(global.len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
