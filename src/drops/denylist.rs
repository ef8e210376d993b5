use std::collections::HashSet;

use lazy_static::lazy_static;

use loot_data::ItemId;

// Maple weapons and shields, handed out through events only.
const MAPLE_ITEMS: &[u32] = &[
    1302020, 1302030, 1302033, 1302035, 1302036, 1302058, 1302064, 1302066,
    1302067, 1302080, 1312032, 1312033, 1322054, 1322055, 1332025, 1332055,
    1332056, 1332057, 1372034, 1382009, 1382012, 1382039, 1382040, 1402039,
    1402040, 1412011, 1412027, 1412028, 1422014, 1422029, 1422032, 1432012,
    1432040, 1432041, 1432046, 1442024, 1442030, 1442051, 1442052, 1452016,
    1452022, 1452045, 1452046, 1462014, 1462019, 1462040, 1462041, 1472030,
    1472032, 1472055, 1472056, 1482020, 1482021, 1482022, 1492020, 1492021,
    1492022, 1092030,
];

const PRODUCTION_SIMULATORS: &[u32] = &[
    4130000, 4130001, 4130002, 4130003, 4130004, 4130005, 4130006, 4130007,
    4130008, 4130009, 4130010, 4130011, 4130012, 4130013, 4130014, 4130015,
    4130016, 4130017,
];

const DARK_SCROLLS: &[u32] = &[
    2040008, 2040009, 2040011, 2040012, 2040013, 2040014, 2040015, 2040103,
    2040104, 2040108, 2040109, 2040203, 2040204, 2040208, 2040209, 2040304,
    2040305, 2040306, 2040307, 2040308, 2040309, 2040404, 2040405, 2040406,
    2040407, 2040408, 2040409, 2040410, 2040411, 2040508, 2040509, 2040510,
    2040511, 2040518, 2040519, 2040520, 2040521, 2040604, 2040605, 2040606,
    2040607, 2040608, 2040609, 2040610, 2040611, 2040712, 2040713, 2040714,
    2040715, 2040716, 2040717, 2040808, 2040809, 2040810, 2040811, 2040812,
    2040813, 2040814, 2040815, 2040904, 2040905, 2040906, 2040907, 2040908,
    2040909, 2040916, 2040917, 2040921, 2040922, 2041026, 2041027, 2041028,
    2041029, 2041030, 2041031, 2041032, 2041033, 2041034, 2041035, 2041036,
    2041037, 2041038, 2041039, 2041040, 2041041, 2043004, 2043005, 2043006,
    2043007, 2043104, 2043105, 2043204, 2043205, 2043304, 2043305, 2043704,
    2043705, 2043804, 2043805, 2044004, 2044005, 2044104, 2044105, 2044204,
    2044205, 2044304, 2044305, 2044404, 2044405, 2044504, 2044505, 2044604,
    2044605, 2044704, 2044705,
];

const ANNIVERSARY_SCROLLS: &[u32] = &[
    2040315, 2040912, 2041059, 2041060, 2041061, 2041062, 2043013, 2043108,
    2043208, 2043308, 2043708, 2043808, 2044008, 2044108, 2044208, 2044308,
    2044408, 2044508, 2044608, 2044708, 2044810, 2044905,
];

lazy_static! {
    static ref DENIED_DROPS: HashSet<ItemId> = MAPLE_ITEMS
        .iter()
        .chain(PRODUCTION_SIMULATORS)
        .chain(DARK_SCROLLS)
        .chain(ANNIVERSARY_SCROLLS)
        .map(|&id| ItemId::new(id))
        .collect();
}

/// Items never dropped by monsters regardless of the drop table contents.
pub fn is_denied_drop(item_id: ItemId) -> bool {
    DENIED_DROPS.contains(&item_id)
}
