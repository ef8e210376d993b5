use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Number of map ids covered by one continent.
pub const REGION_SIZE: u32 = 100_000_000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MonsterId(u32);

id_wrapper_impl!(MonsterId, u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemId(u32);

id_wrapper_impl!(ItemId, u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MapId(u32);

id_wrapper_impl!(MapId, u32);

/// Continent a global drop applies to, negative values apply everywhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ContinentId(i8);

id_wrapper_impl!(ContinentId, i8);

/// Quest gating a drop, 0 when the drop is not quest gated.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct QuestId(u16);

id_wrapper_impl!(QuestId, u16);

#[derive(Copy, Clone, Debug, FromPrimitive, PartialEq, Eq)]
pub enum ItemInventoryType {
    Equip = 1,
    Use = 2,
    Setup = 3,
    Etc = 4,
    Cash = 5,
}

impl ItemId {
    pub fn inventory_type(self) -> Option<ItemInventoryType> {
        num_traits::FromPrimitive::from_u32(self.0 / 1_000_000)
    }
}

impl MapId {
    pub fn continent(self) -> ContinentId {
        ContinentId((self.0 / REGION_SIZE) as i8)
    }
}

impl ContinentId {
    pub fn is_wildcard(self) -> bool {
        self.0 < 0
    }

    /// Whether a global drop scoped to `self` applies within `continent`.
    pub fn applies_to(self, continent: ContinentId) -> bool {
        self.is_wildcard() || self == continent
    }
}

impl QuestId {
    pub fn is_quest_gated(self) -> bool {
        self.0 != 0
    }
}
