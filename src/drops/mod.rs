mod denylist;
mod drop_pool;
mod multi_equip;
mod provider;
mod quantity_rng;
mod rescale;

pub use denylist::is_denied_drop;
pub use drop_pool::compile_drop_pool;
pub use multi_equip::{find_multi_equip_drops, roll_extra_equip_drops};
pub use provider::MonsterDropProvider;
pub use quantity_rng::QuantityRng;
pub use rescale::rescale_drop_chance;
