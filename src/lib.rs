pub mod config;
pub mod drops;
pub mod mob_info;

pub use config::DropConfig;
pub use drops::{MonsterDropProvider, QuantityRng};
pub use mob_info::{
    BossLookup, MobAttackInfo, MobInfoCache, MobSkillId, MonsterLookup, MonsterLookupError,
    MonsterStats,
};
