macro_rules! id_wrapper_impl {
    ($name:ident, $value_type:ty) => {
        impl $name {
            #[allow(dead_code)]
            pub const fn new(value: $value_type) -> Self {
                Self(value)
            }

            #[allow(dead_code)]
            pub const fn get(&self) -> $value_type {
                self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$value_type as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name(s.parse::<$value_type>()?))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

mod drop_entry;
mod ids;
mod item_category;

pub use drop_entry::{DropEntry, GlobalDropEntry};
pub use ids::{ContinentId, ItemId, ItemInventoryType, MapId, MonsterId, QuestId, REGION_SIZE};
pub use item_category::{ItemCategory, ItemClassifier, ItemIdClassifier};
