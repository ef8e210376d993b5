use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform quantity generator shared between every caller of the drop
/// provider.
pub struct QuantityRng {
    rng: Mutex<StdRng>,
}

impl QuantityRng {
    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Draws uniformly from `min..=max`, the bounds may be given in either
    /// order.
    pub fn roll(&self, min: u32, max: u32) -> u32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(low..=high)
    }
}
