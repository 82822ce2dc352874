//! Random source for hourly jitter.
//!
//! RULE: nothing in the model may call a platform RNG directly.
//! All jitter flows through a JitterRng, which is either seeded
//! (reproducible) or seeded from entropy. Either way the seed is
//! recorded so a run can be replayed.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

pub struct JitterRng {
    seed:  u64,
    inner: Pcg64Mcg,
}

impl JitterRng {
    /// Deterministic stream: same seed, same jitter.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Fresh seed from the thread RNG. Use `seed()` to log it.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Multiplicative jitter factor drawn uniformly from
    /// [1 - magnitude, 1 + magnitude).
    pub fn factor(&mut self, magnitude: f64) -> f64 {
        (1.0 - magnitude) + 2.0 * magnitude * self.next_f64()
    }
}

impl std::fmt::Debug for JitterRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JitterRng").field("seed", &self.seed).finish()
    }
}
