//! Seed derivation for the per-body random stream.
//!
//! A textual run seed is hashed to a `u64`, then combined with the body's
//! name so that two bodies sharing an archetype still get distinct terrain.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Hash a textual seed (e.g. `"planet sim 2017"`) to a `u64`.
pub fn derive_seed(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// The random stream for one body.
///
/// Consumers must draw from it in a fixed order; see
/// [`crate::TerrainSynthesizer::displace`] for the terrain portion.
pub fn body_rng(world_seed: u64, body_name: &str) -> ChaCha8Rng {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    body_name.hash(&mut hasher);
    ChaCha8Rng::seed_from_u64(hasher.finish())
}
