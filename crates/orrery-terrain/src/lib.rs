//! Procedural surface synthesis for geodesic bodies: seeded noise fields,
//! island-masked radial displacement, elevation/moisture biome
//! classification, and cloud shell selection.

mod biome;
mod classify;
mod clouds;
mod displace;
mod noise_field;
mod seed;
mod setting;

pub use biome::{Biome, BiomeId, BiomeTable};
pub use classify::{BiomeClassifier, elevation_level, moisture_level, remap_moisture};
pub use clouds::{CloudFace, CloudLayerBuilder};
pub use displace::{Island, TerrainSynthesizer, island_influence};
pub use noise_field::{NoiseField, PerlinField};
pub use seed::{body_rng, derive_seed};
pub use setting::{Archetype, BodySetting, CloudSetting, Octaves, SettingError, SpanRange};
