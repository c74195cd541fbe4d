//! Terrain collaborators consulted by stronghold placement

pub mod biome;
pub use biome::{BiomeId, BiomeSource, NoiseBiomes, UniformBiomes, STRONGHOLD_BIOMES};
