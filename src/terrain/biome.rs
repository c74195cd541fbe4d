//! Biome classification collaborators
//!
//! Stronghold anchors are nudged toward land biomes. The real climate model is
//! out of scope, so this module defines the query contract ([`BiomeSource`])
//! and two stand-ins: a constant source for tests and replays, and a Perlin
//! temperature/moisture map for scans that want some variety.

use noise::{NoiseFn, Perlin};

use crate::core::types::Seed;

/// Numeric biome identifier, using the classic overworld numbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct BiomeId(pub u8);

impl BiomeId {
    pub const OCEAN: Self = Self(0);
    pub const PLAINS: Self = Self(1);
    pub const DESERT: Self = Self(2);
    pub const EXTREME_HILLS: Self = Self(3);
    pub const FOREST: Self = Self(4);
    pub const TAIGA: Self = Self(5);
    pub const SWAMPLAND: Self = Self(6);
    pub const RIVER: Self = Self(7);
    pub const FROZEN_OCEAN: Self = Self(10);
    pub const FROZEN_RIVER: Self = Self(11);
    pub const ICE_PLAINS: Self = Self(12);
    pub const ICE_MOUNTAINS: Self = Self(13);
    pub const MUSHROOM_ISLAND: Self = Self(14);
    pub const BEACH: Self = Self(16);
    pub const DESERT_HILLS: Self = Self(17);
    pub const FOREST_HILLS: Self = Self(18);
    pub const TAIGA_HILLS: Self = Self(19);
    pub const EXTREME_HILLS_EDGE: Self = Self(20);
    pub const JUNGLE: Self = Self(21);
    pub const JUNGLE_HILLS: Self = Self(22);
}

/// Biomes a stronghold anchor may be moved into
pub const STRONGHOLD_BIOMES: [BiomeId; 12] = [
    BiomeId::DESERT,
    BiomeId::FOREST,
    BiomeId::EXTREME_HILLS,
    BiomeId::SWAMPLAND,
    BiomeId::TAIGA,
    BiomeId::ICE_PLAINS,
    BiomeId::ICE_MOUNTAINS,
    BiomeId::DESERT_HILLS,
    BiomeId::FOREST_HILLS,
    BiomeId::EXTREME_HILLS_EDGE,
    BiomeId::JUNGLE,
    BiomeId::JUNGLE_HILLS,
];

/// Biome query at quarter resolution: `(x, z)` addresses the 4×4 block cell
/// whose minimum corner is `(x * 4, z * 4)`.
pub trait BiomeSource {
    fn biome_at(&self, x: i32, z: i32) -> BiomeId;
}

/// Same biome everywhere
#[derive(Clone, Copy, Debug)]
pub struct UniformBiomes(pub BiomeId);

impl BiomeSource for UniformBiomes {
    fn biome_at(&self, _x: i32, _z: i32) -> BiomeId {
        self.0
    }
}

/// Temperature/moisture biome map driven by two Perlin fields
pub struct NoiseBiomes {
    temperature_noise: Perlin,
    moisture_noise: Perlin,
    ocean_noise: Perlin,
    temp_scale: f64,
    moisture_scale: f64,
    ocean_scale: f64,
}

impl NoiseBiomes {
    /// Create new biome map for a world seed
    pub fn new(seed: Seed) -> Self {
        let folded = (seed ^ (seed >> 32)) as u32;
        Self {
            temperature_noise: Perlin::new(folded),
            moisture_noise: Perlin::new(folded.wrapping_add(1000)),
            ocean_noise: Perlin::new(folded.wrapping_add(2000)),
            temp_scale: 0.004,     // Large-scale temperature zones (quarter cells)
            moisture_scale: 0.006, // Medium-scale moisture patterns
            ocean_scale: 0.002,
        }
    }

    /// Temperature at a quarter cell (-1 to 1, cold to hot)
    pub fn temperature_at(&self, x: i32, z: i32) -> f64 {
        self.temperature_noise.get([x as f64 * self.temp_scale, z as f64 * self.temp_scale])
    }

    /// Moisture at a quarter cell (0 to 1, dry to wet)
    pub fn moisture_at(&self, x: i32, z: i32) -> f64 {
        let m = self.moisture_noise.get([x as f64 * self.moisture_scale, z as f64 * self.moisture_scale]);
        (m + 1.0) * 0.5
    }
}

impl BiomeSource for NoiseBiomes {
    fn biome_at(&self, x: i32, z: i32) -> BiomeId {
        let continent = self.ocean_noise.get([x as f64 * self.ocean_scale, z as f64 * self.ocean_scale]);
        let temp = self.temperature_at(x, z);

        if continent < -0.35 {
            return if temp < -0.4 { BiomeId::FROZEN_OCEAN } else { BiomeId::OCEAN };
        }

        let moisture = self.moisture_at(x, z);
        match (temp, moisture) {
            (t, m) if t < -0.3 => {
                if m > 0.5 { BiomeId::TAIGA } else { BiomeId::ICE_PLAINS }
            }
            (t, m) if t > 0.3 => {
                if m > 0.65 {
                    BiomeId::JUNGLE
                } else if m > 0.35 {
                    BiomeId::PLAINS
                } else {
                    BiomeId::DESERT
                }
            }
            (_, m) => {
                if m > 0.7 {
                    BiomeId::SWAMPLAND
                } else if m > 0.45 {
                    BiomeId::FOREST
                } else if continent > 0.4 {
                    BiomeId::EXTREME_HILLS
                } else {
                    BiomeId::PLAINS
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_source() {
        let source = UniformBiomes(BiomeId::FOREST);
        assert_eq!(source.biome_at(-100, 55), BiomeId::FOREST);
    }

    #[test]
    fn test_moisture_range() {
        let biomes = NoiseBiomes::new(12345);
        for x in [-1000, 0, 1000] {
            for z in [-1000, 0, 1000] {
                let m = biomes.moisture_at(x, z);
                assert!((0.0..=1.0).contains(&m), "moisture {} out of range", m);
            }
        }
    }

    #[test]
    fn test_noise_biome_variety() {
        let biomes = NoiseBiomes::new(12345);
        let mut found = std::collections::HashSet::new();
        for x in (0..40).map(|i| i * 97) {
            for z in (0..40).map(|i| i * 97) {
                found.insert(biomes.biome_at(x, z));
            }
        }
        assert!(found.len() >= 2, "Expected variety in biomes, found {:?}", found);
    }

    #[test]
    fn test_noise_biome_determinism() {
        let a = NoiseBiomes::new(-77);
        let b = NoiseBiomes::new(-77);
        assert_eq!(a.biome_at(123, -456), b.biome_at(123, -456));
    }

    #[test]
    fn test_stronghold_biomes_exclude_water() {
        assert!(!STRONGHOLD_BIOMES.contains(&BiomeId::OCEAN));
        assert!(!STRONGHOLD_BIOMES.contains(&BiomeId::RIVER));
        assert!(STRONGHOLD_BIOMES.contains(&BiomeId::FOREST));
    }
}
