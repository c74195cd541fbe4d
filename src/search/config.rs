//! Scanner configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::{Result, Seed};
use crate::terrain::biome::{BiomeId, BiomeSource, NoiseBiomes, UniformBiomes};
use crate::world::Block;

/// Which biome stand-in steers stronghold anchors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BiomeConfig {
    /// One biome everywhere; anchors land on their ring positions
    Uniform { biome: BiomeId },
    /// Seeded Perlin climate map
    Noise,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        BiomeConfig::Uniform { biome: BiomeId::FOREST }
    }
}

impl BiomeConfig {
    /// Biome source for one world seed
    pub fn source(&self, seed: Seed) -> Box<dyn BiomeSource + Send> {
        match *self {
            BiomeConfig::Uniform { biome } => Box::new(UniformBiomes(biome)),
            BiomeConfig::Noise => Box::new(NoiseBiomes::new(seed)),
        }
    }
}

/// Settings for seed evaluation and scanning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum eyes for a stronghold to be reported
    pub threshold: u32,
    /// Seeds handed to the worker pool at once; the stop flag is checked between batches
    pub batch_size: usize,
    /// Worker threads (0 lets rayon decide)
    pub jobs: usize,
    /// Stop after this many seeds even without a stop request
    pub limit: Option<u64>,
    pub biomes: BiomeConfig,
    /// Block id that unwritten terrain reads as during realization
    pub terrain_block: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: 10,
            batch_size: 256,
            jobs: 0,
            limit: None,
            biomes: BiomeConfig::default(),
            terrain_block: Block::STONE.id,
        }
    }
}

impl ScanConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Background block for realization stores
    pub fn terrain(&self) -> Block {
        Block::of(self.terrain_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.threshold, 10);
        assert_eq!(config.terrain(), Block::STONE);
        assert_eq!(config.biomes, BiomeConfig::Uniform { biome: BiomeId::FOREST });
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let config = ScanConfig {
            threshold: 12,
            jobs: 3,
            limit: Some(500),
            biomes: BiomeConfig::Noise,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ScanConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "threshold": 11, "biomes": { "kind": "uniform", "biome": 21 } }"#).unwrap();
        let config = ScanConfig::load(&path).unwrap();
        assert_eq!(config.threshold, 11);
        assert_eq!(config.batch_size, 256);
        assert_eq!(config.biomes, BiomeConfig::Uniform { biome: BiomeId::JUNGLE });
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ threshold: ").unwrap();
        assert!(matches!(ScanConfig::load(&path), Err(crate::core::Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(ScanConfig::load(dir.path().join("nope.json")), Err(crate::core::Error::Io(_))));
    }
}
