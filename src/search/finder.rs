//! Per-seed stronghold queries with a layout cache

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::core::types::{ChunkPos, IVec3, Seed};
use crate::search::config::{BiomeConfig, ScanConfig};
use crate::search::placement::{self, STRONGHOLD_COUNT};
use crate::structure::layout::{self, Structure};
use crate::structure::piece::PieceKind;
use crate::structure::realize::{self, EyeCounter, RealizeState};
use crate::world::{Block, SparseBlockStore};

/// What one stronghold looks like once realized
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StrongholdReport {
    pub chunk: ChunkPos,
    /// Centre of the portal's eye ring
    pub portal: IVec3,
    pub frames: u32,
    pub eyes: u32,
    pub pieces: usize,
    /// Layout builds it took to get a portal room
    pub attempts: u32,
    pub chests: BTreeMap<PieceKind, Vec<IVec3>>,
}

impl fmt::Display for StrongholdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.portal;
        write!(
            f,
            "chunk {} portal ({}, {}, {}) eyes {}/{} pieces {}",
            self.chunk, p.x, p.y, p.z, self.eyes, self.frames, self.pieces
        )?;
        for (kind, positions) in &self.chests {
            write!(f, "\n    {kind} chests:")?;
            for pos in positions {
                write!(f, " ({}, {}, {})", pos.x, pos.y, pos.z)?;
            }
        }
        Ok(())
    }
}

/// All strongholds of one seed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedReport {
    pub seed: Seed,
    pub strongholds: Vec<StrongholdReport>,
}

impl SeedReport {
    pub fn best_eyes(&self) -> u32 {
        self.strongholds.iter().map(|s| s.eyes).max().unwrap_or(0)
    }

    /// Keep only strongholds with at least `threshold` eyes
    pub fn filtered(mut self, threshold: u32) -> Self {
        self.strongholds.retain(|s| s.eyes >= threshold);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.strongholds.is_empty()
    }
}

/// Locates, builds and realizes strongholds.
///
/// Layouts are cached per (seed, anchor chunk). Queries realize into a fresh
/// store every time, so asking twice gives the same answer and never changes
/// what is cached.
pub struct StrongholdFinder {
    biomes: BiomeConfig,
    terrain: Block,
    cache: HashMap<(Seed, ChunkPos), Arc<Structure>>,
}

impl StrongholdFinder {
    pub fn new(biomes: BiomeConfig, terrain: Block) -> Self {
        Self {
            biomes,
            terrain,
            cache: HashMap::new(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.biomes, config.terrain())
    }

    /// Anchor chunks of every stronghold in the world
    pub fn anchors(&self, seed: Seed) -> [ChunkPos; STRONGHOLD_COUNT] {
        let source = self.biomes.source(seed);
        placement::stronghold_anchors(seed, source.as_ref())
    }

    /// Layout anchored at `chunk`, built on first use
    pub fn structure(&mut self, seed: Seed, chunk: ChunkPos) -> Arc<Structure> {
        self.cache
            .entry((seed, chunk))
            .or_insert_with(|| {
                let mut rng = placement::structure_rng(seed, chunk);
                Arc::new(layout::generate(&mut rng, chunk))
            })
            .clone()
    }

    /// Number of cached layouts
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Realize the portal room of the stronghold at `chunk` and count its eyes.
    ///
    /// Runs the population pass of every chunk whose window overlaps the room.
    pub fn portal_eyes(&mut self, seed: Seed, chunk: ChunkPos) -> EyeCounter {
        let structure = self.structure(seed, chunk);
        let mut store = SparseBlockStore::new(self.terrain);
        let mut counter = EyeCounter::default();
        let mut state = RealizeState::new();

        for (cx, cz) in realize::chunks_covering(&structure.portal_room().bounds) {
            let mut rng = placement::population_rng(seed, cx, cz);
            let window = realize::population_window(cx, cz);
            realize::populate(&structure, &window, &mut rng, &mut store, &mut counter, &mut state);
        }
        counter
    }

    /// Full report for the stronghold at `chunk`
    pub fn inspect(&mut self, seed: Seed, chunk: ChunkPos) -> StrongholdReport {
        let counter = self.portal_eyes(seed, chunk);
        let structure = self.structure(seed, chunk);
        StrongholdReport {
            chunk,
            portal: realize::portal_center(structure.portal_room()),
            frames: counter.frames,
            eyes: counter.eyes,
            pieces: structure.pieces().len(),
            attempts: structure.attempts(),
            chests: realize::chest_positions(&structure),
        }
    }

    /// Reports for every stronghold of `seed`, in anchor order
    pub fn evaluate(&mut self, seed: Seed) -> SeedReport {
        let strongholds = self.anchors(seed)
            .into_iter()
            .map(|chunk| self.inspect(seed, chunk))
            .collect();
        SeedReport { seed, strongholds }
    }
}

impl Default for StrongholdFinder {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bounds::BoundingBox;

    #[test]
    fn test_query_is_idempotent() {
        let mut finder = StrongholdFinder::default();
        let chunk = ChunkPos::new(40, -20);
        let first = finder.portal_eyes(99, chunk);
        let cached = finder.structure(99, chunk);
        let second = finder.portal_eyes(99, chunk);
        assert_eq!(first, second);
        assert_eq!(first.frames, 12);
        assert_eq!(finder.cached(), 1);
        assert!(Arc::ptr_eq(&cached, &finder.structure(99, chunk)));
    }

    #[test]
    fn test_golden_structure_for_seed() {
        let mut finder = StrongholdFinder::default();
        let s = finder.structure(99, ChunkPos::new(40, -20));
        assert_eq!(s.pieces()[0].bounds, BoundingBox::from_coords(642, 20, -318, 646, 30, -314));
        assert_eq!(s.pieces().len(), 101);
        assert_eq!(*s.bounds(), BoundingBox::from_coords(567, 2, -366, 710, 30, -252));
        assert_eq!(s.portal_room().bounds, BoundingBox::from_coords(653, 16, -361, 663, 23, -346));
        assert_eq!(s.portal_room().depth, 6);
    }

    #[test]
    fn test_cache_keys_on_seed() {
        let mut finder = StrongholdFinder::default();
        let chunk = ChunkPos::new(3, 3);
        finder.structure(1, chunk);
        finder.structure(2, chunk);
        finder.structure(1, chunk);
        assert_eq!(finder.cached(), 2);
    }

    #[test]
    fn test_evaluate_reports_every_anchor() {
        let mut finder = StrongholdFinder::default();
        let report = finder.evaluate(2012);
        assert_eq!(report.strongholds.len(), STRONGHOLD_COUNT);
        assert_eq!(finder.cached(), STRONGHOLD_COUNT);
        for s in &report.strongholds {
            assert_eq!(s.frames, 12);
            assert!(s.eyes <= s.frames);
            assert!(s.pieces > 2);
        }
        assert_eq!(report.best_eyes(), report.strongholds.iter().map(|s| s.eyes).max().unwrap());
    }

    #[test]
    fn test_fresh_finders_agree() {
        let a = StrongholdFinder::default().evaluate(-31);
        let b = StrongholdFinder::default().evaluate(-31);
        assert_eq!(a, b);
    }

    #[test]
    fn test_filtered_drops_low_counts() {
        let report = SeedReport {
            seed: 0,
            strongholds: vec![
                StrongholdReport {
                    chunk: ChunkPos::new(0, 0),
                    portal: IVec3::ZERO,
                    frames: 12,
                    eyes: 1,
                    pieces: 10,
                    attempts: 1,
                    chests: BTreeMap::new(),
                },
            ],
        };
        assert!(report.clone().filtered(2).is_empty());
        assert!(!report.filtered(1).is_empty());
    }

    #[test]
    fn test_report_display() {
        let mut chests = BTreeMap::new();
        chests.insert(PieceKind::Library, vec![IVec3::new(1, 2, 3)]);
        let report = StrongholdReport {
            chunk: ChunkPos::new(-4, 5),
            portal: IVec3::new(10, 20, 30),
            frames: 12,
            eyes: 3,
            pieces: 40,
            attempts: 2,
            chests,
        };
        let text = report.to_string();
        assert!(text.starts_with("chunk (-4, 5) portal (10, 20, 30) eyes 3/12"));
        assert!(text.contains("library chests: (1, 2, 3)"));
    }
}
