//! Where a world seed puts its strongholds, and the generators it hands them

use std::f64::consts::TAU;

use crate::core::types::{ChunkPos, IVec3, Seed};
use crate::rng::JavaRandom;
use crate::terrain::biome::{BiomeId, BiomeSource, STRONGHOLD_BIOMES};

/// Strongholds per world, spread evenly around one ring
pub const STRONGHOLD_COUNT: usize = 3;
/// Ring radius unit, in chunks
pub const RING_DISTANCE: f64 = 32.0;
/// Block radius searched for an allowed biome around each ring position
pub const BIOME_SEARCH_RADIUS: i32 = 112;

/// Nearest integer, halves rounding up
fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Anchor chunks of every stronghold in a world.
///
/// Each ring position is pulled onto a nearby allowed biome when one exists;
/// otherwise it stays where the ring put it.
pub fn stronghold_anchors(seed: Seed, biomes: &dyn BiomeSource) -> [ChunkPos; STRONGHOLD_COUNT] {
    let mut rng = JavaRandom::new(seed);
    let mut angle = rng.next_double() * TAU;
    let mut anchors = [ChunkPos::new(0, 0); STRONGHOLD_COUNT];

    for anchor in anchors.iter_mut() {
        let distance = (1.25 + rng.next_double()) * RING_DISTANCE;
        let mut chunk = ChunkPos::new(
            round_half_up(angle.cos() * distance),
            round_half_up(angle.sin() * distance),
        );

        let (x, z) = (chunk.block_x() + 8, chunk.block_z() + 8);
        match find_biome_position(biomes, x, z, BIOME_SEARCH_RADIUS, &STRONGHOLD_BIOMES, &mut rng) {
            Some(pos) => chunk = ChunkPos::containing(pos.x, pos.z),
            None => log::warn!("Seed {seed}: stronghold at chunk {chunk} has no valid biome nearby"),
        }

        *anchor = chunk;
        angle += TAU / STRONGHOLD_COUNT as f64;
    }
    anchors
}

/// Random block position near `(x, z)` whose biome is in `allowed`.
///
/// Scans quarter cells row by row. The first match is taken without a draw;
/// each later match replaces the pick when `next_int_bound(picked + 1)` is 0,
/// where `picked` counts replacements so far.
pub fn find_biome_position(
    biomes: &dyn BiomeSource,
    x: i32,
    z: i32,
    radius: i32,
    allowed: &[BiomeId],
    rng: &mut JavaRandom,
) -> Option<IVec3> {
    let (x0, z0) = ((x - radius) >> 2, (z - radius) >> 2);
    let (x1, z1) = ((x + radius) >> 2, (z + radius) >> 2);

    let mut found = None;
    let mut picked = 0;
    for qz in z0..=z1 {
        for qx in x0..=x1 {
            if !allowed.contains(&biomes.biome_at(qx, qz)) {
                continue;
            }
            if found.is_none() || rng.next_int_bound(picked + 1) == 0 {
                found = Some(IVec3::new(qx << 2, 0, qz << 2));
                picked += 1;
            }
        }
    }
    found
}

/// Generator a stronghold layout is built from
pub fn structure_rng(seed: Seed, chunk: ChunkPos) -> JavaRandom {
    let mut rng = JavaRandom::new(seed);
    let a = rng.next_long();
    let b = rng.next_long();
    rng.set_seed((chunk.x as i64).wrapping_mul(a) ^ (chunk.z as i64).wrapping_mul(b) ^ seed);
    rng.next_int();
    rng
}

/// Generator a chunk's population pass paints with
pub fn population_rng(seed: Seed, chunk_x: i32, chunk_z: i32) -> JavaRandom {
    let mut rng = JavaRandom::new(seed);
    let a = rng.next_long() / 2 * 2 + 1;
    let b = rng.next_long() / 2 * 2 + 1;
    let mixed = (chunk_x as i64).wrapping_mul(a).wrapping_add((chunk_z as i64).wrapping_mul(b));
    rng.set_seed(mixed ^ seed);
    rng
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::biome::UniformBiomes;

    /// Ocean with a single forest quarter cell
    struct Island {
        at: (i32, i32),
    }

    impl BiomeSource for Island {
        fn biome_at(&self, x: i32, z: i32) -> BiomeId {
            if (x, z) == self.at { BiomeId::FOREST } else { BiomeId::OCEAN }
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn test_anchors_lie_on_ring() {
        let ocean = UniformBiomes(BiomeId::OCEAN);
        let anchors = stronghold_anchors(42, &ocean);
        for a in anchors {
            let d = ((a.x * a.x + a.z * a.z) as f64).sqrt();
            assert!((39.0..=73.0).contains(&d), "anchor {a} at distance {d}");
        }
    }

    #[test]
    fn test_anchors_spread_apart() {
        let anchors = stronghold_anchors(-9, &UniformBiomes(BiomeId::OCEAN));
        let angles: Vec<f64> = anchors.iter().map(|a| (a.z as f64).atan2(a.x as f64)).collect();
        for i in 0..3 {
            let mut diff = (angles[(i + 1) % 3] - angles[i]).rem_euclid(TAU);
            if diff > std::f64::consts::PI {
                diff = TAU - diff;
            }
            assert!((diff - TAU / 3.0).abs() < 0.1, "angles {angles:?}");
        }
    }

    #[test]
    fn test_anchors_deterministic() {
        let forest = UniformBiomes(BiomeId::FOREST);
        assert_eq!(stronghold_anchors(7, &forest), stronghold_anchors(7, &forest));
    }

    #[test]
    fn test_single_match_needs_no_draw() {
        let island = Island { at: (10, -3) };
        let mut rng = JavaRandom::new(1);
        let before = rng.clone();
        let pos = find_biome_position(&island, 40, -12, 112, &STRONGHOLD_BIOMES, &mut rng);
        assert_eq!(pos, Some(IVec3::new(40, 0, -12)));
        assert_eq!(rng, before);
    }

    #[test]
    fn test_no_match() {
        let mut rng = JavaRandom::new(1);
        let ocean = UniformBiomes(BiomeId::OCEAN);
        assert_eq!(find_biome_position(&ocean, 0, 0, 112, &STRONGHOLD_BIOMES, &mut rng), None);
    }

    #[test]
    fn test_uniform_allowed_stays_in_range() {
        let forest = UniformBiomes(BiomeId::FOREST);
        let mut rng = JavaRandom::new(3);
        let pos = find_biome_position(&forest, 100, 100, 112, &STRONGHOLD_BIOMES, &mut rng).unwrap();
        assert!((pos.x - 100).abs() <= 116 && (pos.z - 100).abs() <= 116);
        assert_eq!(pos.x % 4, 0);
    }

    #[test]
    fn test_population_rng_matches_seeding() {
        let seed = 123456789;
        let mut expected = JavaRandom::new(seed);
        let a = expected.next_long() / 2 * 2 + 1;
        let b = expected.next_long() / 2 * 2 + 1;
        expected.set_seed(3i64.wrapping_mul(a).wrapping_add((-4i64).wrapping_mul(b)) ^ seed);
        assert_eq!(population_rng(seed, 3, -4), expected);
    }

    #[test]
    fn test_structure_rng_skips_one_int() {
        let seed = -5;
        let chunk = ChunkPos::new(2, 9);
        let mut expected = JavaRandom::new(seed);
        let a = expected.next_long();
        let b = expected.next_long();
        expected.set_seed((2i64.wrapping_mul(a)) ^ (9i64.wrapping_mul(b)) ^ seed);
        expected.next_int();
        assert_eq!(structure_rng(seed, chunk), expected);
    }
}
