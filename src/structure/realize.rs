//! Painting finished layouts into a block store
//!
//! A chunk's population pass paints every piece that overlaps its window, in
//! placement order, using that chunk's population generator. Pieces refuse to
//! paint when their shell touches liquid and then stay out of later passes of
//! the same query. The pass ends right after the portal room.

use std::collections::{BTreeMap, HashSet};

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;
use crate::math::facing::Facing;
use crate::rng::JavaRandom;
use crate::structure::layout::Structure;
use crate::structure::loot;
use crate::structure::paint::{Local, Painter};
use crate::structure::piece::{Door, Piece, PieceKind, PieceVariant};
use crate::world::{Block, BlockStore};

/// A frame holds an eye when its float draw lands above this
pub const EYE_THRESHOLD: f32 = 0.9;

/// Receives features a piece reports while it paints
pub trait FeatureSink {
    /// A portal frame was written at `pos`
    fn portal_frame(&mut self, pos: IVec3, has_eye: bool);
}

/// Counts portal frames and the eyes already in them
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EyeCounter {
    pub frames: u32,
    pub eyes: u32,
}

impl FeatureSink for EyeCounter {
    fn portal_frame(&mut self, _pos: IVec3, has_eye: bool) {
        self.frames += 1;
        if has_eye {
            self.eyes += 1;
        }
    }
}

/// Outcome of asking one piece to paint itself
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Realized {
    Placed,
    /// Liquid was found on the piece's shell; nothing was written
    Skipped,
}

/// State carried across the chunk passes of one query.
///
/// Cached layouts are never mutated; everything a pass learns lives here.
#[derive(Clone, Debug, Default)]
pub struct RealizeState {
    skipped: HashSet<usize>,
    chest_made: HashSet<usize>,
    spawner_made: HashSet<usize>,
}

impl RealizeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the piece at `index` dropped out after a liquid check
    pub fn is_skipped(&self, index: usize) -> bool {
        self.skipped.contains(&index)
    }
}

/// Population window of a chunk: 16×16 columns offset by 8 on each axis
pub fn population_window(chunk_x: i32, chunk_z: i32) -> BoundingBox {
    let (x, z) = (chunk_x * 16 + 8, chunk_z * 16 + 8);
    BoundingBox::column(x, z, x + 15, z + 15)
}

/// Chunks whose population window overlaps `bounds`, x-major ascending
pub fn chunks_covering(bounds: &BoundingBox) -> impl Iterator<Item = (i32, i32)> {
    let (x0, x1) = ((bounds.min_x() - 8) >> 4, (bounds.max_x() - 8) >> 4);
    let (z0, z1) = ((bounds.min_z() - 8) >> 4, (bounds.max_z() - 8) >> 4);
    (x0..=x1).flat_map(move |x| (z0..=z1).map(move |z| (x, z)))
}

/// One population pass: paint every piece overlapping `window`.
///
/// Stops after the portal room. Returns how many pieces were painted.
pub fn populate(
    structure: &Structure,
    window: &BoundingBox,
    rng: &mut JavaRandom,
    store: &mut dyn BlockStore,
    sink: &mut dyn FeatureSink,
    state: &mut RealizeState,
) -> usize {
    let mut painted = 0;
    for (index, piece) in structure.pieces().iter().enumerate() {
        if !state.is_skipped(index) && piece.bounds.intersects(window) {
            match realize_piece(index, piece, window, rng, store, sink, state) {
                Realized::Placed => painted += 1,
                Realized::Skipped => {
                    state.skipped.insert(index);
                }
            }
        }
        if index == structure.portal_room_index() {
            break;
        }
    }
    painted
}

/// Paint one piece, clipped to `window`
pub fn realize_piece(
    index: usize,
    piece: &Piece,
    window: &BoundingBox,
    rng: &mut JavaRandom,
    store: &mut dyn BlockStore,
    sink: &mut dyn FeatureSink,
    state: &mut RealizeState,
) -> Realized {
    let mut p = Painter::new(store, rng, *window, *piece);
    if piece.kind() != PieceKind::PortalRoom && p.has_liquid() {
        return Realized::Skipped;
    }

    match piece.variant {
        PieceVariant::Start => spiral_stairs(&mut p, Door::Opening),
        PieceVariant::SpiralStairs { door } => spiral_stairs(&mut p, door),
        PieceVariant::Straight { door, left_exit, right_exit } => straight(&mut p, door, left_exit, right_exit),
        PieceVariant::ChestCorridor { door } => chest_corridor(&mut p, door, index, state),
        PieceVariant::Prison { door } => prison(&mut p, door),
        PieceVariant::LeftTurn { door } => turn(&mut p, door, true),
        PieceVariant::RightTurn { door } => turn(&mut p, door, false),
        PieceVariant::RoomCrossing { door, style } => room_crossing(&mut p, door, style),
        PieceVariant::StraightStairs { door } => straight_stairs(&mut p, door),
        PieceVariant::FiveWayCrossing { door, left_low, left_high, right_low, right_high } => {
            five_way_crossing(&mut p, door, [left_low, left_high, right_low, right_high])
        }
        PieceVariant::Library { door, tall } => library(&mut p, door, tall),
        PieceVariant::PortalRoom => portal_room(&mut p, sink, index, state),
        PieceVariant::FillerCorridor { steps } => filler(&mut p, steps),
    }
    Realized::Placed
}

/// Local chest positions a piece can produce
pub fn chest_sites(piece: &Piece) -> Vec<Local> {
    match piece.variant {
        PieceVariant::ChestCorridor { .. } => vec![CORRIDOR_CHEST_AT],
        PieceVariant::RoomCrossing { style: STOREROOM, .. } => vec![STOREROOM_CHEST_AT],
        PieceVariant::Library { tall: false, .. } => vec![LIBRARY_CHEST_AT],
        PieceVariant::Library { tall: true, .. } => vec![LIBRARY_CHEST_AT, BALCONY_CHEST_AT],
        _ => Vec::new(),
    }
}

/// World chest positions of a layout, grouped by piece kind
pub fn chest_positions(structure: &Structure) -> BTreeMap<PieceKind, Vec<IVec3>> {
    let mut out: BTreeMap<PieceKind, Vec<IVec3>> = BTreeMap::new();
    for piece in structure.pieces() {
        for [x, y, z] in chest_sites(piece) {
            out.entry(piece.kind()).or_default().push(piece.to_world(x, y, z));
        }
    }
    out
}

/// Centre of the portal's eye ring in world space
pub fn portal_center(room: &Piece) -> IVec3 {
    room.to_world(5, 3, 10)
}

const CORRIDOR_CHEST_AT: Local = [3, 2, 3];
const STOREROOM_CHEST_AT: Local = [3, 4, 8];
const LIBRARY_CHEST_AT: Local = [3, 3, 5];
const BALCONY_CHEST_AT: Local = [12, 8, 1];
const STOREROOM: u8 = 2;

fn spiral_stairs(p: &mut Painter<'_>, door: Door) {
    p.fill_stone([0, 0, 0], [4, 10, 4], true);
    p.door(door, [1, 7, 0]);
    p.door(Door::Opening, [1, 1, 4]);

    let brick = Block::STONE_BRICKS;
    let slab = Block::STONE_SLAB;
    // Steps wind down clockwise around the centre column.
    for (block, cell) in [
        (brick, [2, 6, 1]), (brick, [1, 5, 1]), (slab, [1, 6, 1]),
        (brick, [1, 5, 2]), (brick, [1, 4, 3]), (slab, [1, 5, 3]),
        (brick, [2, 4, 3]), (brick, [3, 3, 3]), (slab, [3, 4, 3]),
        (brick, [3, 3, 2]), (brick, [3, 2, 1]), (slab, [3, 3, 1]),
        (brick, [2, 2, 1]), (brick, [1, 1, 1]), (slab, [1, 2, 1]),
        (brick, [1, 1, 2]), (slab, [1, 1, 3]),
    ] {
        p.place(block, cell);
    }
}

fn straight(p: &mut Painter<'_>, door: Door, left_exit: bool, right_exit: bool) {
    p.fill_stone([0, 0, 0], [4, 4, 6], true);
    p.door(door, [1, 1, 0]);
    p.door(Door::Opening, [1, 1, 6]);
    for cell in [[1, 2, 1], [3, 2, 1], [1, 2, 5], [3, 2, 5]] {
        p.randomly_place(0.1, Block::TORCH, cell);
    }
    if left_exit {
        p.fill_air([0, 1, 2], [0, 3, 4]);
    }
    if right_exit {
        p.fill_air([4, 1, 2], [4, 3, 4]);
    }
}

fn chest_corridor(p: &mut Painter<'_>, door: Door, index: usize, state: &mut RealizeState) {
    p.fill_stone([0, 0, 0], [4, 4, 6], true);
    p.door(door, [1, 1, 0]);
    p.door(Door::Opening, [1, 1, 6]);
    p.fill([3, 1, 2], [3, 1, 4], Block::STONE_BRICKS, Block::STONE_BRICKS, false);

    let top_slab = Block::STONE_SLAB.with_data(5);
    for cell in [[3, 1, 1], [3, 1, 5], [3, 2, 2], [3, 2, 4]] {
        p.place(top_slab, cell);
    }
    for z in 2..=4 {
        p.place(top_slab, [2, 1, z]);
    }

    if !state.chest_made.contains(&index) && p.is_inside(CORRIDOR_CHEST_AT) {
        state.chest_made.insert(index);
        let rolls = 2 + p.rng().next_int_bound(2);
        p.chest(CORRIDOR_CHEST_AT, &loot::CORRIDOR_CHEST, rolls);
    }
}

fn prison(p: &mut Painter<'_>, door: Door) {
    p.fill_stone([0, 0, 0], [8, 4, 10], true);
    p.door(door, [1, 1, 0]);
    p.fill_air([1, 1, 10], [3, 3, 10]);
    for z in [1, 3, 7, 9] {
        p.fill_stone([4, 1, z], [4, 3, z], false);
    }
    p.fill([4, 1, 4], [4, 3, 6], Block::IRON_BARS, Block::IRON_BARS, false);
    p.fill([5, 1, 5], [7, 3, 5], Block::IRON_BARS, Block::IRON_BARS, false);
    p.place(Block::IRON_BARS, [4, 3, 2]);
    p.place(Block::IRON_BARS, [4, 3, 8]);
    for z in [2, 8] {
        p.place(Block::IRON_DOOR.with_data(3), [4, 1, z]);
        p.place(Block::IRON_DOOR.with_data(3 + 8), [4, 2, z]);
    }
}

/// Turns open the side their exit leaves through
fn turn(p: &mut Painter<'_>, door: Door, left: bool) {
    p.fill_stone([0, 0, 0], [4, 4, 4], true);
    p.door(door, [1, 1, 0]);
    let positive = matches!(p.piece().facing, Facing::South | Facing::West);
    let x = if positive == left { 4 } else { 0 };
    p.fill_air([x, 1, 1], [x, 3, 3]);
}

fn room_crossing(p: &mut Painter<'_>, door: Door, style: u8) {
    p.fill_stone([0, 0, 0], [10, 6, 10], true);
    p.door(door, [4, 1, 0]);
    p.fill_air([4, 1, 10], [6, 3, 10]);
    p.fill_air([0, 1, 4], [0, 3, 6]);
    p.fill_air([10, 1, 4], [10, 3, 6]);

    match style {
        // Pillar with torches
        0 => {
            for y in 1..=3 {
                p.place(Block::STONE_BRICKS, [5, y, 5]);
            }
            for cell in [[4, 3, 5], [6, 3, 5], [5, 3, 4], [5, 3, 6]] {
                p.place(Block::TORCH, cell);
            }
            for cell in [[4, 1, 4], [4, 1, 5], [4, 1, 6], [6, 1, 4], [6, 1, 5], [6, 1, 6], [5, 1, 4], [5, 1, 6]] {
                p.place(Block::STONE_SLAB, cell);
            }
        }
        // Fountain
        1 => {
            for i in 0..5 {
                p.place(Block::STONE_BRICKS, [3, 1, 3 + i]);
                p.place(Block::STONE_BRICKS, [7, 1, 3 + i]);
                p.place(Block::STONE_BRICKS, [3 + i, 1, 3]);
                p.place(Block::STONE_BRICKS, [3 + i, 1, 7]);
            }
            for y in 1..=3 {
                p.place(Block::STONE_BRICKS, [5, y, 5]);
            }
            p.place(Block::FLOWING_WATER, [5, 4, 5]);
        }
        STOREROOM => {
            let cobble = Block::COBBLESTONE;
            for z in 1..=9 {
                p.place(cobble, [1, 3, z]);
                p.place(cobble, [9, 3, z]);
            }
            for x in 1..=9 {
                p.place(cobble, [x, 3, 1]);
                p.place(cobble, [x, 3, 9]);
            }
            for cell in [[5, 1, 4], [5, 1, 6], [5, 3, 4], [5, 3, 6], [4, 1, 5], [6, 1, 5], [4, 3, 5], [6, 3, 5]] {
                p.place(cobble, cell);
            }
            for y in 1..=3 {
                for cell in [[4, y, 4], [6, y, 4], [4, y, 6], [6, y, 6]] {
                    p.place(cobble, cell);
                }
            }
            p.place(Block::TORCH, [5, 3, 5]);
            for z in 2..=8 {
                p.place(Block::PLANKS, [2, 3, z]);
                p.place(Block::PLANKS, [3, 3, z]);
                if z <= 3 || z >= 7 {
                    for x in 4..=6 {
                        p.place(Block::PLANKS, [x, 3, z]);
                    }
                }
                p.place(Block::PLANKS, [7, 3, z]);
                p.place(Block::PLANKS, [8, 3, z]);
            }
            for y in 1..=3 {
                p.place(Block::LADDER.with_data(4), [9, y, 3]);
            }
            let rolls = 1 + p.rng().next_int_bound(4);
            p.chest(STOREROOM_CHEST_AT, &loot::STOREROOM_CHEST, rolls);
        }
        _ => {}
    }
}

fn straight_stairs(p: &mut Painter<'_>, door: Door) {
    p.fill_stone([0, 0, 0], [4, 10, 7], true);
    p.door(door, [1, 7, 0]);
    p.door(Door::Opening, [1, 1, 7]);
    let stairs = Block::COBBLESTONE_STAIRS.with_data(2);
    for i in 0..6 {
        for x in 1..=3 {
            p.place(stairs, [x, 6 - i, 1 + i]);
            if i < 5 {
                p.place(Block::STONE_BRICKS, [x, 5 - i, 1 + i]);
            }
        }
    }
}

/// `openings` is left low, left high, right low, right high
fn five_way_crossing(p: &mut Painter<'_>, door: Door, openings: [bool; 4]) {
    let [left_low, left_high, right_low, right_high] = openings;
    p.fill_stone([0, 0, 0], [9, 8, 10], true);
    p.door(door, [4, 3, 0]);
    if left_low {
        p.fill_air([0, 3, 1], [0, 5, 3]);
    }
    if right_low {
        p.fill_air([9, 3, 1], [9, 5, 3]);
    }
    if left_high {
        p.fill_air([0, 5, 7], [0, 7, 9]);
    }
    if right_high {
        p.fill_air([9, 5, 7], [9, 7, 9]);
    }
    p.fill_air([5, 1, 10], [7, 3, 10]);

    p.fill_stone([1, 2, 1], [8, 2, 6], false);
    p.fill_stone([4, 1, 5], [4, 4, 9], false);
    p.fill_stone([8, 1, 5], [8, 4, 9], false);
    p.fill_stone([1, 4, 7], [3, 4, 9], false);
    p.fill_stone([1, 3, 5], [3, 3, 6], false);

    let slab = Block::STONE_SLAB;
    p.fill([1, 3, 4], [3, 3, 4], slab, slab, false);
    p.fill([1, 4, 6], [3, 4, 6], slab, slab, false);
    p.fill_stone([5, 1, 7], [7, 1, 8], false);
    p.fill([5, 1, 9], [7, 1, 9], slab, slab, false);
    p.fill([5, 2, 7], [7, 2, 7], slab, slab, false);
    p.fill([4, 5, 7], [4, 5, 9], slab, slab, false);
    p.fill([8, 5, 7], [8, 5, 9], slab, slab, false);
    p.fill([5, 5, 7], [7, 5, 9], Block::DOUBLE_SLAB, Block::DOUBLE_SLAB, false);
    p.place(Block::TORCH, [6, 5, 6]);
}

fn library(p: &mut Painter<'_>, door: Door, tall: bool) {
    let top = if tall { 10 } else { 5 };
    p.fill_stone([0, 0, 0], [13, top, 14], true);
    p.door(door, [4, 1, 0]);
    p.randomly_fill(0.07, [2, 1, 1], [11, 4, 13], Block::COBWEB, Block::COBWEB, false);

    for z in 1..=13 {
        let shelf = if (z - 1) % 4 == 0 { Block::PLANKS } else { Block::BOOKSHELF };
        p.fill([1, 1, z], [1, 4, z], shelf, shelf, false);
        p.fill([12, 1, z], [12, 4, z], shelf, shelf, false);
        if shelf == Block::PLANKS {
            p.place(Block::TORCH, [2, 3, z]);
            p.place(Block::TORCH, [11, 3, z]);
        }
        if tall {
            p.fill([1, 6, z], [1, 9, z], shelf, shelf, false);
            p.fill([12, 6, z], [12, 9, z], shelf, shelf, false);
        }
    }
    for z in (3..12).step_by(2) {
        for x in [3, 6, 9] {
            p.fill([x, 1, z], [x + 1, 3, z], Block::BOOKSHELF, Block::BOOKSHELF, false);
        }
    }

    if tall {
        let planks = Block::PLANKS;
        let fence = Block::FENCE;
        // Balcony floor and railing
        p.fill([1, 5, 1], [3, 5, 13], planks, planks, false);
        p.fill([10, 5, 1], [12, 5, 13], planks, planks, false);
        p.fill([4, 5, 1], [9, 5, 2], planks, planks, false);
        p.fill([4, 5, 12], [9, 5, 13], planks, planks, false);
        for cell in [[9, 5, 11], [8, 5, 11], [9, 5, 10]] {
            p.place(planks, cell);
        }
        p.fill([3, 6, 2], [3, 6, 12], fence, fence, false);
        p.fill([10, 6, 2], [10, 6, 9], fence, fence, false);
        p.fill([4, 6, 2], [9, 6, 2], fence, fence, false);
        p.fill([4, 6, 12], [8, 6, 12], fence, fence, false);
        for cell in [[9, 6, 11], [8, 6, 11], [9, 6, 10]] {
            p.place(fence, cell);
        }
        for y in 1..=7 {
            p.place(Block::LADDER.with_data(3), [10, y, 13]);
        }

        // Chandelier
        for y in 7..=9 {
            p.place(fence, [6, y, 7]);
            p.place(fence, [7, y, 7]);
        }
        for cell in [[6, 9, 6], [7, 9, 6], [6, 9, 8], [7, 9, 8], [5, 9, 7], [8, 9, 7]] {
            p.place(fence, cell);
        }
        for cell in [[5, 8, 7], [8, 8, 7], [6, 8, 6], [6, 8, 8], [7, 8, 6], [7, 8, 8]] {
            p.place(Block::TORCH, cell);
        }
    }

    let rolls = 1 + p.rng().next_int_bound(4);
    p.chest(LIBRARY_CHEST_AT, &loot::LIBRARY_CHEST, rolls);
    if tall {
        p.place(Block::AIR, [12, 9, 1]);
        let rolls = 1 + p.rng().next_int_bound(4);
        p.chest(BALCONY_CHEST_AT, &loot::LIBRARY_CHEST, rolls);
    }
}

/// Frame rows around the portal, each with the data value facing inward
const FRAME_ROWS: [([Local; 3], u8); 4] = [
    ([[4, 3, 8], [5, 3, 8], [6, 3, 8]], 0),
    ([[4, 3, 12], [5, 3, 12], [6, 3, 12]], 2),
    ([[3, 3, 9], [3, 3, 10], [3, 3, 11]], 3),
    ([[7, 3, 9], [7, 3, 10], [7, 3, 11]], 1),
];

fn portal_room(p: &mut Painter<'_>, sink: &mut dyn FeatureSink, index: usize, state: &mut RealizeState) {
    p.fill_stone([0, 0, 0], [10, 7, 15], false);
    p.door(Door::Grates, [4, 1, 0]);

    let y = 6;
    p.fill_stone([1, y, 1], [1, y, 14], false);
    p.fill_stone([9, y, 1], [9, y, 14], false);
    p.fill_stone([2, y, 1], [8, y, 2], false);
    p.fill_stone([2, y, 14], [8, y, 14], false);
    p.fill_stone([1, 1, 1], [2, 1, 4], false);
    p.fill_stone([8, 1, 1], [9, 1, 4], false);
    p.fill([1, 1, 1], [1, 1, 3], Block::FLOWING_LAVA, Block::FLOWING_LAVA, false);
    p.fill([9, 1, 1], [9, 1, 3], Block::FLOWING_LAVA, Block::FLOWING_LAVA, false);
    p.fill_stone([3, 1, 8], [7, 1, 12], false);
    p.fill([4, 1, 9], [6, 1, 11], Block::FLOWING_LAVA, Block::FLOWING_LAVA, false);

    for z in (3..14).step_by(2) {
        p.fill([0, 3, z], [0, 4, z], Block::IRON_BARS, Block::IRON_BARS, false);
        p.fill([10, 3, z], [10, 4, z], Block::IRON_BARS, Block::IRON_BARS, false);
    }
    for x in (2..9).step_by(2) {
        p.fill([x, 3, 15], [x, 4, 15], Block::IRON_BARS, Block::IRON_BARS, false);
    }

    p.fill_stone([4, 1, 5], [6, 1, 7], false);
    p.fill_stone([4, 2, 6], [6, 2, 7], false);
    p.fill_stone([4, 3, 7], [6, 3, 7], false);
    let stairs = Block::STONE_BRICK_STAIRS.with_data(3);
    for x in 4..=6 {
        p.place(stairs, [x, 1, 4]);
        p.place(stairs, [x, 2, 5]);
        p.place(stairs, [x, 3, 6]);
    }

    for (cells, data) in FRAME_ROWS {
        for cell in cells {
            let has_eye = p.rng().next_float() > EYE_THRESHOLD;
            let eye_bit = if has_eye { Block::FRAME_EYE_BIT } else { 0 };
            if p.is_inside(cell) {
                p.place(Block::END_PORTAL_FRAME.with_data(data | eye_bit), cell);
                sink.portal_frame(p.world(cell), has_eye);
            }
        }
    }

    let spawner_at = [5, 3, 6];
    if !state.spawner_made.contains(&index) && p.is_inside(spawner_at) {
        state.spawner_made.insert(index);
        p.place(Block::SPAWNER, spawner_at);
    }
}

fn filler(p: &mut Painter<'_>, steps: i32) {
    let air = Block::AIR;
    for z in 0..steps {
        for cell in [[0, 0, z], [1, 0, z], [2, 0, z], [3, 0, z], [4, 0, z]] {
            p.place(Block::STONE_BRICKS, cell);
        }
        for y in 1..=3 {
            p.place(Block::STONE_BRICKS, [0, y, z]);
            for x in 1..=3 {
                p.place(air, [x, y, z]);
            }
            p.place(Block::STONE_BRICKS, [4, y, z]);
        }
        for x in 0..=4 {
            p.place(Block::STONE_BRICKS, [x, 4, z]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ChunkPos;
    use crate::structure::layout;
    use crate::world::SparseBlockStore;

    fn structure(seed: i64, chunk: ChunkPos) -> Structure {
        let mut rng = JavaRandom::new(seed);
        layout::generate(&mut rng, chunk)
    }

    fn realize_portal(s: &Structure, seed: i64) -> (EyeCounter, SparseBlockStore) {
        let mut store = SparseBlockStore::default();
        let mut counter = EyeCounter::default();
        let mut state = RealizeState::new();
        for (cx, cz) in chunks_covering(&s.portal_room().bounds) {
            let mut rng = JavaRandom::new(seed ^ ((cx as i64) << 32) ^ cz as i64);
            populate(s, &population_window(cx, cz), &mut rng, &mut store, &mut counter, &mut state);
        }
        (counter, store)
    }

    #[test]
    fn test_eye_counter() {
        let mut c = EyeCounter::default();
        c.portal_frame(IVec3::ZERO, true);
        c.portal_frame(IVec3::ONE, false);
        assert_eq!(c, EyeCounter { frames: 2, eyes: 1 });
    }

    #[test]
    fn test_population_window_offsets() {
        let w = population_window(-1, 2);
        assert_eq!((w.min_x(), w.max_x()), (-8, 7));
        assert_eq!((w.min_z(), w.max_z()), (40, 55));
        assert_eq!((w.min_y(), w.max_y()), (1, 512));
    }

    #[test]
    fn test_chunks_covering_tile_the_box() {
        let b = BoundingBox::from_coords(20, 30, -10, 30, 40, 5);
        let chunks: Vec<_> = chunks_covering(&b).collect();
        assert_eq!(chunks, vec![(0, -2), (0, -1), (1, -2), (1, -1)]);
        for (cx, cz) in chunks {
            assert!(population_window(cx, cz).intersects(&b));
        }
    }

    #[test]
    fn test_every_frame_painted_once() {
        let s = structure(2024, ChunkPos::new(10, -4));
        let (counter, store) = realize_portal(&s, 2024);
        assert_eq!(counter.frames, 12);
        assert!(counter.eyes <= 12);

        let room = s.portal_room();
        let eyes_in_store = FRAME_ROWS
            .iter()
            .flat_map(|(cells, _)| cells.iter())
            .map(|&[x, y, z]| store.get(room.to_world(x, y, z)))
            .inspect(|b| assert_eq!(b.id, Block::END_PORTAL_FRAME.id))
            .filter(|b| b.data & Block::FRAME_EYE_BIT != 0)
            .count();
        assert_eq!(eyes_in_store as u32, counter.eyes);
        let frames_in_store = store.iter().filter(|(_, b)| b.id == Block::END_PORTAL_FRAME.id).count();
        assert_eq!(frames_in_store, 12);
        assert_eq!(store.get(room.to_world(5, 3, 6)), Block::SPAWNER);
    }

    #[test]
    fn test_repeat_query_matches() {
        let s = structure(31337, ChunkPos::new(-7, 7));
        let before = s.clone();
        let (a, _) = realize_portal(&s, 31337);
        let (b, _) = realize_portal(&s, 31337);
        assert_eq!(a, b);
        assert_eq!(s, before);
    }

    #[test]
    fn test_liquid_skips_piece_for_the_query() {
        let chunk = ChunkPos::new(0, 0);
        let s = structure(5, chunk);
        let root = s.pieces()[0];
        let window = population_window(chunk.x - 1, chunk.z - 1);
        assert!(root.bounds.intersects(&window));

        let mut store = SparseBlockStore::default();
        let wet = root.bounds.min() - IVec3::new(0, 1, 0);
        store.set(wet, Block::WATER);
        let mut state = RealizeState::new();
        let mut rng = JavaRandom::new(1);
        let mut sink = EyeCounter::default();
        populate(&s, &window, &mut rng, &mut store, &mut sink, &mut state);
        assert!(state.is_skipped(0));
        assert_eq!(store.get(root.bounds.min()), Block::STONE);
    }

    #[test]
    fn test_chest_positions_follow_layout() {
        let s = structure(777, ChunkPos::new(1, 1));
        let chests = chest_positions(&s);
        let corridors = s.count_of(PieceKind::ChestCorridor);
        assert_eq!(chests.get(&PieceKind::ChestCorridor).map_or(0, Vec::len), corridors);
        for (kind, positions) in &chests {
            for pos in positions {
                assert!(s.pieces().iter().any(|p| p.kind() == *kind && p.bounds.contains(*pos)));
            }
        }
        assert!(!chests.contains_key(&PieceKind::Prison));
    }

    #[test]
    fn test_portal_center_inside_room() {
        let s = structure(8, ChunkPos::new(0, 3));
        let room = s.portal_room();
        assert!(room.bounds.contains(portal_center(room)));
    }

    #[test]
    fn test_filler_hollow() {
        let piece = Piece {
            variant: PieceVariant::FillerCorridor { steps: 2 },
            bounds: BoundingBox::from_coords(0, 20, 0, 4, 24, 1),
            facing: Facing::South,
            depth: 3,
        };
        let mut store = SparseBlockStore::default();
        let mut rng = JavaRandom::new(0);
        let mut sink = EyeCounter::default();
        let window = BoundingBox::column(-16, -16, 16, 16);
        let out = realize_piece(1, &piece, &window, &mut rng, &mut store, &mut sink, &mut RealizeState::new());
        assert_eq!(out, Realized::Placed);
        assert!(store.get(IVec3::new(2, 22, 1)).is_air());
        assert_eq!(store.get(IVec3::new(0, 22, 1)), Block::STONE_BRICKS);
        assert_eq!(store.get(IVec3::new(2, 22, 2)), Block::STONE);
    }
}
