//! Block painting helpers shared by every piece kind
//!
//! All coordinates are in the piece's local frame and go through
//! [`Piece::to_world`]. Writes outside the clip box are dropped, but the
//! random draws that precede them still happen, so a piece consumes the same
//! numbers no matter which part of it the current window covers.

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;
use crate::rng::JavaRandom;
use crate::structure::loot::{self, LootEntry};
use crate::structure::piece::{Door, Piece};
use crate::world::{Block, BlockStore};

/// Local corner, `[x, y, z]`
pub type Local = [i32; 3];

/// Stone brick data values
const MOSSY: u8 = 1;
const CRACKED: u8 = 2;
/// Silverfish block disguised as stone brick
const SILVERFISH_AS_BRICK: u8 = 2;

/// Wall block for randomized stone fills.
///
/// Interior cells are air and draw nothing; wall cells draw one float.
pub fn random_stone(rng: &mut JavaRandom, wall: bool) -> Block {
    if !wall {
        return Block::AIR;
    }
    let f = rng.next_float();
    if f < 0.2 {
        Block::STONE_BRICKS.with_data(CRACKED)
    } else if f < 0.5 {
        Block::STONE_BRICKS.with_data(MOSSY)
    } else if f < 0.55 {
        Block::SILVERFISH_STONE.with_data(SILVERFISH_AS_BRICK)
    } else {
        Block::STONE_BRICKS
    }
}

/// Paints one piece into a store, clipped to a window
pub struct Painter<'a> {
    store: &'a mut dyn BlockStore,
    rng: &'a mut JavaRandom,
    clip: BoundingBox,
    piece: Piece,
}

impl<'a> Painter<'a> {
    pub fn new(store: &'a mut dyn BlockStore, rng: &'a mut JavaRandom, clip: BoundingBox, piece: Piece) -> Self {
        Self { store, rng, clip, piece }
    }

    pub fn rng(&mut self) -> &mut JavaRandom {
        self.rng
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn world(&self, [x, y, z]: Local) -> IVec3 {
        self.piece.to_world(x, y, z)
    }

    /// Whether a local cell lands inside the clip box
    pub fn is_inside(&self, local: Local) -> bool {
        self.clip.contains(self.world(local))
    }

    /// Block at a local cell; air outside the clip box
    pub fn get(&self, local: Local) -> Block {
        let pos = self.world(local);
        if self.clip.contains(pos) {
            self.store.get(pos)
        } else {
            Block::AIR
        }
    }

    pub fn place(&mut self, block: Block, local: Local) {
        let pos = self.world(local);
        if self.clip.contains(pos) {
            self.store.set(pos, block);
        }
    }

    /// Visit every cell of a local box, y outermost, with its wall flag
    fn for_each_cell(min: Local, max: Local, mut f: impl FnMut(Local, bool)) {
        for y in min[1]..=max[1] {
            for x in min[0]..=max[0] {
                for z in min[2]..=max[2] {
                    let wall = y == min[1] || y == max[1]
                        || x == min[0] || x == max[0]
                        || z == min[2] || z == max[2];
                    f([x, y, z], wall);
                }
            }
        }
    }

    /// Fill a local box with `wall` on its shell and `inside` within.
    ///
    /// With `existing_only`, air cells are left alone.
    pub fn fill(&mut self, min: Local, max: Local, wall: Block, inside: Block, existing_only: bool) {
        Self::for_each_cell(min, max, |cell, is_wall| {
            if !existing_only || !self.get(cell).is_air() {
                self.place(if is_wall { wall } else { inside }, cell);
            }
        });
    }

    pub fn fill_air(&mut self, min: Local, max: Local) {
        self.fill(min, max, Block::AIR, Block::AIR, false);
    }

    /// Hollow stone brick shell with random wear on the walls
    pub fn fill_stone(&mut self, min: Local, max: Local, existing_only: bool) {
        Self::for_each_cell(min, max, |cell, is_wall| {
            if !existing_only || !self.get(cell).is_air() {
                let block = random_stone(self.rng, is_wall);
                self.place(block, cell);
            }
        });
    }

    /// Like [`fill`](Self::fill) but each cell is kept with probability `chance`.
    ///
    /// The float is drawn for every cell, inside the window or not.
    pub fn randomly_fill(&mut self, chance: f32, min: Local, max: Local, wall: Block, inside: Block, existing_only: bool) {
        Self::for_each_cell(min, max, |cell, is_wall| {
            if self.rng.next_float() <= chance && (!existing_only || !self.get(cell).is_air()) {
                self.place(if is_wall { wall } else { inside }, cell);
            }
        });
    }

    pub fn randomly_place(&mut self, chance: f32, block: Block, local: Local) {
        if self.rng.next_float() < chance {
            self.place(block, local);
        }
    }

    /// Entrance three wide and three tall with its lower-left corner at `local`
    pub fn door(&mut self, door: Door, [x, y, z]: Local) {
        let frame = [[x, y, z], [x, y + 1, z], [x, y + 2, z], [x + 1, y + 2, z], [x + 2, y + 2, z], [x + 2, y + 1, z], [x + 2, y, z]];
        match door {
            Door::Opening => self.fill_air([x, y, z], [x + 2, y + 2, z]),
            Door::Wood => {
                for cell in frame {
                    self.place(Block::STONE_BRICKS, cell);
                }
                self.place(Block::WOODEN_DOOR, [x + 1, y, z]);
                self.place(Block::WOODEN_DOOR.with_data(8), [x + 1, y + 1, z]);
            }
            Door::Grates => {
                self.place(Block::AIR, [x + 1, y, z]);
                self.place(Block::AIR, [x + 1, y + 1, z]);
                for cell in frame {
                    self.place(Block::IRON_BARS, cell);
                }
            }
            Door::Iron => {
                for cell in frame {
                    self.place(Block::STONE_BRICKS, cell);
                }
                self.place(Block::IRON_DOOR, [x + 1, y, z]);
                self.place(Block::IRON_DOOR.with_data(8), [x + 1, y + 1, z]);
                self.place(Block::STONE_BUTTON.with_data(4), [x + 2, y + 1, z + 1]);
                self.place(Block::STONE_BUTTON.with_data(3), [x + 2, y + 1, z - 1]);
            }
        }
    }

    /// Place a chest and roll `rolls` items into it.
    ///
    /// Nothing happens outside the window or on an existing chest.
    pub fn chest(&mut self, local: Local, table: &[LootEntry], rolls: i32) -> bool {
        let pos = self.world(local);
        if !self.clip.contains(pos) || self.store.get(pos) == Block::CHEST {
            return false;
        }
        self.store.set(pos, Block::CHEST);
        loot::fill_chest(self.rng, table, rolls, self.store, pos);
        true
    }

    /// Any liquid on the faces of the piece box grown by one, within the window
    pub fn has_liquid(&self) -> bool {
        let b = self.piece.bounds;
        let Some(shell) = BoundingBox::new(b.min() - IVec3::ONE, b.max() + IVec3::ONE).intersection(&self.clip) else {
            return false;
        };
        let (lo, hi) = (shell.min(), shell.max());
        let liquid = |x, y, z| self.store.get(IVec3::new(x, y, z)).is_liquid();

        for x in lo.x..=hi.x {
            for z in lo.z..=hi.z {
                if liquid(x, lo.y, z) || liquid(x, hi.y, z) {
                    return true;
                }
            }
        }
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                if liquid(x, y, lo.z) || liquid(x, y, hi.z) {
                    return true;
                }
            }
        }
        for z in lo.z..=hi.z {
            for y in lo.y..=hi.y {
                if liquid(lo.x, y, z) || liquid(hi.x, y, z) {
                    return true;
                }
            }
        }
        false
    }
}
