//! Sparse block storage

use std::collections::HashMap;

use crate::core::types::IVec3;
use crate::world::block::Block;

/// Slots in a single chest
pub const CHEST_SLOTS: usize = 27;

/// A stack of items inside a container slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub id: u16,
    pub count: u8,
    pub data: u8,
}

/// Output sink for realized structures.
///
/// Reads outside written regions must return the store's background block so
/// that "only replace solid" fills behave the same on every run.
pub trait BlockStore {
    fn get(&self, pos: IVec3) -> Block;

    fn set(&mut self, pos: IVec3, block: Block);

    /// Put `stack` into `slot` of the container at `pos`, replacing what was there
    fn set_slot(&mut self, pos: IVec3, slot: usize, stack: ItemStack);

    /// Current contents of the container at `pos`, if any
    fn slots(&self, pos: IVec3) -> Option<&[Option<ItemStack>]>;
}

/// HashMap-backed store. Unwritten cells read as `background`.
#[derive(Clone, Debug)]
pub struct SparseBlockStore {
    background: Block,
    blocks: HashMap<IVec3, Block>,
    containers: HashMap<IVec3, Vec<Option<ItemStack>>>,
}

impl SparseBlockStore {
    /// Create an empty store whose unwritten cells read as `background`
    pub fn new(background: Block) -> Self {
        Self {
            background,
            blocks: HashMap::new(),
            containers: HashMap::new(),
        }
    }

    /// Number of cells written so far
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate written cells in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&IVec3, &Block)> {
        self.blocks.iter()
    }

    /// Positions of every container that received at least one item
    pub fn container_positions(&self) -> impl Iterator<Item = &IVec3> {
        self.containers.keys()
    }
}

impl Default for SparseBlockStore {
    fn default() -> Self {
        Self::new(Block::STONE)
    }
}

impl BlockStore for SparseBlockStore {
    fn get(&self, pos: IVec3) -> Block {
        self.blocks.get(&pos).copied().unwrap_or(self.background)
    }

    fn set(&mut self, pos: IVec3, block: Block) {
        self.blocks.insert(pos, block);
    }

    fn set_slot(&mut self, pos: IVec3, slot: usize, stack: ItemStack) {
        assert!(slot < CHEST_SLOTS, "chest slot {slot} out of range");
        let slots = self.containers
            .entry(pos)
            .or_insert_with(|| vec![None; CHEST_SLOTS]);
        slots[slot] = Some(stack);
    }

    fn slots(&self, pos: IVec3) -> Option<&[Option<ItemStack>]> {
        self.containers.get(&pos).map(|s| s.as_slice())
    }
}
