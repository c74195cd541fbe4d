//! Chest loot tables and the weighted roll that fills a chest

use crate::core::types::IVec3;
use crate::rng::JavaRandom;
use crate::world::{BlockStore, ItemStack, CHEST_SLOTS};

/// One weighted line of a loot table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LootEntry {
    pub item: u16,
    pub data: u8,
    pub min: u8,
    pub max: u8,
    pub weight: i32,
}

impl LootEntry {
    const fn new(item: u16, min: u8, max: u8, weight: i32) -> Self {
        Self { item, data: 0, min, max, weight }
    }
}

pub mod items {
    pub const APPLE: u16 = 260;
    pub const IRON_PICKAXE: u16 = 257;
    pub const COAL: u16 = 263;
    pub const DIAMOND: u16 = 264;
    pub const IRON_INGOT: u16 = 265;
    pub const GOLD_INGOT: u16 = 266;
    pub const IRON_SWORD: u16 = 267;
    pub const BREAD: u16 = 297;
    pub const IRON_HELMET: u16 = 306;
    pub const IRON_CHESTPLATE: u16 = 307;
    pub const IRON_LEGGINGS: u16 = 308;
    pub const IRON_BOOTS: u16 = 309;
    pub const GOLDEN_APPLE: u16 = 322;
    pub const REDSTONE: u16 = 331;
    pub const PAPER: u16 = 339;
    pub const BOOK: u16 = 340;
    pub const COMPASS: u16 = 345;
    pub const MAP: u16 = 358;
    pub const ENDER_PEARL: u16 = 368;
}

use items::*;

/// Chest in a chest corridor
pub const CORRIDOR_CHEST: [LootEntry; 14] = [
    LootEntry::new(ENDER_PEARL, 1, 1, 10),
    LootEntry::new(DIAMOND, 1, 3, 3),
    LootEntry::new(IRON_INGOT, 1, 5, 10),
    LootEntry::new(GOLD_INGOT, 1, 3, 5),
    LootEntry::new(REDSTONE, 4, 9, 5),
    LootEntry::new(BREAD, 1, 3, 15),
    LootEntry::new(APPLE, 1, 3, 15),
    LootEntry::new(IRON_PICKAXE, 1, 1, 5),
    LootEntry::new(IRON_SWORD, 1, 1, 5),
    LootEntry::new(IRON_CHESTPLATE, 1, 1, 5),
    LootEntry::new(IRON_HELMET, 1, 1, 5),
    LootEntry::new(IRON_LEGGINGS, 1, 1, 5),
    LootEntry::new(IRON_BOOTS, 1, 1, 5),
    LootEntry::new(GOLDEN_APPLE, 1, 1, 1),
];

/// Chests on the library floor and balcony
pub const LIBRARY_CHEST: [LootEntry; 4] = [
    LootEntry::new(BOOK, 1, 3, 20),
    LootEntry::new(PAPER, 2, 7, 20),
    LootEntry::new(MAP, 1, 1, 1),
    LootEntry::new(COMPASS, 1, 1, 1),
];

/// Chest on the storeroom loft of a room crossing
pub const STOREROOM_CHEST: [LootEntry; 7] = [
    LootEntry::new(IRON_INGOT, 1, 5, 10),
    LootEntry::new(GOLD_INGOT, 1, 3, 5),
    LootEntry::new(REDSTONE, 4, 9, 5),
    LootEntry::new(COAL, 3, 8, 10),
    LootEntry::new(BREAD, 1, 3, 15),
    LootEntry::new(APPLE, 1, 3, 15),
    LootEntry::new(IRON_PICKAXE, 1, 1, 1),
];

/// Largest stack a slot can hold for `item`
pub fn max_stack(item: u16) -> u8 {
    match item {
        ENDER_PEARL => 16,
        IRON_PICKAXE | IRON_SWORD | IRON_HELMET | IRON_CHESTPLATE | IRON_LEGGINGS | IRON_BOOTS => 1,
        _ => 64,
    }
}

/// One entry drawn by weight
///
/// # Panics
/// If the table is empty or has no positive weight.
pub fn pick<'t>(rng: &mut JavaRandom, table: &'t [LootEntry]) -> &'t LootEntry {
    let total: i32 = table.iter().map(|e| e.weight).sum();
    let mut roll = rng.next_int_bound(total);
    for entry in table {
        roll -= entry.weight;
        if roll < 0 {
            return entry;
        }
    }
    unreachable!("roll below total weight always lands on an entry")
}

/// Put `rolls` weighted draws from `table` into the chest at `pos`.
///
/// Each roll draws the entry, then its count, then a slot. Stacks larger than
/// the item's limit are split into single items, one slot draw each. A later
/// roll landing on a used slot overwrites it.
pub fn fill_chest(rng: &mut JavaRandom, table: &[LootEntry], rolls: i32, store: &mut dyn BlockStore, pos: IVec3) {
    for _ in 0..rolls {
        let entry = pick(rng, table);
        let count = entry.min as i32 + rng.next_int_bound((entry.max - entry.min) as i32 + 1);

        if count <= max_stack(entry.item) as i32 {
            let slot = rng.next_int_bound(CHEST_SLOTS as i32) as usize;
            store.set_slot(pos, slot, ItemStack { id: entry.item, count: count as u8, data: entry.data });
        } else {
            for _ in 0..count {
                let slot = rng.next_int_bound(CHEST_SLOTS as i32) as usize;
                store.set_slot(pos, slot, ItemStack { id: entry.item, count: 1, data: entry.data });
            }
        }
    }
}
