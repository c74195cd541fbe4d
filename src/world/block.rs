//! Block identifiers used by the stronghold painter

/// A block id plus its 4-bit data value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: u8,
    pub data: u8,
}

impl Block {
    pub const AIR: Self = Self::of(0);
    pub const STONE: Self = Self::of(1);
    pub const COBBLESTONE: Self = Self::of(4);
    pub const PLANKS: Self = Self::of(5);
    pub const FLOWING_WATER: Self = Self::of(8);
    pub const WATER: Self = Self::of(9);
    pub const FLOWING_LAVA: Self = Self::of(10);
    pub const LAVA: Self = Self::of(11);
    pub const COBWEB: Self = Self::of(30);
    pub const DOUBLE_SLAB: Self = Self::of(43);
    pub const STONE_SLAB: Self = Self::of(44);
    pub const BOOKSHELF: Self = Self::of(47);
    pub const TORCH: Self = Self::of(50);
    pub const SPAWNER: Self = Self::of(52);
    pub const CHEST: Self = Self::of(54);
    pub const WOODEN_DOOR: Self = Self::of(64);
    pub const LADDER: Self = Self::of(65);
    pub const COBBLESTONE_STAIRS: Self = Self::of(67);
    pub const IRON_DOOR: Self = Self::of(71);
    pub const STONE_BUTTON: Self = Self::of(77);
    pub const FENCE: Self = Self::of(85);
    pub const SILVERFISH_STONE: Self = Self::of(97);
    pub const STONE_BRICKS: Self = Self::of(98);
    pub const IRON_BARS: Self = Self::of(101);
    pub const STONE_BRICK_STAIRS: Self = Self::of(109);
    pub const END_PORTAL_FRAME: Self = Self::of(120);

    /// Data bit marking an end portal frame that holds an eye
    pub const FRAME_EYE_BIT: u8 = 0x4;

    pub const fn of(id: u8) -> Self {
        Self { id, data: 0 }
    }

    /// Same block with a different data value
    pub const fn with_data(self, data: u8) -> Self {
        Self { id: self.id, data }
    }

    pub fn is_air(&self) -> bool {
        self.id == 0
    }

    /// Water or lava, still or flowing
    pub fn is_liquid(&self) -> bool {
        matches!(self.id, 8..=11)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquids() {
        assert!(Block::WATER.is_liquid());
        assert!(Block::FLOWING_LAVA.is_liquid());
        assert!(!Block::STONE_BRICKS.is_liquid());
        assert!(!Block::AIR.is_liquid());
    }

    #[test]
    fn test_with_data_keeps_id() {
        let cracked = Block::STONE_BRICKS.with_data(2);
        assert_eq!(cracked.id, Block::STONE_BRICKS.id);
        assert_eq!(cracked.data, 2);
        assert_ne!(cracked, Block::STONE_BRICKS);
    }
}
