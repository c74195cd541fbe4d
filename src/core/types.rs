//! Core type aliases and re-exports

pub use glam::IVec3;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;

/// World seed. Every generated structure is a pure function of it.
pub type Seed = i64;

/// Horizontal chunk coordinate (16×16 block columns)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    /// Create a new chunk coordinate
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk containing a world block position
    pub fn containing(x: i32, z: i32) -> Self {
        Self { x: x >> 4, z: z >> 4 }
    }

    /// World x of the chunk's first block column
    pub fn block_x(&self) -> i32 {
        self.x << 4
    }

    /// World z of the chunk's first block column
    pub fn block_z(&self) -> i32 {
        self.z << 4
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
