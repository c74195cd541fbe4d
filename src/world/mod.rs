//! Block-level output sink for realized structures
//!
//! The stronghold painter writes into anything implementing [`BlockStore`].
//! [`SparseBlockStore`] is the in-memory stand-in used by the scanner: every
//! cell that was never written reads back as the configured terrain block.

pub mod block;
pub mod store;

pub use block::Block;
pub use store::{BlockStore, ItemStack, SparseBlockStore, CHEST_SLOTS};
