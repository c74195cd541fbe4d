//! Stronghold layout engine
//!
//! A layout grows from a root staircase. Pending pieces are expanded in random
//! order; each exit asks the weighted [`pool`] for a kind that fits, with a
//! short filler corridor as the last resort. Finished layouts are settled
//! underground and rebuilt until they contain a portal room.

pub mod context;
pub mod layout;
pub mod library;
pub mod loot;
pub mod paint;
pub mod piece;
pub mod placement;
pub mod pool;
pub mod realize;
pub mod scheduler;

pub use context::GenerationContext;
pub use layout::{generate, Structure};
pub use piece::{Door, Piece, PieceKind, PieceVariant};
pub use pool::{ComponentTypePool, PieceWeight, STRONGHOLD_WEIGHTS};
pub use realize::{EyeCounter, FeatureSink, RealizeState, Realized};
