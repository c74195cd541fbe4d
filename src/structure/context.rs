//! Per-build generation state
//!
//! Everything a build mutates lives here and is passed explicitly, so any
//! number of builds can run side by side on different threads.

use crate::rng::JavaRandom;
use crate::structure::piece::Piece;
use crate::structure::pool::ComponentTypePool;
use crate::structure::scheduler::Worklist;

/// State of one structure build attempt
pub struct GenerationContext<'r> {
    pub rng: &'r mut JavaRandom,
    pub pool: ComponentTypePool,
    /// Every piece placed so far; index 0 is the root
    pub pieces: Vec<Piece>,
    pub pending: Worklist,
    /// Index of the portal room once one has expanded
    pub portal_room: Option<usize>,
}

impl<'r> GenerationContext<'r> {
    pub fn new(rng: &'r mut JavaRandom, pool: ComponentTypePool) -> Self {
        Self {
            rng,
            pool,
            pieces: Vec::new(),
            pending: Worklist::new(),
            portal_room: None,
        }
    }

    /// Append a piece and queue it for expansion
    pub fn place(&mut self, piece: Piece) -> usize {
        let index = self.pieces.len();
        self.pieces.push(piece);
        self.pending.push(index);
        index
    }
}
