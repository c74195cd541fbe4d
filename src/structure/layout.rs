//! Stronghold assembly: worklist growth, vertical settling and the retry loop

use crate::core::types::{ChunkPos, IVec3};
use crate::math::bounds::BoundingBox;
use crate::rng::JavaRandom;
use crate::structure::context::GenerationContext;
use crate::structure::library;
use crate::structure::piece::{Piece, PieceKind};
use crate::structure::pool::ComponentTypePool;

/// Sea level the settled structure must stay under
pub const SEA_LEVEL: i32 = 63;
/// Minimum gap kept between the structure top and sea level
pub const SURFACE_MARGIN: i32 = 10;

/// A finished, valid stronghold layout.
///
/// Immutable once built; realization reads it without changing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    chunk: ChunkPos,
    pieces: Vec<Piece>,
    bounds: BoundingBox,
    portal_room: usize,
    attempts: u32,
}

impl Structure {
    /// Anchor chunk the layout was built for
    pub fn chunk(&self) -> ChunkPos {
        self.chunk
    }

    /// Pieces in placement order; index 0 is the root
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Union of every piece box
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn portal_room_index(&self) -> usize {
        self.portal_room
    }

    pub fn portal_room(&self) -> &Piece {
        &self.pieces[self.portal_room]
    }

    /// Builds it took to get a valid layout, this one included
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn count_of(&self, kind: PieceKind) -> usize {
        self.pieces.iter().filter(|p| p.kind() == kind).count()
    }
}

/// Grow one layout from a root at block `(x, z)`.
///
/// Returns the settled pieces and the portal room index if one was placed.
fn build_once(rng: &mut JavaRandom, x: i32, z: i32) -> (Vec<Piece>, Option<usize>) {
    let mut ctx = GenerationContext::new(rng, ComponentTypePool::stronghold());
    let root = library::start_piece(ctx.rng, x, z);
    ctx.pieces.push(root);
    library::spawn_children(&mut ctx, 0);

    while let Some(index) = ctx.pending.pop_random(ctx.rng) {
        library::spawn_children(&mut ctx, index);
    }

    let GenerationContext { rng, mut pieces, portal_room, .. } = ctx;
    settle(rng, &mut pieces, SEA_LEVEL, SURFACE_MARGIN);
    (pieces, portal_room)
}

/// Shift every piece vertically so the union sits below `sea_level - margin`.
///
/// Returns the union after the shift, or `None` for an empty list (no draws).
pub fn settle(rng: &mut JavaRandom, pieces: &mut [Piece], sea_level: i32, margin: i32) -> Option<BoundingBox> {
    let union = BoundingBox::union_all(pieces.iter().map(|p| &p.bounds))?;
    let budget = sea_level - margin;
    let mut top = union.height() + 1;
    if top < budget {
        top += rng.next_int_bound(budget - top);
    }

    let delta = IVec3::new(0, top - union.max_y(), 0);
    for piece in pieces.iter_mut() {
        piece.bounds.translate(delta);
    }
    Some(union.translated(delta))
}

/// Build the stronghold anchored at `chunk`, retrying until it has a portal room.
///
/// `rng` must be the structure generator for this chunk; failed attempts keep
/// consuming it, so the result depends only on its starting state.
pub fn generate(rng: &mut JavaRandom, chunk: ChunkPos) -> Structure {
    let (x, z) = (chunk.block_x() + 2, chunk.block_z() + 2);
    let mut attempts = 0;

    loop {
        attempts += 1;
        let (pieces, portal_room) = build_once(rng, x, z);

        match (portal_room, BoundingBox::union_all(pieces.iter().map(|p| &p.bounds))) {
            (Some(portal_room), Some(bounds)) => {
                log::debug!(
                    "Stronghold at chunk {chunk}: {} pieces after {attempts} attempt(s)",
                    pieces.len()
                );
                return Structure { chunk, pieces, bounds, portal_room, attempts };
            }
            _ => log::debug!(
                "Stronghold at chunk {chunk}: attempt {attempts} has no portal room ({} pieces), retrying",
                pieces.len()
            ),
        }
    }
}
