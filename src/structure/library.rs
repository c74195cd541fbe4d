//! Stronghold piece library: templates, creation draws and child exits
//!
//! Each kind is a fixed local template (offset + size) plus the random fields
//! rolled when it is accepted. Random fields are drawn only after a candidate
//! box passes placement, so rejected candidates leave the generator untouched.

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;
use crate::math::facing::{Exit, Facing};
use crate::rng::JavaRandom;
use crate::structure::context::GenerationContext;
use crate::structure::piece::{Door, Piece, PieceKind, PieceVariant};
use crate::structure::placement;
use crate::structure::pool::Choice;

/// Floor height of the root before vertical settling
pub const START_Y: i32 = 64;

/// Local placement template of a kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Template {
    pub offset: IVec3,
    pub size: IVec3,
}

impl Template {
    const fn new(offset: [i32; 3], size: [i32; 3]) -> Self {
        Self {
            offset: IVec3::new(offset[0], offset[1], offset[2]),
            size: IVec3::new(size[0], size[1], size[2]),
        }
    }

    /// World box for this template at an exit
    pub fn place(&self, pos: IVec3, facing: Facing) -> BoundingBox {
        BoundingBox::oriented(pos, self.offset, self.size, facing)
    }
}

const START: Template = Template::new([0, 0, 0], [5, 11, 5]);
const SPIRAL_STAIRS: Template = Template::new([-1, -7, 0], [5, 11, 5]);
const CORRIDOR: Template = Template::new([-1, -1, 0], [5, 5, 7]);
const PRISON: Template = Template::new([-1, -1, 0], [9, 5, 11]);
const TURN: Template = Template::new([-1, -1, 0], [5, 5, 5]);
const ROOM_CROSSING: Template = Template::new([-4, -1, 0], [11, 7, 11]);
const STRAIGHT_STAIRS: Template = Template::new([-1, -7, 0], [5, 11, 8]);
const FIVE_WAY_CROSSING: Template = Template::new([-4, -3, 0], [10, 9, 11]);
const TALL_LIBRARY: Template = Template::new([-4, -1, 0], [14, 11, 15]);
const SHORT_LIBRARY: Template = Template::new([-4, -1, 0], [14, 6, 15]);
const PORTAL_ROOM: Template = Template::new([-4, -1, 0], [11, 8, 16]);

/// Primary template of a kind. Libraries fall back to a short variant.
///
/// # Panics
/// For [`PieceKind::FillerCorridor`], whose length is decided by the gap it fills.
pub fn template(kind: PieceKind) -> Template {
    match kind {
        PieceKind::Start => START,
        PieceKind::SpiralStairs => SPIRAL_STAIRS,
        PieceKind::Straight | PieceKind::ChestCorridor => CORRIDOR,
        PieceKind::Prison => PRISON,
        PieceKind::LeftTurn | PieceKind::RightTurn => TURN,
        PieceKind::RoomCrossing => ROOM_CROSSING,
        PieceKind::StraightStairs => STRAIGHT_STAIRS,
        PieceKind::FiveWayCrossing => FIVE_WAY_CROSSING,
        PieceKind::Library => TALL_LIBRARY,
        PieceKind::PortalRoom => PORTAL_ROOM,
        PieceKind::FillerCorridor => panic!("filler corridors have no fixed template"),
    }
}

/// Root piece: a spiral staircase at `(x, START_Y, z)` with a random facing
pub fn start_piece(rng: &mut JavaRandom, x: i32, z: i32) -> Piece {
    let facing = Facing::from_id(rng.next_int_bound(4));
    Piece {
        variant: PieceVariant::Start,
        bounds: START.place(IVec3::new(x, START_Y, z), Facing::South),
        facing,
        depth: 0,
    }
}

/// Factory for the weighted kinds.
///
/// Returns `None` without drawing when no template fits at `pos`.
///
/// # Panics
/// For kinds that are never chosen from the pool (start, filler).
pub fn try_create(
    kind: PieceKind,
    pieces: &[Piece],
    rng: &mut JavaRandom,
    pos: IVec3,
    facing: Facing,
    depth: u32,
) -> Option<Piece> {
    let bounds = match kind {
        PieceKind::Start | PieceKind::FillerCorridor => {
            panic!("{kind} cannot be created through the pool")
        }
        PieceKind::Library => [TALL_LIBRARY, SHORT_LIBRARY]
            .iter()
            .map(|t| t.place(pos, facing))
            .find(|b| placement::fits(pieces, b))?,
        _ => Some(template(kind).place(pos, facing))
            .filter(|b| placement::fits(pieces, b))?,
    };

    Some(Piece {
        variant: roll_variant(kind, rng, &bounds),
        bounds,
        facing,
        depth,
    })
}

/// Draw the per-instance fields of an accepted piece
fn roll_variant(kind: PieceKind, rng: &mut JavaRandom, bounds: &BoundingBox) -> PieceVariant {
    match kind {
        PieceKind::SpiralStairs => PieceVariant::SpiralStairs { door: Door::random(rng) },
        PieceKind::Straight => {
            let door = Door::random(rng);
            let left_exit = rng.next_int_bound(2) == 0;
            let right_exit = rng.next_int_bound(2) == 0;
            PieceVariant::Straight { door, left_exit, right_exit }
        }
        PieceKind::ChestCorridor => PieceVariant::ChestCorridor { door: Door::random(rng) },
        PieceKind::Prison => PieceVariant::Prison { door: Door::random(rng) },
        PieceKind::LeftTurn => PieceVariant::LeftTurn { door: Door::random(rng) },
        PieceKind::RightTurn => PieceVariant::RightTurn { door: Door::random(rng) },
        PieceKind::RoomCrossing => {
            let door = Door::random(rng);
            let style = rng.next_int_bound(5) as u8;
            PieceVariant::RoomCrossing { door, style }
        }
        PieceKind::StraightStairs => PieceVariant::StraightStairs { door: Door::random(rng) },
        PieceKind::FiveWayCrossing => {
            let door = Door::random(rng);
            let left_low = rng.next_bool();
            let left_high = rng.next_bool();
            let right_low = rng.next_bool();
            let right_high = rng.next_int_bound(3) > 0;
            PieceVariant::FiveWayCrossing { door, left_low, left_high, right_low, right_high }
        }
        PieceKind::Library => PieceVariant::Library {
            door: Door::random(rng),
            tall: bounds.height() > SHORT_LIBRARY.size.y,
        },
        PieceKind::PortalRoom => PieceVariant::PortalRoom,
        PieceKind::Start | PieceKind::FillerCorridor => unreachable!("not a pool kind"),
    }
}

/// Expand one piece: try each of its exits in the kind's fixed order
pub fn spawn_children(ctx: &mut GenerationContext<'_>, index: usize) {
    let piece = ctx.pieces[index];
    let bounds = piece.bounds;
    let facing = piece.facing;
    let forward = |dx, dy| facing.forward_exit(&bounds, dx, dy);
    let left = |dy, dz| facing.left_exit(&bounds, dy, dz);
    let right = |dy, dz| facing.right_exit(&bounds, dy, dz);

    match piece.variant {
        PieceVariant::Start => {
            ctx.pool.force_next(PieceKind::FiveWayCrossing);
            grow(ctx, index, forward(1, 1));
        }
        PieceVariant::SpiralStairs { .. }
        | PieceVariant::ChestCorridor { .. }
        | PieceVariant::Prison { .. }
        | PieceVariant::StraightStairs { .. } => {
            grow(ctx, index, forward(1, 1));
        }
        PieceVariant::Straight { left_exit, right_exit, .. } => {
            grow(ctx, index, forward(1, 1));
            if left_exit {
                grow(ctx, index, left(1, 2));
            }
            if right_exit {
                grow(ctx, index, right(1, 2));
            }
        }
        PieceVariant::LeftTurn { .. } => {
            let exit = if matches!(facing, Facing::South | Facing::West) { right(1, 1) } else { left(1, 1) };
            grow(ctx, index, exit);
        }
        PieceVariant::RightTurn { .. } => {
            let exit = if matches!(facing, Facing::South | Facing::West) { left(1, 1) } else { right(1, 1) };
            grow(ctx, index, exit);
        }
        PieceVariant::RoomCrossing { .. } => {
            grow(ctx, index, forward(4, 1));
            grow(ctx, index, left(1, 4));
            grow(ctx, index, right(1, 4));
        }
        PieceVariant::FiveWayCrossing { left_low, left_high, right_low, right_high, .. } => {
            // Side openings are authored for south/east; west/north swap their heights.
            let (low, high) = match facing {
                Facing::West | Facing::North => (5, 3),
                Facing::South | Facing::East => (3, 5),
            };
            grow(ctx, index, forward(5, 1));
            if left_low {
                grow(ctx, index, left(low, 1));
            }
            if left_high {
                grow(ctx, index, left(high, 7));
            }
            if right_low {
                grow(ctx, index, right(low, 1));
            }
            if right_high {
                grow(ctx, index, right(high, 7));
            }
        }
        PieceVariant::PortalRoom => {
            ctx.portal_room = Some(index);
        }
        PieceVariant::Library { .. } | PieceVariant::FillerCorridor { .. } => {}
    }
}

/// Try to attach one child at `exit` of the piece at `parent`
fn grow(ctx: &mut GenerationContext<'_>, parent: usize, exit: Exit) -> Option<usize> {
    let parent_depth = ctx.pieces[parent].depth;
    if !placement::within_reach(&ctx.pieces[0].bounds, parent_depth, exit.pos) {
        return None;
    }

    let depth = parent_depth + 1;
    let piece = next_piece(ctx, exit, depth)?;
    Some(ctx.place(piece))
}

/// Weighted choice at an exit, with the filler corridor as the last resort
fn next_piece(ctx: &mut GenerationContext<'_>, exit: Exit, depth: u32) -> Option<Piece> {
    let pieces = &ctx.pieces;
    let choice = ctx.pool.choose_next(ctx.rng, depth, |kind, rng| {
        try_create(kind, pieces, rng, exit.pos, exit.facing, depth)
    });

    match choice {
        Choice::Placed(piece) => Some(piece),
        Choice::Exhausted => None,
        Choice::NoFit => {
            let bounds = placement::filler_bounds(pieces, exit.pos, exit.facing)?;
            Some(Piece {
                variant: PieceVariant::FillerCorridor { steps: exit.facing.length_of(&bounds) },
                bounds,
                facing: exit.facing,
                depth,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::pool::ComponentTypePool;

    #[test]
    fn test_start_piece_geometry() {
        let mut rng = JavaRandom::new(1);
        let root = start_piece(&mut rng, 2, 2);
        assert_eq!(root.bounds, BoundingBox::from_coords(2, 64, 2, 6, 74, 6));
        assert_eq!(root.depth, 0);
        assert_eq!(root.kind(), PieceKind::Start);
    }

    #[test]
    fn test_rejected_candidate_draws_nothing() {
        let mut rng = JavaRandom::new(7);
        let blocker = start_piece(&mut rng, 0, 0);
        let before = rng.clone();
        // Exit right at the blocker's wall: every template overlaps it.
        let pos = IVec3::new(2, 65, 0);
        let created = try_create(PieceKind::Prison, &[blocker], &mut rng, pos, Facing::South, 1);
        assert!(created.is_none());
        assert_eq!(rng, before);
    }

    #[test]
    fn test_library_falls_back_to_short_template() {
        let mut rng = JavaRandom::new(3);
        let pos = IVec3::new(0, 40, 0);
        let tall = TALL_LIBRARY.place(pos, Facing::South);
        // A piece sitting above the short library's roof but inside the tall one.
        let roof = Piece {
            variant: PieceVariant::PortalRoom,
            bounds: BoundingBox::from_coords(tall.min_x(), tall.min_y() + 7, tall.min_z(), tall.min_x(), tall.max_y(), tall.min_z()),
            facing: Facing::South,
            depth: 1,
        };
        let lib = try_create(PieceKind::Library, &[roof], &mut rng, pos, Facing::South, 6).unwrap();
        assert_eq!(lib.bounds.height(), 6);
        assert_eq!(lib.variant, PieceVariant::Library { door: lib.variant.door().unwrap(), tall: false });
    }

    #[test]
    #[should_panic]
    fn test_filler_is_not_a_pool_kind() {
        let mut rng = JavaRandom::new(0);
        try_create(PieceKind::FillerCorridor, &[], &mut rng, IVec3::new(0, 40, 0), Facing::South, 1);
    }

    #[test]
    fn test_start_forces_crossing_first() {
        let mut rng = JavaRandom::new(555);
        let mut ctx = GenerationContext::new(&mut rng, ComponentTypePool::stronghold());
        let root = start_piece(ctx.rng, 2, 2);
        ctx.pieces.push(root);
        spawn_children(&mut ctx, 0);
        assert_eq!(ctx.pieces.len(), 2);
        assert_eq!(ctx.pieces[1].kind(), PieceKind::FiveWayCrossing);
        assert_eq!(ctx.pieces[1].depth, 1);
        assert_eq!(ctx.pending.len(), 1);
    }

    #[test]
    fn test_children_attach_outside_parent() {
        let mut rng = JavaRandom::new(99);
        let mut ctx = GenerationContext::new(&mut rng, ComponentTypePool::stronghold());
        let root = start_piece(ctx.rng, 2, 2);
        ctx.pieces.push(root);
        spawn_children(&mut ctx, 0);
        let crossing = 1;
        spawn_children(&mut ctx, crossing);
        for child in &ctx.pieces[2..] {
            assert_eq!(child.depth, 2);
            assert!(!child.bounds.intersects(&ctx.pieces[crossing].bounds));
        }
    }

    #[test]
    fn test_every_child_is_one_deeper_than_its_parent() {
        for seed in 0..12 {
            let mut rng = JavaRandom::new(seed);
            let mut ctx = GenerationContext::new(&mut rng, ComponentTypePool::stronghold());
            let root = start_piece(ctx.rng, 2, 2);
            ctx.pieces.push(root);

            let mut next = Some(0);
            let mut expansions = 0;
            while let Some(index) = next {
                let before = ctx.pieces.len();
                spawn_children(&mut ctx, index);
                let parent_depth = ctx.pieces[index].depth;
                for child in &ctx.pieces[before..] {
                    assert_eq!(child.depth, parent_depth + 1, "seed {seed}: child of piece {index}");
                }
                expansions += 1;
                next = ctx.pending.pop_random(ctx.rng);
            }

            assert_eq!(ctx.pieces[0].depth, 0);
            assert_eq!(expansions, ctx.pieces.len());
        }
    }
}
