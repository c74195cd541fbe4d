//! Placement rules: collision, depth floor, growth caps, filler fallback

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;
use crate::math::facing::Facing;
use crate::structure::piece::Piece;

/// Pieces must keep their floor above this height
pub const MIN_FLOOR_Y: i32 = 10;
/// Filler corridors only need to stay above bedrock
pub const MIN_FILLER_FLOOR_Y: i32 = 1;
/// Parents deeper than this spawn nothing
pub const MAX_DEPTH: u32 = 50;
/// Largest per-axis horizontal distance from the root's min corner to an exit
pub const MAX_DRIFT: i32 = 112;

const FILLER_OFFSET: IVec3 = IVec3::new(-1, -1, 0);
const FILLER_PROBE_LENGTH: i32 = 4;

/// First placed piece overlapping `bounds`
pub fn find_intersecting<'a>(pieces: &'a [Piece], bounds: &BoundingBox) -> Option<&'a Piece> {
    pieces.iter().find(|p| p.bounds.intersects(bounds))
}

/// Deep enough and clear of every placed piece
pub fn fits(pieces: &[Piece], bounds: &BoundingBox) -> bool {
    bounds.min_y() > MIN_FLOOR_Y && find_intersecting(pieces, bounds).is_none()
}

/// Whether a piece at `parent_depth` may open an exit at `pos`
pub fn within_reach(root: &BoundingBox, parent_depth: u32, pos: IVec3) -> bool {
    parent_depth <= MAX_DEPTH
        && (pos.x - root.min_x()).abs() <= MAX_DRIFT
        && (pos.z - root.min_z()).abs() <= MAX_DRIFT
}

/// Bounds for a short corridor that runs up to the piece ahead.
///
/// Probes four blocks ahead; the first piece hit must sit on the same floor.
/// The corridor is the longest one (three blocks down to one) that stays
/// clear of every placed piece, so it ends flush against the blocker.
pub fn filler_bounds(pieces: &[Piece], pos: IVec3, facing: Facing) -> Option<BoundingBox> {
    let probe = BoundingBox::oriented(pos, FILLER_OFFSET, IVec3::new(5, 5, FILLER_PROBE_LENGTH), facing);
    let blocker = find_intersecting(pieces, &probe)?;

    if blocker.bounds.min_y() != probe.min_y() {
        return None;
    }

    (1..FILLER_PROBE_LENGTH)
        .rev()
        .map(|length| BoundingBox::oriented(pos, FILLER_OFFSET, IVec3::new(5, 5, length), facing))
        .find(|bounds| find_intersecting(pieces, bounds).is_none())
        .filter(|bounds| bounds.min_y() > MIN_FILLER_FLOOR_Y)
}
