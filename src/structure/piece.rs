//! Stronghold pieces: the closed set of kinds and their per-instance state

use crate::core::types::IVec3;
use crate::math::bounds::BoundingBox;
use crate::math::facing::Facing;
use crate::rng::JavaRandom;

/// Plain tag for a piece kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum PieceKind {
    /// Root spiral staircase that seeds the layout
    Start,
    SpiralStairs,
    /// Corridor with optional side openings
    Straight,
    ChestCorridor,
    Prison,
    LeftTurn,
    RightTurn,
    RoomCrossing,
    StraightStairs,
    FiveWayCrossing,
    Library,
    PortalRoom,
    /// Short connector used when no weighted kind fits
    FillerCorridor,
}

impl PieceKind {
    pub const ALL: [PieceKind; 13] = [
        PieceKind::Start,
        PieceKind::SpiralStairs,
        PieceKind::Straight,
        PieceKind::ChestCorridor,
        PieceKind::Prison,
        PieceKind::LeftTurn,
        PieceKind::RightTurn,
        PieceKind::RoomCrossing,
        PieceKind::StraightStairs,
        PieceKind::FiveWayCrossing,
        PieceKind::Library,
        PieceKind::PortalRoom,
        PieceKind::FillerCorridor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Start => "start",
            PieceKind::SpiralStairs => "spiral_stairs",
            PieceKind::Straight => "straight",
            PieceKind::ChestCorridor => "chest_corridor",
            PieceKind::Prison => "prison",
            PieceKind::LeftTurn => "left_turn",
            PieceKind::RightTurn => "right_turn",
            PieceKind::RoomCrossing => "room_crossing",
            PieceKind::StraightStairs => "straight_stairs",
            PieceKind::FiveWayCrossing => "five_way_crossing",
            PieceKind::Library => "library",
            PieceKind::PortalRoom => "portal_room",
            PieceKind::FillerCorridor => "filler_corridor",
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Entrance style painted on a piece's back wall
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Door {
    #[default]
    Opening,
    Wood,
    Grates,
    Iron,
}

impl Door {
    /// One draw: two in five chances of a bare opening
    pub fn random(rng: &mut JavaRandom) -> Self {
        match rng.next_int_bound(5) {
            2 => Door::Wood,
            3 => Door::Grates,
            4 => Door::Iron,
            _ => Door::Opening,
        }
    }
}

/// Kind plus the fields rolled when the piece was created
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceVariant {
    Start,
    SpiralStairs { door: Door },
    Straight { door: Door, left_exit: bool, right_exit: bool },
    ChestCorridor { door: Door },
    Prison { door: Door },
    LeftTurn { door: Door },
    RightTurn { door: Door },
    /// `style` 0..5; styles 3 and 4 are bare rooms
    RoomCrossing { door: Door, style: u8 },
    StraightStairs { door: Door },
    FiveWayCrossing {
        door: Door,
        left_low: bool,
        left_high: bool,
        right_low: bool,
        right_high: bool,
    },
    Library { door: Door, tall: bool },
    PortalRoom,
    FillerCorridor { steps: i32 },
}

impl PieceVariant {
    pub fn kind(&self) -> PieceKind {
        match self {
            PieceVariant::Start => PieceKind::Start,
            PieceVariant::SpiralStairs { .. } => PieceKind::SpiralStairs,
            PieceVariant::Straight { .. } => PieceKind::Straight,
            PieceVariant::ChestCorridor { .. } => PieceKind::ChestCorridor,
            PieceVariant::Prison { .. } => PieceKind::Prison,
            PieceVariant::LeftTurn { .. } => PieceKind::LeftTurn,
            PieceVariant::RightTurn { .. } => PieceKind::RightTurn,
            PieceVariant::RoomCrossing { .. } => PieceKind::RoomCrossing,
            PieceVariant::StraightStairs { .. } => PieceKind::StraightStairs,
            PieceVariant::FiveWayCrossing { .. } => PieceKind::FiveWayCrossing,
            PieceVariant::Library { .. } => PieceKind::Library,
            PieceVariant::PortalRoom => PieceKind::PortalRoom,
            PieceVariant::FillerCorridor { .. } => PieceKind::FillerCorridor,
        }
    }

    /// Entrance style, for kinds that paint one
    pub fn door(&self) -> Option<Door> {
        match *self {
            PieceVariant::SpiralStairs { door }
            | PieceVariant::Straight { door, .. }
            | PieceVariant::ChestCorridor { door }
            | PieceVariant::Prison { door }
            | PieceVariant::LeftTurn { door }
            | PieceVariant::RightTurn { door }
            | PieceVariant::RoomCrossing { door, .. }
            | PieceVariant::StraightStairs { door }
            | PieceVariant::FiveWayCrossing { door, .. }
            | PieceVariant::Library { door, .. } => Some(door),
            PieceVariant::Start => Some(Door::Opening),
            PieceVariant::PortalRoom | PieceVariant::FillerCorridor { .. } => None,
        }
    }
}

/// One placed unit of a structure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub variant: PieceVariant,
    pub bounds: BoundingBox,
    pub facing: Facing,
    /// Steps from the root; the root is 0
    pub depth: u32,
}

impl Piece {
    pub fn kind(&self) -> PieceKind {
        self.variant.kind()
    }

    /// World position of a local coordinate of this piece
    pub fn to_world(&self, lx: i32, ly: i32, lz: i32) -> IVec3 {
        self.facing.to_world(&self.bounds, lx, ly, lz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_kind_tags() {
        let v = PieceVariant::Library { door: Door::Wood, tall: true };
        assert_eq!(v.kind(), PieceKind::Library);
        assert_eq!(v.door(), Some(Door::Wood));
        assert_eq!(PieceVariant::PortalRoom.door(), None);
    }

    #[test]
    fn test_door_draw_consumes_one_int() {
        let mut a = JavaRandom::new(99);
        let mut b = JavaRandom::new(99);
        Door::random(&mut a);
        b.next_int_bound(5);
        assert_eq!(a.next_int(), b.next_int());
    }

    #[test]
    fn test_kind_names_unique() {
        let names: std::collections::HashSet<_> = PieceKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), PieceKind::ALL.len());
    }
}
