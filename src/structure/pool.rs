//! Weighted selection of the next piece kind
//!
//! The pool owns one [`PieceWeight`] per growable kind. Kinds leave the live
//! pool once they reach their limit, so the total weight shrinks over a build.

use crate::rng::JavaRandom;
use crate::structure::piece::{Piece, PieceKind};

/// Draws per `choose_next` call before giving up on the weighted kinds
pub const MAX_ATTEMPTS: usize = 5;

/// Selection descriptor for one kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceWeight {
    pub kind: PieceKind,
    pub weight: i32,
    /// Maximum instances per structure, 0 for unlimited
    pub limit: u32,
    pub spawned: u32,
    /// Only eligible for pieces deeper than this
    pub min_depth: Option<u32>,
}

impl PieceWeight {
    const fn new(kind: PieceKind, weight: i32, limit: u32) -> Self {
        Self { kind, weight, limit, spawned: 0, min_depth: None }
    }

    const fn deeper_than(mut self, depth: u32) -> Self {
        self.min_depth = Some(depth);
        self
    }

    pub fn has_capacity(&self) -> bool {
        self.limit == 0 || self.spawned < self.limit
    }

    pub fn is_eligible(&self, depth: u32) -> bool {
        self.has_capacity() && self.min_depth.is_none_or(|min| depth > min)
    }
}

/// Stronghold kinds in selection order
pub const STRONGHOLD_WEIGHTS: [PieceWeight; 11] = [
    PieceWeight::new(PieceKind::Straight, 40, 0),
    PieceWeight::new(PieceKind::Prison, 5, 5),
    PieceWeight::new(PieceKind::LeftTurn, 20, 0),
    PieceWeight::new(PieceKind::RightTurn, 20, 0),
    PieceWeight::new(PieceKind::RoomCrossing, 10, 6),
    PieceWeight::new(PieceKind::StraightStairs, 5, 5),
    PieceWeight::new(PieceKind::SpiralStairs, 5, 5),
    PieceWeight::new(PieceKind::FiveWayCrossing, 5, 4),
    PieceWeight::new(PieceKind::ChestCorridor, 5, 4),
    PieceWeight::new(PieceKind::Library, 10, 2).deeper_than(4),
    PieceWeight::new(PieceKind::PortalRoom, 20, 1).deeper_than(5),
];

/// Result of one `choose_next` call
#[derive(Debug, PartialEq, Eq)]
pub enum Choice {
    Placed(Piece),
    /// Every limited kind is used up; growth stops here without a fallback
    Exhausted,
    /// No weighted kind fit within the attempt budget
    NoFit,
}

/// Live pool for one structure build
#[derive(Clone, Debug)]
pub struct ComponentTypePool {
    kinds: Vec<PieceWeight>,
    live: Vec<PieceWeight>,
    last_chosen: Option<PieceKind>,
    forced: Option<PieceKind>,
}

impl ComponentTypePool {
    /// Pool over `kinds`, already prepared
    pub fn new(kinds: &[PieceWeight]) -> Self {
        let mut pool = Self {
            kinds: kinds.to_vec(),
            live: Vec::with_capacity(kinds.len()),
            last_chosen: None,
            forced: None,
        };
        pool.prepare();
        pool
    }

    pub fn stronghold() -> Self {
        Self::new(&STRONGHOLD_WEIGHTS)
    }

    /// Reset counters and refill the live pool
    pub fn prepare(&mut self) {
        self.live = self.kinds.iter()
            .map(|w| PieceWeight { spawned: 0, ..*w })
            .collect();
        self.last_chosen = None;
        self.forced = None;
    }

    /// Sum of weights still in the live pool
    pub fn total_weight(&self) -> i32 {
        self.live.iter().map(|w| w.weight).sum()
    }

    /// True while some kind with a finite limit can still be placed
    pub fn has_limited_capacity(&self) -> bool {
        self.live.iter().any(|w| w.limit > 0 && w.spawned < w.limit)
    }

    /// Try `kind` first on the next `choose_next` call, outside the weighting.
    /// A forced piece still counts toward its kind's limit.
    pub fn force_next(&mut self, kind: PieceKind) {
        self.forced = Some(kind);
    }

    pub fn last_chosen(&self) -> Option<PieceKind> {
        self.last_chosen
    }

    pub fn live_kinds(&self) -> impl Iterator<Item = &PieceWeight> {
        self.live.iter()
    }

    /// Pick and build the next piece.
    ///
    /// `try_create` is the factory for a kind at the caller's candidate
    /// position; it returns `None` when the kind does not fit there. A factory
    /// miss keeps walking the pool with the same draw, so the next kind in
    /// order gets a chance before a new number is drawn.
    pub fn choose_next<F>(&mut self, rng: &mut JavaRandom, depth: u32, mut try_create: F) -> Choice
    where
        F: FnMut(PieceKind, &mut JavaRandom) -> Option<Piece>,
    {
        if !self.has_limited_capacity() {
            return Choice::Exhausted;
        }

        if let Some(kind) = self.forced.take() {
            if let Some(piece) = try_create(kind, rng) {
                if let Some(i) = self.live.iter().position(|w| w.kind == kind) {
                    self.record_spawn(i);
                }
                return Choice::Placed(piece);
            }
        }

        for _ in 0..MAX_ATTEMPTS {
            let mut roll = rng.next_int_bound(self.total_weight());

            for i in 0..self.live.len() {
                let candidate = self.live[i];
                roll -= candidate.weight;
                if roll >= 0 {
                    continue;
                }

                let repeat = self.last_chosen == Some(candidate.kind) && self.live.len() >= 2;
                if !candidate.is_eligible(depth) || repeat {
                    break;
                }

                if let Some(piece) = try_create(candidate.kind, rng) {
                    self.record_spawn(i);
                    self.last_chosen = Some(candidate.kind);
                    return Choice::Placed(piece);
                }
            }
        }

        Choice::NoFit
    }

    /// Count a placed instance of `live[i]`, retiring the kind at its limit
    fn record_spawn(&mut self, i: usize) {
        self.live[i].spawned += 1;
        if !self.live[i].has_capacity() {
            self.live.remove(i);
        }
    }
}
