//! Stronghold Scan - deterministic stronghold layouts and portal eye search
//!
//! Rebuilds the stronghold a world seed would generate, piece by piece and
//! draw by draw, then paints its portal room to see how many frames already
//! hold an eye. The scanner runs that over ranges of seeds in parallel.

pub mod core;
pub mod math;
pub mod rng;
pub mod world;
pub mod terrain;
pub mod structure;
pub mod search;
