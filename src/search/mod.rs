//! Seed search: stronghold anchors, eye counting and parallel scanning

pub mod config;
pub mod finder;
pub mod placement;
pub mod scan;

pub use config::{BiomeConfig, ScanConfig};
pub use finder::{SeedReport, StrongholdFinder, StrongholdReport};
pub use scan::{ScanSummary, Scanner};
