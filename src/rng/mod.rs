//! Deterministic random number generation
//!
//! Every layout decision is a draw from a [`JavaRandom`]. The generator is
//! owned by exactly one build at a time and is passed down explicitly; there is
//! no shared or thread-local instance.

pub mod java_random;

pub use java_random::JavaRandom;
