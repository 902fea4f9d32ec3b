//! Noise evaluation for terrain synthesis.
//!
//! Everything here is a pure function of its inputs: a 64-bit hash mixer,
//! the recursive height field built on it, and the river field derived from
//! local height gradients.

mod hash;
mod height;
mod river;

pub use hash::{cell_value, hash, CELL_MODULUS};
pub use height::{height, MAX_DEPTH, NEUTRAL_HEIGHT};
pub use river::{river, river_terms, RiverTerms, RIVER_SEED_OFFSET};
