#![forbid(unsafe_code)]

//! Core: factorization, circle-tree construction, placement, and fit
//! normalization.
//!
//! The pipeline runs integer -> [`factor::factorize`] ->
//! [`tree::CircleTree::build`] -> [`place::place`] -> [`fit::fit`]; drawing
//! and animation live in the companion crates.

pub mod factor;
pub mod fit;
pub mod geometry;
pub mod logging;
pub mod place;
pub mod tree;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
