//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod coordinate;
mod mood;

pub use coordinate::*;
pub use mood::*;
