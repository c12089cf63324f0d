//! Domain Entities
//!
//! - Memory: a geotagged journal entry and the form draft it is built from
//! - Badge: an achievement definition and its unlocked form
//! - Stats: derived, ephemeral dashboard aggregates

mod badge;
mod memory;
mod stats;

pub use badge::*;
pub use memory::*;
pub use stats::*;
