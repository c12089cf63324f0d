//! Domain Services
//!
//! Stateless derivations over memory records. Each rule table is plain
//! data with a `Default` holding the built-in values.

mod analytics;
mod badges;
mod export;
mod geo;
mod sentiment;
mod stats;
mod streak;
mod timeline;

pub use analytics::*;
pub use badges::*;
pub use export::*;
pub use geo::*;
pub use sentiment::*;
pub use stats::*;
pub use streak::*;
pub use timeline::*;
