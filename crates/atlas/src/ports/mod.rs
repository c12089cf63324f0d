//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with its surroundings (storage, wall clock).
//!
//! Implementations of these traits live with the collaborator.

pub mod clock;
pub mod repositories;

// Re-exports
pub use clock::*;
pub use repositories::*;
