//! Application Layer
//!
//! Use cases orchestrating the domain over a memory repository.

mod memory_service;

pub use memory_service::*;
