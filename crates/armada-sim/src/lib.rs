//! Simulation engine for ARMADA.
//!
//! Owns the map, the water surface, and the ship bodies; consumes one
//! ordered batch of player orders per tick and advances everything by
//! one fixed-length step. Completely headless and deterministic: two
//! instances fed identical batches stay bit-identical forever.

pub mod body;
pub mod engine;
pub mod interp;
pub mod systems;
pub mod water;

pub use armada_core as core;
pub use engine::Simulation;
