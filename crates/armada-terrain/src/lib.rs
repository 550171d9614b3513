//! Terrain for the ARMADA simulation.
//!
//! A static height-field grid supplied at session start. The simulation
//! only reads heights from it; the dirty flags exist for external mesh
//! consumers that need to know which cells to re-tessellate.

pub use armada_core as core;

pub mod grid;

pub use grid::{GridPoint, HeightGrid};
