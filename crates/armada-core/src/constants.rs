//! Simulation constants that are not tunable per session.

use crate::math::Fx;

/// Rest height of the water surface. Every water cell oscillates around
/// this level; a grid with all cells at rest height is perfectly calm.
pub const WATER_REST_HEIGHT: Fx = Fx::from_bits(100 << 16);
