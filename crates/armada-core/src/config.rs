//! Session configuration and tuning parameters.
//!
//! All tunables that affect authoritative state are fixed-point values.
//! They serialize as exact bit patterns, so a config loaded on two
//! machines drives bit-identical simulations; no floating point sneaks
//! in through configuration.

use serde::{Deserialize, Serialize};

use crate::math::{fx, ratio, FVec3, Fx};

/// Configuration for one simulation session. Shared by every client in
/// a lockstep game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Length of one simulation tick in milliseconds.
    pub tick_length_ms: u32,

    /// Map width in grid cells.
    pub map_width: usize,
    /// Map height in grid cells.
    pub map_height: usize,

    // --- Water surface ---
    /// Propagation passes per tick. More passes spread a disturbance
    /// further within a single tick.
    pub wave_passes: usize,
    /// Spring constant pulling each cell back to rest height.
    pub wave_tension: Fx,
    /// Velocity damping per cell. The default is well below the
    /// critical damping threshold, so disturbances ring as visible
    /// ripples instead of decaying monotonically.
    pub wave_dampening: Fx,
    /// Fraction of a height difference exchanged with each neighbor per
    /// propagation pass.
    pub wave_spread: Fx,

    // --- Ship hull ---
    /// Bounding extents of a ship (length, beam, draft).
    pub ship_size: FVec3,
    pub ship_mass: Fx,
    /// Scalar (isotropic) rotational inertia.
    pub ship_inertia: Fx,

    // --- Physics ---
    /// Linear momentum decay coefficient, per second.
    pub linear_friction: Fx,
    /// Angular momentum decay coefficient, per second.
    pub angular_friction: Fx,
    /// Downward force applied at each of the two gravity offsets.
    pub gravity_force: Fx,
    /// Upward force per unit of submersion at a hull sample point.
    pub buoyancy_force: Fx,

    // --- Orders ---
    /// Momentum added along the ship axis by a forward/backward order.
    pub thrust_impulse: Fx,
    /// Vertical angular momentum added by a left/right order.
    pub turn_impulse: Fx,

    // --- Wake coupling ---
    /// Minimum planar speed before a moving hull disturbs the water.
    pub wake_speed_threshold: Fx,
    /// Planar speed above which the wake no longer grows.
    pub wake_speed_cap: Fx,
    /// Velocity impulse fed into the water per submerged sample point,
    /// per unit of (capped) planar speed.
    pub wake_impulse: Fx,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_length_ms: 100,
            map_width: 256,
            map_height: 256,
            wave_passes: 8,
            wave_tension: ratio(1, 10),
            wave_dampening: ratio(4, 160),
            wave_spread: ratio(3, 4),
            ship_size: FVec3::new(fx(6), fx(3), fx(2)),
            ship_mass: fx(100),
            ship_inertia: fx(500),
            linear_friction: ratio(1, 50),
            angular_friction: ratio(10, 50),
            gravity_force: fx(25),
            buoyancy_force: fx(50),
            thrust_impulse: fx(100),
            turn_impulse: fx(100),
            wake_speed_threshold: ratio(1, 10),
            wake_speed_cap: fx(3),
            wake_impulse: ratio(1, 20),
        }
    }
}

impl SimConfig {
    /// Tick length in seconds, as used by every integration step.
    pub fn tick_length_s(&self) -> Fx {
        fx(self.tick_length_ms as i32) / fx(1000)
    }
}
