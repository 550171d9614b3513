//! Applying a validated accelerate order to a ship.
//!
//! Pure impulse model: each order changes momentum once, at the tick it
//! arrives in. No throttle or rudder state survives between ticks.

use armada_core::config::SimConfig;
use armada_core::order::Direction;

use crate::body::RigidBody;

/// Kick the ship in the ordered direction.
pub fn accelerate(body: &mut RigidBody, direction: Direction, config: &SimConfig) {
    let forward = body.forward();

    match direction {
        Direction::Forward => {
            body.momentum += forward * config.thrust_impulse;
        }
        Direction::Backward => {
            body.momentum -= forward * config.thrust_impulse;
        }
        Direction::Left => {
            body.angular_momentum.z += config.turn_impulse;
        }
        Direction::Right => {
            body.angular_momentum.z -= config.turn_impulse;
        }
    }
}
