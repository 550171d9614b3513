//! Rigid-body state for ships.

use serde::{Deserialize, Serialize};

use armada_core::math::{FQuat, FVec3, Fx, HALF};
use armada_core::types::PlayerId;

/// Physical state of one ship.
///
/// Momentum and angular momentum are the authoritative movement
/// quantities; `velocity`, `angular_velocity`, and `spin` are always
/// re-derived from them by [`RigidBody::recalculate`], never stored as
/// independent truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Bounding extents (length, beam, draft).
    pub size: FVec3,
    pub mass: Fx,
    /// Scalar (isotropic) rotational inertia.
    pub inertia: Fx,

    pub position: FVec3,
    pub momentum: FVec3,
    /// Derived: momentum / mass.
    pub velocity: FVec3,

    pub orientation: FQuat,
    pub angular_momentum: FVec3,
    /// Derived: angular momentum / inertia.
    pub angular_velocity: FVec3,
    /// Derived: ½·(0, angular velocity)·orientation, the quaternion
    /// rate used by the additive orientation update.
    pub spin: FQuat,
}

impl RigidBody {
    pub fn new(size: FVec3, mass: Fx, inertia: Fx, position: FVec3) -> Self {
        let mut body = Self {
            size,
            mass,
            inertia,
            position,
            momentum: FVec3::ZERO,
            velocity: FVec3::ZERO,
            orientation: FQuat::IDENTITY,
            angular_momentum: FVec3::ZERO,
            angular_velocity: FVec3::ZERO,
            spin: FQuat::pure(FVec3::ZERO),
        };
        body.recalculate();
        body
    }

    /// Re-derive the dependent quantities and re-normalize the
    /// orientation to bound integration drift.
    pub fn recalculate(&mut self) {
        self.velocity = self.momentum / self.mass;
        self.angular_velocity = self.angular_momentum / self.inertia;

        self.orientation = self.orientation.normalize();
        self.spin = (FQuat::pure(self.angular_velocity) * self.orientation).scale(HALF);
    }

    /// Accumulate a force acting at a world-space point: the full force
    /// into momentum, the off-center component into angular momentum.
    pub fn apply_force(&mut self, force: FVec3, point: FVec3) {
        self.momentum += force;
        self.angular_momentum += force.cross(point - self.position);
    }

    /// The ship's axis, pointing over the bow.
    pub fn forward(&self) -> FVec3 {
        self.orientation.rotate(FVec3::UNIT_X)
    }

    /// Starboard-ward axis.
    pub fn right(&self) -> FVec3 {
        self.orientation.rotate(FVec3::UNIT_Y)
    }
}

/// Arena slot for one ship: the live body plus the snapshot taken at
/// the top of the current tick. The snapshot only exists for
/// presentation interpolation and is never touched by physics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipSlot {
    pub owner: PlayerId,
    pub body: RigidBody,
    pub previous: RigidBody,
}
