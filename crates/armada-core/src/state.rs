//! Presentation view structs.
//!
//! These are built for the rendering layer from interpolated state and
//! therefore live in the floating-point domain. Nothing here ever flows
//! back into the simulation.

use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, PlayerId};

/// Interpolated pose of one ship for rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShipPose {
    pub object: ObjectId,
    pub owner: PlayerId,
    pub position: glam::Vec3,
    pub velocity: glam::Vec3,
    pub orientation: glam::Quat,
}

/// Everything the presentation layer needs for one rendered frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameView {
    /// Tick number of the current authoritative state.
    pub tick: u64,
    /// Elapsed simulation time in seconds, at the current tick.
    pub time_s: f32,
    /// Blend factor the poses below were sampled at.
    pub t: f32,
    pub ships: Vec<ShipPose>,
}
