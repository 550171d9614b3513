//! Presentation-side interpolation between authoritative ticks.
//!
//! The simulation steps at a fixed rate; frames render at whatever rate
//! the machine manages. `InterpState` tracks wall time within the
//! current tick and hands the renderer a blend factor, and the sampling
//! helpers below blend the previous and current snapshots with it.
//! Everything here runs in floating point — it reads authoritative
//! state through the one-way fixed→float conversions and nothing flows
//! back.

use armada_core::math::{to_f32, to_quat, to_vec3};
use armada_core::state::{FrameView, ShipPose};
use armada_core::types::ObjectId;

use crate::body::ShipSlot;
use crate::engine::Simulation;

/// Wall-clock progress through the current tick.
#[derive(Debug, Clone, Copy)]
pub struct InterpState {
    tick_length_s: f32,
    elapsed_s: f32,
}

impl InterpState {
    pub fn new(tick_length_ms: u32) -> Self {
        Self {
            tick_length_s: tick_length_ms as f32 / 1000.0,
            elapsed_s: 0.0,
        }
    }

    /// Reset when an authoritative tick completes.
    pub fn begin_tick(&mut self) {
        self.elapsed_s = 0.0;
    }

    /// Advance by one rendered frame's wall-clock delta.
    pub fn advance(&mut self, frame_dt_s: f32) {
        self.elapsed_s += frame_dt_s;
    }

    /// Blend factor between the previous and the current snapshot:
    /// 0 at the tick boundary, saturating at 1 when the frame rate
    /// falls behind the tick rate.
    pub fn t(&self) -> f32 {
        (self.elapsed_s / self.tick_length_s).clamp(0.0, 1.0)
    }
}

/// Interpolated pose of one ship: linear blend for position and
/// velocity, shortest-path spherical blend for orientation.
pub fn ship_pose(object: ObjectId, slot: &ShipSlot, t: f32) -> ShipPose {
    let prev = &slot.previous;
    let curr = &slot.body;

    ShipPose {
        object,
        owner: slot.owner,
        position: to_vec3(prev.position).lerp(to_vec3(curr.position), t),
        velocity: to_vec3(prev.velocity).lerp(to_vec3(curr.velocity), t),
        orientation: to_quat(prev.orientation)
            .normalize()
            .slerp(to_quat(curr.orientation).normalize(), t),
    }
}

/// Build the complete view for one rendered frame.
pub fn frame_view(sim: &Simulation, interp: &InterpState) -> FrameView {
    let t = interp.t();

    FrameView {
        tick: sim.time().tick,
        time_s: to_f32(sim.time_elapsed()),
        t,
        ships: sim
            .ships()
            .map(|(id, slot)| ship_pose(id, slot, t))
            .collect(),
    }
}
