//! Rigid-body integration with buoyancy against the water surface.
//!
//! Runs once per ship per tick: friction, gravity, buoyancy at four
//! hull sample points, semi-implicit integration of position and
//! orientation, wake feedback into the water, and the inelastic clamp
//! at the map edge.

use std::collections::BTreeMap;

use armada_core::config::SimConfig;
use armada_core::math::{fx, FVec2, FVec3, Fx, HALF};
use armada_core::types::ObjectId;
use armada_terrain::HeightGrid;

use crate::body::{RigidBody, ShipSlot};
use crate::water::Water;

/// Integrate every ship against the current water surface.
pub fn run(
    ships: &mut BTreeMap<ObjectId, ShipSlot>,
    map: &HeightGrid,
    water: &mut Water,
    config: &SimConfig,
    dt: Fx,
) {
    for slot in ships.values_mut() {
        step_body(&mut slot.body, map, water, config, dt);
    }
}

fn step_body(body: &mut RigidBody, map: &HeightGrid, water: &mut Water, config: &SimConfig, dt: Fx) {
    // 1. Exponential-decay friction on both momenta.
    body.momentum -= body.momentum * (config.linear_friction * dt);
    body.angular_momentum -= body.angular_momentum * (config.angular_friction * dt);

    // 2. Body axes from the orientation.
    let forward = body.forward().normalize_or(FVec3::UNIT_X);
    let right = body.right().normalize_or(FVec3::UNIT_Y);
    let up = forward.cross(right).normalize_or(FVec3::UNIT_Z);

    // Wake impulses land in the cell under the pre-integration
    // position.
    let (wake_x, wake_y) = grid_cell(map, body.position);

    // 3. Gravity, applied ahead of and behind the center of mass so a
    //    pitched hull rights itself.
    let gravity = FVec3::new(Fx::ZERO, Fx::ZERO, -config.gravity_force);
    let lever = forward * (body.size.x / fx(4));
    let sink = up * body.size.z;
    body.apply_force(gravity, body.position - lever - sink);
    body.apply_force(gravity, body.position + lever - sink);

    // 4. Buoyancy at four hull sample points: bow, stern, port,
    //    starboard, all on the keel plane.
    let base = body.position - up * (body.size.z * HALF);
    let half_length = forward * (body.size.x * HALF);
    let half_beam = right * (body.size.y * HALF);

    let hull_points = [
        base + half_length,
        base - half_length,
        base + half_beam,
        base - half_beam,
    ];

    let mut submerged = 0;
    for point in hull_points {
        if float_point(body, map, water, config, point) {
            submerged += 1;
        }
    }

    // 5. Integrate. The additive orientation update is a small-angle
    //    approximation; the trailing recalculate re-normalizes it.
    body.recalculate();
    body.position += body.velocity * dt;
    body.orientation = body.orientation + body.spin.scale(dt);
    body.recalculate();

    // 6. A submerged hull moving through the water drags a wake.
    let planar_speed = body.velocity.planar_length();
    if submerged > 0 && planar_speed > config.wake_speed_threshold {
        let capped = planar_speed.min(config.wake_speed_cap);
        water.point_mut(wake_x, wake_y).velocity +=
            config.wake_impulse * fx(submerged) * capped;
    }

    // 7. Inelastic stop at the map edge: clamp the position and zero
    //    the momentum component that drove into it.
    clamp_to_map(body, map);
}

/// Buoyancy check for one hull sample point. Applies the upward force
/// when the point sits below the local water surface and reports
/// whether the point counts as submerged.
fn float_point(
    body: &mut RigidBody,
    map: &HeightGrid,
    water: &Water,
    config: &SimConfig,
    point: FVec3,
) -> bool {
    let (cell_x, cell_y) = grid_cell(map, point);
    let terrain = map.height_fx(cell_x, cell_y);
    let surface = water.sample(FVec2::new(point.x, point.y));

    // Depth of the point as a fraction of the hull's vertical extent;
    // negative means below the surface.
    let mut delta = (point.z - (terrain + surface.height)) / body.size.z;
    if delta < -Fx::ONE {
        delta = -Fx::ONE;
    }

    // Float up as soon as the point is partially under water.
    if delta < Fx::ZERO {
        let lift = FVec3::new(Fx::ZERO, Fx::ZERO, -delta * config.buoyancy_force);
        body.apply_force(lift, point);
    }

    delta <= Fx::ZERO
}

/// Grid cell under a world position, clamped into the map so hull
/// points overhanging the edge still resolve to a cell.
fn grid_cell(map: &HeightGrid, position: FVec3) -> (usize, usize) {
    let x = position.x.to_num::<i32>().clamp(0, map.size_x() as i32 - 1) as usize;
    let y = position.y.to_num::<i32>().clamp(0, map.size_y() as i32 - 1) as usize;
    (x, y)
}

fn clamp_to_map(body: &mut RigidBody, map: &HeightGrid) {
    let max_x = map.size_x() as i32 - 1;
    let max_y = map.size_y() as i32 - 1;

    let grid_x = body.position.x.to_num::<i32>();
    if grid_x < 0 {
        body.position.x = Fx::ZERO;
        body.momentum.x = Fx::ZERO;
    }
    if grid_x > max_x {
        body.position.x = fx(max_x);
        body.momentum.x = Fx::ZERO;
    }

    let grid_y = body.position.y.to_num::<i32>();
    if grid_y < 0 {
        body.position.y = Fx::ZERO;
        body.momentum.y = Fx::ZERO;
    }
    if grid_y > max_y {
        body.position.y = fx(max_y);
        body.momentum.y = Fx::ZERO;
    }

    let clamped = grid_cell(map, body.position);
    debug_assert!(map.is_point(clamped.0, clamped.1));
}
