//! The dynamic water surface.
//!
//! Every cell is a damped spring oscillating around the global rest
//! height, and neighboring cells exchange velocity in proportion to
//! their height difference. A fixed number of exchange passes per tick
//! stands in for solving the wave equation properly; it is cheap,
//! stable, and looks right, which is all a game surface needs.

use serde::{Deserialize, Serialize};

use armada_core::config::SimConfig;
use armada_core::constants::WATER_REST_HEIGHT;
use armada_core::math::{fx, to_f32, FVec2, Fx};

/// One cell of the water surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterPoint {
    pub height: Fx,
    pub velocity: Fx,
    /// Spring acceleration computed by the last tick's spring step.
    pub acceleration: Fx,
    /// Height before the current tick, for presentation interpolation.
    pub previous_height: Fx,
}

impl Default for WaterPoint {
    fn default() -> Self {
        Self {
            height: WATER_REST_HEIGHT,
            velocity: Fx::ZERO,
            acceleration: Fx::ZERO,
            previous_height: WATER_REST_HEIGHT,
        }
    }
}

/// Height and velocity of the surface at a continuous position.
#[derive(Debug, Clone, Copy)]
pub struct WaterSample {
    pub height: Fx,
    pub velocity: Fx,
}

/// The simulated water surface: two full grids of [`WaterPoint`],
/// swapped after every propagation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Water {
    size_x: usize,
    size_y: usize,
    passes: usize,
    tension: Fx,
    dampening: Fx,
    spread: Fx,
    buffers: [Vec<WaterPoint>; 2],
    /// Index of the buffer holding authoritative state.
    current: usize,
}

impl Water {
    pub fn new(config: &SimConfig) -> Self {
        assert!(
            config.map_width > 1 && config.map_height > 1,
            "degenerate map size"
        );

        let cells = config.map_width * config.map_height;
        Self {
            size_x: config.map_width,
            size_y: config.map_height,
            passes: config.wave_passes,
            tension: config.wave_tension,
            dampening: config.wave_dampening,
            spread: config.wave_spread,
            buffers: [
                vec![WaterPoint::default(); cells],
                vec![WaterPoint::default(); cells],
            ],
            current: 0,
        }
    }

    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    pub fn point(&self, x: usize, y: usize) -> &WaterPoint {
        assert!(x < self.size_x);
        assert!(y < self.size_y);
        &self.buffers[self.current][y * self.size_x + x]
    }

    pub fn point_mut(&mut self, x: usize, y: usize) -> &mut WaterPoint {
        assert!(x < self.size_x);
        assert!(y < self.size_y);
        &mut self.buffers[self.current][y * self.size_x + x]
    }

    /// Instantaneous velocity impulse at one cell. The only external
    /// write path into the surface besides [`Water::tick`] itself.
    pub fn splash(&mut self, x: usize, y: usize, velocity_delta: Fx) {
        self.point_mut(x, y).velocity += velocity_delta;
    }

    /// Advance the surface by one tick of `dt` seconds.
    pub fn tick(&mut self, dt: Fx) {
        let tension = self.tension;
        let dampening = self.dampening;

        for point in self.buffers[self.current].iter_mut() {
            point.previous_height = point.height;
            Self::spring(tension, dampening, dt, point);
        }

        for _ in 0..self.passes {
            self.propagate_pass(dt);
        }
    }

    /// Hooke's law with Euler integration and dampening, per cell.
    fn spring(tension: Fx, dampening: Fx, dt: Fx, point: &mut WaterPoint) {
        let x = point.height - WATER_REST_HEIGHT;
        point.acceleration = -tension * x - dampening * point.velocity;

        point.height += point.velocity * dt;
        point.velocity += point.acceleration * dt;
    }

    /// One sweep of neighbor exchange: copy current into the write
    /// buffer, accumulate the exchanges there, then swap.
    fn propagate_pass(&mut self, dt: Fx) {
        let size_x = self.size_x;
        let size_y = self.size_y;
        let spread = self.spread;

        let (read, write) = self.split_buffers();
        write.copy_from_slice(read);

        for x in 0..size_x {
            for y in 0..size_y {
                // Propagate from (x, y) to its four axis-aligned
                // neighbors.
                if x > 0 {
                    Self::propagate(read, write, size_x, spread, dt, (x, y), (x - 1, y));
                }
                if x < size_x - 1 {
                    Self::propagate(read, write, size_x, spread, dt, (x, y), (x + 1, y));
                }
                if y > 0 {
                    Self::propagate(read, write, size_x, spread, dt, (x, y), (x, y - 1));
                }
                if y < size_y - 1 {
                    Self::propagate(read, write, size_x, spread, dt, (x, y), (x, y + 1));
                }
            }
        }

        self.current ^= 1;
    }

    fn propagate(
        read: &[WaterPoint],
        write: &mut [WaterPoint],
        size_x: usize,
        spread: Fx,
        dt: Fx,
        from: (usize, usize),
        to: (usize, usize),
    ) {
        let height_from = read[from.1 * size_x + from.0].height;
        let height_to = read[to.1 * size_x + to.0].height;

        let delta = spread * (height_from - height_to);
        write[to.1 * size_x + to.0].velocity += delta * dt;
    }

    fn split_buffers(&mut self) -> (&[WaterPoint], &mut [WaterPoint]) {
        let (a, b) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            (&a[0], &mut b[0])
        } else {
            (&b[0], &mut a[0])
        }
    }

    /// Surface height and velocity at a continuous position.
    ///
    /// The grid cell is split into the same two triangles the surface
    /// mesh is triangulated with, so the physics and any rendered
    /// surface agree on the interpolated height along shared edges:
    /// fractional coordinates with `s + t <= 1` land on the triangle
    /// anchored at the cell's (0,0) corner, the rest on the one
    /// anchored at (1,1). Cell indices are clamped into the grid so
    /// hull points overhanging the map edge still resolve.
    pub fn sample(&self, position: FVec2) -> WaterSample {
        let xi = position.x.to_num::<i32>().clamp(0, self.size_x as i32 - 2) as usize;
        let yi = position.y.to_num::<i32>().clamp(0, self.size_y as i32 - 2) as usize;

        let s = (position.x - fx(xi as i32)).clamp(Fx::ZERO, Fx::ONE);
        let t = (position.y - fx(yi as i32)).clamp(Fx::ZERO, Fx::ONE);

        let p00 = self.point(xi, yi);
        let p10 = self.point(xi + 1, yi);
        let p01 = self.point(xi, yi + 1);
        let p11 = self.point(xi + 1, yi + 1);

        if s + t <= Fx::ONE {
            WaterSample {
                height: p00.height + (p10.height - p00.height) * s + (p01.height - p00.height) * t,
                velocity: p00.velocity
                    + (p10.velocity - p00.velocity) * s
                    + (p01.velocity - p00.velocity) * t,
            }
        } else {
            let u = Fx::ONE - s;
            let v = Fx::ONE - t;
            WaterSample {
                height: p11.height + (p01.height - p11.height) * u + (p10.height - p11.height) * v,
                velocity: p11.velocity
                    + (p01.velocity - p11.velocity) * u
                    + (p10.velocity - p11.velocity) * v,
            }
        }
    }

    /// Presentation-side height at a cell, blended between the previous
    /// and current tick. Never feeds back into the simulation.
    pub fn lerp_height(&self, x: usize, y: usize, t: f32) -> f32 {
        let point = self.point(x, y);
        let prev = to_f32(point.previous_height);
        let curr = to_f32(point.height);
        prev + (curr - prev) * t
    }
}
