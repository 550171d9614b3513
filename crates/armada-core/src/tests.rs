//! Tests for the fixed-point math, order encoding, and configuration.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::SimConfig;
use crate::math::{fx, ratio, sqrt, to_f32, FQuat, FVec3, Fx, SQRT_TOLERANCE};
use crate::order::{Direction, Order, OrderKind};
use crate::wire;

// ---- Fixed-point scalar ----

#[test]
fn test_int_round_trip() {
    for n in [-32768, -1000, -1, 0, 1, 7, 100, 32767] {
        assert_eq!(Fx::from_num(n).to_num::<i32>(), n, "round trip of {n}");
    }
}

#[test]
fn test_division_keeps_fraction() {
    // 5 / 2 must come out as 2.5, not 2.
    let q = fx(5) / fx(2);
    assert_eq!(to_f32(q), 2.5);
}

#[test]
fn test_ratio_is_exact() {
    assert_eq!(ratio(3, 4), fx(3) / fx(4));
    assert_eq!(to_f32(ratio(1, 2)), 0.5);
}

#[test]
fn test_sqrt_zero() {
    assert_eq!(sqrt(Fx::ZERO), Fx::ZERO);
}

#[test]
fn test_sqrt_converges() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..200 {
        let x = ratio(rng.gen_range(1..2000), rng.gen_range(1..100));
        let root = sqrt(x);
        let back = root * root;
        let err = if back > x { back - x } else { x - back };
        // The stopping tolerance scaled by the derivative of x² at the
        // root, with slack for truncation inside the iteration.
        let allowed = SQRT_TOLERANCE * (root * fx(4) + fx(2));
        assert!(
            err <= allowed,
            "sqrt({x}) = {root}, squared back to {back} (err {err})"
        );
    }
}

#[test]
fn test_sqrt_of_perfect_squares() {
    for n in [1, 4, 9, 16, 25, 100, 144] {
        let root = sqrt(fx(n));
        let exact = fx((n as f64).sqrt() as i32);
        let err = if root > exact { root - exact } else { exact - root };
        assert!(err <= SQRT_TOLERANCE, "sqrt({n}) = {root}, expected {exact}");
    }
}

// ---- Vectors ----

#[test]
fn test_cross_product_axes() {
    assert_eq!(FVec3::UNIT_X.cross(FVec3::UNIT_Y), FVec3::UNIT_Z);
    assert_eq!(FVec3::UNIT_Y.cross(FVec3::UNIT_Z), FVec3::UNIT_X);
    assert_eq!(FVec3::UNIT_Y.cross(FVec3::UNIT_X), -FVec3::UNIT_Z);
}

#[test]
fn test_vector_length() {
    // 3-4-5 triangle in the plane.
    let v = FVec3::new(fx(3), fx(4), Fx::ZERO);
    let err = v.length() - fx(5);
    assert!(err.abs() <= SQRT_TOLERANCE, "length was {}", v.length());
}

#[test]
fn test_normalize_zero_returns_fallback() {
    assert_eq!(FVec3::ZERO.normalize_or(FVec3::UNIT_Z), FVec3::UNIT_Z);
}

// ---- Quaternions ----

/// Quaternion for a rotation of 90° about +Z, built without floats.
fn quarter_turn_z() -> FQuat {
    let half_sqrt = sqrt(ratio(1, 2));
    FQuat::new(half_sqrt, Fx::ZERO, Fx::ZERO, half_sqrt).normalize()
}

fn assert_close(a: FVec3, b: FVec3, tolerance: Fx) {
    for (ca, cb) in [(a.x, b.x), (a.y, b.y), (a.z, b.z)] {
        let err = (ca - cb).abs();
        assert!(err <= tolerance, "{a:?} != {b:?}");
    }
}

#[test]
fn test_identity_rotation_is_noop() {
    let v = FVec3::new(fx(1), fx(2), fx(3));
    assert_eq!(FQuat::IDENTITY.rotate(v), v);
}

#[test]
fn test_half_turn_flips_axis() {
    // 180° about Z: (w=0, z=1). Exact in fixed-point.
    let q = FQuat::new(Fx::ZERO, Fx::ZERO, Fx::ZERO, Fx::ONE);
    assert_eq!(q.rotate(FVec3::UNIT_X), -FVec3::UNIT_X);
}

#[test]
fn test_quarter_turn_maps_x_to_y() {
    let q = quarter_turn_z();
    assert_close(q.rotate(FVec3::UNIT_X), FVec3::UNIT_Y, ratio(1, 100));
}

#[test]
fn test_rotate_inverse_round_trip() {
    let q = quarter_turn_z();
    let v = FVec3::new(fx(2), fx(-1), fx(3));
    assert_close(q.rotate_inverse(q.rotate(v)), v, ratio(1, 50));
}

#[test]
fn test_axis_of_identity_falls_back() {
    assert_eq!(FQuat::IDENTITY.axis(), FVec3::UNIT_Z);
}

#[test]
fn test_axis_of_vertical_rotation() {
    assert_close(quarter_turn_z().axis(), FVec3::UNIT_Z, ratio(1, 100));
}

#[test]
fn test_normalize_degenerate_quat() {
    let zero = FQuat::new(Fx::ZERO, Fx::ZERO, Fx::ZERO, Fx::ZERO);
    assert_eq!(zero.normalize(), FQuat::IDENTITY);
}

// ---- Wire protocol ----

#[test]
fn test_order_wire_round_trip() {
    for direction in [
        Direction::Left,
        Direction::Right,
        Direction::Forward,
        Direction::Backward,
    ] {
        for player in [1u16, 7, 255, u16::MAX] {
            let order = Order::accelerate(player, direction);
            let mut bytes = Vec::new();
            wire::encode_order(&order, &mut bytes);
            let (decoded, used) = wire::decode_order(&bytes);
            assert_eq!(used, bytes.len());
            assert_eq!(decoded, order);
        }
    }
}

#[test]
fn test_batch_round_trip() {
    let orders = vec![
        Order::accelerate(7, Direction::Forward),
        Order::accelerate(7, Direction::Left),
        Order::accelerate(3, Direction::Backward),
    ];
    let bytes = wire::encode_batch(&orders);
    assert_eq!(wire::decode_batch(&bytes), orders);
}

#[test]
fn test_empty_batch_round_trip() {
    let bytes = wire::encode_batch(&[]);
    assert!(wire::decode_batch(&bytes).is_empty());
}

#[test]
#[should_panic(expected = "undefined order type tag")]
fn test_undefined_tag_is_fatal() {
    // player 7, reserved tag 0
    wire::decode_order(&[7, 0, wire::TAG_UNDEFINED, 0]);
}

#[test]
fn test_order_serde_round_trip() {
    let order = Order::accelerate(7, Direction::Forward);
    let json = serde_json::to_string(&order).unwrap();
    let back: Order = serde_json::from_str(&json).unwrap();
    assert_eq!(back, order);
    assert!(matches!(
        back.kind,
        OrderKind::Accelerate {
            direction: Direction::Forward
        }
    ));
}

// ---- Configuration ----

#[test]
fn test_default_tick_length() {
    // 100 ms. 0.1 s has no exact binary representation, so the
    // conversion truncates to the nearest step below.
    let config = SimConfig::default();
    let dt = to_f32(config.tick_length_s());
    assert!((dt - 0.1).abs() < 1e-4, "tick length was {dt}");
}

#[test]
fn test_config_serde_is_exact() {
    let config = SimConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: SimConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config, "config must round-trip bit-exactly");
}

#[test]
fn test_default_water_is_underdamped() {
    // Critical damping for the cell oscillator is 2·sqrt(tension);
    // the stock configuration has to sit far below it so splashes
    // ring instead of dying off monotonically.
    let config = SimConfig::default();
    let critical = fx(2) * sqrt(config.wave_tension);
    assert!(config.wave_dampening < critical);
}
