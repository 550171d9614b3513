//! Binary wire encoding of orders.
//!
//! Layout per order: player id as little-endian `u16`, one type tag
//! byte, then the type-specific payload. Tag 0 is reserved undefined;
//! decoding it, or any tag this build does not know, is a contract
//! violation — both ends of the wire are built from the same protocol
//! revision, so a mismatch here is a version skew bug, not input to
//! recover from.
//!
//! `decode_order(encode_order(x)) == x` bit-for-bit for every valid
//! order.

use crate::order::{Direction, Order, OrderKind};

/// Reserved undefined tag.
pub const TAG_UNDEFINED: u8 = 0;

/// Tag for [`OrderKind::Accelerate`].
pub const TAG_ACCELERATE: u8 = 1;

/// Append one order to `out`.
pub fn encode_order(order: &Order, out: &mut Vec<u8>) {
    out.extend_from_slice(&order.player.to_le_bytes());
    match order.kind {
        OrderKind::Accelerate { direction } => {
            out.push(TAG_ACCELERATE);
            out.push(direction as u8);
        }
    }
}

/// Decode one order from the front of `bytes`. Returns the order and
/// the number of bytes consumed.
pub fn decode_order(bytes: &[u8]) -> (Order, usize) {
    assert!(bytes.len() >= 3, "truncated order header");
    let player = u16::from_le_bytes([bytes[0], bytes[1]]);

    match bytes[2] {
        TAG_ACCELERATE => {
            assert!(bytes.len() >= 4, "truncated accelerate payload");
            let direction = Direction::from_wire(bytes[3]);
            (Order::accelerate(player, direction), 4)
        }
        tag => panic!("undefined order type tag {tag}"),
    }
}

/// Encode a tick's order batch: `u16` count followed by the orders.
pub fn encode_batch(orders: &[Order]) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + orders.len() * 4);
    out.extend_from_slice(&(orders.len() as u16).to_le_bytes());
    for order in orders {
        encode_order(order, &mut out);
    }
    out
}

/// Decode a tick's order batch.
pub fn decode_batch(bytes: &[u8]) -> Vec<Order> {
    assert!(bytes.len() >= 2, "truncated batch header");
    let count = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;

    let mut orders = Vec::with_capacity(count);
    let mut offset = 2;
    for _ in 0..count {
        let (order, used) = decode_order(&bytes[offset..]);
        orders.push(order);
        offset += used;
    }
    assert_eq!(offset, bytes.len(), "trailing bytes after order batch");

    orders
}
