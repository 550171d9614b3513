//! Player orders sent from clients to the simulation.
//!
//! Orders are collected by the transport layer into one ordered batch
//! per tick and applied at the tick boundary. An order that fails
//! validation is dropped; the rest of the batch still applies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PlayerId;

/// Steering direction for an accelerate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Forward = 2,
    Backward = 3,
}

impl Direction {
    /// Decode the 2-bit wire value. Anything else is a protocol
    /// violation, not a runtime condition.
    pub fn from_wire(value: u8) -> Direction {
        match value {
            0 => Direction::Left,
            1 => Direction::Right,
            2 => Direction::Forward,
            3 => Direction::Backward,
            _ => panic!("direction out of range: {value}"),
        }
    }
}

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderKind {
    /// Impulse thrust/turn on the player's ship.
    Accelerate { direction: Direction },
}

/// A player order: who issued it plus what to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub player: PlayerId,
    pub kind: OrderKind,
}

impl Order {
    pub fn accelerate(player: PlayerId, direction: Direction) -> Order {
        Order {
            player,
            kind: OrderKind::Accelerate { direction },
        }
    }
}

/// Why an order was rejected during validation.
///
/// These are expected runtime conditions (a client can race its own
/// disconnect, or run a newer protocol revision); the order is logged
/// and dropped while the tick proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("order kind not supported")]
    Unsupported,
}
