//! The simulation state itself.
//!
//! `Simulation` owns the map, the water surface, and the ship arena,
//! and knows how to advance all of it by exactly one tick. It contains
//! everything needed to compute the next state deterministically: feed
//! two instances identical order batches and they stay bit-identical.
//!
//! Ships live in plain `BTreeMap` arenas keyed by stable integer ids —
//! iteration order is part of the deterministic contract, so hash maps
//! are not an option here.

use std::collections::BTreeMap;

use log::{debug, info};

use armada_core::config::SimConfig;
use armada_core::constants::WATER_REST_HEIGHT;
use armada_core::math::{FVec2, FVec3, Fx};
use armada_core::order::{Order, OrderError, OrderKind};
use armada_core::types::{ObjectId, PlayerId, SimTime, PLAYER_NEUTRAL};
use armada_terrain::HeightGrid;

use crate::body::{RigidBody, ShipSlot};
use crate::systems;
use crate::water::Water;

/// Per-player bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// The ship this player steers.
    pub ship: ObjectId,
}

/// The authoritative game state and its tick loop.
pub struct Simulation {
    config: SimConfig,
    map: HeightGrid,
    water: Water,

    players: BTreeMap<PlayerId, Player>,
    ships: BTreeMap<ObjectId, ShipSlot>,
    object_counter: ObjectId,

    time: SimTime,
}

impl Simulation {
    /// A session on a flat map of the configured size.
    pub fn new(config: SimConfig) -> Self {
        let map = HeightGrid::flat(config.map_width, config.map_height);
        Self::with_map(config, map)
    }

    /// A session on a supplied height field.
    pub fn with_map(config: SimConfig, map: HeightGrid) -> Self {
        assert_eq!(map.size_x(), config.map_width);
        assert_eq!(map.size_y(), config.map_height);

        let water = Water::new(&config);
        Self {
            config,
            map,
            water,
            players: BTreeMap::new(),
            ships: BTreeMap::new(),
            object_counter: 0,
            time: SimTime::default(),
        }
    }

    /// Register a player and spawn their ship at a horizontal position,
    /// floating on the rest water surface. Called once per player at
    /// session start; ships persist for the whole session.
    pub fn add_ship(&mut self, player: PlayerId, position: FVec2) -> ObjectId {
        assert_ne!(player, PLAYER_NEUTRAL, "the neutral player cannot own a ship");
        assert!(
            !self.players.contains_key(&player),
            "player {player} already has a ship"
        );

        let cell_x = position.x.to_num::<i32>();
        let cell_y = position.y.to_num::<i32>();
        assert!(
            cell_x >= 0 && cell_y >= 0 && self.map.is_point(cell_x as usize, cell_y as usize),
            "spawn position outside the map"
        );

        self.object_counter += 1;
        let id = self.object_counter;

        let spawn_z = self.map.height_fx(cell_x as usize, cell_y as usize) + WATER_REST_HEIGHT;
        let body = RigidBody::new(
            self.config.ship_size,
            self.config.ship_mass,
            self.config.ship_inertia,
            FVec3::new(position.x, position.y, spawn_z),
        );

        self.ships.insert(
            id,
            ShipSlot {
                owner: player,
                body,
                previous: body,
            },
        );
        self.players.insert(player, Player { ship: id });

        info!("spawned ship {id} for player {player}");
        id
    }

    /// Check an order against the current session. Orders from unknown
    /// players, or of kinds this build does not run, are invalid.
    pub fn validate_order(&self, order: &Order) -> Result<(), OrderError> {
        if !self.players.contains_key(&order.player) {
            return Err(OrderError::UnknownPlayer(order.player));
        }

        match order.kind {
            OrderKind::Accelerate { .. } => Ok(()),
        }
    }

    fn run_order(&mut self, order: &Order) {
        let player = self.players[&order.player];

        match order.kind {
            OrderKind::Accelerate { direction } => {
                let slot = self
                    .ships
                    .get_mut(&player.ship)
                    .expect("validated player has no ship slot");
                systems::helm::accelerate(&mut slot.body, direction, &self.config);
            }
        }
    }

    /// Advance the simulation by one tick, consuming one complete,
    /// ordered batch of orders. Runs to completion; readers never see
    /// intermediate state.
    pub fn tick(&mut self, orders: &[Order]) {
        // 1. Validate and apply the batch in order. Invalid orders are
        //    dropped individually; two valid orders for the same ship
        //    both take effect, with no conflict resolution beyond
        //    accumulation.
        for order in orders {
            match self.validate_order(order) {
                Ok(()) => self.run_order(order),
                Err(err) => debug!("dropping order from player {}: {err}", order.player),
            }
        }

        // 2. Snapshot pre-integration state for interpolation.
        for slot in self.ships.values_mut() {
            slot.previous = slot.body;
        }

        let dt = self.config.tick_length_s();

        // 3. Integrate all bodies against the current water surface.
        systems::physics::run(&mut self.ships, &self.map, &mut self.water, &self.config, dt);

        // 4. Advance the water surface.
        self.water.tick(dt);

        // 5. Advance the clock.
        self.time.advance(dt);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &HeightGrid {
        &self.map
    }

    pub fn water(&self) -> &Water {
        &self.water
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Elapsed simulation time in seconds.
    pub fn time_elapsed(&self) -> Fx {
        self.time.elapsed_s
    }

    /// Tick length in seconds, as integrated each tick.
    pub fn tick_length_s(&self) -> Fx {
        self.config.tick_length_s()
    }

    pub fn ship(&self, id: ObjectId) -> Option<&ShipSlot> {
        self.ships.get(&id)
    }

    /// All ships in stable id order.
    pub fn ships(&self) -> impl Iterator<Item = (ObjectId, &ShipSlot)> {
        self.ships.iter().map(|(id, slot)| (*id, slot))
    }

    /// The ship controlled by a player, if the player is known.
    pub fn player_ship(&self, player: PlayerId) -> Option<ObjectId> {
        self.players.get(&player).map(|p| p.ship)
    }

    /// Direct mutable access for test setups.
    #[cfg(test)]
    pub(crate) fn ship_mut(&mut self, id: ObjectId) -> &mut ShipSlot {
        self.ships.get_mut(&id).expect("no such ship")
    }
}
