//! # Game state
//!
//! The single aggregate a game loop threads through each frame: the node
//! store, the ship, and the run's status. There is no ambient or static state
//! anywhere in the crate; whoever owns the [GameState] owns the whole game.

use crate::circuit::{Gate, NodeId, NodeStore, Predicate, Signal, Thruster};
use crate::motion::Ship;
use macroquad::math::Vec2;

/// Whether a tick advances the simulation. Everything except `Running`
/// freezes both the circuit walk and the motion step; the UI layer owns the
/// transitions between these.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
    Running,
    Paused,
    Won,
    Died,
}

pub struct GameState {
    pub store: NodeStore,
    pub ship: Ship,
    pub status: Status,
    pub level: u32,
    /// Where the ship is trying to get to. Read by the UI layer's win check
    /// and the renderer; the core never acts on it.
    pub goal: Vec2,
}

impl GameState {
    pub fn new(ship_start: Vec2, goal: Vec2) -> Self {
        Self {
            store: NodeStore::new(),
            ship: Ship::new(ship_start),
            status: Status::Running,
            level: 1,
            goal,
        }
    }

    /// One simulation step: snapshot telemetry, walk the circuit, integrate
    /// the resulting thrust. Anything but [Status::Running] is a frozen frame.
    pub fn tick(&mut self, dt: f32) {
        if self.status != Status::Running {
            return;
        }
        let command = self.store.evaluate(self.ship.signals());
        self.ship.update(command, dt);
    }

    pub fn set_status(&mut self, status: Status) {
        if self.status != status {
            log::info!("status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }

    // The three add-node buttons. Each drops a fresh node into the store with
    // the stock parameters; wiring it up is the player's problem.

    pub fn create_predicate_node(&mut self) -> NodeId {
        self.store.add_predicate(Signal::PosX, Predicate::Eq, 0)
    }

    pub fn create_gate_node(&mut self) -> NodeId {
        self.store.add_gate(Gate::And)
    }

    pub fn create_thruster_node(&mut self) -> NodeId {
        self.store.add_thruster(Thruster::Boost)
    }
}
