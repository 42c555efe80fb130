//! # Ship motion logics
//!
//! Motion logics communicate that physical laws, however cartoonish, govern
//! the ship. Each active thruster contributes a fixed unit force in ship-local
//! space plus a one-degree nudge to the heading; the summed force is rotated
//! into world space by the current heading and integrated over the frame's dt.

use crate::circuit::{ShipSignals, ThrustCommand, Thruster};
use macroquad::math::Vec2;

/// World units of travel per unit of thrust per second.
pub const SPEED: f32 = 50.0;

/// What one thruster does for one tick: a force in ship-local space and a
/// change in heading, degrees. The lateral pairs push sideways and twist; the
/// main boost pushes straight along the hull.
pub fn thrust_effect(thruster: Thruster) -> (Vec2, i32) {
    match thruster {
        Thruster::BowPort => (Vec2::new(1.0, 0.0), -1),
        Thruster::BowStarboard => (Vec2::new(-1.0, 0.0), 1),
        Thruster::SternPort => (Vec2::new(1.0, 0.0), 1),
        Thruster::SternStarboard => (Vec2::new(-1.0, 0.0), -1),
        Thruster::Boost => (Vec2::new(0.0, 5.0), 0),
    }
}

pub struct Ship {
    pub pos: Vec2,
    /// Heading in whole degrees, kept in [0, 360).
    pub rotation: i32,
    /// The command acted on last tick. Derived state for the renderer's
    /// exhaust flames, recomputed every frame.
    pub active: ThrustCommand,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0,
            active: ThrustCommand::default(),
        }
    }

    /// Telemetry snapshot fed to predicate nodes. Positions truncate toward
    /// zero, matching integer-cast semantics, so 99.9 reads as 99.
    pub fn signals(&self) -> ShipSignals {
        ShipSignals {
            pos_x: self.pos.x as i32,
            pos_y: self.pos.y as i32,
            rotation: self.rotation,
        }
    }

    /// Integrates one tick of thrust: sum the local forces and heading deltas
    /// of every active thruster, rotate the force by the *current* heading,
    /// advance position, then wrap the new heading back into [0, 360).
    pub fn update(&mut self, command: ThrustCommand, dt: f32) {
        let mut force = Vec2::ZERO;
        let mut turn = 0;
        for &thruster in Thruster::ALL.iter() {
            if command.is_active(thruster) {
                let (local, delta) = thrust_effect(thruster);
                force += local;
                turn += delta;
            }
        }

        let radians = (self.rotation as f32).to_radians();
        let (sin, cos) = radians.sin_cos();
        let world = Vec2::new(force.x * cos - force.y * sin, force.x * sin + force.y * cos);
        self.pos += world * SPEED * dt;

        let mut rotation = self.rotation + turn;
        if rotation < 0 {
            rotation += 360;
        }
        self.rotation = rotation % 360;
        self.active = command;
    }
}
