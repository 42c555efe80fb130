//! # Circuitry
//!
//! Circuitry is a tiny set of composable logics for an arcade prototype where a
//! spaceship is flown not by the player's hands but by a little logic circuit
//! the player wires up on screen: predicate nodes read the ship's telemetry,
//! gate nodes combine signals, and thruster nodes turn the surviving booleans
//! into burns on one of the ship's five thrusters.
//!
//! The [circuit] module owns the node graph and its once-per-tick boolean walk,
//! [motion] integrates the resulting thrust into ship position and heading, and
//! [state] is the single aggregate a game loop threads through each frame.

pub mod circuit;
pub mod motion;
pub mod state;
