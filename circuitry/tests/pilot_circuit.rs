//! End-to-end checks on the circuit walk plus the order-independence property
//! of thrust aggregation.

use circuitry::circuit::{
    Gate, NodeKind, NodeStore, Predicate, ShipSignals, Signal, ThrustCommand, Thruster,
};
use circuitry::state::{GameState, Status};
use macroquad::math::Vec2;
use proptest::prelude::*;

fn wire_thruster(store: &mut NodeStore, id: circuitry::circuit::NodeId, input: circuitry::circuit::NodeId) {
    if let NodeKind::Thruster(node) = &mut store.get_mut(id).unwrap().kind {
        node.input = Some(input);
    }
}

/// One thruster node wired to a predicate that either always fires or never
/// does, under a telemetry snapshot of all zeroes.
type Spec = (usize, bool);

fn evaluate_specs(specs: &[Spec]) -> ThrustCommand {
    let mut store = NodeStore::new();
    for &(slot, fires) in specs {
        let value = if fires { 1 } else { -1 };
        let pred = store.add_predicate(Signal::PosX, Predicate::Lt, value);
        let thruster = store.add_thruster(Thruster::ALL[slot % 5]);
        wire_thruster(&mut store, thruster, pred);
    }
    store.evaluate(ShipSignals {
        pos_x: 0,
        pos_y: 0,
        rotation: 0,
    })
}

proptest! {
    #[test]
    fn thrust_aggregation_ignores_insertion_order(
        specs in proptest::collection::vec((0usize..5, any::<bool>()), 0..24)
    ) {
        let forward = evaluate_specs(&specs);

        let mut reversed = specs.clone();
        reversed.reverse();
        prop_assert_eq!(forward, evaluate_specs(&reversed));

        // the command is exactly the OR fold per thruster channel
        for (slot, &thruster) in Thruster::ALL.iter().enumerate() {
            let expected = specs.iter().any(|&(s, fires)| s % 5 == slot && fires);
            prop_assert_eq!(forward.is_active(thruster), expected);
        }
    }
}

#[test]
fn predicate_through_gate_into_thruster_flies_the_ship() {
    let mut state = GameState::new(Vec2::new(100.0, 0.0), Vec2::new(100.0, 500.0));

    // burn while at x == 100 and not yet past y 400
    let at_mark = state.store.add_predicate(Signal::PosX, Predicate::Eq, 100);
    let below = state.store.add_predicate(Signal::PosY, Predicate::Lt, 400);
    let both = state.store.add_gate(Gate::And);
    if let NodeKind::Gate(gate) = &mut state.store.get_mut(both).unwrap().kind {
        gate.input1 = Some(at_mark);
        gate.input2 = Some(below);
    }
    let boost = state.store.add_thruster(Thruster::Boost);
    wire_thruster(&mut state.store, boost, both);

    // boost covers 250 units a tick at dt 1.0; two ticks cross the y-400 line
    state.tick(1.0);
    assert!(state.ship.active.boost);
    assert_eq!(state.ship.pos, Vec2::new(100.0, 250.0));

    state.tick(1.0);
    assert_eq!(state.ship.pos, Vec2::new(100.0, 500.0));

    // past the line the AND goes cold and the ship coasts to a stop
    state.tick(1.0);
    assert!(!state.ship.active.boost);
    assert_eq!(state.ship.pos, Vec2::new(100.0, 500.0));
}

#[test]
fn freezing_the_run_freezes_the_circuit() {
    let mut state = GameState::new(Vec2::new(100.0, 0.0), Vec2::ZERO);
    let always = state.store.add_predicate(Signal::PosX, Predicate::Eq, 100);
    let boost = state.store.add_thruster(Thruster::Boost);
    wire_thruster(&mut state.store, boost, always);

    state.set_status(Status::Won);
    for _ in 0..10 {
        state.tick(1.0);
    }
    assert_eq!(state.ship.pos, Vec2::new(100.0, 0.0));

    state.set_status(Status::Running);
    state.tick(1.0);
    assert_eq!(state.ship.pos, Vec2::new(100.0, 250.0));
}
