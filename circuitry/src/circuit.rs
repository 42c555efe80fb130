//! # Circuit logics
//!
//! Circuit logics communicate that discrete boolean signals flow through a
//! wired graph of components. Predicate nodes sample the ship's telemetry,
//! gate nodes compose booleans, and thruster nodes are the sinks that turn a
//! surviving `true` into a burn on one of the hull's thrusters.
//!
//! Nodes never hold references to each other, only [NodeId] handles resolved
//! through the [NodeStore] at evaluation time. A link can therefore point at a
//! node that doesn't exist (yet, or anymore) without anything dangling; an
//! unresolvable link just reads as `false`.

use std::collections::HashMap;

use macroquad::math::Vec2;

/// Handle to a node in a [NodeStore]. Ids are issued starting at 1 and never
/// reused, so a handle stays meaningful for the lifetime of the store.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u32);

/// The five physical thrusters on the hull: bow/stern pairs on each side for
/// lateral drift and turning, plus the main boost.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Thruster {
    BowPort,
    BowStarboard,
    SternPort,
    SternStarboard,
    Boost,
}

impl Thruster {
    pub const ALL: [Thruster; 5] = [
        Thruster::BowPort,
        Thruster::BowStarboard,
        Thruster::SternPort,
        Thruster::SternStarboard,
        Thruster::Boost,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Thruster::BowPort => "BP",
            Thruster::BowStarboard => "BS",
            Thruster::SternPort => "SP",
            Thruster::SternStarboard => "SS",
            Thruster::Boost => "BOOST",
        }
    }
}

/// Which telemetry channel a predicate node samples.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Signal {
    PosX,
    PosY,
    Rotation,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::PosX => "pos-x",
            Signal::PosY => "pos-y",
            Signal::Rotation => "rot",
        }
    }
}

/// Comparison applied by a predicate node between its signal and its constant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Predicate {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

impl Predicate {
    pub fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            Predicate::Lt => lhs < rhs,
            Predicate::Gt => lhs > rhs,
            Predicate::Le => lhs <= rhs,
            Predicate::Ge => lhs >= rhs,
            Predicate::Eq => lhs == rhs,
            Predicate::Ne => lhs != rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Predicate::Lt => "<",
            Predicate::Gt => ">",
            Predicate::Le => "<=",
            Predicate::Ge => ">=",
            Predicate::Eq => "==",
            Predicate::Ne => "!=",
        }
    }
}

/// Boolean function computed by a gate node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Gate {
    And,
    Or,
    Not,
}

impl Gate {
    pub fn label(self) -> &'static str {
        match self {
            Gate::And => "AND",
            Gate::Or => "OR",
            Gate::Not => "NOT",
        }
    }
}

/// Sink node: passes its input's boolean through into one thruster channel.
#[derive(Clone, Debug)]
pub struct ThrusterNode {
    pub thruster: Thruster,
    pub input: Option<NodeId>,
}

/// Leaf node: compares one telemetry signal against a constant.
#[derive(Clone, Debug)]
pub struct PredicateNode {
    pub signal: Signal,
    pub predicate: Predicate,
    pub value: i32,
}

/// Interior node: boolean function of up to two inputs. `input2` is ignored by
/// [Gate::Not].
#[derive(Clone, Debug)]
pub struct GateNode {
    pub gate: Gate,
    pub input1: Option<NodeId>,
    pub input2: Option<NodeId>,
}

/// The closed set of node payloads. Every dispatch over nodes is an exhaustive
/// match on this, so there is no "unhandled kind" branch anywhere to hit at
/// runtime.
#[derive(Clone, Debug)]
pub enum NodeKind {
    Thruster(ThrusterNode),
    Predicate(PredicateNode),
    Gate(GateNode),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    /// Screen-space position. Only the renderer cares; evaluation never reads it.
    pub pos: Vec2,
    pub kind: NodeKind,
}

/// Coarse kind tag handed to the renderer alongside the display text.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeTag {
    Thruster,
    Predicate,
    Gate,
}

/// Everything the renderer needs to put one node on screen. Layout and
/// typography stay on the renderer's side of the line.
#[derive(Clone, Debug)]
pub struct DrawIntent {
    pub id: NodeId,
    pub tag: NodeTag,
    pub pos: Vec2,
    pub text: String,
}

impl Node {
    pub fn tag(&self) -> NodeTag {
        match self.kind {
            NodeKind::Thruster(_) => NodeTag::Thruster,
            NodeKind::Predicate(_) => NodeTag::Predicate,
            NodeKind::Gate(_) => NodeTag::Gate,
        }
    }

    pub fn display_text(&self) -> String {
        match &self.kind {
            NodeKind::Thruster(thruster) => format!("thruster {}", thruster.thruster.label()),
            NodeKind::Predicate(predicate) => format!(
                "{} {} {}",
                predicate.signal.label(),
                predicate.predicate.symbol(),
                predicate.value
            ),
            NodeKind::Gate(gate) => gate.gate.label().to_owned(),
        }
    }
}

/// Integer snapshot of the ship the predicate nodes compare against.
/// Positions truncate toward zero from the ship's float coordinates, so a
/// predicate on `pos-x == 100` starts holding at exactly 100.0, not 99.5.
#[derive(Clone, Copy, Debug)]
pub struct ShipSignals {
    pub pos_x: i32,
    pub pos_y: i32,
    pub rotation: i32,
}

impl ShipSignals {
    fn read(self, signal: Signal) -> i32 {
        match signal {
            Signal::PosX => self.pos_x,
            Signal::PosY => self.pos_y,
            Signal::Rotation => self.rotation,
        }
    }
}

/// One tick's aggregated activation, one slot per thruster channel, OR-folded
/// across every thruster node in the store.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct ThrustCommand {
    pub bow_port: bool,
    pub bow_starboard: bool,
    pub stern_port: bool,
    pub stern_starboard: bool,
    pub boost: bool,
}

impl ThrustCommand {
    pub fn activate(&mut self, thruster: Thruster) {
        match thruster {
            Thruster::BowPort => self.bow_port = true,
            Thruster::BowStarboard => self.bow_starboard = true,
            Thruster::SternPort => self.stern_port = true,
            Thruster::SternStarboard => self.stern_starboard = true,
            Thruster::Boost => self.boost = true,
        }
    }

    pub fn is_active(self, thruster: Thruster) -> bool {
        match thruster {
            Thruster::BowPort => self.bow_port,
            Thruster::BowStarboard => self.bow_starboard,
            Thruster::SternPort => self.stern_port,
            Thruster::SternStarboard => self.stern_starboard,
            Thruster::Boost => self.boost,
        }
    }

    pub fn any(self) -> bool {
        Thruster::ALL.iter().any(|&thruster| self.is_active(thruster))
    }
}

/// Owns every node in the circuit and issues their ids.
pub struct NodeStore {
    nodes: HashMap<NodeId, Node>,
    next_id: u32,
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        log::debug!("node {} added: {:?}", id.0, kind);
        self.nodes.insert(
            id,
            Node {
                id,
                pos: Vec2::ZERO,
                kind,
            },
        );
        id
    }

    /// Adds an unlinked thruster node for the given channel.
    pub fn add_thruster(&mut self, thruster: Thruster) -> NodeId {
        self.insert(NodeKind::Thruster(ThrusterNode {
            thruster,
            input: None,
        }))
    }

    /// Adds a gate node with both inputs unlinked.
    pub fn add_gate(&mut self, gate: Gate) -> NodeId {
        self.insert(NodeKind::Gate(GateNode {
            gate,
            input1: None,
            input2: None,
        }))
    }

    /// Adds a predicate node comparing `signal` against `value`.
    pub fn add_predicate(&mut self, signal: Signal, predicate: Predicate, value: i32) -> NodeId {
        self.insert(NodeKind::Predicate(PredicateNode {
            signal,
            predicate,
            value,
        }))
    }

    /// Total lookup: links may legitimately point at ids that were never
    /// issued, so "not here" is an answer, not a failure.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable lookup; this is the rewiring surface for links and positions.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// All stored nodes, in no guaranteed order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// One record per node for the renderer, in no guaranteed order.
    pub fn draw_intents(&self) -> Vec<DrawIntent> {
        self.nodes
            .values()
            .map(|node| DrawIntent {
                id: node.id,
                tag: node.tag(),
                pos: node.pos,
                text: node.display_text(),
            })
            .collect()
    }

    /// The per-tick walk: evaluates every thruster node against the telemetry
    /// snapshot and ORs its result into that thruster's command slot. Gates and
    /// predicates are only ever reached through links, and since OR is
    /// commutative the map's iteration order can't change the outcome.
    pub fn evaluate(&self, signals: ShipSignals) -> ThrustCommand {
        let mut command = ThrustCommand::default();
        for node in self.nodes.values() {
            if let NodeKind::Thruster(thruster) = &node.kind {
                if self.resolve(thruster.input, signals, self.nodes.len()) {
                    command.activate(thruster.thruster);
                }
            }
        }
        command
    }

    /// Follows one link and evaluates the node behind it. `depth` starts at the
    /// store's node count: an acyclic walk visits each node at most once, so
    /// running out of budget means a gate cycle, which fails closed to `false`
    /// instead of recursing forever.
    fn resolve(&self, link: Option<NodeId>, signals: ShipSignals, depth: usize) -> bool {
        let node = match link.and_then(|id| self.get(id)) {
            Some(node) => node,
            None => return false,
        };
        if depth == 0 {
            return false;
        }
        match &node.kind {
            NodeKind::Thruster(thruster) => self.resolve(thruster.input, signals, depth - 1),
            NodeKind::Predicate(predicate) => predicate
                .predicate
                .holds(signals.read(predicate.signal), predicate.value),
            NodeKind::Gate(gate) => {
                let val1 = self.resolve(gate.input1, signals, depth - 1);
                match gate.gate {
                    Gate::And => val1 && self.resolve(gate.input2, signals, depth - 1),
                    Gate::Or => val1 || self.resolve(gate.input2, signals, depth - 1),
                    Gate::Not => !val1,
                }
            }
        }
    }
}
