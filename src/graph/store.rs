//! The graph store: owns every gate and wire in fixed-capacity pools and
//! enforces the wiring rules.

use std::fmt;

use crate::geom::Point;
use crate::{GATE_MAX, PATH_MAX, PORT_MAX, WIRE_MAX};

use super::gate::{Gate, GateKind, Polarity};
use super::pool::{Pool, PoolError};
use super::wire::Wire;
use super::{GateId, WireId};

/// Squared hit radius for gate picking.
pub const HIT_RADIUS_SQ: i64 = 50;

/// Why a connect request was refused. All variants leave the graph
/// untouched; a refused gesture is expected interaction, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// One of the endpoint handles is stale or freed.
    MissingGate,
    /// A gate cannot feed itself.
    SelfLoop,
    /// Input gates are driven by the clock and accept no wires.
    IntoInput,
    /// Output gates are sinks; they drive notes, not wires.
    FromOutput,
    /// The source gate already drives `PORT_MAX` wires.
    SourceSaturated,
    /// The destination gate already receives `PORT_MAX` wires.
    DestinationSaturated,
    /// A wire needs at least one path point.
    EmptyPath,
    /// The wire pool is full.
    Capacity(PoolError),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::MissingGate => write!(f, "endpoint gate no longer exists"),
            ConnectError::SelfLoop => write!(f, "a gate cannot be wired to itself"),
            ConnectError::IntoInput => write!(f, "input gates accept no wires"),
            ConnectError::FromOutput => write!(f, "output gates drive notes, not wires"),
            ConnectError::SourceSaturated => {
                write!(f, "source gate already drives {} wires", PORT_MAX)
            }
            ConnectError::DestinationSaturated => {
                write!(f, "destination gate already receives {} wires", PORT_MAX)
            }
            ConnectError::EmptyPath => write!(f, "wire path has no points"),
            ConnectError::Capacity(err) => write!(f, "wire {}", err),
        }
    }
}

impl std::error::Error for ConnectError {}

/// Owns all gates and wires. Entities reference each other only by handle;
/// a handle into a freed slot is detected by the pools, never followed.
pub struct Graph {
    gates: Pool<Gate>,
    wires: Pool<Wire>,
}

impl Graph {
    pub fn new() -> Self {
        Self::with_capacity(GATE_MAX, WIRE_MAX)
    }

    pub fn with_capacity(gates: usize, wires: usize) -> Self {
        Self {
            gates: Pool::with_capacity(gates),
            wires: Pool::with_capacity(wires),
        }
    }

    /// Allocate a gate with empty port lists.
    pub fn add_gate(
        &mut self,
        kind: GateKind,
        polarity: Polarity,
        position: Point,
    ) -> Result<GateId, PoolError> {
        let id = self.gates.insert(Gate::new(kind, polarity, position))?;
        tracing::debug!(?id, ?kind, "gate added");
        Ok(id)
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(id)
    }

    pub fn gate_mut(&mut self, id: GateId) -> Option<&mut Gate> {
        self.gates.get_mut(id)
    }

    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.get(id)
    }

    pub fn wire_mut(&mut self, id: WireId) -> Option<&mut Wire> {
        self.wires.get_mut(id)
    }

    pub fn contains_gate(&self, id: GateId) -> bool {
        self.gates.contains(id)
    }

    /// Active gates in ascending slot order.
    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> {
        self.gates.iter()
    }

    /// Active wires in ascending slot order.
    pub fn wires(&self) -> impl Iterator<Item = (WireId, &Wire)> {
        self.wires.iter()
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// First active gate within the hit radius of `p`, scanning slots in
    /// ascending order. Deliberately order-dependent rather than
    /// nearest-neighbor: overlapping gates always resolve to the lowest
    /// slot.
    pub fn find_gate_near(&self, p: Point) -> Option<GateId> {
        self.gates
            .iter()
            .find(|(_, gate)| gate.position.dist_sq(p) < HIT_RADIUS_SQ)
            .map(|(id, _)| id)
    }

    /// Newest (highest-slot) unlocked gate, the target of the
    /// delete-last-gate command.
    pub fn last_unlocked(&self) -> Option<GateId> {
        self.gates
            .iter()
            .filter(|(_, gate)| !gate.locked)
            .last()
            .map(|(id, _)| id)
    }

    /// Wire `from` to `to` along `path`.
    ///
    /// Validates endpoints, ports and the path before allocating, so a
    /// refusal leaves the graph exactly as it was. The new wire's cached
    /// polarity is seeded from the live source gate.
    pub fn connect(
        &mut self,
        from: GateId,
        to: GateId,
        mut path: Vec<Point>,
    ) -> Result<WireId, ConnectError> {
        let (source, dest) = match (self.gates.get(from), self.gates.get(to)) {
            (Some(source), Some(dest)) => (source, dest),
            _ => return Err(ConnectError::MissingGate),
        };
        if from == to {
            return Err(ConnectError::SelfLoop);
        }
        if source.outputs.len() >= PORT_MAX {
            return Err(ConnectError::SourceSaturated);
        }
        if dest.inputs.len() >= PORT_MAX {
            return Err(ConnectError::DestinationSaturated);
        }
        if dest.kind == GateKind::Input {
            return Err(ConnectError::IntoInput);
        }
        if source.is_output() {
            return Err(ConnectError::FromOutput);
        }
        if path.is_empty() {
            return Err(ConnectError::EmptyPath);
        }
        path.truncate(PATH_MAX);

        let polarity = source.polarity;
        let id = self
            .wires
            .insert(Wire::new(from, to, polarity, path))
            .map_err(ConnectError::Capacity)?;
        // Validated above, so the port pushes cannot fail.
        if let Some(gate) = self.gates.get_mut(from) {
            gate.outputs.push(id);
        }
        if let Some(gate) = self.gates.get_mut(to) {
            gate.inputs.push(id);
        }
        tracing::debug!(?id, ?from, ?to, "wire connected");
        Ok(id)
    }

    /// Remove a gate and every wire touching it. Locked rail gates are
    /// refused. Returns whether anything was removed.
    pub fn remove_gate(&mut self, id: GateId) -> bool {
        match self.gates.get(id) {
            Some(gate) if !gate.locked => {}
            _ => return false,
        }
        let touching: Vec<WireId> = self
            .wires
            .iter()
            .filter(|(_, wire)| wire.from == id || wire.to == id)
            .map(|(wire_id, _)| wire_id)
            .collect();
        for wire_id in touching {
            self.disconnect(wire_id);
        }
        self.gates.remove(id);
        tracing::debug!(?id, "gate removed");
        true
    }

    /// Free one wire and unlink it from both endpoint port lists.
    pub fn disconnect(&mut self, id: WireId) {
        let Some(wire) = self.wires.remove(id) else {
            return;
        };
        if let Some(gate) = self.gates.get_mut(wire.from) {
            gate.outputs.retain(|&w| w != id);
        }
        if let Some(gate) = self.gates.get_mut(wire.to) {
            gate.inputs.retain(|&w| w != id);
        }
    }

    /// Reset the user's drawing: free all wires, empty every surviving
    /// gate's port lists, and free all gates except locked ones when
    /// `preserve_locked` is set.
    pub fn clear(&mut self, preserve_locked: bool) {
        self.wires.retain(|_| false);
        if preserve_locked {
            self.gates.retain(|gate| gate.locked);
        } else {
            self.gates.retain(|_| false);
        }
        // Surviving rail gates must not hold handles to freed wires.
        let survivors: Vec<GateId> = self.gates.iter().map(|(id, _)| id).collect();
        for id in survivors {
            if let Some(gate) = self.gates.get_mut(id) {
                gate.inputs.clear();
                gate.outputs.clear();
            }
        }
        tracing::info!(preserve_locked, gates = self.gates.len(), "graph cleared");
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
