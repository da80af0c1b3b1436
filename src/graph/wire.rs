//! Directed edges with the hand-drawn route used for rendering.

use crate::geom::Point;
use crate::graph::Polarity;

use super::GateId;

/// A directed edge from one gate's output port to another's input port.
#[derive(Debug, Clone)]
pub struct Wire {
    pub from: GateId,
    pub to: GateId,
    /// Snapshot of the source gate's polarity from the last propagation
    /// pass. Rendering reads this; logic always reads the live gate.
    pub polarity: Polarity,
    path: Vec<Point>,
}

impl Wire {
    pub(crate) fn new(from: GateId, to: GateId, polarity: Polarity, path: Vec<Point>) -> Self {
        debug_assert!(!path.is_empty());
        Self {
            from,
            to,
            polarity,
            path,
        }
    }

    /// The drawn route. First point sits at the source gate, last at the
    /// destination.
    pub fn path(&self) -> &[Point] {
        &self.path
    }
}
