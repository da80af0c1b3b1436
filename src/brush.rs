//! The brush: the interactive wire-drawing gesture.
//!
//! A gesture runs `begin -> extend* -> end`, where `end` either commits the
//! stroke into the graph as a wire or abandons it. The brush never holds
//! graph handles across events; it re-resolves gates by hit-test at the
//! moments that matter, so a gate deleted mid-gesture simply makes the
//! commit fail.

use crate::engine::Propagator;
use crate::geom::Point;
use crate::graph::{Graph, Polarity, WireId};
use crate::io::midi::NoteSink;
use crate::PATH_MAX;

/// Squared minimum spacing between consecutive path points. Keeps drawn
/// paths free of degenerate duplicate points.
pub const MIN_SPACING_SQ: i64 = 20;

/// Transient wire-drawing state. Not part of the graph.
pub struct Brush {
    /// Last cursor position, in model coordinates.
    pub position: Point,
    down: bool,
    /// Render hint copied from the anchor gate at `begin`.
    polarity: Polarity,
    path: Vec<Point>,
}

impl Brush {
    pub fn new() -> Self {
        Self {
            position: Point::default(),
            down: false,
            polarity: Polarity::Undefined,
            path: Vec::with_capacity(PATH_MAX),
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.down
    }

    /// The in-progress stroke.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Polarity of the anchor gate, for rendering the stroke.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Start a gesture. Anchored to the hit gate's exact position when one
    /// is under the cursor; otherwise the raw position (such a stroke can
    /// never commit, since its first point won't hit-test to a gate).
    pub fn begin(&mut self, graph: &Graph, position: Point) {
        self.down = true;
        self.path.clear();
        let anchor = graph
            .find_gate_near(position)
            .and_then(|id| graph.gate(id));
        let start = match anchor {
            Some(gate) => {
                self.polarity = gate.polarity;
                gate.position
            }
            None => {
                self.polarity = Polarity::Undefined;
                position
            }
        };
        self.position = start;
        self.push_point(start);
    }

    /// Record cursor movement while drawing. Points closer than the
    /// spacing threshold to the last recorded point are dropped.
    pub fn extend(&mut self, position: Point) {
        if !self.down {
            return;
        }
        self.position = position;
        self.push_point(position);
    }

    /// Finish the gesture: commit if every precondition holds, abandon
    /// otherwise. Returns the committed wire, if any. The graph is only
    /// mutated on success, and the destination gate is re-resolved once so
    /// the new edge takes effect before the next tick.
    pub fn end(
        &mut self,
        graph: &mut Graph,
        position: Point,
        propagator: &Propagator,
        sink: &mut impl NoteSink,
    ) -> Option<WireId> {
        self.down = false;
        self.position = position;
        let committed = self.try_commit(graph, position, propagator, sink);
        self.path.clear();
        committed
    }

    /// Cancel the gesture outright.
    pub fn abandon(&mut self) {
        self.down = false;
        self.path.clear();
    }

    fn try_commit(
        &mut self,
        graph: &mut Graph,
        position: Point,
        propagator: &Propagator,
        sink: &mut impl NoteSink,
    ) -> Option<WireId> {
        let first = *self.path.first()?;
        let from = graph.find_gate_near(first)?;
        let to = graph.find_gate_near(position)?;
        // Snap the stroke's end onto the destination gate.
        let snap = graph.gate(to)?.position;
        self.snap_end(snap);
        match graph.connect(from, to, std::mem::take(&mut self.path)) {
            Ok(wire) => {
                propagator.polarize(graph, to, sink);
                Some(wire)
            }
            Err(err) => {
                tracing::debug!(%err, "wire gesture abandoned");
                None
            }
        }
    }

    /// Move the stroke's end exactly onto `point`: nudge the last recorded
    /// point when it is already within the spacing threshold, append
    /// otherwise.
    fn snap_end(&mut self, point: Point) {
        match self.path.last_mut() {
            Some(last) if last.dist_sq(point) <= MIN_SPACING_SQ => *last = point,
            _ => self.push_point(point),
        }
    }

    fn push_point(&mut self, point: Point) {
        if self.path.len() >= PATH_MAX {
            return;
        }
        match self.path.last() {
            Some(&last) if last.dist_sq(point) <= MIN_SPACING_SQ => {}
            _ => self.path.push(point),
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GateId, GateKind, LogicOp, NoteSpec};
    use crate::io::midi::MidiEvent;

    fn logic(graph: &mut Graph, x: i32, y: i32) -> GateId {
        graph
            .add_gate(
                GateKind::Logic(LogicOp::Nor),
                Polarity::Undefined,
                Point::new(x, y),
            )
            .unwrap()
    }

    fn drag(brush: &mut Brush, from: Point, to: Point) {
        // Coarse linear interpolation, like a real pointer drag.
        for step in 0..=8 {
            let x = from.x + (to.x - from.x) * step / 8;
            let y = from.y + (to.y - from.y) * step / 8;
            brush.extend(Point::new(x, y));
        }
    }

    #[test]
    fn test_begin_anchors_to_gate_and_copies_polarity() {
        let mut graph = Graph::new();
        let id = logic(&mut graph, 50, 50);
        graph.gate_mut(id).unwrap().polarity = Polarity::High;

        let mut brush = Brush::new();
        brush.begin(&graph, Point::new(52, 51)); // within hit radius
        assert!(brush.is_drawing());
        assert_eq!(brush.path(), &[Point::new(50, 50)]);
        assert_eq!(brush.polarity(), Polarity::High);
    }

    #[test]
    fn test_extend_enforces_spacing() {
        let graph = Graph::new();
        let mut brush = Brush::new();
        brush.begin(&graph, Point::new(0, 0));
        brush.extend(Point::new(1, 1)); // too close, dropped
        brush.extend(Point::new(10, 0));
        assert_eq!(brush.path(), &[Point::new(0, 0), Point::new(10, 0)]);
    }

    #[test]
    fn test_extend_stops_at_path_capacity() {
        let graph = Graph::new();
        let mut brush = Brush::new();
        brush.begin(&graph, Point::new(0, 0));
        for i in 1..(PATH_MAX as i32 * 2) {
            brush.extend(Point::new(i * 10, 0));
        }
        assert_eq!(brush.path().len(), PATH_MAX);
    }

    #[test]
    fn test_commit_creates_wire_and_repolarizes_destination() {
        let mut graph = Graph::new();
        let from = logic(&mut graph, 0, 0);
        graph.gate_mut(from).unwrap().polarity = Polarity::High;
        let to = graph
            .add_gate(
                GateKind::Output(NoteSpec::note(0)),
                Polarity::Undefined,
                Point::new(120, 0),
            )
            .unwrap();

        let mut brush = Brush::new();
        let prop = Propagator::new();
        let mut events: Vec<MidiEvent> = Vec::new();
        brush.begin(&graph, Point::new(1, 1));
        drag(&mut brush, Point::new(0, 0), Point::new(118, 0));
        let wire = brush
            .end(&mut graph, Point::new(118, 0), &prop, &mut events)
            .expect("gesture commits");

        let w = graph.wire(wire).unwrap();
        assert_eq!(w.from, from);
        assert_eq!(w.to, to);
        // Last point snapped to the destination gate.
        assert_eq!(*w.path().last().unwrap(), Point::new(120, 0));
        // The new edge took effect immediately: high reached the output.
        assert_eq!(graph.gate(to).unwrap().polarity, Polarity::High);
        assert_eq!(events.len(), 1);
        assert!(!brush.is_drawing());
        assert!(brush.path().is_empty());
    }

    #[test]
    fn test_gesture_off_gate_never_commits() {
        let mut graph = Graph::new();
        let _target = logic(&mut graph, 100, 100);
        let mut brush = Brush::new();
        let prop = Propagator::new();
        brush.begin(&graph, Point::new(0, 0)); // empty canvas here
        drag(&mut brush, Point::new(0, 0), Point::new(100, 100));
        let committed = brush.end(&mut graph, Point::new(100, 100), &prop, &mut Vec::new());
        assert_eq!(committed, None);
        assert_eq!(graph.wire_count(), 0);
    }

    #[test]
    fn test_output_to_output_rejected_without_mutation() {
        let mut graph = Graph::new();
        for x in [0, 100] {
            let id = graph
                .add_gate(
                    GateKind::Output(NoteSpec::note(0)),
                    Polarity::Undefined,
                    Point::new(x, 0),
                )
                .unwrap();
            graph.gate_mut(id).unwrap().locked = true;
        }
        let gates_before = graph.gate_count();

        let mut brush = Brush::new();
        let prop = Propagator::new();
        brush.begin(&graph, Point::new(0, 0));
        drag(&mut brush, Point::new(0, 0), Point::new(100, 0));
        let committed = brush.end(&mut graph, Point::new(100, 0), &prop, &mut Vec::new());

        assert_eq!(committed, None);
        assert_eq!(graph.gate_count(), gates_before);
        assert_eq!(graph.wire_count(), 0);
        for (_, gate) in graph.gates() {
            assert!(gate.inputs().is_empty());
            assert!(gate.outputs().is_empty());
        }
    }

    #[test]
    fn test_abandon_clears_state() {
        let graph = Graph::new();
        let mut brush = Brush::new();
        brush.begin(&graph, Point::new(0, 0));
        brush.extend(Point::new(50, 0));
        brush.abandon();
        assert!(!brush.is_drawing());
        assert!(brush.path().is_empty());
        // extend after abandon is a no-op
        brush.extend(Point::new(60, 0));
        assert!(brush.path().is_empty());
    }
}
