//! Polarity resolution and the depth-bounded "bang" traversal.
//!
//! A bang starts at one gate, resolves its polarity from its live inputs,
//! pushes the result out along its wires and follows them, spending one
//! unit of depth per hop. Feedback loops are legal; the depth bound keeps a
//! single pass finite, at the cost that a cyclic patch may take several
//! ticks to settle.

use crate::graph::{GateId, GateKind, Graph, Polarity, WireId};
use crate::io::midi::{MidiEvent, NoteSink, NOTE_ON_VELOCITY};

/// Hops a single bang may follow before giving up.
pub const MAX_DEPTH: u32 = 10;

/// Resolve a gate's polarity from the live polarities of its input wires'
/// source gates. Wires or sources that no longer exist contribute nothing.
///
/// Returns `None` for a gate with no inputs: its polarity is owned by
/// whatever drives it externally (the clock, for input gates) and must not
/// be overwritten.
pub fn resolve(graph: &Graph, id: GateId) -> Option<Polarity> {
    let gate = graph.gate(id)?;
    let inputs: Vec<Polarity> = gate
        .inputs()
        .iter()
        .filter_map(|&wire| graph.wire(wire))
        .filter_map(|wire| graph.gate(wire.from))
        .map(|source| source.polarity)
        .collect();
    match inputs.len() {
        0 => None,
        1 => Some(inputs[0]),
        _ => Some(match gate.kind {
            GateKind::Logic(op) => op.apply(&inputs),
            // Output sinks (and anything else multi-input) use the
            // all-inputs-agree consensus rule.
            _ => Polarity::from_bool(inputs.iter().all(|&p| p == inputs[0])),
        }),
    }
}

/// Walks the graph once per tick and owns the clock-selected note offsets.
pub struct Propagator {
    max_depth: u32,
    /// Base octave added to every emitted note (clamped -4..=4 by the app).
    pub octave: i8,
    /// Channel offset added to every emitted note.
    pub channel: u8,
}

impl Propagator {
    pub fn new() -> Self {
        Self {
            max_depth: MAX_DEPTH,
            octave: 0,
            channel: 0,
        }
    }

    #[cfg(test)]
    fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::new()
        }
    }

    /// Resolve one gate, emit on output transitions, and push the result
    /// onto its wires' render cache.
    pub fn polarize(&self, graph: &mut Graph, id: GateId, sink: &mut impl NoteSink) {
        let resolved = resolve(graph, id);
        let Some(gate) = graph.gate(id) else {
            return;
        };
        let old = gate.polarity;
        let kind = gate.kind;
        let current = resolved.unwrap_or(old);

        // Output gates play their note only on a transition.
        if let (GateKind::Output(spec), Some(new)) = (kind, resolved) {
            let channel = (self.channel + spec.channel).min(15);
            let key = spec.key(self.octave);
            if new == Polarity::High && old != Polarity::High {
                sink.send(MidiEvent::NoteOn {
                    channel,
                    key,
                    velocity: NOTE_ON_VELOCITY,
                });
            } else if new == Polarity::Low && old == Polarity::High {
                sink.send(MidiEvent::NoteOff {
                    channel,
                    key,
                    velocity: 0,
                });
            }
        }

        if resolved.is_some() {
            if let Some(gate) = graph.gate_mut(id) {
                gate.polarity = current;
            }
        }

        // Fan out the (possibly unchanged) polarity for rendering.
        let outputs: Vec<WireId> = graph
            .gate(id)
            .map(|gate| gate.outputs().to_vec())
            .unwrap_or_default();
        for wire_id in outputs {
            if let Some(wire) = graph.wire_mut(wire_id) {
                wire.polarity = current;
            }
        }
    }

    /// One depth-bounded traversal from `root`.
    pub fn bang(&self, graph: &mut Graph, root: GateId, sink: &mut impl NoteSink) {
        let mut stack: Vec<(GateId, u32)> = vec![(root, self.max_depth)];
        while let Some((id, depth)) = stack.pop() {
            if depth == 0 || !graph.contains_gate(id) {
                continue;
            }
            self.polarize(graph, id, sink);
            let successors: Vec<GateId> = graph
                .gate(id)
                .map(|gate| {
                    gate.outputs()
                        .iter()
                        .filter_map(|&wire| graph.wire(wire))
                        .map(|wire| wire.to)
                        .collect()
                })
                .unwrap_or_default();
            // Reverse so the first-listed output is visited first.
            for &next in successors.iter().rev() {
                stack.push((next, depth - 1));
            }
        }
    }

    /// One full propagation pass: a bang from every active gate, in
    /// ascending slot order. Never fails; stale handles are skipped.
    pub fn bang_all(&self, graph: &mut Graph, sink: &mut impl NoteSink) {
        let roots: Vec<GateId> = graph.gates().map(|(id, _)| id).collect();
        for root in roots {
            self.bang(graph, root, sink);
        }
    }
}

impl Default for Propagator {
    fn default() -> Self {
        Self::new()
    }
}
