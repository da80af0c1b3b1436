//! End-to-end regression: rail + wiring + clock ticks, driven entirely
//! through the public API.

use notegate::brush::Brush;
use notegate::engine::{Clock, Propagator};
use notegate::geom::Point;
use notegate::graph::{GateId, GateKind, Graph, LogicOp, Polarity};
use notegate::io::midi::MidiEvent;

fn rail() -> (Graph, Clock) {
    let mut graph = Graph::new();
    let mut clock = Clock::new();
    clock.install_rail(&mut graph).expect("rail fits the pool");
    (graph, clock)
}

fn rail_gate(graph: &Graph, slot: usize) -> (GateId, Point) {
    let (id, gate) = graph.gates().nth(slot).unwrap();
    (id, gate.position)
}

/// Wire the fastest clock input (slot 0, toggling every 4 ticks) straight
/// into the first output-rail note and check the emitted note stream.
#[test]
fn clock_input_wired_to_output_plays_its_division() {
    let (mut graph, mut clock) = rail();
    // Rail layout: slots 0-7 clock inputs, 8-19 outputs.
    let (input, input_pos) = rail_gate(&graph, 0);
    let (output, output_pos) = rail_gate(&graph, 8);
    graph
        .connect(input, output, vec![input_pos, output_pos])
        .expect("rail gates are wirable");

    let propagator = Propagator::new();
    let mut events: Vec<MidiEvent> = Vec::new();
    for _ in 0..16 {
        clock.tick(&mut graph, &propagator, &mut events);
    }

    // Input is high on frames 4-7 and 12-15: two note-ons, and the offs
    // at frames 8 and (next cycle) 16 - the second off hasn't landed yet.
    let ons = events
        .iter()
        .filter(|e| matches!(e, MidiEvent::NoteOn { .. }))
        .count();
    let offs = events
        .iter()
        .filter(|e| matches!(e, MidiEvent::NoteOff { .. }))
        .count();
    assert_eq!(ons, 2);
    assert_eq!(offs, 1);
    // First event is the note-on of output-rail note 0 (C2).
    assert_eq!(
        events[0],
        MidiEvent::NoteOn {
            channel: 0,
            key: 36,
            velocity: 100
        }
    );
}

/// The constant-high rail gate wired straight to an output: one note-on
/// on the first pass, then silence - identical polarity never re-emits.
#[test]
fn steady_state_emits_nothing() {
    let (mut graph, mut clock) = rail();
    // Slot 21 is the constant-high input.
    let (high, high_pos) = rail_gate(&graph, 21);
    let (output, output_pos) = rail_gate(&graph, 9);
    graph
        .connect(high, output, vec![high_pos, output_pos])
        .unwrap();

    let propagator = Propagator::new();
    let mut events: Vec<MidiEvent> = Vec::new();
    for _ in 0..50 {
        clock.tick(&mut graph, &propagator, &mut events);
    }
    // One transition ever: the initial low -> high.
    assert_eq!(
        events,
        vec![MidiEvent::NoteOn {
            channel: 0,
            key: 37,
            velocity: 100
        }]
    );
}

/// A feedback loop between two NOR gates must neither hang a tick nor
/// corrupt the graph; it settles (or oscillates) over multiple ticks.
#[test]
fn cyclic_patch_ticks_safely() {
    let (mut graph, mut clock) = rail();
    let a = graph
        .add_gate(
            GateKind::Logic(LogicOp::Nor),
            Polarity::Undefined,
            Point::new(100, 60),
        )
        .unwrap();
    let b = graph
        .add_gate(
            GateKind::Logic(LogicOp::Nor),
            Polarity::Undefined,
            Point::new(140, 60),
        )
        .unwrap();
    let (pa, pb) = (
        graph.gate(a).unwrap().position,
        graph.gate(b).unwrap().position,
    );
    // Doubled edges so both gates resolve with their operator (a single
    // input would be a pass-through and keep everything undefined).
    graph.connect(a, b, vec![pa, pb]).unwrap();
    graph.connect(a, b, vec![pa, pb]).unwrap();
    graph.connect(b, a, vec![pb, pa]).unwrap();
    graph.connect(b, a, vec![pb, pa]).unwrap();

    let propagator = Propagator::new();
    let mut events: Vec<MidiEvent> = Vec::new();
    for _ in 0..100 {
        clock.tick(&mut graph, &propagator, &mut events);
    }
    assert_eq!(clock.frame(), 100);
    // The loop gates hold defined values once propagation has reached them.
    assert_ne!(graph.gate(a).unwrap().polarity, Polarity::Undefined);
    assert_ne!(graph.gate(b).unwrap().polarity, Polarity::Undefined);
}

/// Full interactive session: draw a gate, wire the constant-high rail into
/// it with the brush, wire it onward to an output, then clear and confirm
/// only the rail remains.
#[test]
fn brush_session_then_clear() {
    let (mut graph, mut clock) = rail();
    let propagator = Propagator::new();
    let mut events: Vec<MidiEvent> = Vec::new();

    // Right-click gesture: new NOR gate in the middle of the canvas.
    let gate_pos = Point::new(130, 70);
    let gate = graph
        .add_gate(GateKind::Logic(LogicOp::Nor), Polarity::Undefined, gate_pos)
        .unwrap();

    // Stroke from the constant-high rail gate to the new gate.
    let (_, high_pos) = rail_gate(&graph, 21);
    let mut brush = Brush::new();
    brush.begin(&graph, high_pos);
    brush.extend(Point::new(80, 70));
    brush.extend(Point::new(110, 70));
    assert!(brush
        .end(&mut graph, gate_pos, &propagator, &mut events)
        .is_some());

    // And from the new gate onto an output-rail note.
    let (_, output_pos) = rail_gate(&graph, 10);
    brush.begin(&graph, gate_pos);
    brush.extend(Point::new(180, 50));
    assert!(brush
        .end(&mut graph, output_pos, &propagator, &mut events)
        .is_some());
    assert_eq!(graph.wire_count(), 2);

    // The commit itself played the note: the constant high passed through
    // the middle gate and reached the output without waiting for a tick.
    assert_eq!(
        events,
        vec![MidiEvent::NoteOn {
            channel: 0,
            key: 38,
            velocity: 100
        }]
    );

    for _ in 0..8 {
        clock.tick(&mut graph, &propagator, &mut events);
    }
    // Steady high: no further transitions, no further events.
    assert_eq!(events.len(), 1);

    graph.clear(true);
    assert_eq!(graph.gate_count(), 22);
    assert_eq!(graph.wire_count(), 0);
    assert!(graph.gate(gate).is_none());

    // The cleared graph still ticks.
    clock.tick(&mut graph, &propagator, &mut events);
}
