//! The clock: advances discrete time, derives the input rail's waveforms
//! from the tick counter, and runs one propagation pass per tick.
//!
//! The rail is the only external stimulus into an otherwise closed system.
//! Even rail slots are binary clock dividers (toggling every 4, 8, 16, 32
//! ticks); odd slots are the four phases of a quaternary counter.

use crate::geom::Point;
use crate::graph::{GateId, GateKind, Graph, NoteSpec, Polarity, PoolError};
use crate::io::midi::NoteSink;
use crate::CANVAS_WIDTH;

use super::propagate::Propagator;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 40;
/// Fastest allowed tick interval.
pub const MIN_TICK_MS: u64 = 10;
/// Slowest allowed tick interval.
pub const MAX_TICK_MS: u64 = 200;
/// Step applied by the faster/slower commands.
const TICK_STEP_MS: u64 = 10;

/// Clock-driven input slots on the rail.
const CLOCK_INPUTS: usize = 8;
/// Note slots on the output rail (one octave).
const RAIL_OUTPUTS: usize = 12;

/// Discrete clock and transport state.
pub struct Clock {
    frame: u64,
    playing: bool,
    tick_ms: u64,
    /// Clock-driven rail gates, in divider order. The two constant rail
    /// gates are not listed; their polarity never changes.
    inputs: Vec<GateId>,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            frame: 0,
            playing: true,
            tick_ms: DEFAULT_TICK_MS,
            inputs: Vec::with_capacity(CLOCK_INPUTS),
        }
    }

    /// Build the fixed rail: eight clock-driven inputs on the left column,
    /// twelve note outputs on the right, and an always-low / always-high
    /// constant pair below the inputs. All rail gates are locked so a
    /// clear leaves them standing.
    pub fn install_rail(&mut self, graph: &mut Graph) -> Result<(), PoolError> {
        for i in 0..CLOCK_INPUTS {
            let id = graph.add_gate(GateKind::Input, Polarity::Low, rail_input_pos(i))?;
            lock(graph, id);
            self.inputs.push(id);
        }
        for i in 0..RAIL_OUTPUTS {
            let id = graph.add_gate(
                GateKind::Output(NoteSpec::note(i as u8)),
                Polarity::Low,
                rail_output_pos(i),
            )?;
            lock(graph, id);
        }
        for (i, polarity) in [(CLOCK_INPUTS + 2, Polarity::Low), (CLOCK_INPUTS + 3, Polarity::High)] {
            let id = graph.add_gate(GateKind::Input, polarity, rail_input_pos(i))?;
            lock(graph, id);
        }
        Ok(())
    }

    /// Set every clock-driven input's polarity for the current frame.
    pub fn drive(&self, graph: &mut Graph) {
        for (slot, &id) in self.inputs.iter().enumerate() {
            let high = if slot % 2 == 0 {
                // Binary divider: slot 0 toggles every 4 ticks, 2 every 8...
                (self.frame / (4 << (slot / 2))) % 2 == 1
            } else {
                // Quaternary phase: slots 1,3,5,7 take turns every 8 ticks.
                (self.frame / 8) % 4 == (slot / 2) as u64
            };
            if let Some(gate) = graph.gate_mut(id) {
                gate.polarity = Polarity::from_bool(high);
            }
        }
    }

    /// One tick: drive the rail, run the propagation pass, advance time.
    /// No-op while paused.
    pub fn tick(&mut self, graph: &mut Graph, propagator: &Propagator, sink: &mut impl NoteSink) {
        if !self.playing {
            return;
        }
        self.drive(graph);
        propagator.bang_all(graph, sink);
        self.frame += 1;
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Current tick interval in milliseconds.
    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn faster(&mut self) {
        self.tick_ms = self.tick_ms.saturating_sub(TICK_STEP_MS).max(MIN_TICK_MS);
    }

    pub fn slower(&mut self) {
        self.tick_ms = (self.tick_ms + TICK_STEP_MS).min(MAX_TICK_MS);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(graph: &mut Graph, id: GateId) {
    if let Some(gate) = graph.gate_mut(id) {
        gate.locked = true;
    }
}

fn rail_input_pos(i: usize) -> Point {
    let x = if i % 2 == 0 { 26 } else { 20 };
    Point::new(x, 30 + i as i32 * 6)
}

fn rail_output_pos(i: usize) -> Point {
    let x = CANVAS_WIDTH - if i % 2 == 0 { 46 } else { 40 };
    Point::new(x, 30 + i as i32 * 6)
}
