//! Circuit nodes: tri-state polarity, gate kinds and the note mapping
//! carried by output gates.

use crate::geom::Point;
use crate::PORT_MAX;

use super::WireId;

/// Tri-state signal value carried by gates and wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    Low,
    High,
    /// No defined signal yet. Freshly created gates and unreached inputs
    /// sit here until something drives them.
    #[default]
    Undefined,
}

impl Polarity {
    pub fn is_high(self) -> bool {
        matches!(self, Polarity::High)
    }

    pub fn from_bool(high: bool) -> Self {
        if high {
            Polarity::High
        } else {
            Polarity::Low
        }
    }
}

/// Boolean operator applied by a multi-input logic gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Nand,
    Or,
    Nor,
    Xor,
    Xnor,
}

impl LogicOp {
    /// Apply the operator across the input polarities.
    ///
    /// `Undefined` inputs count as low, so a gate fed only undriven wires
    /// resolves the same as one fed all-low.
    pub fn apply(self, inputs: &[Polarity]) -> Polarity {
        let highs = inputs.iter().filter(|p| p.is_high()).count();
        let all = highs == inputs.len();
        let any = highs > 0;
        Polarity::from_bool(match self {
            LogicOp::And => all,
            LogicOp::Nand => !all,
            LogicOp::Or => any,
            LogicOp::Nor => !any,
            LogicOp::Xor => highs % 2 == 1,
            LogicOp::Xnor => highs % 2 == 0,
        })
    }
}

/// Static mapping from an output gate to the MIDI note it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteSpec {
    /// MIDI channel (0-15), added to the clock's selected channel.
    pub channel: u8,
    /// Semitones above the octave root.
    pub note: u8,
    /// Octave offset added to the clock's base octave.
    pub octave: i8,
    /// Sharp/flat adjustment in semitones.
    pub accidental: i8,
}

/// MIDI key of the lowest output-rail note at octave offset zero (C2).
pub const BASE_KEY: i32 = 36;

impl NoteSpec {
    pub fn note(note: u8) -> Self {
        Self {
            note,
            ..Self::default()
        }
    }

    /// MIDI key for this spec at the given base octave, clamped to range.
    pub fn key(&self, base_octave: i8) -> u8 {
        let key = BASE_KEY
            + 12 * (self.octave as i32 + base_octave as i32)
            + self.note as i32
            + self.accidental as i32;
        key.clamp(0, 127) as u8
    }
}

/// What a gate does when the propagation pass reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateKind {
    /// Clock-driven source. Never resolved from inputs and never a wiring
    /// destination.
    Input,
    /// Note-emitting sink. Resolves by consensus and plays its note on
    /// polarity transitions.
    Output(NoteSpec),
    /// Interior gate applying a boolean operator.
    Logic(LogicOp),
}

/// A node in the signal graph.
#[derive(Debug, Clone)]
pub struct Gate {
    pub kind: GateKind,
    pub polarity: Polarity,
    /// Locked gates form the fixed input/output rail and survive
    /// [`Graph::clear`](super::Graph::clear).
    pub locked: bool,
    /// Canvas position, also the hit-test anchor.
    pub position: Point,
    pub(crate) inputs: Vec<WireId>,
    pub(crate) outputs: Vec<WireId>,
}

impl Gate {
    pub fn new(kind: GateKind, polarity: Polarity, position: Point) -> Self {
        Self {
            kind,
            polarity,
            locked: false,
            position,
            inputs: Vec::with_capacity(PORT_MAX),
            outputs: Vec::with_capacity(PORT_MAX),
        }
    }

    /// Wires feeding this gate, in connection order.
    pub fn inputs(&self) -> &[WireId] {
        &self.inputs
    }

    /// Wires this gate drives, in connection order.
    pub fn outputs(&self) -> &[WireId] {
        &self.outputs
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, GateKind::Output(_))
    }
}
