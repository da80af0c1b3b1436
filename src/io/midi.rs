//! The note events the engine emits and the sink they flow into.

/// Velocity used for every note-on; the circuit has no dynamics.
pub const NOTE_ON_VELOCITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
}

impl MidiEvent {
    /// Raw 3-byte MIDI message for a device sink.
    pub fn to_bytes(self) -> [u8; 3] {
        match self {
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => [0x90 | (channel & 0x0f), key, velocity],
            MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            } => [0x80 | (channel & 0x0f), key, velocity],
        }
    }
}

/// Receives note events as the propagation pass produces them. Timing and
/// physical delivery are the sink's concern, not the engine's.
pub trait NoteSink {
    fn send(&mut self, event: MidiEvent);
}

/// Buffering sink: the app drains it after each tick, tests inspect it.
impl NoteSink for Vec<MidiEvent> {
    fn send(&mut self, event: MidiEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bytes_status_and_channel() {
        let on = MidiEvent::NoteOn {
            channel: 3,
            key: 60,
            velocity: NOTE_ON_VELOCITY,
        };
        assert_eq!(on.to_bytes(), [0x93, 60, 100]);
        let off = MidiEvent::NoteOff {
            channel: 0,
            key: 36,
            velocity: 0,
        };
        assert_eq!(off.to_bytes(), [0x80, 36, 0]);
    }

    #[test]
    fn test_vec_sink_buffers_in_order() {
        let mut sink: Vec<MidiEvent> = Vec::new();
        let a = MidiEvent::NoteOn {
            channel: 0,
            key: 40,
            velocity: NOTE_ON_VELOCITY,
        };
        let b = MidiEvent::NoteOff {
            channel: 0,
            key: 40,
            velocity: 0,
        };
        sink.send(a);
        sink.send(b);
        assert_eq!(sink, vec![a, b]);
    }
}
