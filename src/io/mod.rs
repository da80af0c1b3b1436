// Purpose - external interfaces: discrete note events out

pub mod midi;

pub use midi::{MidiEvent, NoteSink};
