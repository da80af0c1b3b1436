//! MIDI device output - the note-sink adapter.
//!
//! Thin wrapper over midir: enumerate output ports, open the first one,
//! push raw 3-byte messages. Failure to open a device is reported once at
//! startup and the program keeps running without sound.

use color_eyre::eyre::{eyre, Result};
use midir::{MidiOutput, MidiOutputConnection};
use notegate::io::midi::MidiEvent;

pub struct MidiOut {
    connection: MidiOutputConnection,
    /// Name of the port we connected to, for the transport bar.
    pub port_name: String,
}

impl MidiOut {
    /// Open the first available MIDI output port.
    pub fn open() -> Result<Self> {
        let output = MidiOutput::new("notegate")?;
        let ports = output.ports();
        for port in &ports {
            if let Ok(name) = output.port_name(port) {
                tracing::info!(%name, "midi output port");
            }
        }
        let port = ports
            .first()
            .ok_or_else(|| eyre!("no MIDI output ports available"))?;
        let port_name = output
            .port_name(port)
            .unwrap_or_else(|_| "unknown".to_string());
        let connection = output
            .connect(port, "notegate-out")
            .map_err(|err| eyre!("failed to connect MIDI output: {}", err))?;
        tracing::info!(%port_name, "midi output opened");
        Ok(Self {
            connection,
            port_name,
        })
    }

    pub fn send(&mut self, event: MidiEvent) {
        if let Err(err) = self.connection.send(&event.to_bytes()) {
            tracing::warn!(%err, "midi send failed");
        }
    }
}
