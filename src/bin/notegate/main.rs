//! notegate - terminal logic-gate sequencer
//!
//! Wire gates with the mouse; the clock plays the circuit as MIDI.
//! Run with: cargo run

mod app;
mod midi_out;
mod ui;

use std::io::stdout;

use color_eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tracing_subscriber::EnvFilter;

use app::App;

fn main() -> Result<()> {
    color_eyre::install()?;
    // Logging goes to stderr behind RUST_LOG; the TUI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let app = App::new()?;

    let mut terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = app.run(&mut terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
