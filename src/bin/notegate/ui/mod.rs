//! TUI for notegate.
//!
//! Pure consumer of the core: reads the graph, brush and clock each frame
//! and produces no feedback into them.

mod canvas;
mod transport;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use notegate::brush::Brush;
use notegate::engine::{Clock, Propagator};
use notegate::graph::Graph;

use canvas::render_canvas;
use transport::render_transport;

/// Render one frame. Returns the canvas area so mouse events can be
/// mapped back into model coordinates.
pub fn render(
    frame: &mut Frame,
    graph: &Graph,
    brush: &Brush,
    clock: &Clock,
    propagator: &Propagator,
    midi_port: Option<&str>,
) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Transport bar
            Constraint::Min(10),   // Canvas
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_transport(frame, chunks[0], graph, clock, propagator, midi_port);

    let block = Block::default().title(" circuit ").borders(Borders::ALL);
    let inner = block.inner(chunks[1]);
    frame.render_widget(block, chunks[1]);
    render_canvas(frame, inner, graph, brush);

    let help = Paragraph::new(
        " [drag] wire  [r-click] gate  [space] play  [n] clear  [bksp] delete  [+/-] rate  [[ ]] octave  [c] channel  [q] quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[2]);

    inner
}
