//! Transport bar - play state, tick rate, octave/channel, pool usage.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use notegate::engine::{Clock, Propagator};
use notegate::graph::Graph;
use notegate::{GATE_MAX, WIRE_MAX};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    graph: &Graph,
    clock: &Clock,
    propagator: &Propagator,
    midi_port: Option<&str>,
) {
    let block = Block::default().title(" notegate ").borders(Borders::ALL);

    let play_symbol = if clock.is_playing() { "▶" } else { "⏸" };
    let midi_label = midi_port.unwrap_or("no device");

    let line = Line::from(vec![
        Span::styled(
            format!(" {} tick {}  ", play_symbol, clock.frame()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("{}ms  ", clock.tick_ms())),
        Span::raw(format!(
            "oct {:+}  ch {}  ",
            propagator.octave, propagator.channel
        )),
        Span::styled(
            format!(
                "gates {}/{}  wires {}/{}  ",
                graph.gate_count(),
                GATE_MAX,
                graph.wire_count(),
                WIRE_MAX
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("midi: {}", midi_label),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
