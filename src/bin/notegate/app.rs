//! Application state and the single-threaded control loop.
//!
//! One thread does everything, in a fixed order per frame: draw, drain
//! input events (each edit redraws on the next pass), then tick the clock
//! when its interval has elapsed. Nothing blocks except the event poll,
//! whose timeout doubles as the frame pacer.

use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;

use notegate::brush::Brush;
use notegate::engine::{Clock, Propagator};
use notegate::geom::Point;
use notegate::graph::{GateKind, Graph, LogicOp, Polarity};
use notegate::io::midi::MidiEvent;
use notegate::{CANVAS_HEIGHT, CANVAS_WIDTH};

use super::midi_out::MidiOut;
use super::ui;

/// Gate kind created by the right-click gesture.
const DEFAULT_GATE: GateKind = GateKind::Logic(LogicOp::Nor);

const OCTAVE_MIN: i8 = -4;
const OCTAVE_MAX: i8 = 4;

pub struct App {
    graph: Graph,
    brush: Brush,
    clock: Clock,
    propagator: Propagator,
    midi: Option<MidiOut>,
    /// Events emitted since the last flush to the device.
    pending: Vec<MidiEvent>,
    /// Where the canvas landed on screen last frame, for mouse mapping.
    canvas_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new() -> Result<Self> {
        let mut graph = Graph::new();
        let mut clock = Clock::new();
        clock.install_rail(&mut graph)?;

        // The core stays consistent without a device; play on regardless.
        let midi = match MidiOut::open() {
            Ok(out) => Some(out),
            Err(err) => {
                tracing::warn!(%err, "running without MIDI output");
                None
            }
        };

        Ok(Self {
            graph,
            brush: Brush::new(),
            clock,
            propagator: Propagator::new(),
            midi,
            pending: Vec::new(),
            canvas_area: Rect::default(),
            should_quit: false,
        })
    }

    pub fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_tick = Instant::now();
        while !self.should_quit {
            terminal.draw(|frame| {
                self.canvas_area = ui::render(
                    frame,
                    &self.graph,
                    &self.brush,
                    &self.clock,
                    &self.propagator,
                    self.midi.as_ref().map(|m| m.port_name.as_str()),
                );
            })?;

            let interval = Duration::from_millis(self.clock.tick_ms());
            let timeout = interval.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= interval {
                self.clock
                    .tick(&mut self.graph, &self.propagator, &mut self.pending);
                self.flush_midi();
                last_tick = Instant::now();
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.brush.is_drawing() {
                    self.brush.abandon();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char(' ') => self.clock.toggle(),
            KeyCode::Char('n') => self.graph.clear(true),
            KeyCode::Backspace => {
                if let Some(id) = self.graph.last_unlocked() {
                    self.graph.remove_gate(id);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.clock.faster(),
            KeyCode::Char('-') => self.clock.slower(),
            KeyCode::Char('[') => {
                self.propagator.octave = (self.propagator.octave - 1).max(OCTAVE_MIN);
            }
            KeyCode::Char(']') => {
                self.propagator.octave = (self.propagator.octave + 1).min(OCTAVE_MAX);
            }
            KeyCode::Char('c') => {
                self.propagator.channel = (self.propagator.channel + 1) % 16;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(position) = self.to_model(mouse.column, mouse.row) else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.brush.begin(&self.graph, position);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.brush.extend(position);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.brush
                    .end(&mut self.graph, position, &self.propagator, &mut self.pending);
                // A committed wire may fire the destination immediately.
                self.flush_midi();
            }
            MouseEventKind::Up(MouseButton::Right) => {
                if self.graph.find_gate_near(position).is_none() {
                    if let Err(err) =
                        self.graph
                            .add_gate(DEFAULT_GATE, Polarity::Undefined, position)
                    {
                        tracing::warn!(%err, "gate refused");
                    }
                }
            }
            _ => {}
        }
    }

    /// Map a terminal cell onto model coordinates, if it falls inside the
    /// canvas drawn last frame.
    fn to_model(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let x = (column - area.x) as i32 * CANVAS_WIDTH / area.width as i32;
        let y = (row - area.y) as i32 * CANVAS_HEIGHT / area.height as i32;
        Some(Point::new(x, y))
    }

    fn flush_midi(&mut self) {
        if let Some(midi) = self.midi.as_mut() {
            for event in self.pending.drain(..) {
                midi.send(event);
            }
        } else {
            self.pending.clear();
        }
    }
}
