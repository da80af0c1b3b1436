//! Circuit canvas: gates, wires and the in-progress brush stroke.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line};
use ratatui::Frame;

use notegate::brush::Brush;
use notegate::geom::Point;
use notegate::graph::{Graph, Polarity};
use notegate::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Gate marker radius in model units.
const GATE_RADIUS: f64 = 3.0;

fn polarity_color(polarity: Polarity) -> Color {
    match polarity {
        Polarity::High => Color::Cyan,
        Polarity::Low => Color::Yellow,
        Polarity::Undefined => Color::DarkGray,
    }
}

/// Model y grows downward, canvas y upward.
fn flip(p: Point) -> (f64, f64) {
    (p.x as f64, (CANVAS_HEIGHT - p.y) as f64)
}

fn draw_path(ctx: &mut Context, path: &[Point], color: Color) {
    for pair in path.windows(2) {
        let (x1, y1) = flip(pair[0]);
        let (x2, y2) = flip(pair[1]);
        ctx.draw(&Line {
            x1,
            y1,
            x2,
            y2,
            color,
        });
    }
}

pub fn render_canvas(frame: &mut Frame, area: Rect, graph: &Graph, brush: &Brush) {
    let widget = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_WIDTH as f64])
        .y_bounds([0.0, CANVAS_HEIGHT as f64])
        .paint(|ctx| {
            for (_, wire) in graph.wires() {
                draw_path(ctx, wire.path(), polarity_color(wire.polarity));
            }
            ctx.layer();
            for (_, gate) in graph.gates() {
                let (x, y) = flip(gate.position);
                ctx.draw(&Circle {
                    x,
                    y,
                    radius: GATE_RADIUS,
                    color: polarity_color(gate.polarity),
                });
                // Output gates get a hollow center mark.
                if gate.is_output() {
                    ctx.draw(&Circle {
                        x,
                        y,
                        radius: 1.0,
                        color: Color::White,
                    });
                }
            }
            if brush.is_drawing() {
                ctx.layer();
                draw_path(ctx, brush.path(), polarity_color(brush.polarity()));
            }
        });
    frame.render_widget(widget, area);
}
