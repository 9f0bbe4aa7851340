//! # Widget: Role Pie Chart
//!
//! ## Responsibility
//! Draws the role distribution as a filled pie on a braille canvas with a
//! legend of percentage labels ("Admin: 1 (50.0%)") beside it.
//!
//! ## Guarantees
//! - The pie stays round regardless of the cell aspect ratio of the area
//! - Empty store and failed chart load render explanatory text instead
//! - Slices are rasterised once per frame; no per-point allocation

use std::f64::consts::TAU;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::to_color;
use crate::chart::PieSlice;
use crate::tui::app::App;

/// Pie radius in canvas units.
const RADIUS: f64 = 0.95;

/// Legend column width in cells.
const LEGEND_WIDTH: u16 = 24;

/// Canvas bounds `(x, y)` that keep a unit circle round in an area of
/// `width` x `height` cells, assuming cells twice as tall as wide.
pub fn round_bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let visual_w = f64::from(width.max(1)) * 0.5;
    let visual_h = f64::from(height.max(1));
    if visual_w >= visual_h {
        let ax = visual_w / visual_h;
        ([-ax, ax], [-1.0, 1.0])
    } else {
        let ay = visual_h / visual_w;
        ([-1.0, 1.0], [-ay, ay])
    }
}

/// Angle of `(x, y)` in turns, clockwise from twelve o'clock.
pub fn turn_of(x: f64, y: f64) -> f64 {
    let turn = x.atan2(y) / TAU;
    if turn < 0.0 {
        turn + 1.0
    } else {
        turn
    }
}

/// Rasterises `slices` into braille-resolution points, bucketed by role.
pub fn pie_points(slices: &[PieSlice], width: u16, height: u16) -> [Vec<(f64, f64)>; 3] {
    let mut buckets: [Vec<(f64, f64)>; 3] = Default::default();
    let filled: Vec<&PieSlice> = slices.iter().filter(|s| s.sweep > 0.0).collect();
    let Some(last) = filled.last() else {
        return buckets;
    };

    let ([x0, x1], [y0, y1]) = round_bounds(width, height);
    let nx = usize::from(width) * 2;
    let ny = usize::from(height) * 4;
    let dx = (x1 - x0) / nx.max(1) as f64;
    let dy = (y1 - y0) / ny.max(1) as f64;

    for i in 0..nx {
        let x = x0 + (i as f64 + 0.5) * dx;
        for j in 0..ny {
            let y = y0 + (j as f64 + 0.5) * dy;
            if x * x + y * y > RADIUS * RADIUS {
                continue;
            }
            let turn = turn_of(x, y);
            let role = filled
                .iter()
                .find(|s| turn >= s.start && turn < s.start + s.sweep)
                .map_or(last.role, |s| s.role);
            buckets[role.index()].push((x, y));
        }
    }
    buckets
}

/// Renders the role chart widget.
///
/// # Arguments
/// * `f` - Ratatui frame to render into.
/// * `area` - Rectangular area allocated for this widget.
/// * `app` - Application state containing the chart renderer.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" ROLES ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(chart) = app.dashboard().chart().chart() else {
        let (msg, color) = if app.dashboard().store().is_empty() {
            ("No users yet.", Color::DarkGray)
        } else {
            ("Chart unavailable (see activity).", Color::Red)
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(color)))),
            inner,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(8), Constraint::Length(LEGEND_WIDTH)])
        .split(inner);

    let slices = chart.slices();
    let data = chart.data();

    let pie_area = chunks[0];
    let (x_bounds, y_bounds) = round_bounds(pie_area.width, pie_area.height);
    let buckets = pie_points(&slices, pie_area.width, pie_area.height);
    let colors: Vec<Color> = slices.iter().map(|s| to_color(s.color)).collect();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for (points, color) in buckets.iter().zip(colors.iter()) {
                if !points.is_empty() {
                    ctx.draw(&Points {
                        coords: points,
                        color: *color,
                    });
                }
            }
        });
    f.render_widget(canvas, pie_area);

    let mut legend: Vec<Line> = vec![Line::from("")];
    for slice in &slices {
        legend.push(Line::from(vec![
            Span::styled("\u{25a0} ", Style::default().fg(to_color(slice.color))),
            Span::styled(data.label(slice.role), Style::default().fg(Color::White)),
        ]));
    }
    legend.push(Line::from(""));
    legend.push(Line::from(Span::styled(
        format!("total {}", data.total()),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(legend), chunks[1]);
}
