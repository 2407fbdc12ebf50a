//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table};

use super::runtime::App;
use super::style;
use crate::features::{FEATURE_NAMES, FeatureRecord};
use crate::predictor::OUTPUT_LABEL;

/// Height of one slider gauge including its border.
const SLIDER_HEIGHT: u16 = 3;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    render_header(frame, rows[0]);
    render_sliders(frame, app, body[0]);
    render_results(frame, app, body[1]);
    render_footer(frame, rows[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " SOLAR-PREDICT ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(
            " Solar Power Generation Prediction │ AC output (kW) from weather and time of day",
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// One bordered gauge per slider, selected one highlighted.
fn render_sliders(frame: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default()
        .title(" Input Features ")
        .borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let sliders = app.panel.sliders();
    let constraints: Vec<Constraint> = sliders
        .iter()
        .map(|_| Constraint::Length(SLIDER_HEIGHT))
        .chain([Constraint::Min(0)])
        .collect();
    let cells = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, slider) in sliders.iter().enumerate() {
        let spec = slider.spec;
        let selected = i == app.panel.selected();
        let marker = if selected { "▶ " } else { "  " };
        let title_style = if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(Span::styled(format!("{marker}{} ", spec.label), title_style))
                    .borders(Borders::ALL),
            )
            .gauge_style(Style::default().fg(style::slider_color(selected)))
            .ratio(slider.ratio().clamp(0.0, 1.0))
            .label(format!(
                "{}  [{}, {}]",
                spec.format(slider.value()),
                spec.format(spec.min),
                spec.format(spec.max)
            ));
        frame.render_widget(gauge, cells[i]);
    }
}

/// Input table on top, power readout below.
fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(5)])
        .split(area);

    let rows: Vec<Row> = app
        .record
        .named_values()
        .enumerate()
        .map(|(i, (name, value))| {
            Row::new(vec![
                Cell::from(name),
                Cell::from(FeatureRecord::format_value(i, value)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(FEATURE_NAMES.iter().map(|n| n.len()).max().unwrap_or(20) as u16 + 2),
        Constraint::Min(8),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Feature", "Value"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(" Your Selected Input Features ")
                .borders(Borders::ALL),
        );
    frame.render_widget(table, chunks[0]);

    let p = app.prediction;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::raw(format!("  {OUTPUT_LABEL}"))),
        Line::from(Span::styled(
            format!("  {p}"),
            Style::default()
                .fg(style::output_color(p.power_kw))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    if p.was_clamped() {
        lines.push(Line::from(Span::styled(
            format!("  (model output {:.2} kW, floored at zero)", p.raw_kw),
            Style::default().fg(style::FOOTER_FG),
        )));
    }
    let readout = Paragraph::new(lines).block(
        Block::default()
            .title(" Predicted AC Power Output ")
            .borders(Borders::ALL),
    );
    frame.render_widget(readout, chunks[1]);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ↑/↓:Select  ←/→:Step  PgUp/PgDn:×10  Home/End:Min/Max  d/D:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
