use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{format_elapsed, format_optional, format_percent};
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

/// Rows taken by the header, borders included.
pub const HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " proctop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(system_line(snapshot, theme)), rows[0]);
    render_gauge(frame, rows[1], "CPU", snapshot.cpu_utilization, theme);
    render_gauge(frame, rows[2], "Mem", snapshot.memory_utilization, theme);
    frame.render_widget(Paragraph::new(process_line(snapshot, theme)), rows[3]);
}

fn system_line<'a>(snapshot: &SystemSnapshot, theme: &Theme) -> Line<'a> {
    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);
    let uptime = snapshot
        .uptime_secs
        .map(format_elapsed)
        .unwrap_or_else(|| "n/a".to_string());

    Line::from(vec![
        Span::styled("OS: ", label),
        Span::styled(format_optional(snapshot.operating_system.as_deref()), value),
        Span::styled("  Kernel: ", label),
        Span::styled(format_optional(snapshot.kernel.as_deref()), value),
        Span::styled("  Up: ", label),
        Span::styled(uptime, value),
    ])
}

fn process_line<'a>(snapshot: &SystemSnapshot, theme: &Theme) -> Line<'a> {
    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Processes: ", label),
        Span::styled(format_optional(snapshot.total_processes), value),
        Span::styled("  Running: ", label),
        Span::styled(format_optional(snapshot.running_processes), value),
    ])
}

fn render_gauge(frame: &mut Frame, area: Rect, title: &str, fraction: Option<f64>, theme: &Theme) {
    let ratio = fraction.unwrap_or(0.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.load_color(ratio))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!("{title} {}", format_percent(fraction)));
    frame.render_widget(gauge, area);
}
