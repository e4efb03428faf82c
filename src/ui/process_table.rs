use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::format::{format_elapsed, truncate_unicode};
use crate::system::process::ProcessSnapshot;
use crate::ui::theme::Theme;

const HEADERS: [&str; 6] = ["PID", "USER", "CPU%", "RAM MB", "TIME+", "COMMAND"];
const FIXED_WIDTHS: [u16; 5] = [7, 10, 7, 8, 9];

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[ProcessSnapshot],
    selected: usize,
    show_command: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" Top {} by CPU ", processes.len()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    // Fixed columns plus one separator space per column.
    let fixed: u16 = FIXED_WIDTHS.iter().map(|w| w + 1).sum();
    let command_width = area.width.saturating_sub(fixed + 2) as usize;

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(theme.table_header)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = processes
        .iter()
        .map(|p| {
            let command = if show_command {
                truncate_unicode(&p.command, command_width)
            } else {
                String::new()
            };
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_unicode(&p.user, FIXED_WIDTHS[1] as usize)),
                Cell::from(format!("{:.1}", p.cpu_utilization * 100.0))
                    .style(Style::default().fg(theme.load_color(p.cpu_utilization))),
                Cell::from(p.ram()),
                Cell::from(format_elapsed(p.uptime_secs)),
                Cell::from(command),
            ])
            .style(Style::default().fg(theme.text_primary))
        })
        .collect();

    let widths = [
        Constraint::Length(FIXED_WIDTHS[0]),
        Constraint::Length(FIXED_WIDTHS[1]),
        Constraint::Length(FIXED_WIDTHS[2]),
        Constraint::Length(FIXED_WIDTHS[3]),
        Constraint::Length(FIXED_WIDTHS[4]),
        Constraint::Min(1),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(theme.selection_fg)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if !processes.is_empty() {
        state.select(Some(selected.min(processes.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
