pub mod header;
pub mod help;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::system::source::ProcSource;

pub fn draw<F: ProcSource>(frame: &mut Frame, app: &mut App<F>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], &app.snapshot, &app.theme);
    process_table::render(
        frame,
        chunks[1],
        &app.snapshot.top_processes,
        app.selected_index,
        app.show_command,
        &app.theme,
    );
    statusbar::render(frame, chunks[2], &app.keybinds, &app.theme);

    // Help overlay last so it draws on top
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
