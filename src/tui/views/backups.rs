//! Backups tab

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{panel, selected_style};
use crate::display::format_size;
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.backups.is_empty() {
        let text = Paragraph::new("No backups yet. Press c to create one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel("Backups"));
        frame.render_widget(text, area);
        return;
    }

    let header = Row::new(["File", "Created (UTC)", "Size"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));

    let rows = app.backups.iter().map(|record| {
        let size = if record.compressed {
            format!("{} (gz)", format_size(record.size_bytes))
        } else {
            format_size(record.size_bytes)
        };
        Row::new(vec![
            Cell::from(record.filename.clone()),
            Cell::from(record.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            Cell::from(size),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(32),
            Constraint::Length(20),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(panel(&format!("Backups ({})", app.backups.len())))
    .highlight_style(selected_style())
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_backup));
    frame.render_stateful_widget(table, area, &mut state);
}
