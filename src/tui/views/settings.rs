//! Settings tab
//!
//! Every setting with its live value; the selected row can be edited in place.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{panel, selected_style};
use crate::models::{SettingKey, ValueKind};
use crate::tui::app::App;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(settings) = app.mouse_settings.as_ref() else {
        let text = Paragraph::new("Current settings could not be read. Press r to retry.")
            .style(Style::default().fg(Color::Red))
            .block(panel("Settings"));
        frame.render_widget(text, area);
        return;
    };

    let values = settings.to_values();
    let header = Row::new(["Setting", "Value", "Range"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));

    let rows = SettingKey::ALL.iter().map(|key| {
        let value = values
            .get(*key)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        let range = match key.kind() {
            ValueKind::Bool => "on/off".to_string(),
            ValueKind::Int { min, max } => format!("{}-{}", min, max),
        };
        Row::new(vec![
            Cell::from(key.label()),
            Cell::from(value).style(Style::default().fg(Color::Green)),
            Cell::from(range).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let accel = settings
        .acceleration_level()
        .map(|level| level.to_string())
        .unwrap_or_else(|| "custom".to_string());

    let table = Table::new(
        rows,
        [
            Constraint::Length(28),
            Constraint::Length(10),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(panel(&format!("Settings (acceleration: {})", accel)))
    .highlight_style(selected_style())
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_setting));
    frame.render_stateful_widget(table, area, &mut state);
}
