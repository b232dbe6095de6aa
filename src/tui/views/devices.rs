//! Devices tab

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::{panel, selected_style};
use crate::tui::app::App;
use crate::tui::layout::list_and_detail;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.devices.is_empty() {
        let text = Paragraph::new("No mice detected. Press r to scan again.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel("Devices"));
        frame.render_widget(text, area);
        return;
    }

    let (list_area, detail_area) = list_and_detail(area, 7);

    let header = Row::new(["Name", "Manufacturer", "Connection", "VID:PID"])
        .style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow));

    let rows = app.devices.iter().map(|device| {
        Row::new(vec![
            Cell::from(device.name.clone()),
            Cell::from(device.manufacturer.clone()),
            Cell::from(device.connection_type.to_string()),
            Cell::from(device.hardware_id()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(20),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(panel(&format!("Devices ({})", app.devices.len())))
    .highlight_style(selected_style())
    .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_device));
    frame.render_stateful_widget(table, list_area, &mut state);

    if let Some(device) = app.devices.get(app.selected_device) {
        let label = |s: &'static str| Span::styled(s, Style::default().fg(Color::Cyan));
        let lines = vec![
            Line::from(vec![label("Path:    "), Span::raw(device.id.as_str())]),
            Line::from(vec![
                label("Serial:  "),
                Span::raw(device.serial_number.as_deref().unwrap_or("-")),
            ]),
            Line::from(vec![
                label("Status:  "),
                Span::raw(if device.is_active { "active" } else { "inactive" }),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(panel("Details")), detail_area);
    }
}
