//! Logs tab

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::tui::app::App;

fn level_color(level: &str) -> Color {
    match level {
        "ERROR" => Color::Red,
        "WARN" => Color::Yellow,
        "INFO" => Color::Green,
        _ => Color::DarkGray,
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.logs.is_empty() {
        let text = Paragraph::new("No log entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(panel("Logs"));
        frame.render_widget(text, area);
        return;
    }

    let lines: Vec<Line> = app
        .logs
        .iter()
        .skip(app.log_scroll)
        .map(|entry| {
            let mut spans = vec![
                Span::styled(entry.short_time().to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(
                    format!("{:<5}", entry.level),
                    Style::default().fg(level_color(&entry.level)),
                ),
                Span::raw(" "),
                Span::raw(entry.message.clone()),
            ];
            let fields = entry.fields_summary();
            if !fields.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", fields),
                    Style::default().fg(Color::Cyan),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let title = format!("Logs ({} entries, from {})", app.logs.len(), app.log_scroll + 1);
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(&title))
            .wrap(Wrap { trim: false }),
        area,
    );
}
