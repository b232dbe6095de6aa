//! Status bar view
//!
//! Shows device count, backup count, the backend, a missing-elevation flag
//! and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{ActiveTab, App};

fn key_hints(tab: ActiveTab) -> &'static str {
    match tab {
        ActiveTab::Devices => " r:Rescan  b:Backup  ?:Help  q:Quit ",
        ActiveTab::Settings => " ←/→:Adjust  Space:Toggle  a:Accel  d:Defaults  ?:Help  q:Quit ",
        ActiveTab::Backups => " c:Create  Enter:Restore  v:Verify  p:Prune  ?:Help  q:Quit ",
        ActiveTab::Logs => " r:Reload  g/G:Top/Bottom  ?:Help  q:Quit ",
    }
}

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Mice: ", Style::default().fg(Color::White)),
        Span::styled(
            app.devices.len().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled("Backups: ", Style::default().fg(Color::White)),
        Span::styled(
            app.backups.len().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(app.system_info.backend, Style::default().fg(Color::Cyan)),
    ];

    if app.system_info.admin_required {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "admin needed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(message.as_str(), Style::default().fg(Color::Yellow)));
    }

    let hints = key_hints(app.active_tab);
    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.chars().count());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
