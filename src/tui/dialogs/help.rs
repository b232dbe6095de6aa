//! Help dialog
//!
//! Shows the global keys and the keys for the active tab

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveTab, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_tab))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn help_lines(tab: ActiveTab) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1-4", "Devices, Settings, Backups, Logs"),
        key_line("Tab", "Next tab"),
        key_line("j/k", "Move selection down/up"),
        key_line("b", "Back up current settings"),
        key_line("Esc", "Dismiss notification"),
        Line::from(""),
    ];

    lines.push(section(tab.title()));
    lines.push(Line::from(""));
    let keys: &[(&'static str, &'static str)] = match tab {
        ActiveTab::Devices => &[("r / F5", "Rescan for mice")],
        ActiveTab::Settings => &[
            ("←/→ or -/+", "Decrease/increase value"),
            ("Space/Enter", "Toggle on/off setting"),
            ("a", "Cycle acceleration preset"),
            ("d", "Restore default settings"),
            ("r", "Re-read current settings"),
        ],
        ActiveTab::Backups => &[
            ("c", "Create backup"),
            ("Enter / r", "Restore selected backup"),
            ("v", "Verify selected backup"),
            ("p", "Prune old backups"),
        ],
        ActiveTab::Logs => &[("r", "Reload log"), ("g / G", "Jump to top/bottom")],
    };
    lines.extend(keys.iter().map(|&(key, desc)| key_line(key, desc)));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Create a key help line
fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>14}", key), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::raw(description),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_tab_specific() {
        let text = |tab| {
            help_lines(tab)
                .iter()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };

        assert!(text(ActiveTab::Backups).contains("Prune old backups"));
        assert!(!text(ActiveTab::Devices).contains("Prune old backups"));
        assert!(text(ActiveTab::Settings).contains("acceleration"));
    }
}
