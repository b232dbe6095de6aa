//! Confirmation dialog
//!
//! Shown before anything that overwrites the live settings or deletes backups.
//! Title, detail line and the accept key label follow the pending action.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::PendingAction;
use crate::tui::layout::centered_rect_fixed;

fn title(action: &PendingAction) -> &'static str {
    match action {
        PendingAction::Restore(_) => " Restore backup ",
        PendingAction::ResetDefaults => " Reset to defaults ",
        PendingAction::Prune => " Prune backups ",
    }
}

fn detail(action: &PendingAction) -> &'static str {
    match action {
        PendingAction::Restore(_) => "Current settings are saved as a pre-restore backup first.",
        PendingAction::ResetDefaults => "Every pointer setting returns to its Windows default.",
        PendingAction::Prune => "Backups outside the retention policy are deleted or compressed.",
    }
}

/// Label next to `[Y]`
fn accept_label(action: &PendingAction) -> &'static str {
    match action {
        PendingAction::Restore(_) => " Restore  ",
        PendingAction::ResetDefaults => " Reset  ",
        PendingAction::Prune => " Prune  ",
    }
}

/// Destructive actions are drawn in red
fn accent(action: &PendingAction) -> Color {
    match action {
        PendingAction::Prune => Color::Red,
        _ => Color::Yellow,
    }
}

/// Render the confirmation for `action`
pub fn render(frame: &mut Frame, action: &PendingAction) {
    let area = centered_rect_fixed(70, 8, frame.area());
    let accent = accent(action);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title(action))
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            action.prompt(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail(action), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(accept_label(action)),
            Span::styled("[N/Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(action: &PendingAction) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| render(frame, action)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_reset_names_the_action() {
        let screen = draw(&PendingAction::ResetDefaults);
        assert!(screen.contains("Reset to defaults"));
        assert!(screen.contains("Restore the default mouse settings?"));
        assert!(screen.contains("[Y] Reset"));
        assert!(!screen.contains("Yes"));
    }

    #[test]
    fn test_prune_is_marked_destructive() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| render(frame, &PendingAction::Prune))
            .unwrap();
        let buffer = terminal.backend().buffer();

        let screen = draw(&PendingAction::Prune);
        assert!(screen.contains("Prune backups"));
        assert!(screen.contains("[Y] Prune"));
        assert!(buffer.content().iter().any(|cell| cell.fg == Color::Red));
    }
}
