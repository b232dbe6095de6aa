//! Toast notifications
//!
//! Every action in the TUI reports its outcome here instead of blocking
//! the user with a dialog.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::MouseError;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Neutral status, e.g. a rescan found nothing new
    Info,
    /// An action finished
    Success,
    /// Finished with something left undone, like a partial restore
    Warning,
    /// Nothing was done
    Error,
}

impl NotificationType {
    /// Border and title color
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    /// One-character marker shown before the title
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    /// Toast heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Done",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// Seconds a toast of this type stays on screen
    fn default_duration(&self) -> u64 {
        match self {
            Self::Info | Self::Success => 3,
            Self::Warning | Self::Error => 6,
        }
    }
}

/// A toast notification
#[derive(Debug, Clone)]
pub struct Notification {
    /// Text shown in the toast body
    pub message: String,
    pub notification_type: NotificationType,
    /// When the toast was raised; expiry counts from here
    pub created_at: Instant,
    /// Seconds on screen before `remove_expired` drops it
    pub duration_secs: u64,
}

impl Notification {
    /// Toast of the given type with that type's default duration
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration_secs: notification_type.default_duration(),
        }
    }

    /// Info toast
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    /// Success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    /// Warning toast, kept on screen longer
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    /// Error toast, kept on screen longer
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// A partial restore changed something, so it is a warning; the rest are errors
    pub fn from_error(err: &MouseError) -> Self {
        match err {
            MouseError::PartialRestore(_) => Self::warning(err.to_string()),
            _ => Self::error(err.to_string()),
        }
    }

    /// Override how long the toast stays up
    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration_secs = seconds;
        self
    }

    /// Whether `duration_secs` have passed since creation
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.duration_secs
    }
}

/// Widget for rendering a notification
pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    /// Wrap a toast for rendering
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl<'a> Widget for NotificationWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let kind = self.notification.notification_type;
        let color = kind.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} {} ", kind.icon(), kind.title()))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Toasts waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast; it becomes the one on screen
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Drop every toast whose time is up
    pub fn remove_expired(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// The most recent toast
    pub fn current(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    /// Dismiss the toast on screen
    pub fn dismiss(&mut self) {
        self.notifications.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PartialRestore;
    use crate::models::{SettingKey, SettingsValues};

    #[test]
    fn test_newest_toast_wins() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::info("First"));
        queue.push(Notification::success("Second"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "Second");

        queue.dismiss();
        assert_eq!(queue.current().unwrap().message, "First");
    }

    #[test]
    fn test_expiry() {
        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("gone").with_duration(0));
        queue.push(Notification::error("stays"));

        queue.remove_expired();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.current().unwrap().message, "stays");
    }

    #[test]
    fn test_errors_last_longer() {
        assert!(Notification::error("x").duration_secs > Notification::success("x").duration_secs);
    }

    #[test]
    fn test_from_error_kind() {
        let err = MouseError::Device("hid unavailable".into());
        let n = Notification::from_error(&err);
        assert_eq!(n.notification_type, NotificationType::Error);
        assert!(n.message.contains("hid unavailable"));

        let partial: MouseError = PartialRestore {
            applied: SettingsValues::new(),
            failed: SettingKey::HoverTime,
            reason: "rejected".into(),
            not_applied: vec![SettingKey::HoverTime],
            permission_denied: false,
        }
        .into();
        assert_eq!(
            Notification::from_error(&partial).notification_type,
            NotificationType::Warning
        );
    }
}
