//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Every action goes through the service layer; results surface as toasts.

use crate::backup::{BackupKind, BackupRecord};
use crate::error::MouseResult;
use crate::logging::{LogEntry, LogReader};
use crate::models::{AccelerationLevel, MouseDevice, MouseSettings, SettingKey, SettingValue, ValueKind};
use crate::services::Services;
use crate::system::SystemInfo;

use super::widgets::notification::{Notification, NotificationQueue};

/// Number of log lines loaded into the Logs tab
const LOG_LINES: usize = 200;

/// Which tab is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    #[default]
    Devices,
    Settings,
    Backups,
    Logs,
}

impl ActiveTab {
    pub const ALL: [ActiveTab; 4] = [Self::Devices, Self::Settings, Self::Backups, Self::Logs];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Devices => "Devices",
            Self::Settings => "Settings",
            Self::Backups => "Backups",
            Self::Logs => "Logs",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// An action waiting for the user to confirm it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Restore(BackupRecord),
    ResetDefaults,
    Prune,
}

impl PendingAction {
    /// Question shown in the confirm dialog
    pub fn prompt(&self) -> String {
        match self {
            Self::Restore(record) => format!("Restore settings from {}?", record.filename),
            Self::ResetDefaults => "Restore the default mouse settings?".to_string(),
            Self::Prune => "Prune old backups now?".to_string(),
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    Welcome(&'static str),
    Confirm(PendingAction),
}

/// Main application state
pub struct App<'a> {
    /// The service layer
    pub services: &'a Services,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active tab
    pub active_tab: ActiveTab,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Last device scan
    pub devices: Vec<MouseDevice>,

    /// Live settings, if they could be read
    pub mouse_settings: Option<MouseSettings>,

    /// Backend facts read once at startup
    pub system_info: SystemInfo,

    /// Backups, newest first
    pub backups: Vec<BackupRecord>,

    /// Recent log entries, oldest first
    pub logs: Vec<LogEntry>,

    /// Selected row per tab
    pub selected_device: usize,
    pub selected_setting: usize,
    pub selected_backup: usize,
    pub log_scroll: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Toasts
    pub notifications: NotificationQueue,
}

impl<'a> App<'a> {
    /// Create a new App instance
    pub fn new(services: &'a Services) -> Self {
        Self {
            services,
            should_quit: false,
            active_tab: ActiveTab::default(),
            active_dialog: ActiveDialog::default(),
            devices: Vec::new(),
            mouse_settings: None,
            system_info: services.system().info(),
            backups: Vec::new(),
            logs: Vec::new(),
            selected_device: 0,
            selected_setting: 0,
            selected_backup: 0,
            log_scroll: 0,
            status_message: None,
            notifications: NotificationQueue::new(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Show a toast
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Reload everything shown in the tabs
    pub fn refresh_all(&mut self) {
        self.refresh_devices(false);
        self.refresh_settings();
        self.refresh_backups();
        self.refresh_logs();
    }

    pub fn refresh_devices(&mut self, force: bool) {
        match self.services.devices().devices(force) {
            Ok(devices) => {
                if force {
                    self.set_status(format!("{} mouse/mice detected", devices.len()));
                }
                self.devices = devices;
                self.selected_device = clamp_index(self.selected_device, self.devices.len());
            }
            Err(e) => self.notify(Notification::from_error(&e)),
        }
    }

    pub fn refresh_settings(&mut self) {
        match self.services.mouse().current() {
            Ok(settings) => self.mouse_settings = Some(settings),
            Err(e) => {
                self.mouse_settings = None;
                self.notify(Notification::from_error(&e));
            }
        }
    }

    pub fn refresh_backups(&mut self) {
        match self.services.backups().list() {
            Ok(backups) => {
                self.backups = backups;
                self.selected_backup = clamp_index(self.selected_backup, self.backups.len());
            }
            Err(e) => self.notify(Notification::from_error(&e)),
        }
    }

    pub fn refresh_logs(&mut self) {
        let reader = LogReader::new(self.services.paths().log_dir());
        match reader.read_recent(LOG_LINES) {
            Ok(entries) => self.logs = entries,
            Err(e) => self.notify(Notification::from_error(&e)),
        }
    }

    /// Periodic housekeeping
    pub fn on_tick(&mut self) {
        self.notifications.remove_expired();
    }

    /// Switch to a different tab
    pub fn switch_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
        match tab {
            ActiveTab::Devices => self.refresh_devices(false),
            ActiveTab::Settings => self.refresh_settings(),
            ActiveTab::Backups => self.refresh_backups(),
            ActiveTab::Logs => {
                self.refresh_logs();
                self.log_scroll = 0;
            }
        }
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % ActiveTab::ALL.len();
        self.switch_tab(ActiveTab::ALL[next]);
    }

    pub fn prev_tab(&mut self) {
        let len = ActiveTab::ALL.len();
        let prev = (self.active_tab.index() + len - 1) % len;
        self.switch_tab(ActiveTab::ALL[prev]);
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Move selection up in the current tab
    pub fn move_up(&mut self) {
        let selected = match self.active_tab {
            ActiveTab::Devices => &mut self.selected_device,
            ActiveTab::Settings => &mut self.selected_setting,
            ActiveTab::Backups => &mut self.selected_backup,
            ActiveTab::Logs => &mut self.log_scroll,
        };
        *selected = selected.saturating_sub(1);
    }

    /// Move selection down in the current tab
    pub fn move_down(&mut self) {
        let (selected, len) = match self.active_tab {
            ActiveTab::Devices => (&mut self.selected_device, self.devices.len()),
            ActiveTab::Settings => (&mut self.selected_setting, SettingKey::ALL.len()),
            ActiveTab::Backups => (&mut self.selected_backup, self.backups.len()),
            ActiveTab::Logs => (&mut self.log_scroll, self.logs.len()),
        };
        if *selected < len.saturating_sub(1) {
            *selected += 1;
        }
    }

    pub fn selected_key(&self) -> SettingKey {
        SettingKey::ALL[clamp_index(self.selected_setting, SettingKey::ALL.len())]
    }

    pub fn selected_backup(&self) -> Option<&BackupRecord> {
        self.backups.get(self.selected_backup)
    }

    /// Step the selected numeric setting by `steps`
    pub fn adjust_selected_setting(&mut self, steps: i64) {
        let key = self.selected_key();
        let ValueKind::Int { min, max } = key.kind() else {
            self.toggle_selected_setting();
            return;
        };

        let current = self
            .services
            .mouse()
            .current_values()
            .ok()
            .and_then(|values| values.get(key).and_then(SettingValue::as_int))
            .unwrap_or(min);
        let step = if max - min > 100 { 50 } else { 1 };
        let new = (current + steps * step).clamp(min, max);

        if new != current {
            self.change_setting(key, SettingValue::Int(new));
        }
    }

    /// Flip the selected on/off setting
    pub fn toggle_selected_setting(&mut self) {
        let key = self.selected_key();
        if key.kind() != ValueKind::Bool {
            return;
        }

        let current = self
            .mouse_settings
            .as_ref()
            .map(|s| s.to_values())
            .and_then(|values| values.get(key).and_then(SettingValue::as_bool))
            .unwrap_or(false);
        self.change_setting(key, SettingValue::Bool(!current));
    }

    fn change_setting(&mut self, key: SettingKey, value: SettingValue) {
        let result = self.services.mouse().set(key, value.clone());
        self.report(result.map(|_| ()), format!("{} set to {}", key.label(), value));
        self.refresh_settings();
        self.refresh_backups();
    }

    /// Move to the next acceleration preset
    pub fn cycle_acceleration(&mut self) {
        let next = match self.mouse_settings.as_ref().and_then(|s| s.acceleration_level()) {
            Some(AccelerationLevel::Disabled) => AccelerationLevel::Low,
            Some(AccelerationLevel::Low) => AccelerationLevel::Medium,
            Some(AccelerationLevel::Medium) => AccelerationLevel::High,
            Some(AccelerationLevel::High) | None => AccelerationLevel::Disabled,
        };

        let result = self.services.mouse().apply_preset(next);
        self.report(result.map(|_| ()), format!("Acceleration: {}", next));
        self.refresh_settings();
        self.refresh_backups();
    }

    pub fn create_backup(&mut self) {
        let result = self.services.backups().create(BackupKind::Manual);
        let message = match &result {
            Ok(record) => format!("Backup created: {}", record.filename),
            Err(_) => String::new(),
        };
        self.report(result.map(|_| ()), message);
        self.refresh_backups();
        self.selected_backup = 0;
    }

    pub fn verify_selected_backup(&mut self) {
        let Some(record) = self.selected_backup().cloned() else {
            return;
        };
        let result = self.services.backups().load(&record);
        self.report(result.map(|_| ()), format!("{} is intact", record.filename));
    }

    /// Ask before restoring the selected backup
    pub fn request_restore(&mut self) {
        if let Some(record) = self.selected_backup().cloned() {
            self.open_dialog(ActiveDialog::Confirm(PendingAction::Restore(record)));
        }
    }

    /// Run the action in the confirm dialog
    pub fn confirm(&mut self) {
        let ActiveDialog::Confirm(action) = std::mem::take(&mut self.active_dialog) else {
            return;
        };

        match action {
            PendingAction::Restore(record) => {
                let result = self.services.backups().restore(&record);
                let message = match &result {
                    Ok(outcome) => outcome.summary(),
                    Err(_) => String::new(),
                };
                self.report(result.map(|_| ()), message);
            }
            PendingAction::ResetDefaults => {
                let result = self.services.mouse().reset_defaults();
                self.report(result.map(|_| ()), "Default settings restored");
            }
            PendingAction::Prune => {
                let result = self.services.backups().prune();
                let message = match &result {
                    Ok(report) => format!(
                        "Deleted {}, compressed {}",
                        report.removed.len(),
                        report.compressed.len()
                    ),
                    Err(_) => String::new(),
                };
                self.report(result.map(|_| ()), message);
            }
        }

        self.refresh_settings();
        self.refresh_backups();
    }

    fn report(&mut self, result: MouseResult<()>, success: impl Into<String>) {
        match result {
            Ok(()) => self.notify(Notification::success(success)),
            Err(e) => self.notify(Notification::from_error(&e)),
        }
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
