//! Event handler for the TUI
//!
//! Routes keyboard input to the open dialog first, then to global keys,
//! then to the active tab.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveTab, App, PendingAction};
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => {}
        Event::Tick => app.on_tick(),
    }
    Ok(())
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return;
    }

    if handle_global_key(app, key) {
        return;
    }

    match app.active_tab {
        ActiveTab::Devices => handle_devices_key(app, key),
        ActiveTab::Settings => handle_settings_key(app, key),
        ActiveTab::Backups => handle_backups_key(app, key),
        ActiveTab::Logs => handle_logs_key(app, key),
    }
}

fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match &app.active_dialog {
        ActiveDialog::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Enter
            ) {
                app.close_dialog();
            }
        }
        // Any key dismisses the welcome screen
        ActiveDialog::Welcome(_) => app.close_dialog(),
        ActiveDialog::None => {}
    }
}

/// Returns true when the key was consumed
fn handle_global_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Esc => app.notifications.dismiss(),
        KeyCode::Char('1') => app.switch_tab(ActiveTab::Devices),
        KeyCode::Char('2') => app.switch_tab(ActiveTab::Settings),
        KeyCode::Char('3') => app.switch_tab(ActiveTab::Backups),
        KeyCode::Char('4') => app.switch_tab(ActiveTab::Logs),
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('b') => app.create_backup(),
        _ => return false,
    }
    true
}

fn handle_devices_key(app: &mut App, key: KeyEvent) {
    if let KeyCode::Char('r') | KeyCode::F(5) = key.code {
        app.refresh_devices(true);
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right | KeyCode::Char('l') => {
            app.adjust_selected_setting(1)
        }
        KeyCode::Char('-') | KeyCode::Left | KeyCode::Char('h') => app.adjust_selected_setting(-1),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_setting(),
        KeyCode::Char('a') => app.cycle_acceleration(),
        KeyCode::Char('d') => app.open_dialog(ActiveDialog::Confirm(PendingAction::ResetDefaults)),
        KeyCode::Char('r') | KeyCode::F(5) => app.refresh_settings(),
        _ => {}
    }
}

fn handle_backups_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => app.create_backup(),
        KeyCode::Enter | KeyCode::Char('r') => app.request_restore(),
        KeyCode::Char('v') => app.verify_selected_backup(),
        KeyCode::Char('p') => app.open_dialog(ActiveDialog::Confirm(PendingAction::Prune)),
        KeyCode::F(5) => app.refresh_backups(),
        _ => {}
    }
}

fn handle_logs_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') | KeyCode::F(5) => app.refresh_logs(),
        KeyCode::Char('G') | KeyCode::End => {
            app.log_scroll = app.logs.len().saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.log_scroll = 0,
        _ => {}
    }
}
