//! Mouse settings service
//!
//! Reads the live configuration and changes it through the restore engine,
//! so single-setting changes, presets and resets are serialized with
//! restores and can take an automatic pre-change backup.

use tracing::info;

use super::Services;
use crate::backup::{BackupKind, RestoreOutcome};
use crate::error::{MouseError, MouseResult};
use crate::models::{AccelerationLevel, MouseSettings, SettingKey, SettingValue, SettingsValues};

/// Service for live mouse settings
pub struct SettingsService<'a> {
    services: &'a Services,
}

impl<'a> SettingsService<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }

    /// The raw live values
    pub fn current_values(&self) -> MouseResult<SettingsValues> {
        self.services.system().get_current()
    }

    /// The live values as typed settings
    pub fn current(&self) -> MouseResult<MouseSettings> {
        Ok(MouseSettings::from_values(&self.current_values()?))
    }

    /// Change one setting
    pub fn set(&self, key: SettingKey, value: SettingValue) -> MouseResult<RestoreOutcome> {
        key.validate(&value)?;

        let mut values = SettingsValues::new();
        values.insert(key, value);
        self.apply(values)
    }

    /// Parse and change one setting, e.g. `("speed", "12")`
    pub fn set_from_str(&self, key: &str, value: &str) -> MouseResult<RestoreOutcome> {
        let key: SettingKey = key.parse()?;
        let value = key.parse_value(value)?;
        self.set(key, value)
    }

    /// Switch to an acceleration preset
    pub fn apply_preset(&self, level: AccelerationLevel) -> MouseResult<RestoreOutcome> {
        info!(level = %level, "Applying acceleration preset");
        self.apply(level.to_values())
    }

    /// Put every setting back to the Windows defaults
    pub fn reset_defaults(&self) -> MouseResult<RestoreOutcome> {
        info!("Restoring default mouse settings");
        self.apply(MouseSettings::default().to_values())
    }

    /// Apply several settings at once
    pub fn apply(&self, values: SettingsValues) -> MouseResult<RestoreOutcome> {
        values.validate()?;

        let safety = self
            .services
            .settings()
            .auto_backup_before_change
            .then_some(BackupKind::PreChange);

        match self.services.engine().apply_values(&values, safety) {
            // Nothing changed: report the single failure rather than a partial restore
            Err(MouseError::PartialRestore(partial)) if partial.nothing_applied() => {
                if partial.permission_denied {
                    Err(MouseError::Permission {
                        key: partial.failed,
                        reason: partial.reason,
                    })
                } else {
                    Err(MouseError::Io(format!(
                        "Failed to apply {}: {}",
                        partial.failed, partial.reason
                    )))
                }
            }
            other => other,
        }
    }

    /// Label/value pairs describing the live configuration
    pub fn summary(&self) -> MouseResult<Vec<(&'static str, String)>> {
        Ok(self.current()?.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::services::testing::{test_services, test_services_with};
    use crate::system::ApplyError;

    #[test]
    fn test_set_changes_value_and_backs_up() {
        let ts = test_services();
        let service = ts.services.mouse();

        let outcome = service.set_from_str("speed", "14").unwrap();
        assert!(outcome.safety_backup.is_some());
        assert_eq!(service.current().unwrap().pointer_speed, 14);

        let backups = ts.services.backups().list().unwrap();
        assert_eq!(backups.len(), 1);
        let snapshot = ts.services.backups().load(&backups[0]).unwrap();
        assert_eq!(snapshot.kind(), BackupKind::PreChange);
    }

    #[test]
    fn test_auto_backup_can_be_disabled() {
        let mut settings = Settings::default();
        settings.auto_backup_before_change = false;
        let ts = test_services_with(settings);

        ts.services.mouse().set_from_str("hover", "900").unwrap();
        assert!(ts.services.backups().list().unwrap().is_empty());
    }

    #[test]
    fn test_set_rejects_out_of_range() {
        let ts = test_services();
        let err = ts.services.mouse().set_from_str("speed", "25").unwrap_err();
        assert!(err.is_validation());
        assert!(ts.system.history().is_empty());
    }

    #[test]
    fn test_unknown_key() {
        let ts = test_services();
        assert!(ts.services.mouse().set_from_str("color", "red").is_err());
    }

    #[test]
    fn test_preset() {
        let ts = test_services();
        let service = ts.services.mouse();

        service.apply_preset(AccelerationLevel::High).unwrap();
        let current = service.current().unwrap();
        assert_eq!(current.acceleration_level(), Some(AccelerationLevel::High));

        service.apply_preset(AccelerationLevel::Disabled).unwrap();
        assert!(!service.current().unwrap().acceleration);
    }

    #[test]
    fn test_reset_defaults() {
        let ts = test_services();
        let service = ts.services.mouse();
        service.set_from_str("swap", "on").unwrap();

        service.reset_defaults().unwrap();
        assert_eq!(service.current().unwrap(), MouseSettings::default());
    }

    #[test]
    fn test_single_failure_is_not_partial() {
        let ts = test_services();
        ts.system.fail_on(
            SettingKey::WheelScrollLines,
            ApplyError::Rejected("busy".into()),
        );

        let err = ts.services.mouse().set_from_str("scroll", "5").unwrap_err();
        assert!(err.as_partial_restore().is_none());
        assert!(err.to_string().contains("busy"));
    }

    #[test]
    fn test_permission_surfaces() {
        let ts = test_services();
        ts.system.fail_on(
            SettingKey::SwapButtons,
            ApplyError::PermissionDenied("access denied".into()),
        );

        let err = ts.services.mouse().set_from_str("swap", "on").unwrap_err();
        assert!(matches!(err, MouseError::Permission { .. }));
        assert_eq!(
            ts.services.engine().state(),
            crate::backup::RestoreState::PartialFailure
        );
    }
}
