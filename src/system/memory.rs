//! In-memory settings backend
//!
//! Stands in for the OS on hosts without the Win32 settings API and in
//! tests. Individual keys can be made to fail to exercise partial restores.

use std::collections::BTreeMap;
use std::time::Duration;

use parking_lot::Mutex;

use super::{ApplyError, SystemSettings};
use crate::error::MouseResult;
use crate::models::{MouseSettings, SettingKey, SettingValue, SettingsValues};

/// Windows default for SM_CXDRAG/SM_CYDRAG
const DEFAULT_DRAG_AREA: (u32, u32) = (4, 4);

/// Simulated mouse configuration
#[derive(Debug)]
pub struct MemorySystemSettings {
    values: Mutex<SettingsValues>,
    failures: Mutex<BTreeMap<SettingKey, ApplyError>>,
    history: Mutex<Vec<(SettingKey, SettingValue)>>,
    apply_delay: Option<Duration>,
    admin_required: bool,
    drag_area: (u32, u32),
}

impl Default for MemorySystemSettings {
    fn default() -> Self {
        Self::with_values(MouseSettings::default().to_values())
    }
}

impl MemorySystemSettings {
    /// Start from the given values
    pub fn with_values(values: SettingsValues) -> Self {
        Self {
            values: Mutex::new(values),
            failures: Mutex::new(BTreeMap::new()),
            history: Mutex::new(Vec::new()),
            apply_delay: None,
            admin_required: false,
            drag_area: DEFAULT_DRAG_AREA,
        }
    }

    /// Sleep inside every `apply`
    pub fn with_apply_delay(mut self, delay: Duration) -> Self {
        self.apply_delay = Some(delay);
        self
    }

    /// Report the process as not elevated
    pub fn with_admin_required(mut self, required: bool) -> Self {
        self.admin_required = required;
        self
    }

    /// Make every later `apply` of `key` fail with `error`
    pub fn fail_on(&self, key: SettingKey, error: ApplyError) {
        self.failures.lock().insert(key, error);
    }

    /// Stop failing writes of `key`
    pub fn clear_failure(&self, key: SettingKey) {
        self.failures.lock().remove(&key);
    }

    /// Every successful write, in order
    pub fn history(&self) -> Vec<(SettingKey, SettingValue)> {
        self.history.lock().clone()
    }

    /// Current value of one key
    pub fn value(&self, key: SettingKey) -> Option<SettingValue> {
        self.values.lock().get(key).cloned()
    }
}

impl SystemSettings for MemorySystemSettings {
    fn get_current(&self) -> MouseResult<SettingsValues> {
        Ok(self.values.lock().clone())
    }

    fn apply(&self, key: SettingKey, value: &SettingValue) -> Result<(), ApplyError> {
        if let Some(delay) = self.apply_delay {
            std::thread::sleep(delay);
        }

        if let Some(error) = self.failures.lock().get(&key) {
            return Err(error.clone());
        }

        key.validate(value)?;

        self.values.lock().insert(key, value.clone());
        self.history.lock().push((key, value.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }

    fn requires_admin(&self) -> bool {
        self.admin_required
    }

    fn drag_area(&self) -> Option<(u32, u32)> {
        Some(self.drag_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_defaults() {
        let system = MemorySystemSettings::default();
        let current = system.get_current().unwrap();
        assert_eq!(MouseSettings::from_values(&current), MouseSettings::default());
    }

    #[test]
    fn test_apply_updates_value() {
        let system = MemorySystemSettings::default();
        system
            .apply(SettingKey::PointerSpeed, &SettingValue::Int(15))
            .unwrap();

        assert_eq!(system.value(SettingKey::PointerSpeed), Some(SettingValue::Int(15)));
        assert_eq!(system.history().len(), 1);
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let system = MemorySystemSettings::default();
        let err = system
            .apply(SettingKey::PointerSpeed, &SettingValue::Int(42))
            .unwrap_err();

        assert!(matches!(err, ApplyError::InvalidValue(_)));
        assert_eq!(system.value(SettingKey::PointerSpeed), Some(SettingValue::Int(10)));
    }

    #[test]
    fn test_injected_failure() {
        let system = MemorySystemSettings::default();
        system.fail_on(
            SettingKey::SwapButtons,
            ApplyError::PermissionDenied("access denied".into()),
        );

        let err = system
            .apply(SettingKey::SwapButtons, &SettingValue::Bool(true))
            .unwrap_err();
        assert!(err.is_permission());

        system.clear_failure(SettingKey::SwapButtons);
        system
            .apply(SettingKey::SwapButtons, &SettingValue::Bool(true))
            .unwrap();
    }
}
