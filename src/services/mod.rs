//! Service layer for Mouse Manager
//!
//! `Services` wires the backup store, restore engine, settings backend and
//! device enumerator together; the CLI and TUI only talk to the services
//! borrowed from it.

pub mod backup;
pub mod settings;

use std::sync::Arc;

use tracing::{info, warn};

use crate::backup::{BackupStore, RestoreEngine};
use crate::config::{MousePaths, Settings};
use crate::devices::{self, CachedEnumerator, MouseEnumerator};
use crate::system::{self, SystemSettings};

pub use backup::BackupService;
pub use settings::SettingsService;

/// Everything the shells need, built once per process
pub struct Services {
    paths: MousePaths,
    settings: Settings,
    store: Arc<BackupStore>,
    engine: Arc<RestoreEngine>,
    system: Arc<dyn SystemSettings>,
    devices: CachedEnumerator,
}

impl Services {
    pub fn new(
        paths: MousePaths,
        settings: Settings,
        system: Arc<dyn SystemSettings>,
        enumerator: Arc<dyn MouseEnumerator>,
    ) -> Self {
        let store = Arc::new(BackupStore::new(settings.backup_dir(&paths)));
        let engine = Arc::new(RestoreEngine::new(store.clone(), system.clone()));
        let devices = CachedEnumerator::new(enumerator, settings.device_cache_ttl());

        Self {
            paths,
            settings,
            store,
            engine,
            system,
            devices,
        }
    }

    /// Use this platform's settings backend and device enumerator
    pub fn for_platform(paths: MousePaths, settings: Settings) -> Self {
        Self::new(
            paths,
            settings,
            system::platform_default(),
            devices::platform_default(),
        )
    }

    pub fn backups(&self) -> BackupService<'_> {
        BackupService::new(self)
    }

    pub fn mouse(&self) -> SettingsService<'_> {
        SettingsService::new(self)
    }

    pub fn devices(&self) -> &CachedEnumerator {
        &self.devices
    }

    pub fn paths(&self) -> &MousePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<BackupStore> {
        &self.store
    }

    pub fn engine(&self) -> &Arc<RestoreEngine> {
        &self.engine
    }

    pub fn system(&self) -> &Arc<dyn SystemSettings> {
        &self.system
    }

    /// Startup check of the settings backend
    ///
    /// Problems are logged as warnings and returned; none of them stop the
    /// program since reads usually work without elevation.
    pub fn check_permissions(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Err(e) = self.system.get_current() {
            problems.push(format!("Cannot read mouse settings: {}", e));
        }
        if self.system.requires_admin() {
            problems.push(
                "Not running as administrator; some settings may be refused".to_string(),
            );
        }

        for problem in &problems {
            warn!(backend = self.system.name(), "{}", problem);
        }
        if problems.is_empty() {
            info!(backend = self.system.name(), "Permission check passed");
        }
        problems
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::devices::NoDevices;
    use crate::system::MemorySystemSettings;
    use tempfile::TempDir;

    pub struct TestServices {
        pub services: Services,
        pub system: Arc<MemorySystemSettings>,
        pub _temp: TempDir,
    }

    pub fn test_services() -> TestServices {
        test_services_with(Settings::default())
    }

    pub fn test_services_with(settings: Settings) -> TestServices {
        test_services_on(settings, MemorySystemSettings::default())
    }

    pub fn test_services_on(settings: Settings, system: MemorySystemSettings) -> TestServices {
        let temp = TempDir::new().unwrap();
        let paths = MousePaths::with_base_dir(temp.path().to_path_buf());
        let system = Arc::new(system);
        let services = Services::new(paths, settings, system.clone(), Arc::new(NoDevices));
        TestServices {
            services,
            system,
            _temp: temp,
        }
    }
}
