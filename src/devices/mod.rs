//! Mouse enumeration
//!
//! `MouseEnumerator` lists attached pointing devices; `CachedEnumerator`
//! wraps any enumerator in a short time-bounded memo so repeated UI refreshes
//! don't rescan the HID bus.

mod classify;
#[cfg(windows)]
mod hid;

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::MouseResult;
use crate::models::MouseDevice;

pub use classify::{classify, classify_all, vendor_name, RawHidDevice};
#[cfg(windows)]
pub use hid::HidMouseEnumerator;

/// Default memo lifetime
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(2);

/// Source of connected mice
pub trait MouseEnumerator: Send + Sync {
    fn list_devices(&self) -> MouseResult<Vec<MouseDevice>>;
}

/// Enumerator for hosts without HID access
#[derive(Debug, Default)]
pub struct NoDevices;

impl MouseEnumerator for NoDevices {
    fn list_devices(&self) -> MouseResult<Vec<MouseDevice>> {
        Ok(Vec::new())
    }
}

/// Time-bounded memo around another enumerator
pub struct CachedEnumerator {
    inner: Arc<dyn MouseEnumerator>,
    ttl: Duration,
    cached: Mutex<Option<(Instant, Vec<MouseDevice>)>>,
}

impl CachedEnumerator {
    pub fn new(inner: Arc<dyn MouseEnumerator>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// List devices, rescanning if the memo is stale or `force_refresh` is set
    pub fn devices(&self, force_refresh: bool) -> MouseResult<Vec<MouseDevice>> {
        let mut cached = self.cached.lock();

        if !force_refresh {
            if let Some((scanned_at, devices)) = cached.as_ref() {
                if scanned_at.elapsed() < self.ttl {
                    return Ok(devices.clone());
                }
            }
        }

        match self.inner.list_devices() {
            Ok(devices) => {
                debug!(count = devices.len(), forced = force_refresh, "Scanned for mice");
                *cached = Some((Instant::now(), devices.clone()));
                Ok(devices)
            }
            Err(e) => {
                warn!(error = %e, "Mouse scan failed");
                *cached = None;
                Err(e)
            }
        }
    }

    /// Drop the memo
    pub fn invalidate(&self) {
        *self.cached.lock() = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl MouseEnumerator for CachedEnumerator {
    fn list_devices(&self) -> MouseResult<Vec<MouseDevice>> {
        self.devices(false)
    }
}

/// The enumerator for this platform
#[cfg(windows)]
pub fn platform_default() -> Arc<dyn MouseEnumerator> {
    Arc::new(HidMouseEnumerator::new())
}

/// The enumerator for this platform
#[cfg(not(windows))]
pub fn platform_default() -> Arc<dyn MouseEnumerator> {
    Arc::new(NoDevices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MouseError;
    use crate::models::ConnectionType;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingEnumerator {
        scans: AtomicUsize,
        fail: AtomicBool,
    }

    impl MouseEnumerator for CountingEnumerator {
        fn list_devices(&self) -> MouseResult<Vec<MouseDevice>> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MouseError::Device("bus unavailable".into()));
            }
            let n = self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(vec![MouseDevice {
                id: format!("path-{}", n),
                name: "Test Mouse".into(),
                manufacturer: "Logitech".into(),
                vendor_id: 0x046D,
                product_id: 0xC077,
                connection_type: ConnectionType::Usb,
                serial_number: None,
                is_active: true,
            }])
        }
    }

    fn cached(ttl: Duration) -> (Arc<CountingEnumerator>, CachedEnumerator) {
        let inner = Arc::new(CountingEnumerator::default());
        let cache = CachedEnumerator::new(inner.clone(), ttl);
        (inner, cache)
    }

    #[test]
    fn test_within_ttl_uses_memo() {
        let (inner, cache) = cached(Duration::from_secs(3600));
        let first = cache.devices(false).unwrap();
        let second = cache.devices(false).unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.scans.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_force_refresh_rescans() {
        let (inner, cache) = cached(Duration::from_secs(3600));
        cache.devices(false).unwrap();
        let refreshed = cache.devices(true).unwrap();

        assert_eq!(refreshed[0].id, "path-1");
        assert_eq!(inner.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_expired_memo_rescans() {
        let (inner, cache) = cached(Duration::ZERO);
        cache.devices(false).unwrap();
        cache.devices(false).unwrap();
        assert_eq!(inner.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalidate() {
        let (inner, cache) = cached(Duration::from_secs(3600));
        cache.list_devices().unwrap();
        cache.invalidate();
        cache.list_devices().unwrap();
        assert_eq!(inner.scans.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let (inner, cache) = cached(Duration::from_secs(3600));
        inner.fail.store(true, Ordering::SeqCst);
        assert!(cache.devices(false).is_err());

        inner.fail.store(false, Ordering::SeqCst);
        assert_eq!(cache.devices(false).unwrap().len(), 1);
    }

    #[test]
    fn test_no_devices() {
        assert!(NoDevices.list_devices().unwrap().is_empty());
    }
}
