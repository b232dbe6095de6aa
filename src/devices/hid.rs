//! HID enumeration via hidapi

use hidapi::{BusType, DeviceInfo, HidApi};
use tracing::debug;

use super::classify::{classify_all, RawHidDevice};
use super::MouseEnumerator;
use crate::error::{MouseError, MouseResult};
use crate::models::{ConnectionType, MouseDevice};

/// Lists mice through the OS HID stack
#[derive(Debug, Default)]
pub struct HidMouseEnumerator;

impl HidMouseEnumerator {
    pub fn new() -> Self {
        Self
    }
}

fn to_raw(info: &DeviceInfo) -> RawHidDevice {
    RawHidDevice {
        path: info.path().to_string_lossy().into_owned(),
        vendor_id: info.vendor_id(),
        product_id: info.product_id(),
        usage_page: info.usage_page(),
        usage: info.usage(),
        product: info.product_string().map(str::to_string),
        manufacturer: info.manufacturer_string().map(str::to_string),
        serial_number: info.serial_number().map(str::to_string),
        transport: match info.bus_type() {
            BusType::Usb => ConnectionType::Usb,
            BusType::Bluetooth => ConnectionType::Bluetooth,
            _ => ConnectionType::Unknown,
        },
    }
}

impl MouseEnumerator for HidMouseEnumerator {
    fn list_devices(&self) -> MouseResult<Vec<MouseDevice>> {
        // A fresh HidApi re-enumerates; hidapi only allows one instance at a time
        let api = HidApi::new()
            .map_err(|e| MouseError::Device(format!("Failed to open HID API: {}", e)))?;

        let raw: Vec<RawHidDevice> = api.device_list().map(to_raw).collect();
        debug!(interfaces = raw.len(), "Enumerated HID interfaces");

        Ok(classify_all(&raw))
    }
}
