//! Mouse device model
//!
//! Describes a pointing device reported by the enumeration backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a device is attached to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Usb,
    Bluetooth,
    /// Proprietary 2.4 GHz receiver
    Wireless,
    #[default]
    Unknown,
}

impl fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usb => write!(f, "USB"),
            Self::Bluetooth => write!(f, "Bluetooth"),
            Self::Wireless => write!(f, "Wireless"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A connected pointing device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseDevice {
    /// Stable identifier (the OS device path)
    pub id: String,
    /// Product name
    pub name: String,
    /// Manufacturer name, from the device or the known-vendor table
    pub manufacturer: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub connection_type: ConnectionType,
    pub serial_number: Option<String>,
    /// Whether the device answered the last enumeration
    pub is_active: bool,
}

impl MouseDevice {
    /// `VID:PID` in the usual hex notation
    pub fn hardware_id(&self) -> String {
        format!("{:04X}:{:04X}", self.vendor_id, self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_id_format() {
        let device = MouseDevice {
            id: r"\\?\hid#vid_046d&pid_c077".into(),
            name: "USB Optical Mouse".into(),
            manufacturer: "Logitech".into(),
            vendor_id: 0x046D,
            product_id: 0xC077,
            connection_type: ConnectionType::Usb,
            serial_number: None,
            is_active: true,
        };
        assert_eq!(device.hardware_id(), "046D:C077");
    }

    #[test]
    fn test_connection_type_serde() {
        let json = serde_json::to_string(&ConnectionType::Bluetooth).unwrap();
        assert_eq!(json, "\"bluetooth\"");
    }
}
