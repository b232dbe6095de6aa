//! Device display formatting
//!
//! Formats detected mice for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::MouseDevice;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "VID:PID")]
    hardware_id: String,
    #[tabled(rename = "Connection")]
    connection: String,
}

/// Format a list of devices as a table
pub fn format_device_list(devices: &[MouseDevice]) -> String {
    if devices.is_empty() {
        return "No mice detected.".to_string();
    }

    let rows = devices.iter().enumerate().map(|(i, d)| DeviceRow {
        index: i + 1,
        name: d.name.clone(),
        manufacturer: d.manufacturer.clone(),
        hardware_id: d.hardware_id(),
        connection: d.connection_type.to_string(),
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&format!("\n{} mouse/mice detected\n", devices.len()));
    output
}

/// Format one device's details
pub fn format_device_details(device: &MouseDevice) -> String {
    let mut output = String::new();

    output.push_str(&format!("Device:       {}\n", device.name));
    output.push_str(&format!("Manufacturer: {}\n", device.manufacturer));
    output.push_str(&format!("Vendor ID:    0x{:04X}\n", device.vendor_id));
    output.push_str(&format!("Product ID:   0x{:04X}\n", device.product_id));
    output.push_str(&format!("Connection:   {}\n", device.connection_type));
    if let Some(serial) = &device.serial_number {
        output.push_str(&format!("Serial:       {}\n", serial));
    }
    output.push_str(&format!(
        "Status:       {}\n",
        if device.is_active { "Active" } else { "Inactive" }
    ));
    output.push_str(&format!("Path:         {}\n", device.id));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionType;

    fn device() -> MouseDevice {
        MouseDevice {
            id: r"\\?\hid#vid_046d&pid_c077".into(),
            name: "M105 Optical Mouse".into(),
            manufacturer: "Logitech".into(),
            vendor_id: 0x046D,
            product_id: 0xC077,
            connection_type: ConnectionType::Usb,
            serial_number: None,
            is_active: true,
        }
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_device_list(&[]), "No mice detected.");
    }

    #[test]
    fn test_list_contains_columns() {
        let output = format_device_list(&[device()]);
        assert!(output.contains("M105 Optical Mouse"));
        assert!(output.contains("046D:C077"));
        assert!(output.contains("USB"));
        assert!(output.contains("1 mouse/mice detected"));
    }

    #[test]
    fn test_details() {
        let output = format_device_details(&device());
        assert!(output.contains("Vendor ID:    0x046D"));
        assert!(!output.contains("Serial"));
    }
}
