//! Device CLI command

use crate::display::{format_device_details, format_device_list};
use crate::error::MouseResult;
use crate::services::Services;

/// List detected mice
pub fn handle_devices_command(services: &Services, refresh: bool, details: bool) -> MouseResult<()> {
    let devices = services.devices().devices(refresh)?;

    if details {
        if devices.is_empty() {
            println!("No mice detected.");
        }
        for device in &devices {
            println!("{}", format_device_details(device));
        }
    } else {
        print!("{}", format_device_list(&devices));
        if devices.is_empty() {
            println!();
        }
    }

    Ok(())
}
