//! HID device classification
//!
//! Decides which raw HID interfaces are pointing devices and turns them into
//! `MouseDevice` records. Kept free of any HID library so it can be tested
//! anywhere.

use std::collections::HashSet;

use crate::models::{ConnectionType, MouseDevice};

/// HID Generic Desktop usage page
pub const GENERIC_DESKTOP_PAGE: u16 = 0x01;
/// Mouse usage on the Generic Desktop page
pub const MOUSE_USAGE: u16 = 0x02;

/// Words that mark a product as a pointing device
const MOUSE_KEYWORDS: &[&str] = &[
    "mouse", "mice", "pointing", "cursor", "optical", "wireless", "gaming", "trackball",
    "touchpad", "pointer",
];

/// Vendors that mostly ship mice
const KNOWN_VENDORS: &[(u16, &str)] = &[
    (0x046D, "Logitech"),
    (0x1532, "Razer"),
    (0x0458, "KYE Systems"),
    (0x093A, "Pixart Imaging"),
    (0x275D, "Pixart Imaging"),
    (0x1BCF, "Sunplus Innovation"),
    (0x248A, "Maxxter"),
    (0x18F8, "Elecom"),
    (0x062A, "MosArt Semiconductor"),
    (0x0E8F, "GreenAsia"),
    (0x1EA7, "SHARKOON Technologies"),
    (0x25A7, "Areson Technology"),
    (0x04F2, "Chicony Electronics"),
    (0x413C, "Dell Computer"),
    (0x17EF, "Lenovo"),
    (0x045E, "Microsoft"),
];

/// Name of a known mouse vendor
pub fn vendor_name(vendor_id: u16) -> Option<&'static str> {
    KNOWN_VENDORS
        .iter()
        .find(|(id, _)| *id == vendor_id)
        .map(|(_, name)| *name)
}

/// One HID interface as reported by the OS
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHidDevice {
    pub path: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub usage_page: u16,
    pub usage: u16,
    pub product: Option<String>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub transport: ConnectionType,
}

impl RawHidDevice {
    fn product_name(&self) -> Option<&str> {
        self.product.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    fn has_keyword(&self) -> bool {
        let haystack = format!(
            "{} {}",
            self.product.as_deref().unwrap_or_default(),
            self.manufacturer.as_deref().unwrap_or_default()
        )
        .to_lowercase();
        MOUSE_KEYWORDS.iter().any(|kw| haystack.contains(kw))
    }

    /// Whether this interface looks like a pointing device
    pub fn is_mouse(&self) -> bool {
        if self.usage_page == GENERIC_DESKTOP_PAGE && self.usage == MOUSE_USAGE {
            return true;
        }
        self.has_keyword()
    }
}

/// Convert one interface, if it is a mouse
pub fn classify(raw: &RawHidDevice) -> Option<MouseDevice> {
    if !raw.is_mouse() {
        return None;
    }

    let name = raw
        .product_name()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HID Mouse {:04X}:{:04X}", raw.vendor_id, raw.product_id));

    let manufacturer = raw
        .manufacturer
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| vendor_name(raw.vendor_id).map(str::to_string))
        .unwrap_or_else(|| "Unknown".to_string());

    let lower = name.to_lowercase();
    let connection_type = match raw.transport {
        ConnectionType::Usb if lower.contains("wireless") || lower.contains("receiver") => {
            ConnectionType::Wireless
        }
        other => other,
    };

    Some(MouseDevice {
        id: raw.path.clone(),
        name,
        manufacturer,
        vendor_id: raw.vendor_id,
        product_id: raw.product_id,
        connection_type,
        serial_number: raw
            .serial_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        is_active: true,
    })
}

/// Classify a full enumeration: mice only, one per path, sorted by name
pub fn classify_all<'a, I>(raw: I) -> Vec<MouseDevice>
where
    I: IntoIterator<Item = &'a RawHidDevice>,
{
    let mut seen = HashSet::new();
    let mut mice: Vec<MouseDevice> = raw
        .into_iter()
        .filter_map(classify)
        .filter(|device| seen.insert(device.id.clone()))
        .collect();

    mice.sort_by_key(|device| device.name.to_lowercase());
    mice
}
