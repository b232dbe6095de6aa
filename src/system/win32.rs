//! Win32 settings backend
//!
//! Reads and writes mouse parameters through `SystemParametersInfoW`.
//! Writes persist to the user profile and broadcast `WM_SETTINGCHANGE`.

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::Foundation::E_ACCESSDENIED;
use windows::Win32::UI::Input::KeyboardAndMouse::GetDoubleClickTime;
use windows::Win32::UI::Shell::IsUserAnAdmin;
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, IsProcessDPIAware, SystemParametersInfoW, SM_CXDRAG, SM_CYDRAG, SM_SWAPBUTTON, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE,
    SPI_GETMOUSE, SPI_GETMOUSEHOVERTIME, SPI_GETMOUSESPEED, SPI_GETWHEELSCROLLLINES,
    SPI_SETDOUBLECLICKTIME, SPI_SETMOUSE, SPI_SETMOUSEBUTTONSWAP, SPI_SETMOUSEHOVERTIME,
    SPI_SETMOUSESPEED, SPI_SETWHEELSCROLLLINES, SYSTEM_PARAMETERS_INFO_ACTION,
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use super::{ApplyError, SystemSettings};
use crate::error::{MouseError, MouseResult};
use crate::models::{AccelerationLevel, SettingKey, SettingValue, SettingsValues};

const PERSIST: SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS =
    SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(SPIF_UPDATEINIFILE.0 | SPIF_SENDCHANGE.0);

/// Live Windows mouse configuration
#[derive(Debug, Default)]
pub struct WindowsSystemSettings;

impl WindowsSystemSettings {
    pub fn new() -> Self {
        Self
    }

    fn read_u32(action: SYSTEM_PARAMETERS_INFO_ACTION) -> MouseResult<u32> {
        let mut value: u32 = 0;
        unsafe {
            SystemParametersInfoW(
                action,
                0,
                Some(&mut value as *mut u32 as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| MouseError::Io(format!("SystemParametersInfoW({}) failed: {}", action.0, e)))?;
        Ok(value)
    }

    /// `[threshold1, threshold2, factor]`
    fn read_mouse_params() -> MouseResult<[i32; 3]> {
        let mut params = [0i32; 3];
        unsafe {
            SystemParametersInfoW(
                SPI_GETMOUSE,
                0,
                Some(params.as_mut_ptr() as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| MouseError::Io(format!("Failed to read acceleration: {}", e)))?;
        Ok(params)
    }

    fn write_mouse_params(mut params: [i32; 3]) -> Result<(), ApplyError> {
        params[0] = params[0].clamp(0, 20);
        params[1] = params[1].clamp(0, 20);
        params[2] = params[2].clamp(0, 3);
        unsafe {
            SystemParametersInfoW(
                SPI_SETMOUSE,
                0,
                Some(params.as_mut_ptr() as *mut c_void),
                PERSIST,
            )
        }
        .map_err(map_win32_error)
    }

    /// Actions that take their value in `uiParam`
    fn write_ui_param(action: SYSTEM_PARAMETERS_INFO_ACTION, value: u32) -> Result<(), ApplyError> {
        unsafe { SystemParametersInfoW(action, value, None, PERSIST) }.map_err(map_win32_error)
    }
}

fn map_win32_error(err: windows::core::Error) -> ApplyError {
    if err.code() == E_ACCESSDENIED {
        ApplyError::PermissionDenied(err.message().to_string())
    } else {
        ApplyError::Rejected(err.to_string())
    }
}

fn expect_int(key: SettingKey, value: &SettingValue) -> Result<i64, ApplyError> {
    key.validate(value)?;
    value
        .as_int()
        .ok_or_else(|| ApplyError::InvalidValue(format!("{} expects a number", key)))
}

fn expect_bool(key: SettingKey, value: &SettingValue) -> Result<bool, ApplyError> {
    key.validate(value)?;
    value
        .as_bool()
        .ok_or_else(|| ApplyError::InvalidValue(format!("{} expects on/off", key)))
}

impl SystemSettings for WindowsSystemSettings {
    fn get_current(&self) -> MouseResult<SettingsValues> {
        let speed = Self::read_u32(SPI_GETMOUSESPEED)?;
        let [t1, t2, factor] = Self::read_mouse_params()?;
        let double_click = unsafe { GetDoubleClickTime() };
        let swapped = unsafe { GetSystemMetrics(SM_SWAPBUTTON) } != 0;
        let scroll_lines = Self::read_u32(SPI_GETWHEELSCROLLLINES)?;
        let hover = Self::read_u32(SPI_GETMOUSEHOVERTIME)?;

        let mut values = SettingsValues::new();
        values.insert(SettingKey::PointerSpeed, speed);
        values.insert(SettingKey::Acceleration, factor > 0);
        values.insert(SettingKey::AccelerationThreshold1, t1);
        values.insert(SettingKey::AccelerationThreshold2, t2);
        values.insert(SettingKey::AccelerationFactor, factor);
        values.insert(SettingKey::DoubleClickTime, double_click);
        values.insert(SettingKey::SwapButtons, swapped);
        values.insert(SettingKey::WheelScrollLines, scroll_lines);
        values.insert(SettingKey::HoverTime, hover);

        debug!(settings = values.len(), "Read system mouse settings");
        Ok(values)
    }

    fn apply(&self, key: SettingKey, value: &SettingValue) -> Result<(), ApplyError> {
        debug!(key = %key, value = %value, "Applying setting");

        match key {
            SettingKey::PointerSpeed => {
                let speed = expect_int(key, value)?.clamp(1, 20) as usize;
                // SPI_SETMOUSESPEED takes the speed itself in pvParam
                unsafe {
                    SystemParametersInfoW(
                        SPI_SETMOUSESPEED,
                        0,
                        Some(speed as *mut c_void),
                        PERSIST,
                    )
                }
                .map_err(map_win32_error)
            }
            SettingKey::Acceleration => {
                let enabled = expect_bool(key, value)?;
                let current = Self::read_mouse_params().map_err(ApplyError::from)?;
                let params = match (enabled, current[2]) {
                    (false, _) => [0, 0, 0],
                    (true, 0) => {
                        let (t1, t2, factor) = AccelerationLevel::Medium.parameters();
                        [t1 as i32, t2 as i32, factor as i32]
                    }
                    (true, _) => current,
                };
                Self::write_mouse_params(params)
            }
            SettingKey::AccelerationThreshold1
            | SettingKey::AccelerationThreshold2
            | SettingKey::AccelerationFactor => {
                let new = expect_int(key, value)? as i32;
                let mut params = Self::read_mouse_params().map_err(ApplyError::from)?;
                let slot = match key {
                    SettingKey::AccelerationThreshold1 => 0,
                    SettingKey::AccelerationThreshold2 => 1,
                    _ => 2,
                };
                params[slot] = new;
                Self::write_mouse_params(params)
            }
            SettingKey::DoubleClickTime => {
                let ms = expect_int(key, value)?.clamp(100, 900) as u32;
                Self::write_ui_param(SPI_SETDOUBLECLICKTIME, ms)
            }
            SettingKey::SwapButtons => {
                let swap = expect_bool(key, value)?;
                Self::write_ui_param(SPI_SETMOUSEBUTTONSWAP, u32::from(swap))
            }
            SettingKey::WheelScrollLines => {
                let lines = expect_int(key, value)?.clamp(1, 100) as u32;
                Self::write_ui_param(SPI_SETWHEELSCROLLLINES, lines)
            }
            SettingKey::HoverTime => {
                let ms = expect_int(key, value)?.clamp(100, 2000) as u32;
                Self::write_ui_param(SPI_SETMOUSEHOVERTIME, ms)
            }
        }
    }

    fn name(&self) -> &'static str {
        "windows"
    }

    fn requires_admin(&self) -> bool {
        !unsafe { IsUserAnAdmin() }.as_bool()
    }

    fn drag_area(&self) -> Option<(u32, u32)> {
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXDRAG), GetSystemMetrics(SM_CYDRAG)) };
        // GetSystemMetrics reports failure as 0
        (width > 0 && height > 0).then_some((width as u32, height as u32))
    }

    fn dpi_aware(&self) -> Option<bool> {
        Some(unsafe { IsProcessDPIAware() }.as_bool())
    }
}
