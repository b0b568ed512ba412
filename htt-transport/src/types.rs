//! Common types for transport layer

use std::fmt;

/// Device identification information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Platform device path as reported by enumeration
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Info for a device known only by its path
    pub fn from_path(vid: u16, pid: u16, device_path: impl Into<String>) -> Self {
        Self {
            vid,
            pid,
            device_path: device_path.into(),
            serial: None,
            product_name: None,
        }
    }
}

impl fmt::Display for TransportDeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VID={:04x} PID={:04x} path={}",
            self.vid, self.pid, self.device_path
        )
    }
}

/// Discovered device that can be opened
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    /// Device information
    pub info: TransportDeviceInfo,
}
