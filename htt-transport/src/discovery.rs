//! Device discovery for HTT touch panel modules

use std::ffi::CString;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::device_registry::{PRODUCT_ID, VENDOR_ID};
use crate::error::TransportError;
use crate::hid_feature::HidFeatureTransport;
use crate::types::{DiscoveredDevice, TransportDeviceInfo};
use crate::Transport;

/// Device discovery abstraction
pub trait DeviceDiscovery {
    /// List currently available devices, in enumeration order
    fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError>;

    /// Open a specific device
    fn open_device(&self, device: &DiscoveredDevice) -> Result<Box<dyn Transport>, TransportError>;
}

/// HID device discovery backed by hidapi
///
/// Owns the hidapi context for the lifetime of the process; transports opened
/// through it stay valid after the discovery is dropped.
pub struct HidDiscovery {
    api: HidApi,
    vid: u16,
    pid: u16,
}

impl HidDiscovery {
    /// Initialise the HID subsystem and match the fixed HTT VID/PID
    pub fn new() -> Result<Self, TransportError> {
        Self::with_ids(VENDOR_ID, PRODUCT_ID)
    }

    /// Initialise the HID subsystem and match a custom VID/PID
    pub fn with_ids(vid: u16, pid: u16) -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        Ok(Self { api, vid, pid })
    }
}

impl DeviceDiscovery for HidDiscovery {
    fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let devices: Vec<DiscoveredDevice> = self
            .api
            .device_list()
            .filter(|d| d.vendor_id() == self.vid && d.product_id() == self.pid)
            .map(|d| {
                let path = d.path().to_string_lossy().to_string();
                debug!("Found device: VID={:04X} PID={:04X} path={}", self.vid, self.pid, path);
                DiscoveredDevice {
                    info: TransportDeviceInfo {
                        vid: self.vid,
                        pid: self.pid,
                        device_path: path,
                        serial: d.serial_number().map(|s| s.to_string()),
                        product_name: d.product_string().map(|s| s.to_string()),
                    },
                }
            })
            .collect();

        info!("Found {} devices", devices.len());
        Ok(devices)
    }

    fn open_device(&self, device: &DiscoveredDevice) -> Result<Box<dyn Transport>, TransportError> {
        let path = CString::new(device.info.device_path.as_str()).map_err(|_| {
            TransportError::DeviceNotFound(format!("invalid path {}", device.info.device_path))
        })?;
        let handle = self.api.open_path(&path)?;
        info!("Opened transport for {}", device.info);
        Ok(Box::new(HidFeatureTransport::new(handle, device.info.clone())))
    }
}
