//! hidapi feature-report transport

use hidapi::HidDevice;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::report;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// Feature-report transport over one opened hidapi handle
///
/// The handle is released when the transport is dropped.
pub struct HidFeatureTransport {
    device: HidDevice,
    info: TransportDeviceInfo,
}

impl HidFeatureTransport {
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self { device, info }
    }
}

impl Transport for HidFeatureTransport {
    fn send_feature_report(&self, data: &[u8]) -> Result<usize, TransportError> {
        debug!(
            "Sending {} report: {:02X?}",
            report::name(data.first().copied().unwrap_or(0)),
            data
        );
        self.device.send_feature_report(data)?;
        Ok(data.len())
    }

    fn get_feature_report(&self, report_id: u8, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; max_len.max(1)];
        buf[0] = report_id;
        let count = self.device.get_feature_report(&mut buf)?;
        buf.truncate(count);
        debug!("Got {} report: {:02X?}", report::name(report_id), buf);
        Ok(buf)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

impl Drop for HidFeatureTransport {
    fn drop(&mut self) {
        debug!("Closing HID handle for {}", self.info.device_path);
    }
}
