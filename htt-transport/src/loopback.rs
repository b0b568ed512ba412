//! In-memory panel emulation
//!
//! `LoopbackDevice` stands in for a connected module: every report written
//! through a transport it opened becomes the reply to the next read of that
//! report ID, and read-only reports (driver type, firmware revision, IDs) are
//! seeded up front. Only built for tests and with the `test-support` feature.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::device_registry::{PRODUCT_ID, VENDOR_ID};
use crate::error::TransportError;
use crate::protocol::report;
use crate::types::TransportDeviceInfo;
use crate::Transport;

#[derive(Default)]
struct LoopbackState {
    reports: HashMap<u8, Vec<u8>>,
    sent: Vec<Vec<u8>>,
    requested: Vec<u8>,
    failing: bool,
    open_handles: usize,
    closed_handles: usize,
}

/// Emulated panel; clones observe the same state
#[derive(Clone)]
pub struct LoopbackDevice {
    state: Rc<RefCell<LoopbackState>>,
    info: TransportDeviceInfo,
}

impl Default for LoopbackDevice {
    fn default() -> Self {
        Self::new("loopback")
    }
}

impl LoopbackDevice {
    pub fn new(path: &str) -> Self {
        Self {
            state: Rc::default(),
            info: TransportDeviceInfo::from_path(VENDOR_ID, PRODUCT_ID, path),
        }
    }

    /// Seed a report reply, keyed by its first byte
    pub fn with_report(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set_report(bytes);
        self
    }

    /// Replace a report reply, keyed by its first byte
    pub fn set_report(&self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        if let Some(&id) = bytes.first() {
            self.state.borrow_mut().reports.insert(id, bytes);
        }
    }

    /// Make every subsequent transport call fail
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Open a transport handle onto this device
    pub fn open(&self) -> Box<dyn Transport> {
        self.state.borrow_mut().open_handles += 1;
        Box::new(LoopbackTransport {
            state: Rc::clone(&self.state),
            info: self.info.clone(),
        })
    }

    /// Reports written so far, oldest first
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.borrow().sent.clone()
    }

    /// Most recent report written
    pub fn last_sent(&self) -> Option<Vec<u8>> {
        self.state.borrow().sent.last().cloned()
    }

    /// Report IDs requested so far, oldest first
    pub fn requested(&self) -> Vec<u8> {
        self.state.borrow().requested.clone()
    }

    /// Total number of send and get calls
    pub fn call_count(&self) -> usize {
        let state = self.state.borrow();
        state.sent.len() + state.requested.len()
    }

    /// Handles opened and not yet dropped
    pub fn open_handles(&self) -> usize {
        let state = self.state.borrow();
        state.open_handles - state.closed_handles
    }

    /// Handles dropped so far
    pub fn closed_handles(&self) -> usize {
        self.state.borrow().closed_handles
    }
}

/// Transport handle onto a `LoopbackDevice`
pub struct LoopbackTransport {
    state: Rc<RefCell<LoopbackState>>,
    info: TransportDeviceInfo,
}

impl Transport for LoopbackTransport {
    fn send_feature_report(&self, data: &[u8]) -> Result<usize, TransportError> {
        let mut state = self.state.borrow_mut();
        state.sent.push(data.to_vec());
        if state.failing {
            return Err(TransportError::HidError("loopback send failed".into()));
        }
        let Some(&id) = data.first() else {
            return Err(TransportError::Internal("empty report".into()));
        };
        debug!("Loopback stored {} report: {:02X?}", report::name(id), data);
        state.reports.insert(id, data.to_vec());
        Ok(data.len())
    }

    fn get_feature_report(&self, report_id: u8, max_len: usize) -> Result<Vec<u8>, TransportError> {
        let mut state = self.state.borrow_mut();
        state.requested.push(report_id);
        if state.failing {
            return Err(TransportError::HidError("loopback read failed".into()));
        }
        let reply = state.reports.get(&report_id).ok_or_else(|| {
            TransportError::HidError(format!("report 0x{report_id:02X} not available"))
        })?;
        Ok(reply[..reply.len().min(max_len)].to_vec())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

impl Drop for LoopbackTransport {
    fn drop(&mut self) {
        self.state.borrow_mut().closed_handles += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_written_report_reads_back() {
        let device = LoopbackDevice::default();
        let transport = device.open();
        transport.send_feature_report(&[10, 128, 0]).unwrap();
        assert_eq!(transport.get_feature_report(10, 3).unwrap(), vec![10, 128, 0]);
        assert_eq!(device.sent(), vec![vec![10, 128, 0]]);
        assert_eq!(device.requested(), vec![10]);
    }

    #[test]
    fn test_reply_truncated_to_max_len() {
        let device = LoopbackDevice::default().with_report(vec![9, 1, 2, 3, 4, 5, 6]);
        let transport = device.open();
        assert_eq!(transport.get_feature_report(9, 5).unwrap(), vec![9, 1, 2, 3, 4]);
    }

    #[test]
    fn test_missing_report_is_error() {
        let device = LoopbackDevice::default();
        assert!(device.open().get_feature_report(4, 2).is_err());
    }

    #[test]
    fn test_failing_device() {
        let device = LoopbackDevice::default().with_report(vec![4, 1]);
        let transport = device.open();
        device.set_failing(true);
        assert!(transport.get_feature_report(4, 2).is_err());
        assert!(transport.send_feature_report(&[8, 0, 1]).is_err());
        assert_eq!(device.call_count(), 2);
    }

    #[test]
    fn test_handle_accounting() {
        let device = LoopbackDevice::default();
        let a = device.open();
        let b = device.open();
        assert_eq!(device.open_handles(), 2);
        drop(a);
        assert_eq!(device.open_handles(), 1);
        drop(b);
        assert_eq!(device.open_handles(), 0);
        assert_eq!(device.closed_handles(), 2);
    }
}
