//! Transport and report codec for HTT touch panel controllers
//!
//! HTT modules are configured entirely through vendor feature reports. This
//! crate provides:
//!
//! - report IDs and fixed wire lengths (`protocol`)
//! - the fixed-layout report structs and their encode/decode (`report`)
//! - the `Transport` trait with a hidapi backend, plus an in-memory loopback
//!   panel behind the `test-support` feature
//! - enumeration of attached modules in stable order (`DeviceDiscovery`)

pub mod device_registry;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod loopback;
pub mod protocol;
pub mod report;
pub mod types;

mod discovery;
mod hid_feature;

pub use device_registry::{PRODUCT_ID, VENDOR_ID};
pub use discovery::{DeviceDiscovery, HidDiscovery};
pub use error::TransportError;
pub use hid_feature::HidFeatureTransport;
#[cfg(any(test, feature = "test-support"))]
pub use loopback::{LoopbackDevice, LoopbackTransport};
pub use protocol::{report as report_id, ReportKind, CALIBRATION_MATRIX_LEN, DIM_STAGES};
pub use report::{
    AlarmReport, BacklightFadeReport, BacklightReport, CalibrationMatrixReport,
    CapCalibrateReport, CustomIdReport, DriverTypeReport, FactoryResetReport, FeatureReport,
    FirmwareRevisionReport, HapticReport, ModuleIdReport, ParseError, PiezoReport,
    RotationReport, SensitivityReport, TouchDimReport, TouchFeedbackReport,
};
pub use types::{DiscoveredDevice, TransportDeviceInfo};

/// The core transport trait
///
/// Calls are synchronous: each blocks until the device answers or the
/// transport reports failure. The handle is released on drop.
pub trait Transport {
    /// Send a complete feature report (report ID first)
    ///
    /// # Returns
    /// Number of bytes written
    fn send_feature_report(&self, data: &[u8]) -> Result<usize, TransportError>;

    /// Request a feature report by ID
    ///
    /// # Returns
    /// Reply bytes including the report ID, at most `max_len` long
    fn get_feature_report(&self, report_id: u8, max_len: usize) -> Result<Vec<u8>, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;
}

/// Typed report helpers on top of any `Transport`
pub trait TransportExt {
    /// Send a typed report, requiring the full wire image to be written
    fn send_report<R: FeatureReport>(&self, report: &R) -> Result<(), TransportError>;

    /// Request a report by kind, returning the raw reply
    fn request(&self, kind: ReportKind) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> TransportExt for T {
    fn send_report<R: FeatureReport>(&self, report: &R) -> Result<(), TransportError> {
        let bytes = report.encode();
        let sent = self.send_feature_report(bytes)?;
        if sent < bytes.len() {
            return Err(TransportError::ShortWrite {
                sent,
                expected: bytes.len(),
            });
        }
        Ok(())
    }

    fn request(&self, kind: ReportKind) -> Result<Vec<u8>, TransportError> {
        self.get_feature_report(kind.id(), kind.wire_len())
    }
}
