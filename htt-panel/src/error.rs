//! Panel interface error types

use htt_transport::{ParseError, TransportError};
use thiserror::Error;

use crate::capability::Feature;
use crate::settings::DriverType;

/// Errors from panel operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// Transport layer error
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Device reply did not match the expected report layout
    #[error("Malformed reply: {0}")]
    Parse(#[from] ParseError),

    /// Invalid parameter value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Feature not available for this driver / firmware
    #[error("{feature} is not supported on {driver} driver")]
    NotSupported { feature: Feature, driver: DriverType },

    /// Feature needs newer firmware
    #[error("{feature} requires firmware newer than {required}, device has {actual}")]
    FirmwareTooOld {
        feature: Feature,
        required: u32,
        actual: u32,
    },

    /// Device returned a value outside the known table
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Calibration matrix read returned fewer than 56 bytes
    #[error("Short calibration read: got {got} of 56 bytes")]
    ShortCalibrationRead { got: usize },

    /// No open handle for the selected device
    #[error("No HTT Touch screens detected")]
    NoDevice,

    /// The device is rebooting after a reboot-inducing command
    #[error("Device is rebooting; reconnect before sending more commands")]
    Rebooting,

    /// Device index outside the enumerated range
    #[error("Invalid device ID : {index} ({count} devices connected)")]
    InvalidDevice { index: usize, count: usize },
}

impl PanelError {
    /// Errors after which no further command may be issued
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoDevice | Self::Rebooting)
    }
}
