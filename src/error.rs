//! Command-level error types

use htt_panel::PanelError;
use thiserror::Error;

use crate::calibration_file::CalibrationFileError;
use crate::time::TimeParseError;

/// Errors reported by a single command; processing continues unless the
/// underlying panel error is fatal
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error("Invalid parameter for {command} : {value}")]
    InvalidArgument { command: &'static str, value: String },

    #[error("Invalid time: {0}")]
    InvalidTime(#[from] TimeParseError),

    #[error(transparent)]
    CalibrationFile(#[from] CalibrationFileError),
}

impl CommandError {
    pub(crate) fn invalid(command: &'static str, value: &str) -> Self {
        Self::InvalidArgument {
            command,
            value: value.to_string(),
        }
    }

    /// The panel error that stops all further commands, if any
    pub fn fatal(&self) -> Option<&PanelError> {
        match self {
            Self::Panel(e) if e.is_fatal() => Some(e),
            _ => None,
        }
    }
}
