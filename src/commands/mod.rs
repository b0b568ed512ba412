//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (scan)
//! - `set`: Setting commands (rotation, sensitivity, backlight, feedback, dimming, alarm, reset)
//! - `calibration`: Calibration commands (save/load matrix, capacitive recalibration)
//! - `utility`: Utility commands (help, verbose, device selection)

pub mod calibration;
pub mod query;
pub mod set;
pub mod utility;

use crate::dispatcher::Flow;
use crate::error::CommandError;
use crate::time::parse_saturating;

/// Result type for command handlers
pub type CommandResult = Result<Flow, CommandError>;

/// Parse a decimal integer argument; range is left to the clamping setters
///
/// Values beyond `i64` saturate so they clamp like any other out-of-range
/// input. Non-numeric text is rejected.
pub(crate) fn parse_int(command: &'static str, value: &str) -> Result<i64, CommandError> {
    parse_saturating(value).ok_or_else(|| CommandError::invalid(command, value))
}
