//! Calibration command handlers.

use std::path::Path;

use super::CommandResult;
use crate::calibration_file;
use crate::dispatcher::{Dispatcher, Flow};

/// Read the resistive calibration matrix into a file
pub fn save(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let path = Path::new(&args[0]);
    let matrix = session.get_calibration_matrix()?;
    calibration_file::save(path, &matrix)?;
    println!("Calibration matrix written to {}", path.display());
    Ok(Flow::Continue)
}

/// Write a saved calibration matrix to the device
pub fn load(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let matrix = calibration_file::load(Path::new(&args[0]))?;
    session.set_calibration_matrix(matrix.as_bytes())?;
    println!("Calibration matrix written to unit");
    println!("Please reconnect the USB cable to load the new settings.");
    Ok(Flow::Continue)
}

/// Start capacitive recalibration
pub fn capacitive(dispatcher: &mut Dispatcher, _args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    session.trigger_capacitive_calibration()?;
    println!("Calibrate: Success!");
    Ok(Flow::Continue)
}
