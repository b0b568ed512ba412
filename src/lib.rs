// HTT touch panel utility - shared library
// Command table, dispatcher, argument parsing and calibration files

pub mod calibration_file;
pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod time;

pub use dispatcher::{Dispatcher, Flow, Halt, Outcome, COMMANDS};
pub use error::CommandError;
