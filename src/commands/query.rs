//! Query command handlers.

use std::fmt::Display;

use htt_panel::{Feature, PanelError, PanelSession};

use super::CommandResult;
use crate::dispatcher::{Dispatcher, Flow};

/// Print the status of every attached panel
pub fn scan(dispatcher: &mut Dispatcher, _args: &[String]) -> CommandResult {
    let registry = dispatcher.registry();
    if registry.is_empty() {
        return Err(PanelError::NoDevice.into());
    }
    for (index, session) in registry.iter().enumerate() {
        print_status(index, session, dispatcher.verbose())?;
    }
    Ok(Flow::Continue)
}

/// Print one labelled field, or why it could not be read
///
/// Only a missing or rebooting device aborts the report.
fn field<T: Display>(label: &str, value: Result<T, PanelError>) -> Result<(), PanelError> {
    match value {
        Ok(value) => println!("- {label:<18}: {value}"),
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => println!("- {label:<18}: unavailable ({e})"),
    }
    Ok(())
}

fn print_status(index: usize, session: &PanelSession, verbose: bool) -> Result<(), PanelError> {
    let caps = session.capabilities(verbose)?;

    println!("HTT Detected.");
    println!("- {:<18}: {index}", "Device");
    println!("- {:<18}: {}", "Firmware Rev", caps.firmware);
    println!("- {:<18}: {}", "Driver Type", caps.driver);
    field(
        "Screen Rotation",
        session.get_rotation().map(|r| format!("{r} degrees")),
    )?;

    if caps.supports(Feature::Sensitivity) {
        field(
            "Touch Sensitivity",
            session
                .get_sensitivity()
                .map(|s| format!("{} ({s})", s.level())),
        )?;
    }

    if caps.supports(Feature::ExtendedDiagnostics) {
        field("Module ID", session.get_module_id())?;
        field(
            "Custom ID",
            session.get_custom_id().map(|id| format!("{id:4x}")),
        )?;
    }

    if caps.supports(Feature::BacklightFade) {
        field("Backlight", session.get_backlight())?;
        field(
            "Backlight Fade",
            session.get_fade_with(&caps).map(|fade| format!("{}ms", fade.fade_ms)),
        )?;
    }

    if caps.supports(Feature::DimSchedule) {
        let dim = session.get_dim_schedule_with(&caps).map(|schedule| {
            if schedule.is_disabled() {
                "disabled".to_string()
            } else {
                schedule
                    .stages
                    .iter()
                    .zip(schedule.activation_times())
                    .map(|(stage, at)| format!("{} at {at}s", stage.brightness))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        });
        field("Touch Dim", dim)?;
    }

    println!();
    Ok(())
}
