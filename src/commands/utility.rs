//! Utility command handlers.

use super::CommandResult;
use crate::dispatcher::{Dispatcher, Flow};
use crate::error::CommandError;

pub const HELP: &str = "\
Usage: htt_util [options]

Options are processed left to right; each applies to the device selected
at that point.

options:
 --help
    Show help (this message).

 --scan
    Scan for HTT modules and display their settings.

 --verbose
    Include module and custom IDs in the scan output.

 --device [id]
    Selects the target for the following commands in setups where multiple
    modules are connected. (0 = default)

 --rotatetouch [degrees]
    Sets and saves the rotation for the touch panel (visual output does not
    change orientation). Normally the host OS should take care of rotation;
    if it does not, this option applies the rotation on the device.
    degrees can be [0, 90, 180, 270].

 --sensitivity [level]
    Sets the sensitivity of the touch panel. The module reboots afterwards
    and no further options are processed.
    Only available on MXTxx and GT9xx based modules.
    level can be [normal, high, extra]

 --savecalibration [filename]
    Save the calibration data to a file, only available on resistive screens.

 --loadcalibration [filename]
    Load the calibration data from a file, only available on resistive
    screens. The file must be exactly 56 bytes.

===Following commands are for PCB Rev 2.0 or higher only====

 --backlight [setting]
    set backlight brightness (PWM setting) [0-255]

 --backlightset [setting]
    set and save backlight brightness (PWM setting) [0-255]

 --backlightfade [ms]
    set backlight fade time in milliseconds [0-10000]

 --backlightfadeset [ms]
    set and save backlight fade time in milliseconds [0-10000]

 --haptic [duration]
    set duration for motor on at 400Hz (in 100ms increments) [0-100]
    for 1 second - put [10]

 --piezo [duration]
    set duration for piezo on at 400Hz (in 100ms increments) [0-100]
    for 1 second - put [10]

 --touchfeedback [setting]
    set touch feedback: [0 none, 1 motor, 2 piezo, 3 motor and piezo]

 --touchdim [b1] [t1] [b2] [t2] [b3] [t3] [b4] [t4]
    dim to brightness [bN] after [tN] without touch; each stage starts when
    the previous one has elapsed. Brightness [0-255], time [0-65535] seconds,
    suffix m for minutes (e.g. 5m).
    to disable feature: --touchdim 0 0 0 0 0 0 0 0

 --capcalibrate
    PCAP calibrate

 --factorydefaults
    Restore factory settings. The module reboots afterwards and no further
    options are processed.

 --alarm [type] [duration] [blink]
    start alarm pattern [1-17] (0 cancels) for [duration] seconds
    (suffix m for minutes, -1 for no timeout), blinking the backlight at
    rate [0-10]
";

pub fn print_help() {
    print!("{HELP}");
}

/// Show usage
pub fn help(_dispatcher: &mut Dispatcher, _args: &[String]) -> CommandResult {
    print_help();
    Ok(Flow::Continue)
}

/// Enable extended diagnostics for following commands
pub fn verbose(dispatcher: &mut Dispatcher, _args: &[String]) -> CommandResult {
    dispatcher.set_verbose(true);
    Ok(Flow::Continue)
}

/// Select the device following commands apply to
pub fn select_device(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let index: usize = args[0]
        .parse()
        .map_err(|_| CommandError::invalid("device", &args[0]))?;
    dispatcher.registry_mut().select(index)?;
    println!("Device {index} selected.");
    Ok(Flow::Continue)
}
