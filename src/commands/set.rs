//! Set (write) command handlers.

use htt_panel::{AlarmDuration, AlarmSpec, DimSchedule, DimStage, Sensitivity};

use super::{parse_int, CommandResult};
use crate::dispatcher::{Dispatcher, Flow, Halt};
use crate::error::CommandError;
use crate::time::parse_time;

/// Set touch rotation (0, 90, 180 or 270 degrees)
pub fn rotate_touch(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let degrees: u16 = args[0]
        .parse()
        .map_err(|_| CommandError::invalid("rotatetouch", &args[0]))?;
    let rotation = session.set_rotation(degrees)?;
    println!("Setting rotation to {rotation} : Success!");
    Ok(Flow::Continue)
}

/// Set sensitivity; the device reboots on success
pub fn sensitivity(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let level = Sensitivity::parse(&args[0])
        .ok_or_else(|| CommandError::invalid("sensitivity", &args[0]))?;
    session.set_sensitivity(level)?;
    println!("Setting sensitivity to {level} : Success!");
    Ok(Flow::Halt(Halt::Rebooting))
}

fn set_backlight(dispatcher: &mut Dispatcher, value: &str, persist: bool) -> CommandResult {
    let session = dispatcher.current()?;
    let level = parse_int("backlight", value)?;
    let applied = session.set_backlight(level, persist)?;
    println!("Setting brightness to {applied} : Success!");
    Ok(Flow::Continue)
}

/// Set backlight level
pub fn backlight(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    set_backlight(dispatcher, &args[0], false)
}

/// Set and save backlight level
pub fn backlight_persist(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    set_backlight(dispatcher, &args[0], true)
}

fn set_fade(dispatcher: &mut Dispatcher, value: &str, persist: bool) -> CommandResult {
    let session = dispatcher.current()?;
    let fade_ms = parse_int("backlightfade", value)?;
    let applied = session.set_fade(fade_ms, persist)?;
    println!("Setting backlight fade to {}ms : Success!", applied.fade_ms);
    Ok(Flow::Continue)
}

/// Set backlight fade time
pub fn backlight_fade(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    set_fade(dispatcher, &args[0], false)
}

/// Set and save backlight fade time
pub fn backlight_fade_persist(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    set_fade(dispatcher, &args[0], true)
}

/// Set haptic motor duration
pub fn haptic(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let duration = parse_int("haptic", &args[0])?;
    let applied = session.set_haptic(duration)?;
    println!("Setting motor duration to {applied} : Success!");
    Ok(Flow::Continue)
}

/// Set piezo duration
pub fn piezo(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let duration = parse_int("piezo", &args[0])?;
    let applied = session.set_piezo(duration)?;
    println!("Setting piezo duration to {applied} : Success!");
    Ok(Flow::Continue)
}

/// Set touch feedback mode
pub fn touch_feedback(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let setting = parse_int("touchfeedback", &args[0])?;
    let mode = session.set_touch_feedback(setting)?;
    println!("Setting touch feedback to {} ({mode}) : Success!", mode.code());
    Ok(Flow::Continue)
}

/// Set the 4-stage touch dim schedule from brightness/time pairs
pub fn touch_dim(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let mut stages = [DimStage::default(); 4];
    for (stage, pair) in stages.iter_mut().zip(args.chunks_exact(2)) {
        let brightness = parse_int("touchdim", &pair[0])?;
        let timeout = parse_time(&pair[1])?;
        *stage = DimStage::clamped(brightness, timeout);
    }
    let schedule = DimSchedule::new(stages);
    session.set_dim_schedule(&schedule)?;

    if schedule.is_disabled() {
        println!("Disabling touch dimming : Success!");
    } else {
        let described = schedule
            .stages
            .iter()
            .map(|s| format!("{} after {}s", s.brightness, s.timeout_secs))
            .collect::<Vec<_>>()
            .join(", ");
        println!("Setting touch dimming properties to {described} : Success!");
    }
    Ok(Flow::Continue)
}

/// Restore factory settings; the device reboots on success
pub fn factory_defaults(dispatcher: &mut Dispatcher, _args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    session.factory_reset()?;
    println!("Restoring factory defaults : Success!");
    Ok(Flow::Halt(Halt::Rebooting))
}

/// Start or cancel an alarm
pub fn alarm(dispatcher: &mut Dispatcher, args: &[String]) -> CommandResult {
    let session = dispatcher.current()?;
    let alarm_type = parse_int("alarm", &args[0])?;
    let duration = match args[1].as_str() {
        "-1" => AlarmDuration::NoTimeout,
        value => AlarmDuration::clamped(parse_time(value)?),
    };
    let blink_rate = parse_int("alarm", &args[2])?;
    let spec = AlarmSpec::clamped(alarm_type, duration, blink_rate);
    session.trigger_alarm(&spec)?;

    if spec.is_cancel() {
        println!("Cancelling alarm : Success!");
    } else {
        let duration = match spec.duration {
            AlarmDuration::NoTimeout => "no timeout".to_string(),
            AlarmDuration::Seconds(secs) => format!("{secs}s"),
        };
        println!(
            "Setting alarm {} for {duration}, blink rate {} : Success!",
            spec.alarm_type, spec.blink_rate
        );
    }
    Ok(Flow::Continue)
}
