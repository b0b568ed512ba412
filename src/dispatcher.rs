//! Command table and sequential dispatcher
//!
//! Tokens are consumed left to right: a command name, then exactly the
//! number of arguments its table entry declares. Each command sees the
//! effects of every command before it (device selection, verbosity, a
//! reboot). Sessions are owned by the dispatcher and closed when it drops,
//! whichever way processing ended.

use std::fmt;

use htt_panel::{DeviceRegistry, PanelError, PanelSession};
use tracing::debug;

use crate::commands::{calibration, query, set, utility, CommandResult};

/// Handler for one command; receives exactly `CommandSpec::args` arguments
pub type Handler = fn(&mut Dispatcher, &[String]) -> CommandResult;

/// One entry of the command table
pub struct CommandSpec {
    pub name: &'static str,
    /// Arguments following the command name
    pub args: usize,
    pub handler: Handler,
}

impl CommandSpec {
    const fn new(name: &'static str, args: usize, handler: Handler) -> Self {
        Self {
            name,
            args,
            handler,
        }
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec::new("--help", 0, utility::help),
    CommandSpec::new("--scan", 0, query::scan),
    CommandSpec::new("--verbose", 0, utility::verbose),
    CommandSpec::new("--device", 1, utility::select_device),
    CommandSpec::new("--rotatetouch", 1, set::rotate_touch),
    CommandSpec::new("--sensitivity", 1, set::sensitivity),
    CommandSpec::new("--savecalibration", 1, calibration::save),
    CommandSpec::new("--loadcalibration", 1, calibration::load),
    CommandSpec::new("--backlight", 1, set::backlight),
    CommandSpec::new("--backlightset", 1, set::backlight_persist),
    CommandSpec::new("--backlightfade", 1, set::backlight_fade),
    CommandSpec::new("--backlightfadeset", 1, set::backlight_fade_persist),
    CommandSpec::new("--haptic", 1, set::haptic),
    CommandSpec::new("--motor", 1, set::haptic),
    CommandSpec::new("--piezo", 1, set::piezo),
    CommandSpec::new("--touchfeedback", 1, set::touch_feedback),
    CommandSpec::new("--touchdim", 8, set::touch_dim),
    CommandSpec::new("--capcalibrate", 0, calibration::capacitive),
    CommandSpec::new("--factorydefaults", 0, set::factory_defaults),
    CommandSpec::new("--alarm", 3, set::alarm),
];

/// Look up a command by name
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// What the dispatcher does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt(Halt),
}

/// Terminal dispatcher states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// A device command found no open device
    NoDevice,
    /// A reboot-inducing command succeeded
    Rebooting,
    UnknownCommand(String),
    MissingArgument(String),
}

impl From<&PanelError> for Halt {
    fn from(e: &PanelError) -> Self {
        match e {
            PanelError::Rebooting => Self::Rebooting,
            _ => Self::NoDevice,
        }
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDevice => f.write_str("No HTT Touch screens detected"),
            Self::Rebooting => {
                f.write_str("Device is rebooting; remaining commands were not sent")
            }
            Self::UnknownCommand(name) => write!(f, "Unknown parameter {name}"),
            Self::MissingArgument(name) => write!(f, "missing parameter(s) for option : {name}"),
        }
    }
}

/// Summary of one `run`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Commands whose handler ran
    pub executed: usize,
    /// Commands that reported an error and let processing continue
    pub failed: usize,
    pub halt: Option<Halt>,
}

/// Runs command tokens against a registry of panels
pub struct Dispatcher {
    registry: DeviceRegistry,
    verbose: bool,
}

impl Dispatcher {
    pub fn new(registry: DeviceRegistry) -> Self {
        Self {
            registry,
            verbose: false,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// The selected session
    pub fn current(&self) -> Result<&PanelSession, PanelError> {
        self.registry.current()
    }

    /// Process `tokens` until they run out or a halt state is reached
    pub fn run(&mut self, tokens: &[String]) -> Outcome {
        let mut outcome = Outcome::default();
        let mut rest = tokens;

        while let Some((name, tail)) = rest.split_first() {
            let Some(spec) = find_command(name) else {
                outcome.halt = Some(Halt::UnknownCommand(name.clone()));
                break;
            };
            if tail.len() < spec.args {
                outcome.halt = Some(Halt::MissingArgument(name.clone()));
                break;
            }
            let (args, next) = tail.split_at(spec.args);
            rest = next;

            debug!("Dispatching {} {:?}", spec.name, args);
            outcome.executed += 1;
            match (spec.handler)(self, args) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt(halt)) => {
                    outcome.halt = Some(halt);
                    break;
                }
                Err(e) => {
                    if let Some(fatal) = e.fatal() {
                        outcome.halt = Some(Halt::from(fatal));
                        break;
                    }
                    outcome.failed += 1;
                    eprintln!("{}: {e}", spec.name);
                }
            }
        }

        if let Some(halt) = &outcome.halt {
            eprintln!("{halt}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_argument_counts() {
        let args = |name: &str| find_command(name).map(|spec| spec.args);
        assert_eq!(args("--help"), Some(0));
        assert_eq!(args("--device"), Some(1));
        assert_eq!(args("--touchdim"), Some(8));
        assert_eq!(args("--alarm"), Some(3));
        assert_eq!(args("--factorydefaults"), Some(0));
        assert_eq!(args("--bogus"), None);
        assert_eq!(args("backlight"), None);
    }

    #[test]
    fn test_empty_registry_halts_device_commands() {
        let mut dispatcher = Dispatcher::new(DeviceRegistry::new(Vec::new()));
        let tokens = ["--verbose", "--backlight", "3"].map(String::from);
        let outcome = dispatcher.run(&tokens);
        assert!(dispatcher.verbose());
        assert_eq!(outcome.executed, 2);
        assert_eq!(outcome.halt, Some(Halt::NoDevice));
    }

    #[test]
    fn test_halt_messages() {
        assert_eq!(
            Halt::MissingArgument("--device".into()).to_string(),
            "missing parameter(s) for option : --device"
        );
        assert_eq!(Halt::UnknownCommand("-x".into()).to_string(), "Unknown parameter -x");
    }
}
