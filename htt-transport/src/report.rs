//! Fixed-layout feature report structs
//!
//! Each struct is the exact wire image of one report, report ID byte included,
//! so `as_bytes()` is the encode path and `FeatureReport::decode` the decode
//! path. Sizes are checked against `ReportKind::wire_len` at compile time.
//!
//! Byte order follows the firmware: plain multi-byte fields are little-endian,
//! while rotation, dim-schedule timeouts and alarm duration are sent high byte
//! first.

use thiserror::Error;
use zerocopy::byteorder::{BigEndian, LittleEndian, I16, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::protocol::{ReportKind, CALIBRATION_MATRIX_LEN, DIM_STAGES};

// =============================================================================
// Core Trait
// =============================================================================

/// A feature report with a fixed wire image
pub trait FeatureReport: FromBytes + IntoBytes + Immutable + KnownLayout + Sized {
    /// Report kind (ID and wire length)
    const KIND: ReportKind;

    /// Complete report bytes, report ID first
    fn encode(&self) -> &[u8] {
        self.as_bytes()
    }

    /// Parse a report read back from the device
    ///
    /// The reply must carry at least the full wire length and start with this
    /// report's ID. Trailing bytes are ignored.
    fn decode(bytes: &[u8]) -> Result<Self, ParseError> {
        let expected = Self::KIND.wire_len();
        if bytes.len() < expected {
            return Err(ParseError::TooShort {
                kind: Self::KIND,
                expected,
                got: bytes.len(),
            });
        }
        if bytes[0] != Self::KIND.id() {
            return Err(ParseError::ReportIdMismatch {
                expected: Self::KIND.id(),
                got: bytes[0],
            });
        }
        Self::read_from_prefix(bytes)
            .map(|(report, _)| report)
            .map_err(|_| ParseError::TooShort {
                kind: Self::KIND,
                expected,
                got: bytes.len(),
            })
    }
}

/// Parse error for report replies
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{kind} reply too short: expected {expected} bytes, got {got}")]
    TooShort {
        kind: ReportKind,
        expected: usize,
        got: usize,
    },

    #[error("Report ID mismatch: expected 0x{expected:02X}, got 0x{got:02X}")]
    ReportIdMismatch { expected: u8, got: u8 },
}

/// Declares a report carrying a single byte after the report ID.
macro_rules! byte_report {
    ($(#[$meta:meta])* $name:ident, $kind:expr, $field:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
        #[repr(C)]
        pub struct $name {
            report_id: u8,
            pub $field: u8,
        }

        impl $name {
            pub fn new($field: u8) -> Self {
                Self {
                    report_id: $kind.id(),
                    $field,
                }
            }
        }

        impl FeatureReport for $name {
            const KIND: ReportKind = $kind;
        }

        const _: () = assert!(std::mem::size_of::<$name>() == $kind.wire_len());
    };
}

byte_report!(
    /// Driver type (0x04), read only
    DriverTypeReport,
    ReportKind::DriverType,
    code
);

byte_report!(
    /// Touch sensitivity level (0x07); writing it reboots the controller
    SensitivityReport,
    ReportKind::Sensitivity,
    level
);

byte_report!(
    /// Haptic motor on-duration in 100ms steps (0x0B)
    HapticReport,
    ReportKind::Haptic,
    duration
);

byte_report!(
    /// Piezo on-duration in 100ms steps (0x0C)
    PiezoReport,
    ReportKind::Piezo,
    duration
);

byte_report!(
    /// Touch feedback mode (0x0F)
    TouchFeedbackReport,
    ReportKind::TouchFeedback,
    mode
);

byte_report!(
    /// Capacitive recalibration trigger (0x11), payload always zero
    CapCalibrateReport,
    ReportKind::CapacitiveCalibrate,
    reserved
);

byte_report!(
    /// Factory reset trigger (0x13), payload always zero; reboots the controller
    FactoryResetReport,
    ReportKind::FactoryReset,
    reserved
);

// =============================================================================
// Calibration Matrix
// =============================================================================

/// Calibration matrix (0x06): 56 opaque bytes, resistive panels only
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct CalibrationMatrixReport {
    report_id: u8,
    pub matrix: [u8; CALIBRATION_MATRIX_LEN],
}

impl CalibrationMatrixReport {
    pub fn new(matrix: [u8; CALIBRATION_MATRIX_LEN]) -> Self {
        Self {
            report_id: ReportKind::CalibrationMatrix.id(),
            matrix,
        }
    }

    /// Matrix bytes carried by a possibly short reply
    ///
    /// Copies `min(reply_len - 1, 56)` bytes: a short reply yields a short
    /// slice, an oversized one is cut at 56. Never reads past the reply.
    pub fn payload_of(reply: &[u8]) -> &[u8] {
        let len = reply.len().saturating_sub(1).min(CALIBRATION_MATRIX_LEN);
        if len == 0 {
            return &[];
        }
        &reply[1..1 + len]
    }
}

impl FeatureReport for CalibrationMatrixReport {
    const KIND: ReportKind = ReportKind::CalibrationMatrix;
}

const _: () = assert!(
    std::mem::size_of::<CalibrationMatrixReport>() == ReportKind::CalibrationMatrix.wire_len()
);

// =============================================================================
// Rotation
// =============================================================================

/// Screen rotation (0x08): rotation index 0-3, high byte first
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct RotationReport {
    report_id: u8,
    index: U16<BigEndian>,
}

impl RotationReport {
    pub fn new(index: u16) -> Self {
        Self {
            report_id: ReportKind::ScreenRotation.id(),
            index: U16::new(index),
        }
    }

    pub fn index(&self) -> u16 {
        self.index.get()
    }
}

impl FeatureReport for RotationReport {
    const KIND: ReportKind = ReportKind::ScreenRotation;
}

const _: () =
    assert!(std::mem::size_of::<RotationReport>() == ReportKind::ScreenRotation.wire_len());

// =============================================================================
// Identification
// =============================================================================

/// Firmware revision (0x09), little-endian u32, read only
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct FirmwareRevisionReport {
    report_id: u8,
    revision: U32<LittleEndian>,
}

impl FirmwareRevisionReport {
    pub fn new(revision: u32) -> Self {
        Self {
            report_id: ReportKind::FirmwareRevision.id(),
            revision: U32::new(revision),
        }
    }

    pub fn revision(&self) -> u32 {
        self.revision.get()
    }
}

impl FeatureReport for FirmwareRevisionReport {
    const KIND: ReportKind = ReportKind::FirmwareRevision;
}

const _: () = assert!(
    std::mem::size_of::<FirmwareRevisionReport>() == ReportKind::FirmwareRevision.wire_len()
);

/// Module ID (0x0D), read only
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct ModuleIdReport {
    report_id: u8,
    pub module_id: u8,
    _reserved: u8,
}

impl ModuleIdReport {
    pub fn new(module_id: u8) -> Self {
        Self {
            report_id: ReportKind::ModuleId.id(),
            module_id,
            _reserved: 0,
        }
    }
}

impl FeatureReport for ModuleIdReport {
    const KIND: ReportKind = ReportKind::ModuleId;
}

const _: () = assert!(std::mem::size_of::<ModuleIdReport>() == ReportKind::ModuleId.wire_len());

/// Custom ID (0x0E), little-endian u16, read only
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct CustomIdReport {
    report_id: u8,
    custom_id: U16<LittleEndian>,
}

impl CustomIdReport {
    pub fn new(custom_id: u16) -> Self {
        Self {
            report_id: ReportKind::CustomId.id(),
            custom_id: U16::new(custom_id),
        }
    }

    pub fn custom_id(&self) -> u16 {
        self.custom_id.get()
    }
}

impl FeatureReport for CustomIdReport {
    const KIND: ReportKind = ReportKind::CustomId;
}

const _: () = assert!(std::mem::size_of::<CustomIdReport>() == ReportKind::CustomId.wire_len());

// =============================================================================
// Backlight
// =============================================================================

/// Backlight PWM level (0x0A), optionally persisted to flash
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct BacklightReport {
    report_id: u8,
    pub level: u8,
    persist: u8,
}

impl BacklightReport {
    pub fn new(level: u8, persist: bool) -> Self {
        Self {
            report_id: ReportKind::Backlight.id(),
            level,
            persist: u8::from(persist),
        }
    }

    pub fn persist(&self) -> bool {
        self.persist != 0
    }
}

impl FeatureReport for BacklightReport {
    const KIND: ReportKind = ReportKind::Backlight;
}

const _: () = assert!(std::mem::size_of::<BacklightReport>() == ReportKind::Backlight.wire_len());

/// Backlight fade time (0x12): little-endian milliseconds plus persist flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct BacklightFadeReport {
    report_id: u8,
    fade_ms: U16<LittleEndian>,
    persist: u8,
}

impl BacklightFadeReport {
    pub fn new(fade_ms: u16, persist: bool) -> Self {
        Self {
            report_id: ReportKind::BacklightFade.id(),
            fade_ms: U16::new(fade_ms),
            persist: u8::from(persist),
        }
    }

    pub fn fade_ms(&self) -> u16 {
        self.fade_ms.get()
    }

    pub fn persist(&self) -> bool {
        self.persist != 0
    }
}

impl FeatureReport for BacklightFadeReport {
    const KIND: ReportKind = ReportKind::BacklightFade;
}

const _: () =
    assert!(std::mem::size_of::<BacklightFadeReport>() == ReportKind::BacklightFade.wire_len());

// =============================================================================
// Touch Dim Schedule
// =============================================================================

/// Touch dim schedule (0x10), 13 bytes
///
/// Layout:
/// - Byte 0: report ID
/// - Bytes 1-4: brightness of stages 0-3
/// - Bytes 5-12: timeout of stages 0-3 in seconds, each high byte first
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct TouchDimReport {
    report_id: u8,
    brightness: [u8; DIM_STAGES],
    timeouts: [U16<BigEndian>; DIM_STAGES],
}

impl TouchDimReport {
    pub fn new(stages: [(u8, u16); DIM_STAGES]) -> Self {
        Self {
            report_id: ReportKind::TouchDim.id(),
            brightness: stages.map(|(brightness, _)| brightness),
            timeouts: stages.map(|(_, timeout)| U16::new(timeout)),
        }
    }

    /// (brightness, timeout seconds) per stage, in chain order
    pub fn stages(&self) -> [(u8, u16); DIM_STAGES] {
        std::array::from_fn(|i| (self.brightness[i], self.timeouts[i].get()))
    }
}

impl FeatureReport for TouchDimReport {
    const KIND: ReportKind = ReportKind::TouchDim;
}

const _: () = assert!(std::mem::size_of::<TouchDimReport>() == ReportKind::TouchDim.wire_len());

// =============================================================================
// Alarm
// =============================================================================

/// Alarm trigger (0x14): type, signed duration high byte first, blink rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct AlarmReport {
    report_id: u8,
    pub alarm_type: u8,
    duration: I16<BigEndian>,
    pub blink_rate: u8,
}

impl AlarmReport {
    pub fn new(alarm_type: u8, duration: i16, blink_rate: u8) -> Self {
        Self {
            report_id: ReportKind::Alarm.id(),
            alarm_type,
            duration: I16::new(duration),
            blink_rate,
        }
    }

    pub fn duration(&self) -> i16 {
        self.duration.get()
    }
}

impl FeatureReport for AlarmReport {
    const KIND: ReportKind = ReportKind::Alarm;
}

const _: () = assert!(std::mem::size_of::<AlarmReport>() == ReportKind::Alarm.wire_len());
