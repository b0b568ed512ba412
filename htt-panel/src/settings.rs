//! Typed panel settings and their report conversions

use std::fmt;

use htt_transport::{
    AlarmReport, BacklightFadeReport, TouchDimReport, CALIBRATION_MATRIX_LEN, DIM_STAGES,
};

use crate::error::PanelError;

/// Clamp a wide integer into `[min, max]`
pub(crate) fn clamp_to<T>(value: i64, min: T, max: T) -> T
where
    T: Copy + Into<i64> + TryFrom<i64>,
{
    let clamped = value.clamp(min.into(), max.into());
    T::try_from(clamped).unwrap_or(max)
}

// =============================================================================
// Driver Type
// =============================================================================

/// Touch-sensing technology reported by the controller
///
/// Codes outside the known table decode to `Unrecognized` instead of being
/// used as a table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverType {
    None,
    Resistive,
    MXTxx,
    GT9xx,
    FT5xx,
    ILI25xx,
    Unrecognized(u8),
}

impl DriverType {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Resistive,
            2 => Self::MXTxx,
            3 => Self::GT9xx,
            4 => Self::FT5xx,
            5 => Self::ILI25xx,
            other => Self::Unrecognized(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Resistive => 1,
            Self::MXTxx => 2,
            Self::GT9xx => 3,
            Self::FT5xx => 4,
            Self::ILI25xx => 5,
            Self::Unrecognized(code) => code,
        }
    }

    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Resistive => "Resistive",
            Self::MXTxx => "MXTxx",
            Self::GT9xx => "GT9xx",
            Self::FT5xx => "FT5xx",
            Self::ILI25xx => "ILI25xx",
            Self::Unrecognized(_) => "unrecognized",
        }
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(code) => write!(f, "unrecognized driver (0x{code:02X})"),
            other => f.write_str(other.name()),
        }
    }
}

// =============================================================================
// Firmware Revision
// =============================================================================

/// Firmware revision, read from the device and never written
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FirmwareRevision(pub u32);

impl FirmwareRevision {
    /// Module ID and custom ID reports exist above this revision
    pub const EXTENDED_DIAGNOSTICS: FirmwareRevision = FirmwareRevision(10656);

    /// Backlight fade and touch-dim schedule reads exist above this revision
    pub const FADE_AND_DIM_SCHEDULE: FirmwareRevision = FirmwareRevision(11762);

    pub fn raw(self) -> u32 {
        self.0
    }

    /// Strictly newer than `threshold`
    pub fn exceeds(self, threshold: FirmwareRevision) -> bool {
        self.0 > threshold.0
    }
}

impl fmt::Display for FirmwareRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Rotation
// =============================================================================

/// Touch rotation; only the four right angles are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Exact match on 0/90/180/270; anything else is rejected, not rounded
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn index(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    pub fn degrees(self) -> u16 {
        self.index() * 90
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

// =============================================================================
// Sensitivity
// =============================================================================

/// Touch sensitivity level (MXTxx and GT9xx only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensitivity {
    Normal,
    High,
    Extra,
}

impl Sensitivity {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Normal),
            1 => Some(Self::High),
            2 => Some(Self::Extra),
            _ => None,
        }
    }

    /// Parse a level name (normal, high, extra)
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "high" => Some(Self::High),
            "extra" => Some(Self::Extra),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::High => 1,
            Self::Extra => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
            Self::Extra => "extra",
        }
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Touch Feedback
// =============================================================================

/// Actuator fired on touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchFeedback {
    None,
    Motor,
    Piezo,
    MotorAndPiezo,
    Unrecognized(u8),
}

impl TouchFeedback {
    pub const MAX_SETTING: u8 = 3;

    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Motor,
            2 => Self::Piezo,
            3 => Self::MotorAndPiezo,
            other => Self::Unrecognized(other),
        }
    }

    /// Clamp a requested setting into 0-3
    pub fn clamped(setting: i64) -> Self {
        Self::from_code(clamp_to(setting, 0u8, Self::MAX_SETTING))
    }

    pub fn code(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Motor => 1,
            Self::Piezo => 2,
            Self::MotorAndPiezo => 3,
            Self::Unrecognized(code) => code,
        }
    }
}

impl fmt::Display for TouchFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Motor => f.write_str("motor"),
            Self::Piezo => f.write_str("piezo"),
            Self::MotorAndPiezo => f.write_str("motor and piezo"),
            Self::Unrecognized(code) => write!(f, "unrecognized (0x{code:02X})"),
        }
    }
}

// =============================================================================
// Numeric Bounds
// =============================================================================

/// Maximum haptic / piezo on-duration in 100ms steps
pub const MAX_BUZZ_DURATION: u8 = 100;

/// Maximum backlight fade time in milliseconds
pub const MAX_FADE_MS: u16 = 10_000;

/// Backlight fade settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklightFade {
    pub fade_ms: u16,
    pub persist: bool,
}

impl BacklightFade {
    /// Clamp a requested fade time into 0-10000 ms
    pub fn clamped(fade_ms: i64, persist: bool) -> Self {
        Self {
            fade_ms: clamp_to(fade_ms, 0u16, MAX_FADE_MS),
            persist,
        }
    }

    pub fn to_report(self) -> BacklightFadeReport {
        BacklightFadeReport::new(self.fade_ms, self.persist)
    }

    pub fn from_report(report: &BacklightFadeReport) -> Self {
        Self {
            fade_ms: report.fade_ms(),
            persist: report.persist(),
        }
    }
}

// =============================================================================
// Dim Schedule
// =============================================================================

/// One dimming stage: dim to `brightness` after `timeout_secs`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimStage {
    pub brightness: u8,
    pub timeout_secs: u16,
}

impl DimStage {
    pub fn new(brightness: u8, timeout_secs: u16) -> Self {
        Self {
            brightness,
            timeout_secs,
        }
    }

    /// Clamp requested values into brightness 0-255 and timeout 0-65535s
    pub fn clamped(brightness: i64, timeout_secs: i64) -> Self {
        Self {
            brightness: clamp_to(brightness, 0u8, u8::MAX),
            timeout_secs: clamp_to(timeout_secs, 0u16, u16::MAX),
        }
    }
}

/// Four chained dimming stages triggered by touch inactivity
///
/// Stage i's timeout starts counting when stage i-1's elapses. A zero
/// timeout in the first stage disables the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimSchedule {
    pub stages: [DimStage; DIM_STAGES],
}

impl DimSchedule {
    pub fn new(stages: [DimStage; DIM_STAGES]) -> Self {
        Self { stages }
    }

    /// Schedule that turns touch dimming off
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_disabled(&self) -> bool {
        self.stages[0].timeout_secs == 0
    }

    /// Seconds of inactivity before each stage is reached
    pub fn activation_times(&self) -> [u32; DIM_STAGES] {
        let mut elapsed = 0u32;
        self.stages.map(|stage| {
            elapsed += u32::from(stage.timeout_secs);
            elapsed
        })
    }

    pub fn to_report(&self) -> TouchDimReport {
        TouchDimReport::new(
            self.stages
                .map(|stage| (stage.brightness, stage.timeout_secs)),
        )
    }

    pub fn from_report(report: &TouchDimReport) -> Self {
        Self {
            stages: report
                .stages()
                .map(|(brightness, timeout_secs)| DimStage::new(brightness, timeout_secs)),
        }
    }
}

// =============================================================================
// Alarm
// =============================================================================

/// Alarm duration; -1 on the wire means run until cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmDuration {
    NoTimeout,
    Seconds(u16),
}

impl AlarmDuration {
    pub const MAX_SECONDS: u16 = i16::MAX as u16;

    /// Clamp requested seconds into 0-32767
    pub fn clamped(seconds: i64) -> Self {
        Self::Seconds(clamp_to(seconds, 0u16, Self::MAX_SECONDS))
    }

    pub fn to_wire(self) -> i16 {
        match self {
            Self::NoTimeout => -1,
            Self::Seconds(secs) => i16::try_from(secs).unwrap_or(i16::MAX),
        }
    }

    pub fn from_wire(raw: i16) -> Self {
        if raw < 0 {
            Self::NoTimeout
        } else {
            Self::Seconds(raw.unsigned_abs())
        }
    }
}

/// Alarm request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmSpec {
    /// Alarm pattern 1-17; 0 cancels a running alarm
    pub alarm_type: u8,
    pub duration: AlarmDuration,
    /// Backlight blink rate 0-10
    pub blink_rate: u8,
}

impl AlarmSpec {
    pub const MAX_TYPE: u8 = 17;
    pub const MAX_BLINK_RATE: u8 = 10;

    /// Clamp type and blink rate into range
    pub fn clamped(alarm_type: i64, duration: AlarmDuration, blink_rate: i64) -> Self {
        Self {
            alarm_type: clamp_to(alarm_type, 0u8, Self::MAX_TYPE),
            duration,
            blink_rate: clamp_to(blink_rate, 0u8, Self::MAX_BLINK_RATE),
        }
    }

    /// Request that stops a running alarm
    pub fn cancel() -> Self {
        Self {
            alarm_type: 0,
            duration: AlarmDuration::Seconds(0),
            blink_rate: 0,
        }
    }

    pub fn is_cancel(&self) -> bool {
        self.alarm_type == 0
    }

    pub fn to_report(&self) -> AlarmReport {
        AlarmReport::new(self.alarm_type, self.duration.to_wire(), self.blink_rate)
    }
}

// =============================================================================
// Calibration Matrix
// =============================================================================

/// Opaque 56-byte resistive calibration transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationMatrix([u8; CALIBRATION_MATRIX_LEN]);

impl CalibrationMatrix {
    pub fn new(bytes: [u8; CALIBRATION_MATRIX_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CALIBRATION_MATRIX_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for CalibrationMatrix {
    type Error = PanelError;

    /// Any length other than 56 is rejected, never truncated or padded
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let fixed: [u8; CALIBRATION_MATRIX_LEN] = bytes.try_into().map_err(|_| {
            PanelError::InvalidParameter(format!(
                "calibration matrix must be {CALIBRATION_MATRIX_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(fixed))
    }
}
