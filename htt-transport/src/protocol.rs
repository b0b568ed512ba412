//! Protocol constants for HTT touch panel feature reports

use std::fmt;

/// Feature report IDs
pub mod report {
    pub const DRIVER_TYPE: u8 = 4;
    pub const CALIBRATION_MATRIX: u8 = 6;
    pub const SENSITIVITY: u8 = 7;
    pub const SCREEN_ROTATION: u8 = 8;
    pub const FIRMWARE_REVISION: u8 = 9;
    pub const BACKLIGHT: u8 = 10;
    pub const HAPTIC: u8 = 11;
    pub const PIEZO: u8 = 12;
    pub const MODULE_ID: u8 = 13;
    pub const CUSTOM_ID: u8 = 14;
    pub const TOUCH_FEEDBACK: u8 = 15;
    pub const TOUCH_DIM: u8 = 16;
    pub const CAP_CALIBRATE: u8 = 17;
    pub const BACKLIGHT_FADE: u8 = 18;
    pub const FACTORY_RESET: u8 = 19;
    pub const ALARM: u8 = 20;

    /// Get human-readable name for a report ID
    pub fn name(id: u8) -> &'static str {
        match id {
            DRIVER_TYPE => "DRIVER_TYPE",
            CALIBRATION_MATRIX => "CALIBRATION_MATRIX",
            SENSITIVITY => "SENSITIVITY",
            SCREEN_ROTATION => "SCREEN_ROTATION",
            FIRMWARE_REVISION => "FIRMWARE_REVISION",
            BACKLIGHT => "BACKLIGHT",
            HAPTIC => "HAPTIC",
            PIEZO => "PIEZO",
            MODULE_ID => "MODULE_ID",
            CUSTOM_ID => "CUSTOM_ID",
            TOUCH_FEEDBACK => "TOUCH_FEEDBACK",
            TOUCH_DIM => "TOUCH_DIM",
            CAP_CALIBRATE => "CAP_CALIBRATE",
            BACKLIGHT_FADE => "BACKLIGHT_FADE",
            FACTORY_RESET => "FACTORY_RESET",
            ALARM => "ALARM",
            _ => "UNKNOWN",
        }
    }
}

/// Size of the opaque calibration matrix payload
pub const CALIBRATION_MATRIX_LEN: usize = 56;

/// Number of stages in a touch-dim schedule
pub const DIM_STAGES: usize = 4;

/// One variant per physical feature report
///
/// Each kind has a fixed wire length (report ID byte + payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    DriverType,
    CalibrationMatrix,
    Sensitivity,
    ScreenRotation,
    FirmwareRevision,
    Backlight,
    Haptic,
    Piezo,
    ModuleId,
    CustomId,
    TouchFeedback,
    TouchDim,
    CapacitiveCalibrate,
    BacklightFade,
    FactoryReset,
    Alarm,
}

impl ReportKind {
    /// All report kinds in report ID order
    pub const ALL: [ReportKind; 16] = [
        Self::DriverType,
        Self::CalibrationMatrix,
        Self::Sensitivity,
        Self::ScreenRotation,
        Self::FirmwareRevision,
        Self::Backlight,
        Self::Haptic,
        Self::Piezo,
        Self::ModuleId,
        Self::CustomId,
        Self::TouchFeedback,
        Self::TouchDim,
        Self::CapacitiveCalibrate,
        Self::BacklightFade,
        Self::FactoryReset,
        Self::Alarm,
    ];

    /// Report ID byte
    pub const fn id(self) -> u8 {
        match self {
            Self::DriverType => report::DRIVER_TYPE,
            Self::CalibrationMatrix => report::CALIBRATION_MATRIX,
            Self::Sensitivity => report::SENSITIVITY,
            Self::ScreenRotation => report::SCREEN_ROTATION,
            Self::FirmwareRevision => report::FIRMWARE_REVISION,
            Self::Backlight => report::BACKLIGHT,
            Self::Haptic => report::HAPTIC,
            Self::Piezo => report::PIEZO,
            Self::ModuleId => report::MODULE_ID,
            Self::CustomId => report::CUSTOM_ID,
            Self::TouchFeedback => report::TOUCH_FEEDBACK,
            Self::TouchDim => report::TOUCH_DIM,
            Self::CapacitiveCalibrate => report::CAP_CALIBRATE,
            Self::BacklightFade => report::BACKLIGHT_FADE,
            Self::FactoryReset => report::FACTORY_RESET,
            Self::Alarm => report::ALARM,
        }
    }

    /// Full wire length including the report ID byte
    pub const fn wire_len(self) -> usize {
        match self {
            Self::DriverType => 2,
            Self::CalibrationMatrix => 1 + CALIBRATION_MATRIX_LEN,
            Self::Sensitivity => 2,
            Self::ScreenRotation => 3,
            Self::FirmwareRevision => 5,
            Self::Backlight => 3,
            Self::Haptic => 2,
            Self::Piezo => 2,
            Self::ModuleId => 3,
            Self::CustomId => 3,
            Self::TouchFeedback => 2,
            Self::TouchDim => 1 + DIM_STAGES * 3,
            Self::CapacitiveCalibrate => 2,
            Self::BacklightFade => 4,
            Self::FactoryReset => 2,
            Self::Alarm => 5,
        }
    }

    /// Look up a kind by report ID
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        report::name(self.id())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_ids_unique() {
        for (i, a) in ReportKind::ALL.iter().enumerate() {
            for b in &ReportKind::ALL[i + 1..] {
                assert_ne!(a.id(), b.id(), "{a} and {b} share an ID");
            }
        }
    }

    #[test]
    fn test_from_id_roundtrip() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(ReportKind::from_id(5), None);
        assert_eq!(ReportKind::from_id(0xFF), None);
    }

    #[test]
    fn test_fixed_lengths() {
        assert_eq!(ReportKind::CalibrationMatrix.wire_len(), 57);
        assert_eq!(ReportKind::TouchDim.wire_len(), 13);
        assert_eq!(ReportKind::Alarm.wire_len(), 5);
        assert_eq!(ReportKind::FirmwareRevision.wire_len(), 5);
    }

    #[test]
    fn test_names() {
        assert_eq!(report::name(report::TOUCH_DIM), "TOUCH_DIM");
        assert_eq!(report::name(0xEE), "UNKNOWN");
        assert_eq!(ReportKind::Alarm.to_string(), "ALARM (0x14)");
    }
}
