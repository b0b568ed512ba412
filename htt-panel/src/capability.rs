//! Capability model: which features a panel may use
//!
//! Legality depends on the driver type, the firmware revision and, for
//! extended diagnostics, the caller's verbosity. An unrecognized driver code
//! is unsupported for every feature.

use std::fmt;

use crate::error::PanelError;
use crate::settings::{DriverType, FirmwareRevision};

/// Gated panel features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Sensitivity level (MXTxx, GT9xx)
    Sensitivity,
    /// Calibration matrix save/load (Resistive)
    Calibration,
    /// Module ID and custom ID reads
    ExtendedDiagnostics,
    /// Backlight fade read
    BacklightFade,
    /// Touch-dim schedule read
    DimSchedule,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sensitivity => "Setting sensitivity",
            Self::Calibration => "Calibration matrix",
            Self::ExtendedDiagnostics => "Extended diagnostics",
            Self::BacklightFade => "Backlight fade",
            Self::DimSchedule => "Touch dim schedule",
        })
    }
}

/// Check whether `feature` is legal for a panel
pub fn is_supported(
    feature: Feature,
    driver: DriverType,
    firmware: FirmwareRevision,
    verbose: bool,
) -> bool {
    Capabilities {
        driver,
        firmware,
        verbose,
    }
    .supports(feature)
}

/// Snapshot of what decides feature legality for one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub driver: DriverType,
    pub firmware: FirmwareRevision,
    pub verbose: bool,
}

impl Capabilities {
    pub fn supports(&self, feature: Feature) -> bool {
        self.require(feature).is_ok()
    }

    /// Like `supports`, but says why a feature is refused
    pub fn require(&self, feature: Feature) -> Result<(), PanelError> {
        let not_supported = || PanelError::NotSupported {
            feature,
            driver: self.driver,
        };
        if !self.driver.is_recognized() {
            return Err(not_supported());
        }
        match feature {
            Feature::Sensitivity => {
                if matches!(self.driver, DriverType::MXTxx | DriverType::GT9xx) {
                    Ok(())
                } else {
                    Err(not_supported())
                }
            }
            Feature::Calibration => {
                if self.driver == DriverType::Resistive {
                    Ok(())
                } else {
                    Err(not_supported())
                }
            }
            Feature::ExtendedDiagnostics => {
                if !self.verbose {
                    return Err(not_supported());
                }
                self.require_firmware(feature, FirmwareRevision::EXTENDED_DIAGNOSTICS)
            }
            Feature::BacklightFade | Feature::DimSchedule => {
                self.require_firmware(feature, FirmwareRevision::FADE_AND_DIM_SCHEDULE)
            }
        }
    }

    fn require_firmware(
        &self,
        feature: Feature,
        threshold: FirmwareRevision,
    ) -> Result<(), PanelError> {
        if self.firmware.exceeds(threshold) {
            Ok(())
        } else {
            Err(PanelError::FirmwareTooOld {
                feature,
                required: threshold.raw(),
                actual: self.firmware.raw(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD: FirmwareRevision = FirmwareRevision(10000);
    const MID: FirmwareRevision = FirmwareRevision(11000);
    const NEW: FirmwareRevision = FirmwareRevision(12000);

    const KNOWN_DRIVERS: [DriverType; 6] = [
        DriverType::None,
        DriverType::Resistive,
        DriverType::MXTxx,
        DriverType::GT9xx,
        DriverType::FT5xx,
        DriverType::ILI25xx,
    ];

    #[test]
    fn test_sensitivity_only_mxt_and_gt9() {
        for driver in KNOWN_DRIVERS {
            let expected = matches!(driver, DriverType::MXTxx | DriverType::GT9xx);
            assert_eq!(
                is_supported(Feature::Sensitivity, driver, NEW, true),
                expected,
                "{driver}"
            );
        }
    }

    #[test]
    fn test_calibration_only_resistive() {
        for driver in KNOWN_DRIVERS {
            assert_eq!(
                is_supported(Feature::Calibration, driver, OLD, false),
                driver == DriverType::Resistive
            );
        }
    }

    #[test]
    fn test_extended_diagnostics_needs_verbose_and_firmware() {
        let driver = DriverType::GT9xx;
        assert!(!is_supported(Feature::ExtendedDiagnostics, driver, MID, false));
        assert!(is_supported(Feature::ExtendedDiagnostics, driver, MID, true));
        assert!(!is_supported(Feature::ExtendedDiagnostics, driver, OLD, true));
        assert!(!is_supported(
            Feature::ExtendedDiagnostics,
            driver,
            FirmwareRevision(10656),
            true
        ));
    }

    #[test]
    fn test_fade_and_dim_need_newer_firmware() {
        for feature in [Feature::BacklightFade, Feature::DimSchedule] {
            assert!(!is_supported(feature, DriverType::FT5xx, MID, false));
            assert!(!is_supported(feature, DriverType::FT5xx, FirmwareRevision(11762), false));
            assert!(is_supported(feature, DriverType::FT5xx, FirmwareRevision(11763), false));
        }
    }

    #[test]
    fn test_unrecognized_driver_supports_nothing() {
        let driver = DriverType::Unrecognized(0x99);
        for feature in [
            Feature::Sensitivity,
            Feature::Calibration,
            Feature::ExtendedDiagnostics,
            Feature::BacklightFade,
            Feature::DimSchedule,
        ] {
            assert!(!is_supported(feature, driver, NEW, true), "{feature}");
        }
    }

    #[test]
    fn test_rejection_reason() {
        let caps = Capabilities {
            driver: DriverType::FT5xx,
            firmware: MID,
            verbose: false,
        };
        let err = caps.require(Feature::Sensitivity).unwrap_err();
        assert_eq!(err.to_string(), "Setting sensitivity is not supported on FT5xx driver");
        assert!(matches!(
            caps.require(Feature::DimSchedule),
            Err(PanelError::FirmwareTooOld { required: 11762, .. })
        ));
    }
}
