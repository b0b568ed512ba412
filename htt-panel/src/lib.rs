//! High-level panel interface for HTT touch panel controllers
//!
//! This crate turns the raw feature reports of `htt-transport` into typed
//! operations on one panel (`PanelSession`), decides which operations a
//! panel supports (`capability`), and tracks all attached panels plus the
//! current selection (`DeviceRegistry`).

pub mod capability;
pub mod error;
pub mod registry;
pub mod settings;

pub use capability::{is_supported, Capabilities, Feature};
pub use error::PanelError;
pub use registry::DeviceRegistry;
pub use settings::{
    AlarmDuration, AlarmSpec, BacklightFade, CalibrationMatrix, DimSchedule, DimStage,
    DriverType, FirmwareRevision, Rotation, Sensitivity, TouchFeedback, MAX_BUZZ_DURATION,
    MAX_FADE_MS,
};

use std::cell::Cell;

use htt_transport::{
    BacklightFadeReport, BacklightReport, CalibrationMatrixReport, CapCalibrateReport,
    CustomIdReport, DriverTypeReport, FactoryResetReport, FeatureReport, FirmwareRevisionReport,
    HapticReport, ModuleIdReport, PiezoReport, RotationReport, SensitivityReport, TouchDimReport,
    TouchFeedbackReport, Transport, TransportDeviceInfo, TransportExt, CALIBRATION_MATRIX_LEN,
};
use tracing::{debug, info, warn};

use settings::clamp_to;

/// One attached panel and its open transport handle
///
/// A session whose device could not be opened has no handle; every operation
/// on it fails with `PanelError::NoDevice`. After a reboot-inducing command
/// succeeds (sensitivity, factory reset) every operation fails with
/// `PanelError::Rebooting`. The handle is released when the session drops.
pub struct PanelSession {
    transport: Option<Box<dyn Transport>>,
    info: TransportDeviceInfo,
    rebooting: Cell<bool>,
}

impl PanelSession {
    /// Wrap an opened transport
    pub fn new(transport: Box<dyn Transport>) -> Self {
        let info = transport.device_info().clone();
        Self {
            transport: Some(transport),
            info,
            rebooting: Cell::new(false),
        }
    }

    /// Session for an enumerated device that could not be opened
    pub fn detached(info: TransportDeviceInfo) -> Self {
        Self {
            transport: None,
            info,
            rebooting: Cell::new(false),
        }
    }

    /// Get device information
    pub fn info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    /// Check if the session holds an open handle
    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Check if a reboot-inducing command has been sent
    pub fn is_rebooting(&self) -> bool {
        self.rebooting.get()
    }

    fn transport(&self) -> Result<&dyn Transport, PanelError> {
        if self.rebooting.get() {
            return Err(PanelError::Rebooting);
        }
        self.transport.as_deref().ok_or(PanelError::NoDevice)
    }

    fn query<R: FeatureReport>(&self) -> Result<R, PanelError> {
        let reply = self.transport()?.request(R::KIND)?;
        Ok(R::decode(&reply)?)
    }

    fn send<R: FeatureReport>(&self, report: &R) -> Result<(), PanelError> {
        let transport = self.transport()?;
        debug!("Sending {} to {}", R::KIND, self.info.device_path);
        transport.send_report(report)?;
        Ok(())
    }

    fn mark_rebooting(&self) {
        info!("{} is rebooting", self.info.device_path);
        self.rebooting.set(true);
    }

    // === Identification ===

    /// Get the driver type
    pub fn get_driver_type(&self) -> Result<DriverType, PanelError> {
        let report: DriverTypeReport = self.query()?;
        Ok(DriverType::from_code(report.code))
    }

    /// Driver type, with a failed read reported as `DriverType::None`
    ///
    /// Only a missing or rebooting device is an error.
    pub fn driver_type_or_none(&self) -> Result<DriverType, PanelError> {
        match self.get_driver_type() {
            Ok(driver) => Ok(driver),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Driver type read failed, treating as None: {e}");
                Ok(DriverType::None)
            }
        }
    }

    /// Get the firmware revision
    pub fn get_firmware_revision(&self) -> Result<FirmwareRevision, PanelError> {
        let report: FirmwareRevisionReport = self.query()?;
        Ok(FirmwareRevision(report.revision()))
    }

    /// Firmware revision, with a failed read reported as revision 0
    pub fn firmware_revision_or_zero(&self) -> Result<FirmwareRevision, PanelError> {
        match self.get_firmware_revision() {
            Ok(rev) => Ok(rev),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Firmware revision read failed, treating as 0: {e}");
                Ok(FirmwareRevision::default())
            }
        }
    }

    /// Read what decides feature legality for this panel
    pub fn capabilities(&self, verbose: bool) -> Result<Capabilities, PanelError> {
        Ok(Capabilities {
            driver: self.driver_type_or_none()?,
            firmware: self.firmware_revision_or_zero()?,
            verbose,
        })
    }

    /// Get the module ID
    pub fn get_module_id(&self) -> Result<u8, PanelError> {
        let report: ModuleIdReport = self.query()?;
        Ok(report.module_id)
    }

    /// Get the custom ID
    pub fn get_custom_id(&self) -> Result<u16, PanelError> {
        let report: CustomIdReport = self.query()?;
        Ok(report.custom_id())
    }

    // === Rotation ===

    /// Get current touch rotation
    pub fn get_rotation(&self) -> Result<Rotation, PanelError> {
        let report: RotationReport = self.query()?;
        Rotation::from_index(report.index()).ok_or_else(|| {
            PanelError::UnexpectedResponse(format!("rotation index {}", report.index()))
        })
    }

    /// Set touch rotation in degrees
    ///
    /// Only 0, 90, 180 and 270 are accepted; anything else is rejected
    /// before the device is contacted.
    pub fn set_rotation(&self, degrees: u16) -> Result<Rotation, PanelError> {
        self.transport()?;
        let rotation = Rotation::from_degrees(degrees).ok_or_else(|| {
            PanelError::InvalidParameter(format!(
                "rotation must be 0, 90, 180 or 270 degrees, got {degrees}"
            ))
        })?;
        self.send(&RotationReport::new(rotation.index()))?;
        Ok(rotation)
    }

    // === Calibration Matrix ===

    /// Read the resistive calibration matrix
    ///
    /// The device reply is copied up to 56 bytes; a shorter reply is
    /// reported as `ShortCalibrationRead` rather than returned as valid.
    pub fn get_calibration_matrix(&self) -> Result<CalibrationMatrix, PanelError> {
        self.transport()?;
        self.capabilities(false)?
            .require(Feature::Calibration)?;
        let reply = self.transport()?.request(CalibrationMatrixReport::KIND)?;
        let payload = CalibrationMatrixReport::payload_of(&reply);
        if payload.len() != CALIBRATION_MATRIX_LEN {
            return Err(PanelError::ShortCalibrationRead { got: payload.len() });
        }
        CalibrationMatrix::try_from(payload)
    }

    /// Write the resistive calibration matrix
    ///
    /// Input must be exactly 56 bytes; any other length is rejected before
    /// the device is contacted.
    pub fn set_calibration_matrix(&self, bytes: &[u8]) -> Result<(), PanelError> {
        self.transport()?;
        let matrix = CalibrationMatrix::try_from(bytes)?;
        self.capabilities(false)?
            .require(Feature::Calibration)?;
        self.send(&CalibrationMatrixReport::new(*matrix.as_bytes()))
    }

    // === Sensitivity ===

    /// Get the sensitivity level
    pub fn get_sensitivity(&self) -> Result<Sensitivity, PanelError> {
        let report: SensitivityReport = self.query()?;
        Sensitivity::from_level(report.level).ok_or_else(|| {
            PanelError::UnexpectedResponse(format!("sensitivity level {}", report.level))
        })
    }

    /// Set the sensitivity level (MXTxx and GT9xx only)
    ///
    /// On success the controller reboots to apply the setting; the session
    /// accepts no further operations.
    pub fn set_sensitivity(&self, sensitivity: Sensitivity) -> Result<(), PanelError> {
        self.transport()?;
        self.capabilities(false)?
            .require(Feature::Sensitivity)?;
        self.send(&SensitivityReport::new(sensitivity.level()))?;
        self.mark_rebooting();
        Ok(())
    }

    // === Backlight ===

    /// Get backlight PWM level
    pub fn get_backlight(&self) -> Result<u8, PanelError> {
        let report: BacklightReport = self.query()?;
        Ok(report.level)
    }

    /// Set backlight PWM level, clamped to 0-255
    ///
    /// # Returns
    /// The level actually sent
    pub fn set_backlight(&self, level: i64, persist: bool) -> Result<u8, PanelError> {
        let level = clamp_to(level, 0u8, u8::MAX);
        self.send(&BacklightReport::new(level, persist))?;
        Ok(level)
    }

    /// Get backlight fade settings (firmware above 11762)
    pub fn get_fade(&self) -> Result<BacklightFade, PanelError> {
        self.get_fade_with(&self.capabilities(false)?)
    }

    /// Get backlight fade settings, gated on capabilities already read
    pub fn get_fade_with(&self, caps: &Capabilities) -> Result<BacklightFade, PanelError> {
        caps.require(Feature::BacklightFade)?;
        let report: BacklightFadeReport = self.query()?;
        Ok(BacklightFade::from_report(&report))
    }

    /// Set backlight fade time, clamped to 0-10000 ms
    pub fn set_fade(&self, fade_ms: i64, persist: bool) -> Result<BacklightFade, PanelError> {
        let fade = BacklightFade::clamped(fade_ms, persist);
        self.send(&fade.to_report())?;
        Ok(fade)
    }

    // === Feedback ===

    /// Set haptic motor duration in 100ms steps, clamped to 0-100
    pub fn set_haptic(&self, duration: i64) -> Result<u8, PanelError> {
        let duration = clamp_to(duration, 0u8, MAX_BUZZ_DURATION);
        self.send(&HapticReport::new(duration))?;
        Ok(duration)
    }

    /// Set piezo duration in 100ms steps, clamped to 0-100
    pub fn set_piezo(&self, duration: i64) -> Result<u8, PanelError> {
        let duration = clamp_to(duration, 0u8, MAX_BUZZ_DURATION);
        self.send(&PiezoReport::new(duration))?;
        Ok(duration)
    }

    /// Get touch feedback mode
    pub fn get_touch_feedback(&self) -> Result<TouchFeedback, PanelError> {
        let report: TouchFeedbackReport = self.query()?;
        Ok(TouchFeedback::from_code(report.mode))
    }

    /// Set touch feedback mode, clamped to 0-3
    pub fn set_touch_feedback(&self, setting: i64) -> Result<TouchFeedback, PanelError> {
        let mode = TouchFeedback::clamped(setting);
        self.send(&TouchFeedbackReport::new(mode.code()))?;
        Ok(mode)
    }

    // === Touch Dim ===

    /// Write the 4-stage touch dim schedule
    pub fn set_dim_schedule(&self, schedule: &DimSchedule) -> Result<(), PanelError> {
        self.send(&schedule.to_report())
    }

    /// Read the touch dim schedule (firmware above 11762)
    pub fn get_dim_schedule(&self) -> Result<DimSchedule, PanelError> {
        self.get_dim_schedule_with(&self.capabilities(false)?)
    }

    pub fn get_dim_schedule_with(&self, caps: &Capabilities) -> Result<DimSchedule, PanelError> {
        caps.require(Feature::DimSchedule)?;
        let report: TouchDimReport = self.query()?;
        Ok(DimSchedule::from_report(&report))
    }

    // === Maintenance ===

    /// Start capacitive recalibration
    pub fn trigger_capacitive_calibration(&self) -> Result<(), PanelError> {
        self.send(&CapCalibrateReport::new(0))
    }

    /// Restore factory defaults
    ///
    /// On success the controller reboots; the session accepts no further
    /// operations.
    pub fn factory_reset(&self) -> Result<(), PanelError> {
        self.send(&FactoryResetReport::new(0))?;
        self.mark_rebooting();
        Ok(())
    }

    /// Start or cancel an alarm
    pub fn trigger_alarm(&self, alarm: &AlarmSpec) -> Result<(), PanelError> {
        self.send(&alarm.to_report())
    }
}

impl Drop for PanelSession {
    fn drop(&mut self) {
        if self.transport.is_some() {
            debug!("Closing session for {}", self.info.device_path);
        }
    }
}
