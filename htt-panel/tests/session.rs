//! Panel session behaviour against an emulated module.
//!
//! Each test seeds a `LoopbackDevice` with the read-only identification
//! reports of a given driver and firmware, then drives `PanelSession`.

use htt_panel::{
    AlarmDuration, AlarmSpec, DimSchedule, DimStage, DriverType, Feature, PanelError,
    PanelSession, Rotation, Sensitivity, TouchFeedback,
};
use htt_transport::{report_id, LoopbackDevice};
use proptest::prelude::*;

fn panel(driver: DriverType, firmware: u32) -> LoopbackDevice {
    let mut firmware_report = vec![report_id::FIRMWARE_REVISION];
    firmware_report.extend_from_slice(&firmware.to_le_bytes());
    LoopbackDevice::default()
        .with_report(vec![report_id::DRIVER_TYPE, driver.code()])
        .with_report(firmware_report)
        .with_report(vec![report_id::MODULE_ID, 7, 0])
        .with_report(vec![report_id::CUSTOM_ID, 0x34, 0x12])
}

#[test]
fn identification_reads() {
    let device = panel(DriverType::ILI25xx, 11800);
    let session = PanelSession::new(device.open());
    assert_eq!(session.get_driver_type().unwrap(), DriverType::ILI25xx);
    assert_eq!(session.get_firmware_revision().unwrap().raw(), 11800);
    assert_eq!(session.get_module_id().unwrap(), 7);
    assert_eq!(session.get_custom_id().unwrap(), 0x1234);

    let caps = session.capabilities(true).unwrap();
    assert!(caps.supports(Feature::ExtendedDiagnostics));
    assert!(caps.supports(Feature::BacklightFade));
    assert!(!caps.supports(Feature::Calibration));
}

#[test]
fn rotation_round_trip() {
    let device = panel(DriverType::GT9xx, 11000);
    let session = PanelSession::new(device.open());
    assert_eq!(session.set_rotation(270).unwrap(), Rotation::Deg270);
    assert_eq!(device.last_sent(), Some(vec![report_id::SCREEN_ROTATION, 0, 3]));
    assert_eq!(session.get_rotation().unwrap(), Rotation::Deg270);
}

#[test]
fn rotation_read_then_write_is_idempotent() {
    let seeded = vec![report_id::SCREEN_ROTATION, 0, 2];
    let device = panel(DriverType::GT9xx, 11000).with_report(seeded.clone());
    let session = PanelSession::new(device.open());
    let current = session.get_rotation().unwrap();
    assert_eq!(current, Rotation::Deg180);
    assert_eq!(session.set_rotation(current.degrees()).unwrap(), current);
    assert_eq!(device.sent(), vec![seeded]);
    assert_eq!(session.get_rotation().unwrap(), current);
}

#[test]
fn rotation_out_of_table_is_unexpected() {
    let device =
        panel(DriverType::GT9xx, 11000).with_report(vec![report_id::SCREEN_ROTATION, 0, 9]);
    let session = PanelSession::new(device.open());
    assert!(matches!(
        session.get_rotation(),
        Err(PanelError::UnexpectedResponse(_))
    ));
}

#[test]
fn sensitivity_rejected_on_ft5xx() {
    let device = panel(DriverType::FT5xx, 11000);
    let session = PanelSession::new(device.open());
    let err = session.set_sensitivity(Sensitivity::High).unwrap_err();
    assert!(matches!(
        err,
        PanelError::NotSupported {
            feature: Feature::Sensitivity,
            driver: DriverType::FT5xx
        }
    ));
    assert_eq!(err.to_string(), "Setting sensitivity is not supported on FT5xx driver");
    assert!(device.sent().is_empty());
    assert!(!session.is_rebooting());
}

#[test]
fn sensitivity_set_reboots() {
    let device = panel(DriverType::MXTxx, 11000);
    let session = PanelSession::new(device.open());
    session.set_sensitivity(Sensitivity::Extra).unwrap();
    assert_eq!(device.last_sent(), Some(vec![report_id::SENSITIVITY, 2]));
    assert!(session.is_rebooting());
    assert!(matches!(session.get_sensitivity(), Err(PanelError::Rebooting)));
}

#[test]
fn sensitivity_with_unreadable_driver_is_refused() {
    let device = LoopbackDevice::default();
    let session = PanelSession::new(device.open());
    assert!(matches!(
        session.set_sensitivity(Sensitivity::Normal),
        Err(PanelError::NotSupported {
            driver: DriverType::None,
            ..
        })
    ));
    assert!(device.sent().is_empty());
}

#[test]
fn calibration_requires_resistive() {
    let device = panel(DriverType::GT9xx, 11000);
    let session = PanelSession::new(device.open());
    assert!(matches!(
        session.get_calibration_matrix(),
        Err(PanelError::NotSupported { .. })
    ));
    assert!(matches!(
        session.set_calibration_matrix(&[0u8; 56]),
        Err(PanelError::NotSupported { .. })
    ));
    assert!(device.sent().is_empty());
}

#[test]
fn calibration_round_trip_on_resistive() {
    let device = panel(DriverType::Resistive, 11000);
    let session = PanelSession::new(device.open());
    let matrix: Vec<u8> = (0..56).collect();
    session.set_calibration_matrix(&matrix).unwrap();
    let read_back = session.get_calibration_matrix().unwrap();
    assert_eq!(read_back.as_bytes().as_slice(), matrix.as_slice());
}

#[test]
fn calibration_wrong_length_never_reaches_device() {
    let device = panel(DriverType::Resistive, 11000);
    let session = PanelSession::new(device.open());
    for len in [0usize, 55, 57] {
        assert!(matches!(
            session.set_calibration_matrix(&vec![1u8; len]),
            Err(PanelError::InvalidParameter(_))
        ));
    }
    assert_eq!(device.call_count(), 0);
}

#[test]
fn calibration_short_reply_is_flagged() {
    let device = panel(DriverType::Resistive, 11000)
        .with_report(vec![report_id::CALIBRATION_MATRIX, 1, 2, 3]);
    let session = PanelSession::new(device.open());
    assert!(matches!(
        session.get_calibration_matrix(),
        Err(PanelError::ShortCalibrationRead { got: 3 })
    ));
}

#[test]
fn fade_read_gated_by_firmware() {
    let device = panel(DriverType::GT9xx, 11762);
    let session = PanelSession::new(device.open());
    let fade = session.set_fade(20_000, true).unwrap();
    assert_eq!(fade.fade_ms, 10_000);
    assert_eq!(device.last_sent(), Some(vec![report_id::BACKLIGHT_FADE, 0x10, 0x27, 1]));
    assert!(matches!(
        session.get_fade(),
        Err(PanelError::FirmwareTooOld {
            required: 11762,
            actual: 11762,
            ..
        })
    ));

    let device = panel(DriverType::GT9xx, 11763);
    let session = PanelSession::new(device.open());
    session.set_fade(250, false).unwrap();
    let fade = session.get_fade().unwrap();
    assert_eq!(fade.fade_ms, 250);
    assert!(!fade.persist);
}

#[test]
fn gated_reads_reuse_capabilities() {
    let device = panel(DriverType::GT9xx, 12000)
        .with_report(vec![report_id::BACKLIGHT_FADE, 0xF4, 0x01, 1])
        .with_report(vec![16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    let session = PanelSession::new(device.open());
    let caps = session.capabilities(false).unwrap();

    assert_eq!(session.get_fade_with(&caps).unwrap().fade_ms, 500);
    assert!(session.get_dim_schedule_with(&caps).unwrap().is_disabled());
    assert_eq!(
        device.requested(),
        vec![
            report_id::DRIVER_TYPE,
            report_id::FIRMWARE_REVISION,
            report_id::BACKLIGHT_FADE,
            report_id::TOUCH_DIM,
        ]
    );

    let old = panel(DriverType::GT9xx, 11000);
    let session = PanelSession::new(old.open());
    let caps = session.capabilities(false).unwrap();
    assert!(matches!(
        session.get_dim_schedule_with(&caps),
        Err(PanelError::FirmwareTooOld { .. })
    ));
    assert!(!old.requested().contains(&report_id::TOUCH_DIM));
}

#[test]
fn dim_schedule_round_trip() {
    let device = panel(DriverType::GT9xx, 12000);
    let session = PanelSession::new(device.open());
    let schedule = DimSchedule::new([
        DimStage::new(200, 30),
        DimStage::new(100, 300),
        DimStage::new(10, 600),
        DimStage::new(0, 1),
    ]);
    session.set_dim_schedule(&schedule).unwrap();
    assert_eq!(
        device.last_sent(),
        Some(vec![16, 200, 100, 10, 0, 0, 30, 0x01, 0x2C, 0x02, 0x58, 0, 1])
    );
    assert_eq!(session.get_dim_schedule().unwrap(), schedule);
}

#[test]
fn buzzers_and_feedback_clamp() {
    let device = panel(DriverType::GT9xx, 11000);
    let session = PanelSession::new(device.open());
    assert_eq!(session.set_haptic(150).unwrap(), 100);
    assert_eq!(device.last_sent(), Some(vec![report_id::HAPTIC, 100]));
    assert_eq!(session.set_piezo(-3).unwrap(), 0);
    assert_eq!(device.last_sent(), Some(vec![report_id::PIEZO, 0]));
    assert_eq!(session.set_touch_feedback(9).unwrap(), TouchFeedback::MotorAndPiezo);
    assert_eq!(session.get_touch_feedback().unwrap(), TouchFeedback::MotorAndPiezo);
}

#[test]
fn alarm_encoding() {
    let device = panel(DriverType::GT9xx, 11000);
    let session = PanelSession::new(device.open());
    session
        .trigger_alarm(&AlarmSpec::clamped(3, AlarmDuration::NoTimeout, 4))
        .unwrap();
    assert_eq!(device.last_sent(), Some(vec![report_id::ALARM, 3, 0xFF, 0xFF, 4]));
    session.trigger_alarm(&AlarmSpec::cancel()).unwrap();
    assert_eq!(device.last_sent(), Some(vec![report_id::ALARM, 0, 0, 0, 0]));
}

#[test]
fn capacitive_calibration_trigger() {
    let device = panel(DriverType::FT5xx, 11000);
    let session = PanelSession::new(device.open());
    session.trigger_capacitive_calibration().unwrap();
    assert_eq!(device.last_sent(), Some(vec![report_id::CAP_CALIBRATE, 0]));
    assert!(!session.is_rebooting());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Whatever level is requested, the encoded byte is the clamped level.
    #[test]
    fn prop_backlight_always_in_range(level in any::<i64>(), persist in any::<bool>()) {
        let device = panel(DriverType::GT9xx, 11000);
        let session = PanelSession::new(device.open());
        let applied = session.set_backlight(level, persist).unwrap();
        prop_assert_eq!(i64::from(applied), level.clamp(0, 255));
        prop_assert_eq!(
            device.last_sent(),
            Some(vec![report_id::BACKLIGHT, applied, u8::from(persist)])
        );
    }

    /// Only the four right angles reach the device.
    #[test]
    fn prop_rotation_accepts_right_angles_only(degrees in any::<u16>()) {
        let device = panel(DriverType::GT9xx, 11000);
        let session = PanelSession::new(device.open());
        let result = session.set_rotation(degrees);
        if [0, 90, 180, 270].contains(&degrees) {
            prop_assert_eq!(result.unwrap().degrees(), degrees);
            prop_assert_eq!(device.sent().len(), 1);
        } else {
            prop_assert!(matches!(result, Err(PanelError::InvalidParameter(_))));
            prop_assert_eq!(device.call_count(), 0);
        }
    }
}
