//! Property-based tests for the fixed-layout report codec.
//!
//! Covers round-trip fidelity of the dim schedule and calibration matrix,
//! the split high/low packing of timeouts, and reply-length handling.

use htt_transport::{
    AlarmReport, CalibrationMatrixReport, FeatureReport, ReportKind, RotationReport,
    TouchDimReport, CALIBRATION_MATRIX_LEN,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any 4-stage schedule survives encode then decode unchanged.
    #[test]
    fn prop_touch_dim_round_trip(stages in prop::array::uniform4((any::<u8>(), any::<u16>()))) {
        let report = TouchDimReport::new(stages);
        let bytes = report.encode();
        prop_assert_eq!(bytes.len(), ReportKind::TouchDim.wire_len());
        prop_assert_eq!(TouchDimReport::decode(bytes).unwrap().stages(), stages);
    }

    /// Brightness bytes are flat; timeouts are high byte first.
    #[test]
    fn prop_touch_dim_byte_placement(stages in prop::array::uniform4((any::<u8>(), any::<u16>()))) {
        let report = TouchDimReport::new(stages);
        let bytes = report.encode();
        prop_assert_eq!(bytes[0], 16);
        for (i, (brightness, timeout)) in stages.iter().enumerate() {
            prop_assert_eq!(bytes[1 + i], *brightness);
            prop_assert_eq!(bytes[5 + 2 * i], (timeout >> 8) as u8);
            prop_assert_eq!(bytes[6 + 2 * i], (timeout & 0xFF) as u8);
        }
    }

    /// Any 56-byte matrix survives encode then decode unchanged.
    #[test]
    fn prop_calibration_round_trip(matrix in prop::collection::vec(any::<u8>(), CALIBRATION_MATRIX_LEN)) {
        let mut fixed = [0u8; CALIBRATION_MATRIX_LEN];
        fixed.copy_from_slice(&matrix);
        let report = CalibrationMatrixReport::new(fixed);
        prop_assert_eq!(report.encode().len(), 57);
        prop_assert_eq!(CalibrationMatrixReport::decode(report.encode()).unwrap().matrix, fixed);
        prop_assert_eq!(CalibrationMatrixReport::payload_of(report.encode()), &fixed[..]);
    }

    /// The calibration payload of any reply is min(len - 1, 56) bytes.
    #[test]
    fn prop_calibration_payload_never_overruns(reply in prop::collection::vec(any::<u8>(), 0..80)) {
        let payload = CalibrationMatrixReport::payload_of(&reply);
        prop_assert_eq!(payload.len(), reply.len().saturating_sub(1).min(CALIBRATION_MATRIX_LEN));
    }

    /// Alarm duration keeps its sign through the split encoding.
    #[test]
    fn prop_alarm_duration_round_trip(duration in any::<i16>(), kind in 0u8..=17, blink in 0u8..=10) {
        let report = AlarmReport::new(kind, duration, blink);
        let decoded = AlarmReport::decode(report.encode()).unwrap();
        prop_assert_eq!(decoded.duration(), duration);
        prop_assert_eq!(decoded.alarm_type, kind);
        prop_assert_eq!(decoded.blink_rate, blink);
    }

    #[test]
    fn prop_rotation_round_trip(index in 0u16..4) {
        let report = RotationReport::new(index);
        prop_assert_eq!(RotationReport::decode(report.encode()).unwrap().index(), index);
    }
}
