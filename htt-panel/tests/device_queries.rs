//! Integration tests for panel device queries.
//!
//! These tests require a real HTT panel to be connected.
//! Run with: cargo test -p htt-panel --test device_queries -- --ignored --nocapture

use htt_panel::{DeviceRegistry, DriverType};
use htt_transport::HidDiscovery;

fn open_registry() -> DeviceRegistry {
    let discovery = HidDiscovery::new().expect("HID subsystem unavailable");
    let registry = DeviceRegistry::discover(&discovery).expect("enumeration failed");
    assert!(!registry.is_empty(), "No panel found - plug in a supported device");
    registry
}

/// Reproduces `--scan`: every attached panel answers the identification reads.
#[test]
#[ignore] // requires hardware
fn scan_queries_resolve() {
    let registry = open_registry();
    for (index, session) in registry.iter().enumerate() {
        let caps = session.capabilities(true).expect("capability read failed");
        println!("#{index}: {} driver, firmware {}", caps.driver, caps.firmware);
        assert!(caps.driver.is_recognized(), "unrecognized driver on #{index}");
        if caps.driver != DriverType::None {
            let rotation = session.get_rotation().expect("rotation read failed");
            println!("  rotation {rotation}");
        }
    }
}

/// Backlight write is read back unchanged.
#[test]
#[ignore] // requires hardware
fn backlight_readback() {
    let registry = open_registry();
    let session = registry.current().expect("no current device");
    let before = session.get_backlight().expect("backlight read failed");
    let applied = session.set_backlight(128, false).expect("backlight write failed");
    assert_eq!(session.get_backlight().expect("backlight read failed"), applied);
    session
        .set_backlight(i64::from(before), false)
        .expect("backlight restore failed");
}
