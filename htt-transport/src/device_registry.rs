//! USB identifiers for HTT touch panel controllers
//!
//! Every HTT module enumerates with the same VID/PID pair. Individual panels
//! are told apart by enumeration order, not by identifier.

/// HTT vendor ID
pub const VENDOR_ID: u16 = 0x1b3d;

/// HTT product ID
pub const PRODUCT_ID: u16 = 0x14c9;
