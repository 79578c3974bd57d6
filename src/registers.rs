//! MCP9808 register map and protocol constants.
//!
//! Every register is addressed by a single pointer byte written at the start
//! of each transaction. All 16-bit registers are transferred MSB first.

// ---------------------------------------------------------------------------
// Register pointers
// ---------------------------------------------------------------------------

/// Configuration register (16-bit).
pub const REG_CONFIG: u8 = 0x01;

/// Alert output upper boundary (16-bit).
pub const REG_UPPER_TEMP: u8 = 0x02;

/// Alert output lower boundary (16-bit).
pub const REG_LOWER_TEMP: u8 = 0x03;

/// Critical temperature trip point (16-bit).
pub const REG_CRIT_TEMP: u8 = 0x04;

/// Ambient temperature (16-bit, read-only).
pub const REG_AMBIENT_TEMP: u8 = 0x05;

/// Manufacturer ID (16-bit, read-only).
pub const REG_MANUF_ID: u8 = 0x06;

/// Device ID and revision (16-bit, read-only).
pub const REG_DEVICE_ID: u8 = 0x07;

/// Conversion resolution (8-bit, only bits 0-1 are significant).
pub const REG_RESOLUTION: u8 = 0x08;

// ---------------------------------------------------------------------------
// Configuration register bits
// ---------------------------------------------------------------------------

/// Shutdown mode (low-power, conversions stopped).
pub const CONFIG_SHUTDOWN: u16 = 0x0100;
/// Critical trip point lock.
pub const CONFIG_CRIT_LOCKED: u16 = 0x0080;
/// Alarm window (upper/lower) lock.
pub const CONFIG_WIN_LOCKED: u16 = 0x0040;
/// Interrupt clear.
pub const CONFIG_INT_CLEAR: u16 = 0x0020;
/// Alert output status.
pub const CONFIG_ALERT_STATUS: u16 = 0x0010;
/// Alert output control (enable).
pub const CONFIG_ALERT_CONTROL: u16 = 0x0008;
/// Alert output select (critical only vs. all limits).
pub const CONFIG_ALERT_SELECT: u16 = 0x0004;
/// Alert output polarity (active-high when set).
pub const CONFIG_ALERT_POLARITY: u16 = 0x0002;
/// Alert output mode (interrupt when set, comparator otherwise).
pub const CONFIG_ALERT_MODE: u16 = 0x0001;

// ---------------------------------------------------------------------------
// Ambient temperature register layout
// ---------------------------------------------------------------------------

/// Magnitude field, 1/16 °C per LSB.
pub const TEMP_MAGNITUDE_MASK: u16 = 0x0FFF;

/// Sign flag; when set the magnitude is offset by -256 °C.
pub const TEMP_SIGN: u16 = 0x1000;

/// Value returned when no valid reading is available.
pub const TEMP_SENTINEL: u16 = 0xFFFF;

/// Alert limit registers only keep quarter-degree resolution plus sign.
pub const LIMIT_MASK: u16 = 0x1FFC;

// ---------------------------------------------------------------------------
// Identity and protocol constants
// ---------------------------------------------------------------------------

/// Expected content of [`REG_MANUF_ID`].
pub const MANUFACTURER_ID: u16 = 0x0054;

/// Expected content of [`REG_DEVICE_ID`].
pub const DEVICE_ID: u16 = 0x0400;

/// Default 7-bit I2C address (A0..A2 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Time in milliseconds the sensor needs after leaving shutdown before the
/// ambient register holds a valid conversion.
pub const WAKE_SETTLE_MS: u32 = 250;
