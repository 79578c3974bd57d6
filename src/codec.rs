//! Pure conversions between raw MCP9808 register values and physical units.
//!
//! Nothing in here touches the bus, so every function can be used on values
//! obtained elsewhere (logged frames, a shared-bus snapshot, tests).
//!
//! # Temperature format
//!
//! ```text
//!  15  14  13 | 12 | 11 ........................ 0
//! Tcrit Tup Tlo| S  | magnitude, 1/16 °C per LSB
//! ```
//!
//! The sign bit does not make the field two's complement on its own: a set
//! sign bit means the 12-bit magnitude must be offset by -256 °C.

use crate::registers::{
    CONFIG_SHUTDOWN, LIMIT_MASK, TEMP_MAGNITUDE_MASK, TEMP_SENTINEL, TEMP_SIGN,
};

/// Most extreme value an alert limit register can hold.
const LIMIT_MAX_CELSIUS: f32 = 255.75;

/// Decode the ambient temperature register into degrees Celsius.
///
/// Returns `f32::NAN` for the `0xFFFF` sentinel. Bits 13-15 (alert flags)
/// are ignored.
///
/// ```
/// use mcp9808_driver::codec::decode_temperature_c;
///
/// assert_eq!(decode_temperature_c(0x0050), 5.0);
/// assert_eq!(decode_temperature_c(0x1EC0), -20.0);
/// assert!(decode_temperature_c(0xFFFF).is_nan());
/// ```
pub fn decode_temperature_c(raw: u16) -> f32 {
    if raw == TEMP_SENTINEL {
        return f32::NAN;
    }

    let magnitude = (raw & TEMP_MAGNITUDE_MASK) as f32 / 16.0;
    if raw & TEMP_SIGN != 0 {
        magnitude - 256.0
    } else {
        magnitude
    }
}

/// Decode the ambient temperature register into degrees Fahrenheit.
///
/// The sentinel propagates as `f32::NAN`.
pub fn decode_temperature_f(raw: u16) -> f32 {
    celsius_to_fahrenheit(decode_temperature_c(raw))
}

/// Decode the ambient temperature register into signed 1/16 °C steps.
///
/// Returns `None` for the sentinel.
pub fn decode_temperature_c16(raw: u16) -> Option<i16> {
    if raw == TEMP_SENTINEL {
        return None;
    }

    let magnitude = (raw & TEMP_MAGNITUDE_MASK) as i16;
    if raw & TEMP_SIGN != 0 {
        Some(magnitude - 4096)
    } else {
        Some(magnitude)
    }
}

/// `C * 9/5 + 32`. `NaN` stays `NaN`.
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Return `current` with the shutdown bit set or cleared.
///
/// Every other bit of `current` is passed through untouched, including
/// bits this driver has no name for.
pub fn build_shutdown_config(current: u16, shutdown: bool) -> u16 {
    if shutdown {
        current | CONFIG_SHUTDOWN
    } else {
        current & !CONFIG_SHUTDOWN
    }
}

/// Keep only the two significant bits of a resolution value.
pub fn clamp_resolution(value: u8) -> u8 {
    value & 0x03
}

/// Encode a temperature into the alert limit register format.
///
/// Limits only have quarter-degree resolution: the value is rounded to the
/// nearest 0.25 °C and saturated to ±255.75 °C. `NaN` encodes as 0 °C.
pub fn encode_limit(celsius: f32) -> u16 {
    let clamped = celsius.clamp(-LIMIT_MAX_CELSIUS, LIMIT_MAX_CELSIUS);
    let scaled = clamped * 4.0;
    // core has no f32::round; bias away from zero and truncate.
    let quarters = if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    };

    // Two's complement in 13 bits matches the sign/-256 offset layout.
    ((quarters * 4) as u16) & LIMIT_MASK
}

/// Decode an alert limit register into degrees Celsius.
pub fn decode_limit(raw: u16) -> f32 {
    decode_temperature_c(raw & LIMIT_MASK)
}
