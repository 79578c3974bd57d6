//! Typed views of MCP9808 register contents and measurement results.

use crate::codec::{build_shutdown_config, celsius_to_fahrenheit, clamp_resolution};
use crate::registers::{
    CONFIG_ALERT_CONTROL, CONFIG_ALERT_MODE, CONFIG_ALERT_POLARITY, CONFIG_ALERT_SELECT,
    CONFIG_ALERT_STATUS, CONFIG_CRIT_LOCKED, CONFIG_INT_CLEAR, CONFIG_SHUTDOWN,
    CONFIG_WIN_LOCKED,
};

// ---------------------------------------------------------------------------
// Configuration register
// ---------------------------------------------------------------------------

/// Contents of the 16-bit configuration register.
///
/// The wrapper never drops bits: flags this type has no accessor for are
/// carried through every `with_*` call unchanged, so a read-modify-write via
/// [`Mcp9808::modify_config`](crate::Mcp9808::modify_config) only touches
/// what the closure touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister(pub u16);

impl ConfigRegister {
    pub const SHUTDOWN: u16 = CONFIG_SHUTDOWN;
    pub const CRIT_LOCKED: u16 = CONFIG_CRIT_LOCKED;
    pub const WIN_LOCKED: u16 = CONFIG_WIN_LOCKED;
    pub const INT_CLEAR: u16 = CONFIG_INT_CLEAR;
    pub const ALERT_STATUS: u16 = CONFIG_ALERT_STATUS;
    pub const ALERT_CONTROL: u16 = CONFIG_ALERT_CONTROL;
    pub const ALERT_SELECT: u16 = CONFIG_ALERT_SELECT;
    pub const ALERT_POLARITY: u16 = CONFIG_ALERT_POLARITY;
    pub const ALERT_MODE: u16 = CONFIG_ALERT_MODE;

    /// Raw register value.
    pub fn bits(self) -> u16 {
        self.0
    }

    /// `true` if every bit of `mask` is set.
    pub fn contains(self, mask: u16) -> bool {
        self.0 & mask == mask
    }

    /// Copy with the bits of `mask` set or cleared.
    pub fn with(self, mask: u16, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    pub fn is_shutdown(self) -> bool {
        self.contains(Self::SHUTDOWN)
    }

    pub fn with_shutdown(self, shutdown: bool) -> Self {
        Self(build_shutdown_config(self.0, shutdown))
    }

    /// `true` when the critical trip point can no longer be written.
    pub fn is_crit_locked(self) -> bool {
        self.contains(Self::CRIT_LOCKED)
    }

    /// `true` when the upper/lower alarm window can no longer be written.
    pub fn is_window_locked(self) -> bool {
        self.contains(Self::WIN_LOCKED)
    }

    /// `true` while the alert output is asserted.
    pub fn alert_asserted(self) -> bool {
        self.contains(Self::ALERT_STATUS)
    }

    pub fn with_alert_enabled(self, enabled: bool) -> Self {
        self.with(Self::ALERT_CONTROL, enabled)
    }

    /// Restrict the alert output to the critical trip point only.
    pub fn with_alert_critical_only(self, critical_only: bool) -> Self {
        self.with(Self::ALERT_SELECT, critical_only)
    }

    pub fn with_alert_active_high(self, active_high: bool) -> Self {
        self.with(Self::ALERT_POLARITY, active_high)
    }

    /// Interrupt mode when `true`, comparator mode otherwise.
    pub fn with_alert_interrupt_mode(self, interrupt: bool) -> Self {
        self.with(Self::ALERT_MODE, interrupt)
    }
}

impl From<u16> for ConfigRegister {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<ConfigRegister> for u16 {
    fn from(config: ConfigRegister) -> Self {
        config.0
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Conversion resolution, stored in bits 0-1 of the resolution register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 0.5 °C, ~30 ms per conversion
    Half = 0b00,
    /// 0.25 °C, ~65 ms per conversion
    Quarter = 0b01,
    /// 0.125 °C, ~130 ms per conversion
    Eighth = 0b10,
    /// 0.0625 °C, ~250 ms per conversion (power-on default)
    #[default]
    Sixteenth = 0b11,
}

impl Resolution {
    pub fn to_register(self) -> u8 {
        self as u8
    }

    /// Build from a raw register value; only the two low bits are used.
    pub fn from_register(reg: u8) -> Self {
        match clamp_resolution(reg) {
            0b00 => Resolution::Half,
            0b01 => Resolution::Quarter,
            0b10 => Resolution::Eighth,
            _ => Resolution::Sixteenth,
        }
    }

    /// Temperature step in degrees Celsius.
    pub fn step_celsius(self) -> f32 {
        match self {
            Resolution::Half => 0.5,
            Resolution::Quarter => 0.25,
            Resolution::Eighth => 0.125,
            Resolution::Sixteenth => 0.0625,
        }
    }

    /// Typical conversion time in milliseconds.
    pub fn conversion_time_ms(self) -> u32 {
        match self {
            Resolution::Half => 30,
            Resolution::Quarter => 65,
            Resolution::Eighth => 130,
            Resolution::Sixteenth => 250,
        }
    }
}

impl From<u8> for Resolution {
    fn from(reg: u8) -> Self {
        Resolution::from_register(reg)
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// A single timestamped ambient temperature measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Caller-supplied (blocking API) or `embassy_time` (async API)
    /// timestamp, in milliseconds.
    pub timestamp_ms: u64,
    /// Temperature in °C; `NaN` when the sensor reported no valid value.
    pub celsius: f32,
}

impl Reading {
    /// `false` when the sensor returned the "no reading" sentinel.
    pub fn is_available(&self) -> bool {
        !self.celsius.is_nan()
    }

    pub fn fahrenheit(&self) -> f32 {
        celsius_to_fahrenheit(self.celsius)
    }
}

/// Static description of the sensor's capabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorInfo {
    pub name: &'static str,
    pub sensor_id: u16,
    /// Lowest temperature within datasheet accuracy, °C.
    pub min_celsius: f32,
    /// Highest temperature within datasheet accuracy, °C.
    pub max_celsius: f32,
    /// Finest step the sensor can report, °C.
    pub resolution_celsius: f32,
}

pub const SENSOR_INFO: SensorInfo = SensorInfo {
    name: "MCP9808",
    sensor_id: 9808,
    min_celsius: -40.0,
    max_celsius: 125.0,
    resolution_celsius: 0.0625,
};
