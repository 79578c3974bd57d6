//! Driver for the Microchip MCP9808 digital temperature sensor.
//!
//! The MCP9808 reports ambient temperature in 1/16 °C steps over I2C and
//! offers a configurable alert output with upper, lower and critical limits.
//! This crate works on any `embedded-hal` 1.0 I2C bus.
//!
//! # Architecture
//!
//! - **[`codec`]**: pure register ↔ unit conversions, usable without a bus.
//! - **`driver`** (crate-private): 8/16-bit register reads and writes,
//!   blocking and async.
//! - **[`Mcp9808`]** (public): blocking high-level API.
//! - **`Mcp9808Async`** (public, `async` feature): the same API over
//!   `embedded-hal-async`, with an `embassy-time` settle delay.
//!
//! # Quick start
//!
//! ```no_run
//! # fn example<I2C: embedded_hal::i2c::I2c>(mut i2c: I2C)
//! #     -> Result<(), mcp9808_driver::Mcp9808Error<I2C::Error>> {
//! use mcp9808_driver::{Config, Mcp9808};
//!
//! let mut sensor = Mcp9808::init(Config::new(&mut i2c).with_address(0x18))?;
//! let celsius = sensor.read_temperature_c()?;
//! # Ok(())
//! # }
//! ```
//!
//! A sensor that has no conversion ready reports `0xFFFF`; the decoding
//! functions turn it into `f32::NAN` rather than an error.
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] on public types and driver logging.
//! - **`async`**: `Mcp9808Async`.

#![no_std]

pub use config::Config;
pub use error::Mcp9808Error;
pub use mcp9808::Mcp9808;
pub use registers::{DEFAULT_ADDRESS, WAKE_SETTLE_MS};
pub use types::{ConfigRegister, Reading, Resolution, SensorInfo, SENSOR_INFO};

#[cfg(feature = "async")]
pub use asynch::Mcp9808Async;

#[cfg(feature = "async")]
mod asynch;
pub mod codec;
mod config;
mod driver;
mod error;
mod mcp9808;
pub mod registers;
mod types;

#[cfg(test)]
mod testing;
