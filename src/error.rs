//! Error types for the MCP9808 driver.

use core::fmt;

/// Errors that can occur when talking to the MCP9808.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mcp9808Error<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// The manufacturer ID register did not read `0x0054`.
    ManufacturerIdMismatch(u16),

    /// The device ID register did not read `0x0400`.
    DeviceIdMismatch(u16),

    /// The configured address does not fit in 7 bits.
    InvalidAddress(u8),
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Mcp9808Error<E> {
    fn from(error: E) -> Self {
        Mcp9808Error::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for Mcp9808Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mcp9808Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Mcp9808Error::ManufacturerIdMismatch(id) => {
                write!(f, "Unexpected manufacturer ID {:#06x}", id)
            }
            Mcp9808Error::DeviceIdMismatch(id) => write!(f, "Unexpected device ID {:#06x}", id),
            Mcp9808Error::InvalidAddress(addr) => {
                write!(f, "Invalid I2C address {:#04x} (must be 7-bit)", addr)
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Mcp9808Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Mcp9808Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Mcp9808Error::ManufacturerIdMismatch(id) => {
                defmt::write!(f, "Unexpected manufacturer ID {=u16:#x}", *id)
            }
            Mcp9808Error::DeviceIdMismatch(id) => {
                defmt::write!(f, "Unexpected device ID {=u16:#x}", *id)
            }
            Mcp9808Error::InvalidAddress(addr) => {
                defmt::write!(f, "Invalid I2C address {=u8:#x}", *addr)
            }
        }
    }
}
