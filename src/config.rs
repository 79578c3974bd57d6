//! Construction parameters for [`Mcp9808`](crate::Mcp9808).

use crate::error::Mcp9808Error;
use crate::registers::DEFAULT_ADDRESS;

/// Everything [`Mcp9808::init`](crate::Mcp9808::init) needs.
///
/// The transport is required; the address defaults to
/// [`DEFAULT_ADDRESS`] (`0x18`, A0..A2 tied low).
///
/// ```
/// # fn example<I2C: embedded_hal::i2c::I2c>(i2c: I2C) {
/// use mcp9808_driver::Config;
///
/// let config = Config::new(i2c).with_address(0x1A);
/// assert_eq!(config.address, 0x1A);
/// # }
/// ```
#[derive(Debug)]
pub struct Config<I2C> {
    /// 7-bit I2C device address.
    pub address: u8,
    /// Bus the sensor is attached to. Pass `&mut bus` to keep ownership.
    pub i2c: I2C,
}

impl<I2C> Config<I2C> {
    /// Configuration for a sensor on `i2c` at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            i2c,
        }
    }

    /// Use a different 7-bit address.
    ///
    /// # Arguments
    /// * `address`: `0x18..=0x1F` depending on how A0..A2 are strapped.
    ///   Anything above `0x7F` makes `init` fail with
    ///   [`Mcp9808Error::InvalidAddress`].
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// The configured address, rejected if it does not fit in 7 bits.
    pub(crate) fn checked_address<E>(&self) -> Result<u8, Mcp9808Error<E>> {
        if self.address > 0x7F {
            return Err(Mcp9808Error::InvalidAddress(self.address));
        }
        Ok(self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_address_is_0x18() {
        let config = Config::new(());
        assert_eq!(config.address, 0x18);
        assert_eq!(config.with_address(0x1F).address, 0x1F);
    }

    #[test]
    fn eight_bit_addresses_are_rejected() {
        let config = Config::new(()).with_address(0x30);
        assert_eq!(config.checked_address::<()>(), Ok(0x30));

        let config = Config::new(()).with_address(0x80);
        assert_eq!(
            config.checked_address::<()>(),
            Err(Mcp9808Error::InvalidAddress(0x80))
        );
    }
}
