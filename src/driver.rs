//! Low-level register access for the MCP9808.
//!
//! Handles pointer addressing and byte order for 8- and 16-bit registers.
//! This module is crate-private: consumers use [`Mcp9808`](crate::Mcp9808),
//! or `Mcp9808Async` over [`AsyncRegisterDriver`] with the `async` feature.

use embedded_hal::i2c::I2c;

use crate::error::Mcp9808Error;

/// Register transport over a blocking I2C bus.
///
/// Each call is a single, self-contained bus transaction; nothing is cached
/// between calls.
#[derive(Debug)]
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // 16-bit registers
    // -----------------------------------------------------------------------

    /// Read a 16-bit register.
    ///
    /// Writes the pointer byte, then reads two bytes MSB first after a
    /// repeated start.
    pub fn read_u16(&mut self, register: u8) -> Result<u16, Mcp9808Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Write a 16-bit register as `[pointer, msb, lsb]` in one transaction.
    pub fn write_u16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        let [msb, lsb] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, msb, lsb])?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 8-bit registers
    // -----------------------------------------------------------------------

    pub fn read_u8(&mut self, register: u8) -> Result<u8, Mcp9808Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    pub fn write_u8(&mut self, register: u8, value: u8) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }
}

/// Register transport over an async I2C bus.
///
/// Same framing as [`RegisterDriver`]; every method awaits exactly one
/// transaction.
#[cfg(feature = "async")]
#[derive(Debug)]
pub(crate) struct AsyncRegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

#[cfg(feature = "async")]
impl<I2C> AsyncRegisterDriver<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub async fn read_u16(&mut self, register: u8) -> Result<u16, Mcp9808Error<I2C::Error>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await?;
        Ok(u16::from_be_bytes(buf))
    }

    pub async fn write_u16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        let [msb, lsb] = value.to_be_bytes();
        self.i2c.write(self.address, &[register, msb, lsb]).await?;
        Ok(())
    }

    pub async fn read_u8(&mut self, register: u8) -> Result<u8, Mcp9808Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await?;
        Ok(buf[0])
    }

    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }
}
