//! Async interface for the MCP9808, for Embassy-style executors.
//!
//! [`Mcp9808Async`] exposes the same operations as the blocking
//! [`Mcp9808`](crate::Mcp9808) over `embedded-hal-async`. The settle delay
//! after waking is an `embassy_time::Timer`, so other tasks keep running
//! while the sensor powers up.
//!
//! Requires the `async` feature.

use embassy_time::{Instant, Timer};
use embedded_hal_async::i2c::I2c;

use crate::codec::{
    build_shutdown_config, clamp_resolution, decode_limit, decode_temperature_c,
    decode_temperature_c16, decode_temperature_f, encode_limit,
};
use crate::config::Config;
use crate::driver::AsyncRegisterDriver;
use crate::error::Mcp9808Error;
use crate::registers::{
    DEVICE_ID, MANUFACTURER_ID, REG_AMBIENT_TEMP, REG_CONFIG, REG_CRIT_TEMP, REG_DEVICE_ID,
    REG_LOWER_TEMP, REG_MANUF_ID, REG_RESOLUTION, REG_UPPER_TEMP, WAKE_SETTLE_MS,
};
use crate::types::{ConfigRegister, Reading, Resolution, SensorInfo, SENSOR_INFO};

/// Async driver for one MCP9808.
///
/// # Example
///
/// ```no_run
/// # async fn example<I2C: embedded_hal_async::i2c::I2c>(i2c: I2C)
/// #     -> Result<(), mcp9808_driver::Mcp9808Error<I2C::Error>> {
/// use mcp9808_driver::{Config, Mcp9808Async};
///
/// let mut sensor = Mcp9808Async::init(Config::new(i2c)).await?;
/// let reading = sensor.reading().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Mcp9808Async<I2C> {
    driver: AsyncRegisterDriver<I2C>,
}

impl<I2C> Mcp9808Async<I2C>
where
    I2C: I2c,
{
    /// Verify the chip identity and reset its configuration.
    ///
    /// Same sequence as [`Mcp9808::init`](crate::Mcp9808::init): manufacturer
    /// ID, then device ID, then `0x0000` into the configuration register.
    ///
    /// # Errors
    /// * [`Mcp9808Error::InvalidAddress`] if the address is not 7-bit
    /// * [`Mcp9808Error::ManufacturerIdMismatch`] / [`Mcp9808Error::DeviceIdMismatch`]
    ///   if something other than an MCP9808 answers
    /// * [`Mcp9808Error::I2c`] on communication failure
    pub async fn init(config: Config<I2C>) -> Result<Self, Mcp9808Error<I2C::Error>> {
        let address = config.checked_address()?;
        let mut driver = AsyncRegisterDriver::new(config.i2c, address);

        let manufacturer = driver.read_u16(REG_MANUF_ID).await?;
        if manufacturer != MANUFACTURER_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "MCP9808 @ {=u8:#x}: manufacturer ID {=u16:#x}",
                address,
                manufacturer
            );
            return Err(Mcp9808Error::ManufacturerIdMismatch(manufacturer));
        }

        let device = driver.read_u16(REG_DEVICE_ID).await?;
        if device != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MCP9808 @ {=u8:#x}: device ID {=u16:#x}", address, device);
            return Err(Mcp9808Error::DeviceIdMismatch(device));
        }

        driver.write_u16(REG_CONFIG, 0x0000).await?;

        #[cfg(feature = "defmt")]
        defmt::info!("MCP9808 @ {=u8:#x} initialised", address);

        Ok(Self { driver })
    }

    /// 7-bit address this driver talks to.
    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Give the transport back.
    pub fn release(self) -> I2C {
        self.driver.release()
    }

    /// Static capabilities of the sensor. No bus traffic.
    pub fn sensor_info(&self) -> SensorInfo {
        SENSOR_INFO
    }

    // -----------------------------------------------------------------------
    // Raw register access
    // -----------------------------------------------------------------------

    /// Read any 16-bit register by pointer.
    pub async fn read_register16(&mut self, register: u8) -> Result<u16, Mcp9808Error<I2C::Error>> {
        self.driver.read_u16(register).await
    }

    /// Write any 16-bit register by pointer, MSB first.
    pub async fn write_register16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(register, value).await
    }

    /// Read an 8-bit register.
    pub async fn read_register8(&mut self, register: u8) -> Result<u8, Mcp9808Error<I2C::Error>> {
        self.driver.read_u8(register).await
    }

    /// Write an 8-bit register as `[pointer, value]`.
    pub async fn write_register8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u8(register, value).await
    }

    // -----------------------------------------------------------------------
    // Temperature
    // -----------------------------------------------------------------------

    /// Raw ambient temperature register, alert flags included.
    pub async fn read_raw_temperature(&mut self) -> Result<u16, Mcp9808Error<I2C::Error>> {
        self.driver.read_u16(REG_AMBIENT_TEMP).await
    }

    /// Ambient temperature in °C, `NaN` on the "no reading" sentinel.
    pub async fn read_temperature_c(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_c(self.read_raw_temperature().await?))
    }

    /// Ambient temperature in °F, `NaN` on the sentinel.
    pub async fn read_temperature_f(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_f(self.read_raw_temperature().await?))
    }

    /// Ambient temperature in signed 1/16 °C steps, `None` on the sentinel.
    pub async fn read_temperature_c16(
        &mut self,
    ) -> Result<Option<i16>, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_c16(self.read_raw_temperature().await?))
    }

    /// Take a measurement stamped with `embassy_time::Instant::now()`.
    ///
    /// The timestamp is taken after the bus read completes.
    pub async fn reading(&mut self) -> Result<Reading, Mcp9808Error<I2C::Error>> {
        let celsius = self.read_temperature_c().await?;
        Ok(Reading {
            timestamp_ms: Instant::now().as_millis(),
            celsius,
        })
    }

    // -----------------------------------------------------------------------
    // Resolution and configuration
    // -----------------------------------------------------------------------

    /// Current conversion resolution.
    pub async fn resolution(&mut self) -> Result<Resolution, Mcp9808Error<I2C::Error>> {
        let reg = self.driver.read_u8(REG_RESOLUTION).await?;
        Ok(Resolution::from_register(reg))
    }

    /// Select the conversion resolution.
    pub async fn set_resolution(
        &mut self,
        resolution: Resolution,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver
            .write_u8(REG_RESOLUTION, clamp_resolution(resolution.to_register()))
            .await
    }

    /// Read the configuration register.
    pub async fn config(&mut self) -> Result<ConfigRegister, Mcp9808Error<I2C::Error>> {
        Ok(ConfigRegister(self.driver.read_u16(REG_CONFIG).await?))
    }

    /// Overwrite the whole configuration register.
    pub async fn set_config(
        &mut self,
        config: ConfigRegister,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(REG_CONFIG, config.bits()).await
    }

    /// Read the configuration, apply `f`, write the result back.
    ///
    /// Returns the value written.
    pub async fn modify_config<F>(
        &mut self,
        f: F,
    ) -> Result<ConfigRegister, Mcp9808Error<I2C::Error>>
    where
        F: FnOnce(ConfigRegister) -> ConfigRegister,
    {
        let updated = f(self.config().await?);
        self.set_config(updated).await?;
        Ok(updated)
    }

    /// Clear a latched alert when the alert output is in interrupt mode.
    pub async fn clear_interrupt(&mut self) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.modify_config(|config| config.with(ConfigRegister::INT_CLEAR, true))
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Power
    // -----------------------------------------------------------------------

    /// Set or clear the shutdown bit without waiting.
    pub async fn set_shutdown(&mut self, shutdown: bool) -> Result<(), Mcp9808Error<I2C::Error>> {
        let current = self.driver.read_u16(REG_CONFIG).await?;
        self.driver
            .write_u16(REG_CONFIG, build_shutdown_config(current, shutdown))
            .await
    }

    /// Enter low-power shutdown.
    pub async fn shutdown(&mut self) -> Result<(), Mcp9808Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("MCP9808 @ {=u8:#x}: shutdown", self.address());
        self.set_shutdown(true).await
    }

    /// Leave shutdown and wait out the 250 ms settle delay.
    ///
    /// The delay is an `embassy_time::Timer`, so the executor runs other
    /// tasks meanwhile.
    pub async fn wake(&mut self) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.set_shutdown(false).await?;
        Timer::after_millis(WAKE_SETTLE_MS as u64).await;

        #[cfg(feature = "defmt")]
        defmt::debug!("MCP9808 @ {=u8:#x}: awake", self.address());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Alert limits
    // -----------------------------------------------------------------------

    /// Upper alert boundary in °C.
    pub async fn upper_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_UPPER_TEMP).await?))
    }

    /// Set the upper alert boundary, rounded to 0.25 °C.
    pub async fn set_upper_limit(&mut self, celsius: f32) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver
            .write_u16(REG_UPPER_TEMP, encode_limit(celsius))
            .await
    }

    /// Lower alert boundary in °C.
    pub async fn lower_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_LOWER_TEMP).await?))
    }

    /// Set the lower alert boundary, rounded to 0.25 °C.
    pub async fn set_lower_limit(&mut self, celsius: f32) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver
            .write_u16(REG_LOWER_TEMP, encode_limit(celsius))
            .await
    }

    /// Critical trip point in °C.
    pub async fn critical_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_CRIT_TEMP).await?))
    }

    /// Set the critical trip point, rounded to 0.25 °C.
    pub async fn set_critical_limit(
        &mut self,
        celsius: f32,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver
            .write_u16(REG_CRIT_TEMP, encode_limit(celsius))
            .await
    }
}
