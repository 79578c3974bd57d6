//! Blocking high-level interface for the MCP9808.
//!
//! [`Mcp9808`] wraps the register transport with identity verification,
//! typed configuration access and temperature decoding.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::codec::{
    build_shutdown_config, clamp_resolution, decode_limit, decode_temperature_c,
    decode_temperature_c16, decode_temperature_f, encode_limit,
};
use crate::config::Config;
use crate::driver::RegisterDriver;
use crate::error::Mcp9808Error;
use crate::registers::{
    DEVICE_ID, MANUFACTURER_ID, REG_AMBIENT_TEMP, REG_CONFIG, REG_CRIT_TEMP, REG_DEVICE_ID,
    REG_LOWER_TEMP, REG_MANUF_ID, REG_RESOLUTION, REG_UPPER_TEMP, WAKE_SETTLE_MS,
};
use crate::types::{ConfigRegister, Reading, Resolution, SensorInfo, SENSOR_INFO};

/// Blocking driver for one MCP9808 on an I2C bus.
///
/// # Example
///
/// ```no_run
/// # fn example<I2C: embedded_hal::i2c::I2c, D: embedded_hal::delay::DelayNs>(
/// #     mut i2c: I2C,
/// #     mut delay: D,
/// # ) -> Result<(), mcp9808_driver::Mcp9808Error<I2C::Error>> {
/// use mcp9808_driver::{Config, Mcp9808};
///
/// // Borrow the bus so it can be reused once the sensor is dropped.
/// let mut sensor = Mcp9808::init(Config::new(&mut i2c))?;
///
/// let celsius = sensor.read_temperature_c()?;
/// if celsius.is_nan() {
///     // no conversion available yet
/// }
///
/// sensor.shutdown()?;
/// sensor.wake(&mut delay)?; // returns after the 250 ms settle delay
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Mcp9808<I2C> {
    driver: RegisterDriver<I2C>,
}

impl<I2C> Mcp9808<I2C>
where
    I2C: I2c,
{
    /// Verify the chip identity and reset its configuration.
    ///
    /// Sequence:
    /// 1. Manufacturer ID (`0x06`) must read `0x0054`
    /// 2. Device ID (`0x07`) must read `0x0400`
    /// 3. Configuration (`0x01`) is written to `0x0000`
    ///
    /// The device ID is not read when the manufacturer ID is wrong.
    ///
    /// # Errors
    /// * [`Mcp9808Error::InvalidAddress`] if the address is not 7-bit
    /// * [`Mcp9808Error::ManufacturerIdMismatch`] / [`Mcp9808Error::DeviceIdMismatch`]
    ///   if something other than an MCP9808 answers
    /// * [`Mcp9808Error::I2c`] on communication failure
    ///
    /// The transport inside `config` is dropped on failure; pass `&mut bus`
    /// to keep it usable.
    pub fn init(config: Config<I2C>) -> Result<Self, Mcp9808Error<I2C::Error>> {
        let address = config.checked_address()?;
        let mut driver = RegisterDriver::new(config.i2c, address);

        let manufacturer = driver.read_u16(REG_MANUF_ID)?;
        if manufacturer != MANUFACTURER_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "MCP9808 @ {=u8:#x}: manufacturer ID {=u16:#x}",
                address,
                manufacturer
            );
            return Err(Mcp9808Error::ManufacturerIdMismatch(manufacturer));
        }

        let device = driver.read_u16(REG_DEVICE_ID)?;
        if device != DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("MCP9808 @ {=u8:#x}: device ID {=u16:#x}", address, device);
            return Err(Mcp9808Error::DeviceIdMismatch(device));
        }

        driver.write_u16(REG_CONFIG, 0x0000)?;

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
    ///
    /// # Errors
    /// [`Mcp9808Error::I2c`] on communication failure.
    pub fn read_register16(&mut self, register: u8) -> Result<u16, Mcp9808Error<I2C::Error>> {
        self.driver.read_u16(register)
    }

    /// Write any 16-bit register by pointer, MSB first.
    ///
    /// # Errors
    /// [`Mcp9808Error::I2c`] on communication failure.
    pub fn write_register16(
        &mut self,
        register: u8,
        value: u16,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(register, value)
    }

    /// Read an 8-bit register (only the resolution register is one).
    pub fn read_register8(&mut self, register: u8) -> Result<u8, Mcp9808Error<I2C::Error>> {
        self.driver.read_u8(register)
    }

    /// Write an 8-bit register as `[pointer, value]`.
    pub fn write_register8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u8(register, value)
    }

    // -----------------------------------------------------------------------
    // Temperature
    // -----------------------------------------------------------------------

    /// Raw ambient temperature register, alert flags included.
    pub fn read_raw_temperature(&mut self) -> Result<u16, Mcp9808Error<I2C::Error>> {
        self.driver.read_u16(REG_AMBIENT_TEMP)
    }

    /// Ambient temperature in °C.
    ///
    /// Returns `f32::NAN` (not an error) when the sensor reports the
    /// `0xFFFF` "no reading" sentinel; check with `is_nan()`.
    pub fn read_temperature_c(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_c(self.read_raw_temperature()?))
    }

    /// Ambient temperature in °F. `NaN` on the sentinel, as for
    /// [`read_temperature_c`](Self::read_temperature_c).
    pub fn read_temperature_f(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_f(self.read_raw_temperature()?))
    }

    /// Ambient temperature in signed 1/16 °C steps, `None` on the sentinel.
    pub fn read_temperature_c16(&mut self) -> Result<Option<i16>, Mcp9808Error<I2C::Error>> {
        Ok(decode_temperature_c16(self.read_raw_temperature()?))
    }

    /// Take a measurement stamped with the caller's clock.
    pub fn reading(&mut self, timestamp_ms: u64) -> Result<Reading, Mcp9808Error<I2C::Error>> {
        Ok(Reading {
            timestamp_ms,
            celsius: self.read_temperature_c()?,
        })
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Current conversion resolution.
    pub fn resolution(&mut self) -> Result<Resolution, Mcp9808Error<I2C::Error>> {
        let reg = self.driver.read_u8(REG_RESOLUTION)?;
        Ok(Resolution::from_register(reg))
    }

    /// Select the conversion resolution.
    ///
    /// Finer steps take longer per conversion; see
    /// [`Resolution::conversion_time_ms`].
    ///
    /// # Errors
    /// [`Mcp9808Error::I2c`] on communication failure.
    pub fn set_resolution(
        &mut self,
        resolution: Resolution,
    ) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver
            .write_u8(REG_RESOLUTION, clamp_resolution(resolution.to_register()))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Read the configuration register.
    pub fn config(&mut self) -> Result<ConfigRegister, Mcp9808Error<I2C::Error>> {
        Ok(ConfigRegister(self.driver.read_u16(REG_CONFIG)?))
    }

    /// Overwrite the whole configuration register.
    ///
    /// Prefer [`modify_config`](Self::modify_config) to change single flags.
    pub fn set_config(&mut self, config: ConfigRegister) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(REG_CONFIG, config.bits())
    }

    /// Read the configuration, apply `f`, write the result back.
    ///
    /// Returns the value written.
    pub fn modify_config<F>(&mut self, f: F) -> Result<ConfigRegister, Mcp9808Error<I2C::Error>>
    where
        F: FnOnce(ConfigRegister) -> ConfigRegister,
    {
        let updated = f(self.config()?);
        self.set_config(updated)?;
        Ok(updated)
    }

    /// Clear a latched alert when the alert output is in interrupt mode.
    pub fn clear_interrupt(&mut self) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.modify_config(|config| config.with(ConfigRegister::INT_CLEAR, true))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Power
    // -----------------------------------------------------------------------

    /// Set or clear the shutdown bit, leaving every other bit as read.
    ///
    /// Does not wait after waking; use [`wake`](Self::wake) when the next
    /// reading must be valid.
    pub fn set_shutdown(&mut self, shutdown: bool) -> Result<(), Mcp9808Error<I2C::Error>> {
        let current = self.driver.read_u16(REG_CONFIG)?;
        self.driver
            .write_u16(REG_CONFIG, build_shutdown_config(current, shutdown))
    }

    /// Enter low-power shutdown. Conversions stop; the last value stays
    /// readable.
    pub fn shutdown(&mut self) -> Result<(), Mcp9808Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("MCP9808 @ {=u8:#x}: shutdown", self.address());
        self.set_shutdown(true)
    }

    /// Leave shutdown and block for the 250 ms settle delay.
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.set_shutdown(false)?;
        delay.delay_ms(WAKE_SETTLE_MS);

        #[cfg(feature = "defmt")]
        defmt::debug!("MCP9808 @ {=u8:#x}: awake", self.address());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Alert limits
    // -----------------------------------------------------------------------

    /// Upper alert boundary in °C.
    pub fn upper_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_UPPER_TEMP)?))
    }

    /// Set the upper alert boundary, rounded to 0.25 °C.
    ///
    /// Ignored by the device while the window lock bit is set.
    pub fn set_upper_limit(&mut self, celsius: f32) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(REG_UPPER_TEMP, encode_limit(celsius))
    }

    /// Lower alert boundary in °C.
    pub fn lower_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_LOWER_TEMP)?))
    }

    /// Set the lower alert boundary, rounded to 0.25 °C.
    ///
    /// Ignored by the device while the window lock bit is set.
    pub fn set_lower_limit(&mut self, celsius: f32) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(REG_LOWER_TEMP, encode_limit(celsius))
    }

    /// Critical trip point in °C.
    pub fn critical_limit(&mut self) -> Result<f32, Mcp9808Error<I2C::Error>> {
        Ok(decode_limit(self.driver.read_u16(REG_CRIT_TEMP)?))
    }

    /// Set the critical trip point, rounded to 0.25 °C.
    ///
    /// Ignored by the device while the critical lock bit is set.
    pub fn set_critical_limit(&mut self, celsius: f32) -> Result<(), Mcp9808Error<I2C::Error>> {
        self.driver.write_u16(REG_CRIT_TEMP, encode_limit(celsius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, FakeDelay, Transfer};

    fn sensor(bus: &mut FakeBus) -> Mcp9808<&mut FakeBus> {
        Mcp9808::init(Config::new(bus)).unwrap()
    }

    #[test]
    fn init_checks_identity_then_zeroes_config() {
        let mut bus = FakeBus::genuine();
        bus.set_register(REG_CONFIG, 0x0123);

        let sensor = sensor(&mut bus);
        assert_eq!(sensor.address(), 0x18);

        assert_eq!(
            bus.transfers(),
            &[
                Transfer::write_read(0x18, &[REG_MANUF_ID], 2),
                Transfer::write_read(0x18, &[REG_DEVICE_ID], 2),
                Transfer::write(0x18, &[REG_CONFIG, 0x00, 0x00]),
            ]
        );
        assert_eq!(bus.register(REG_CONFIG), 0x0000);
    }

    #[test]
    fn init_uses_configured_address() {
        let mut bus = FakeBus::genuine();
        let sensor = Mcp9808::init(Config::new(&mut bus).with_address(0x1C)).unwrap();
        assert_eq!(sensor.address(), 0x1C);

        assert!(bus.transfers().iter().all(|t| t.address == 0x1C));
    }

    #[test]
    fn wrong_manufacturer_stops_before_device_id() {
        let mut bus = FakeBus::genuine();
        bus.set_register(REG_MANUF_ID, 0x0055);
        bus.set_register(REG_CONFIG, 0x0123);

        let result = Mcp9808::init(Config::new(&mut bus));
        assert!(matches!(result, Err(Mcp9808Error::ManufacturerIdMismatch(0x0055))));

        assert_eq!(bus.transfers().len(), 1);
        assert!(bus.transfers().iter().all(|t| t.pointer() != Some(REG_DEVICE_ID)));
        assert_eq!(bus.register(REG_CONFIG), 0x0123);
    }

    #[test]
    fn wrong_device_id_leaves_config_alone() {
        let mut bus = FakeBus::genuine();
        bus.set_register(REG_DEVICE_ID, 0x0401);
        bus.set_register(REG_CONFIG, 0x0123);

        let result = Mcp9808::init(Config::new(&mut bus));
        assert!(matches!(result, Err(Mcp9808Error::DeviceIdMismatch(0x0401))));
        assert_eq!(bus.register(REG_CONFIG), 0x0123);
    }

    #[test]
    fn init_rejects_invalid_address_without_bus_traffic() {
        let mut bus = FakeBus::genuine();
        let result = Mcp9808::init(Config::new(&mut bus).with_address(0x90));
        assert!(matches!(result, Err(Mcp9808Error::InvalidAddress(0x90))));
        assert!(bus.transfers().is_empty());
    }

    #[test]
    fn init_propagates_bus_failure() {
        let mut bus = FakeBus::genuine();
        bus.fail_next();
        let result = Mcp9808::init(Config::new(&mut bus));
        assert!(matches!(result, Err(Mcp9808Error::I2c(_))));
    }

    #[test]
    fn temperature_reads() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);

        sensor.write_register16(REG_AMBIENT_TEMP, 0xC194).unwrap();
        assert_eq!(sensor.read_raw_temperature().unwrap(), 0xC194);
        assert_eq!(sensor.read_temperature_c().unwrap(), 25.25);
        assert_eq!(sensor.read_temperature_c16().unwrap(), Some(404));

        sensor.write_register16(REG_AMBIENT_TEMP, 0x1EC0).unwrap();
        assert_eq!(sensor.read_temperature_c().unwrap(), -20.0);
        assert_eq!(sensor.read_temperature_f().unwrap(), -4.0);
    }

    #[test]
    fn sentinel_reads_as_nan() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);
        sensor.write_register16(REG_AMBIENT_TEMP, 0xFFFF).unwrap();

        assert!(sensor.read_temperature_c().unwrap().is_nan());
        assert!(sensor.read_temperature_f().unwrap().is_nan());
        assert_eq!(sensor.read_temperature_c16().unwrap(), None);

        let reading = sensor.reading(1234).unwrap();
        assert_eq!(reading.timestamp_ms, 1234);
        assert!(!reading.is_available());
    }

    #[test]
    fn reading_carries_timestamp() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);
        sensor.write_register16(REG_AMBIENT_TEMP, 0x0050).unwrap();

        assert_eq!(
            sensor.reading(42).unwrap(),
            Reading {
                timestamp_ms: 42,
                celsius: 5.0
            }
        );
    }

    #[test]
    fn resolution_roundtrip() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);

        sensor.set_resolution(Resolution::Quarter).unwrap();
        assert_eq!(sensor.resolution().unwrap(), Resolution::Quarter);

        // Reserved high bits read back from the device are ignored.
        sensor.write_register8(REG_RESOLUTION, 0xFE).unwrap();
        assert_eq!(sensor.resolution().unwrap(), Resolution::Eighth);
        assert_eq!(sensor.read_register8(REG_RESOLUTION).unwrap(), 0xFE);
    }

    #[test]
    fn shutdown_and_wake_only_touch_bit_8() {
        let mut bus = FakeBus::genuine();
        let mut delay = FakeDelay::default();
        let mut sensor = sensor(&mut bus);
        sensor.set_config(ConfigRegister(0x00A3)).unwrap();

        sensor.shutdown().unwrap();
        assert_eq!(sensor.config().unwrap().bits(), 0x01A3);
        assert_eq!(delay.total_ns, 0);

        sensor.wake(&mut delay).unwrap();
        assert_eq!(sensor.config().unwrap().bits(), 0x00A3);
        assert!(delay.total_ns >= 250_000_000);
    }

    #[test]
    fn set_shutdown_false_does_not_wait() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);
        sensor.set_config(ConfigRegister(0x0100)).unwrap();

        sensor.set_shutdown(false).unwrap();
        assert!(!sensor.config().unwrap().is_shutdown());
    }

    #[test]
    fn modify_config_is_read_modify_write() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);
        sensor.set_config(ConfigRegister(0x0600 | ConfigRegister::ALERT_MODE)).unwrap();

        let written = sensor
            .modify_config(|c| c.with_alert_enabled(true).with_alert_critical_only(true))
            .unwrap();
        assert_eq!(written.bits(), 0x060D);

        sensor.clear_interrupt().unwrap();
        assert_eq!(sensor.config().unwrap().bits(), 0x062D);
    }

    #[test]
    fn alert_limits() {
        let mut bus = FakeBus::genuine();
        let mut sensor = sensor(&mut bus);

        sensor.set_upper_limit(30.1).unwrap();
        sensor.set_lower_limit(-10.0).unwrap();
        sensor.set_critical_limit(85.5).unwrap();

        assert_eq!(sensor.upper_limit().unwrap(), 30.0);
        assert_eq!(sensor.lower_limit().unwrap(), -10.0);
        assert_eq!(sensor.critical_limit().unwrap(), 85.5);

        assert_eq!(bus.register(REG_UPPER_TEMP), 0x01E0);
        assert_eq!(bus.register(REG_LOWER_TEMP), 0x1F60);
    }

    #[test]
    fn release_returns_transport() {
        let mut bus = FakeBus::genuine();
        let sensor = sensor(&mut bus);
        let released = sensor.release();
        released.clear_transfers();
        assert!(bus.transfers().is_empty());
    }
}
