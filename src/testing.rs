//! Test doubles: an in-memory MCP9808 register file behind the I2C traits,
//! and a delay that only records how long it was asked to wait.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};
use heapless::Vec;

use crate::registers::{DEVICE_ID, MANUFACTURER_ID, REG_DEVICE_ID, REG_MANUF_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError;

impl i2c::Error for FakeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// One recorded bus transaction.
///
/// Recording more than four written bytes, or more than 32 transactions on
/// one [`FakeBus`], panics instead of truncating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub address: u8,
    pub written: Vec<u8, 4>,
    pub read_len: usize,
}

impl Transfer {
    pub fn write(address: u8, bytes: &[u8]) -> Self {
        Self::write_read(address, bytes, 0)
    }

    pub fn write_read(address: u8, bytes: &[u8], read_len: usize) -> Self {
        let mut written = Vec::new();
        written.extend_from_slice(bytes).unwrap();
        Self {
            address,
            written,
            read_len,
        }
    }

    /// Register pointer this transaction addressed.
    pub fn pointer(&self) -> Option<u8> {
        self.written.first().copied()
    }
}

/// Register-level model of the sensor.
///
/// A write sets the pointer; one or two trailing bytes store into the
/// addressed register. Reads return the addressed register MSB first, or
/// only its low byte for single-byte reads.
pub struct FakeBus {
    registers: [u16; 16],
    pointer: u8,
    transfers: Vec<Transfer, 32>,
    fail_next: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            registers: [0; 16],
            pointer: 0,
            transfers: Vec::new(),
            fail_next: false,
        }
    }

    /// A bus whose ID registers identify a genuine MCP9808.
    pub fn genuine() -> Self {
        let mut bus = Self::new();
        bus.set_register(REG_MANUF_ID, MANUFACTURER_ID);
        bus.set_register(REG_DEVICE_ID, DEVICE_ID);
        bus
    }

    pub fn set_register(&mut self, register: u8, value: u16) {
        self.registers[register as usize & 0x0F] = value;
    }

    pub fn register(&self, register: u8) -> u16 {
        self.registers[register as usize & 0x0F]
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn clear_transfers(&mut self) {
        self.transfers.clear();
    }

    /// Make the next transaction fail with [`FakeError`].
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl ErrorType for FakeBus {
    type Error = FakeError;
}

impl I2c<SevenBitAddress> for FakeBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(FakeError);
        }

        let mut transfer = Transfer::write(address, &[]);
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let bytes: &[u8] = *bytes;
                    transfer.written.extend_from_slice(bytes).unwrap();
                    if let Some((&pointer, payload)) = bytes.split_first() {
                        self.pointer = pointer;
                        match payload {
                            [msb, lsb] => {
                                self.set_register(pointer, u16::from_be_bytes([*msb, *lsb]))
                            }
                            [value] => self.set_register(pointer, *value as u16),
                            _ => {}
                        }
                    }
                }
                Operation::Read(buf) => {
                    transfer.read_len += buf.len();
                    let value = self.register(self.pointer);
                    if buf.len() == 1 {
                        buf[0] = value as u8;
                    } else {
                        for (byte, source) in buf.iter_mut().zip(value.to_be_bytes()) {
                            *byte = source;
                        }
                    }
                }
            }
        }

        self.transfers.push(transfer).unwrap();
        Ok(())
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::i2c::I2c<SevenBitAddress> for FakeBus {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        I2c::transaction(self, address, operations)
    }
}

/// Delay provider that accumulates requested time instead of sleeping.
#[derive(Debug, Default)]
pub struct FakeDelay {
    pub total_ns: u64,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic]
    fn oversized_write_is_not_truncated() {
        let mut bus = FakeBus::new();
        let _ = bus.write(0x18, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    }

    #[test]
    #[should_panic]
    fn transfer_log_overflow_is_not_silent() {
        let mut bus = FakeBus::new();
        for _ in 0..33 {
            let _ = bus.write(0x18, &[0x01]);
        }
    }
}
