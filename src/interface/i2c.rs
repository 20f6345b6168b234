//! I2C register interface built on top of the bounded two-wire transport.

use crate::bus::{BusConfig, BusTransport, TwoWireBus};
use crate::error::Error;

use super::Adxl345Interface;

/// Largest register payload accepted by a single burst write.
///
/// Sized to cover the whole ADXL345 register file; the staging buffer holds
/// the register address plus the payload in one transaction.
pub const MAX_BURST_LEN: usize = 32;

/// I2C-based register interface for the ADXL345 driver.
pub struct I2cInterface<BUS> {
    transport: BusTransport<BUS>,
}

impl<BUS> I2cInterface<BUS> {
    /// Creates a new interface owning the provided transport.
    pub const fn new(transport: BusTransport<BUS>) -> Self {
        Self { transport }
    }

    /// Builds the interface directly from a bus handle and configuration.
    pub const fn from_bus(bus: BUS, config: BusConfig) -> Self {
        Self::new(BusTransport::new(bus, config))
    }

    /// Provides mutable access to the wrapped transport.
    pub fn transport_mut(&mut self) -> &mut BusTransport<BUS> {
        &mut self.transport
    }

    /// Consumes the interface and returns the owned transport.
    pub fn release(self) -> BusTransport<BUS> {
        self.transport
    }
}

impl<BUS, CommE> Adxl345Interface for I2cInterface<BUS>
where
    BUS: TwoWireBus<Error = CommE>,
{
    type Error = Error<CommE>;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.transport.write(&[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        // Latch the register pointer, then read the burst. These are two
        // separate bus operations; an interleaved access from another caller
        // lands between them and corrupts the read.
        self.transport.write(&[register])?;
        self.transport.read(buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        if data.len() > MAX_BURST_LEN {
            return Err(Error::BurstTooLong {
                requested: data.len(),
                max: MAX_BURST_LEN,
            });
        }

        // Stage the register address and payload so the burst lands in a
        // single transaction.
        let mut buffer = [0u8; MAX_BURST_LEN + 1];
        buffer[0] = register;
        buffer[1..=data.len()].copy_from_slice(data);

        self.transport.write(&buffer[..=data.len()])
    }
}
