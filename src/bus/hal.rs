//! Bus adapter built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{I2c, SevenBitAddress};

use super::{BusConfig, TwoWireBus};
use crate::error::Result;

/// Adapter exposing any `embedded-hal` I2C controller as a [`TwoWireBus`].
///
/// `embedded-hal` transactions are all-or-nothing: a successful call means
/// the whole buffer transferred, so partial progress is never reported and
/// the transport retry loop collapses to a straight-through path. Clock rate
/// and timeout bounding are owned by the HAL controller; [`BusConfig`] only
/// contributes the device address here.
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C> HalBus<I2C> {
    /// Wraps the provided controller.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Provides mutable access to the wrapped controller.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the adapter and returns the owned controller.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> TwoWireBus for HalBus<I2C>
where
    I2C: I2c<SevenBitAddress>,
{
    type Error = I2C::Error;

    fn execute_write(&mut self, config: &BusConfig, buffer: &[u8]) -> Result<usize, Self::Error> {
        self.i2c.write(config.address.value(), buffer)?;
        Ok(buffer.len())
    }

    fn execute_read(
        &mut self,
        config: &BusConfig,
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.i2c.read(config.address.value(), buffer)?;
        Ok(buffer.len())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;

    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    use super::HalBus;
    use crate::bus::{BusAddress, BusConfig, TwoWireBus};

    fn config() -> BusConfig {
        BusConfig::new(BusAddress::new(0x53).unwrap())
    }

    #[test]
    fn write_reports_full_transfer() {
        let expectations = [Transaction::write(0x53, vec![0x2D, 0x08])];
        let mut bus = HalBus::new(Mock::new(&expectations));

        let written = bus.execute_write(&config(), &[0x2D, 0x08]).unwrap();
        assert_eq!(written, 2);

        let mut i2c = bus.release();
        i2c.done();
    }

    #[test]
    fn read_reports_full_transfer() {
        let expectations = [Transaction::read(0x53, vec![0xE5])];
        let mut bus = HalBus::new(Mock::new(&expectations));

        let mut buffer = [0u8; 1];
        let read = bus.execute_read(&config(), &mut buffer).unwrap();
        assert_eq!(read, 1);
        assert_eq!(buffer, [0xE5]);

        let mut i2c = bus.release();
        i2c.done();
    }

    #[test]
    fn transactions_target_the_configured_address() {
        let expectations = [Transaction::write(0x1D, vec![0x00])];
        let mut bus = HalBus::new(Mock::new(&expectations));
        let config = BusConfig::new(BusAddress::new(0x1D).unwrap());

        bus.execute_write(&config, &[0x00]).unwrap();

        let mut i2c = bus.release();
        i2c.done();
    }
}
