//! High-level ADXL345 device driver implementation.

use crate::bus::TwoWireBus;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::Adxl345Interface;
use crate::interface::i2c::I2cInterface;
use crate::params::Range;
use crate::registers::{
    DataFormat, EXPECTED_DEVID, PowerControl, RANGE_BITS_MASK, REG_DATA_FORMAT, REG_DATAX0,
    REG_DEVID, REG_POWER_CTL,
};

// Number of consecutive bytes spanning X, Y, Z axis samples.
const RAW_AXIS_BYTES: usize = 6;

/// High-level synchronous driver for the ADXL345 accelerometer.
///
/// The part starts in standby; [`power_on`](Self::power_on) begins
/// measurement. The driver does not track that state: readings requested
/// while the part is still in standby return whatever the data registers
/// hold.
pub struct Adxl345<IFACE> {
    interface: IFACE,
    config: Config,
}

/// Calibrated acceleration snapshot in g.
///
/// Owned by the caller: it reflects the data registers at the moment of the
/// read that produced it and is never updated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisReading {
    /// X-axis acceleration.
    pub x: f32,
    /// Y-axis acceleration.
    pub y: f32,
    /// Z-axis acceleration.
    pub z: f32,
}

#[cfg(feature = "defmt")]
impl defmt::Format for AxisReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "AxisReading {{ x: {} g, y: {} g, z: {} g }}",
            self.x,
            self.y,
            self.z
        );
    }
}

impl<IFACE> Adxl345<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<BUS> Adxl345<I2cInterface<BUS>>
where
    BUS: TwoWireBus,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor wiring the transport from the configuration.
    pub fn new_i2c(bus: BUS, config: Config) -> Self {
        Self::new(I2cInterface::from_bus(bus, config.bus_config()), config)
    }

    /// Releases the driver, returning the bus handle and configuration.
    pub fn release_i2c(self) -> (BUS, Config) {
        let (iface, config) = self.release();
        (iface.release().release(), config)
    }
}

impl<IFACE, CommE> Adxl345<IFACE>
where
    IFACE: Adxl345Interface<Error = Error<CommE>>,
{
    // ==================================================================
    // == Initialization & Power ========================================
    // ==================================================================
    /// Initializes the sensor using the current configuration.
    ///
    /// Applies the configured measurement range and starts measurement. The
    /// identity check is left to the caller ([`check_id`](Self::check_id)).
    pub fn init(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        self.set_range(self.config.range)?;
        self.power_on()
    }

    /// Starts measurement by writing the measure value to `POWER_CTL`.
    ///
    /// The whole register is replaced; link, autosleep, and wakeup bits are
    /// not managed by this driver.
    pub fn power_on(&mut self) -> Result<(), CommE> {
        let power = PowerControl::new().with_measure(true);
        self.interface.write_register(REG_POWER_CTL, power.into())
    }

    /// Returns the part to standby, keeping configuration registers intact.
    pub fn standby(&mut self) -> Result<(), CommE> {
        let power = PowerControl::new();
        self.interface.write_register(REG_POWER_CTL, power.into())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the `DEVID` register.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.interface.read_register(REG_DEVID)
    }

    /// Verifies the `DEVID` register against the expected ADXL345 signature.
    pub fn check_id(&mut self) -> Result<(), CommE> {
        let id = self.device_id()?;
        if id != EXPECTED_DEVID {
            return Err(Error::DeviceIdMismatch);
        }

        Ok(())
    }

    // ==================================================================
    // == Range & Gain ==================================================
    // ==================================================================
    /// Selects the measurement range.
    ///
    /// Reads `DATA_FORMAT`, replaces only the two range bits, and writes the
    /// register back. The stored range (and with it the gain) changes only
    /// after the write lands.
    pub fn set_range(&mut self, range: Range) -> Result<(), CommE> {
        let current = self.interface.read_register(REG_DATA_FORMAT)?;

        let updated = u8::from(DataFormat::from(current).with_range(range.code()));
        if updated != current {
            self.interface.write_register(REG_DATA_FORMAT, updated)?;
        }

        self.config.range = range;
        Ok(())
    }

    /// Permissive numeric range setter for callers holding a plain
    /// magnitude.
    ///
    /// Values outside {2, 4, 8, 16} leave both the register and the stored
    /// gain untouched.
    pub fn set_range_g(&mut self, g: u16) -> Result<(), CommE> {
        match Range::from_g(g) {
            Some(range) => self.set_range(range),
            None => Ok(()),
        }
    }

    /// Reads the measurement range back from the device.
    pub fn get_range(&mut self) -> Result<Range, CommE> {
        let raw = self.interface.read_register(REG_DATA_FORMAT)?;

        let code = raw & RANGE_BITS_MASK;
        Range::from_code(code).ok_or(Error::InvalidRangeCode(code))
    }

    /// Returns the currently configured range (driver-side state).
    pub fn range(&self) -> Range {
        self.config.range
    }

    /// Returns the current scale factor in g per LSB.
    pub fn gain(&self) -> f32 {
        self.config.range.gain()
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    #[inline]
    fn unpack_axis(low: u8, high: u8) -> i16 {
        // Data registers hold 16-bit two's complement, low byte first.
        i16::from_le_bytes([low, high])
    }

    /// Reads a raw acceleration triplet.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        let mut raw = [0u8; RAW_AXIS_BYTES];
        self.interface.read_many(REG_DATAX0, &mut raw)?;

        Ok([
            Self::unpack_axis(raw[0], raw[1]),
            Self::unpack_axis(raw[2], raw[3]),
            Self::unpack_axis(raw[4], raw[5]),
        ])
    }

    /// Reads acceleration scaled to g at the current gain.
    ///
    /// Returns an owned snapshot; retaining it across later reads is safe.
    /// Measurement state is not checked first — a part still in standby
    /// yields whatever its data registers hold.
    pub fn read_acceleration(&mut self) -> Result<AxisReading, CommE> {
        let raw = self.read_xyz_raw()?;
        let gain = self.gain();

        Ok(AxisReading {
            x: raw[0] as f32 * gain,
            y: raw[1] as f32 * gain,
            z: raw[2] as f32 * gain,
        })
    }
}
