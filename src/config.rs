//! Configuration primitives for the ADXL345 driver.

use crate::bus::{BusAddress, BusConfig, DEFAULT_CLOCK_KHZ, DEFAULT_TIMEOUT_MS};
use crate::params::{Address, Range};

/// User-facing configuration for the ADXL345 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bus address selection (`ALT ADDRESS` strap wiring).
    pub address: Address,
    /// Bus clock rate in kHz.
    pub clock_khz: u32,
    /// Upper bound for a single bus transaction, in milliseconds.
    pub timeout_ms: u32,
    /// Measurement range applied by [`init`](crate::Adxl345::init).
    pub range: Range,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is usable.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.clock_khz == 0 {
            return Err(ConfigError::ZeroClockRate);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    /// Derives the transport-level transaction parameters.
    pub fn bus_config(&self) -> BusConfig {
        BusConfig::new(BusAddress::from(self.address))
            .with_clock_khz(self.clock_khz)
            .with_timeout_ms(self.timeout_ms)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Selects the bus address strap wiring.
    pub fn address(mut self, address: Address) -> Self {
        self.config.address = address;
        self
    }

    /// Overrides the bus clock rate.
    pub fn clock_khz(mut self, clock_khz: u32) -> Self {
        self.config.clock_khz = clock_khz;
        self
    }

    /// Overrides the single-transaction timeout.
    pub fn timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    /// Sets the measurement range applied during initialization.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: Address::Default,
            clock_khz: DEFAULT_CLOCK_KHZ,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            range: Range::G2,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The bus clock rate is zero.
    ZeroClockRate,
    /// The transaction timeout is zero.
    ZeroTimeout,
}
