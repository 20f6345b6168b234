//! Two-wire bus transport with bounded, retried transactions.

pub mod hal;

use crate::error::{Error, Result};
use crate::log::trace;
use crate::params::Address;

/// Default bus clock rate in kHz.
pub const DEFAULT_CLOCK_KHZ: u32 = 400;
/// Default upper bound for a single transaction attempt, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// A validated 7-bit bus address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusAddress(u8);

impl BusAddress {
    /// Creates an address, rejecting values outside the 7-bit range.
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= 0x7F { Some(Self(raw)) } else { None }
    }

    /// Returns the raw 7-bit value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<Address> for BusAddress {
    fn from(address: Address) -> Self {
        // Both strap wirings select a valid 7-bit address.
        Self(address.value())
    }
}

/// Immutable per-device transaction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Target device address.
    pub address: BusAddress,
    /// Bus clock rate in kHz.
    pub clock_khz: u32,
    /// Upper bound for a single transaction attempt, in milliseconds.
    pub timeout_ms: u32,
}

impl BusConfig {
    /// Creates a configuration with the default clock rate and timeout.
    pub const fn new(address: BusAddress) -> Self {
        Self {
            address,
            clock_khz: DEFAULT_CLOCK_KHZ,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the bus clock rate.
    pub const fn with_clock_khz(mut self, clock_khz: u32) -> Self {
        self.clock_khz = clock_khz;
        self
    }

    /// Overrides the single-transaction timeout.
    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Abstraction over a two-wire bus controller executing one bounded
/// transaction at a time.
///
/// Each call is a single blocking transaction limited by
/// [`BusConfig::timeout_ms`]. Implementations report the number of bytes
/// actually transferred; a count short of the buffer length means the window
/// closed before the transfer finished. Controllers that can observe an
/// expired window directly may return [`Error::Timeout`] instead.
pub trait TwoWireBus {
    /// Error type produced by the concrete bus controller.
    type Error;

    /// Executes one write transaction, returning the number of bytes the
    /// device acknowledged.
    fn execute_write(&mut self, config: &BusConfig, buffer: &[u8]) -> Result<usize, Self::Error>;

    /// Executes one read transaction, returning the number of bytes
    /// received.
    fn execute_read(
        &mut self,
        config: &BusConfig,
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error>;
}

/// Owns a bus controller handle bound to one device address.
///
/// Construct exactly one transport per physical device address per bus; the
/// handle is exclusively owned and recovered with [`release`](Self::release).
/// The multi-step operations layered on top of this type are not atomic, so
/// sharing a transport across concurrent callers requires external mutual
/// exclusion scoped to the full logical operation.
pub struct BusTransport<BUS> {
    bus: BUS,
    config: BusConfig,
}

impl<BUS> BusTransport<BUS> {
    /// Creates a transport bound to the given address and parameters.
    pub const fn new(bus: BUS, config: BusConfig) -> Self {
        Self { bus, config }
    }

    /// Returns the transaction parameters this transport was built with.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Consumes the transport and returns the owned bus handle.
    pub fn release(self) -> BUS {
        self.bus
    }
}

impl<BUS, CommE> BusTransport<BUS>
where
    BUS: TwoWireBus<Error = CommE>,
{
    /// Writes the full buffer to the device.
    ///
    /// A transaction that delivers only part of the buffer is followed by a
    /// new transaction carrying exactly the unsent remainder, each attempt
    /// bounded by its own timeout window. An attempt that makes no progress
    /// ends the operation with [`Error::ShortWrite`]; every continuing
    /// attempt advances by at least one byte, so the loop is bounded. An
    /// empty buffer completes without touching the bus.
    pub fn write(&mut self, buffer: &[u8]) -> Result<(), CommE> {
        let mut written = 0;

        while written < buffer.len() {
            let sent = self.bus.execute_write(&self.config, &buffer[written..])?;
            if sent == 0 {
                return Err(Error::ShortWrite {
                    requested: buffer.len(),
                    written,
                });
            }

            written += sent;
            if written < buffer.len() {
                trace!("short write, resuming at {}/{} bytes", written, buffer.len());
            }
        }

        Ok(())
    }

    /// Reads into the full buffer with a single transaction.
    ///
    /// Reads are never retried: a register pointer write must fully land
    /// before a read is meaningful, while a short read signals a bus fault
    /// the transport cannot recover from.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<(), CommE> {
        let count = self.bus.execute_read(&self.config, buffer)?;
        if count < buffer.len() {
            return Err(Error::ShortRead {
                requested: buffer.len(),
                read: count,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::{BusAddress, BusConfig, BusTransport, TwoWireBus};
    use crate::error::{Error, Result};

    #[derive(Clone, Copy)]
    enum TransactionExpectation<'a> {
        Write { expect: &'a [u8], accept: usize },
        Read { fill: &'a [u8] },
    }

    struct ScriptedBus<'a> {
        expectations: &'a [TransactionExpectation<'a>],
        index: usize,
    }

    impl<'a> ScriptedBus<'a> {
        fn new(expectations: &'a [TransactionExpectation<'a>]) -> Self {
            Self {
                expectations,
                index: 0,
            }
        }

        fn next(&mut self) -> TransactionExpectation<'a> {
            let expected = *self
                .expectations
                .get(self.index)
                .expect("unexpected bus transaction");
            self.index += 1;
            expected
        }
    }

    impl<'a> Drop for ScriptedBus<'a> {
        fn drop(&mut self) {
            assert_eq!(
                self.index,
                self.expectations.len(),
                "not all bus expectations consumed"
            );
        }
    }

    impl<'a> TwoWireBus for ScriptedBus<'a> {
        type Error = Infallible;

        fn execute_write(
            &mut self,
            _config: &BusConfig,
            buffer: &[u8],
        ) -> Result<usize, Self::Error> {
            match self.next() {
                TransactionExpectation::Write { expect, accept } => {
                    assert_eq!(buffer, expect, "write buffer mismatch");
                    Ok(accept)
                }
                TransactionExpectation::Read { .. } => panic!("expected a read transaction"),
            }
        }

        fn execute_read(
            &mut self,
            _config: &BusConfig,
            buffer: &mut [u8],
        ) -> Result<usize, Self::Error> {
            match self.next() {
                TransactionExpectation::Read { fill } => {
                    buffer[..fill.len()].copy_from_slice(fill);
                    Ok(fill.len())
                }
                TransactionExpectation::Write { .. } => panic!("expected a write transaction"),
            }
        }
    }

    struct TimedOutBus;

    impl TwoWireBus for TimedOutBus {
        type Error = Infallible;

        fn execute_write(
            &mut self,
            _config: &BusConfig,
            _buffer: &[u8],
        ) -> Result<usize, Self::Error> {
            Err(Error::Timeout)
        }

        fn execute_read(
            &mut self,
            _config: &BusConfig,
            _buffer: &mut [u8],
        ) -> Result<usize, Self::Error> {
            Err(Error::Timeout)
        }
    }

    fn config() -> BusConfig {
        BusConfig::new(BusAddress::new(0x53).unwrap())
    }

    #[test]
    fn write_completes_in_a_single_transaction() {
        let expectations = [TransactionExpectation::Write {
            expect: &[0x31, 0x0B],
            accept: 2,
        }];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        transport.write(&[0x31, 0x0B]).unwrap();
    }

    #[test]
    fn partial_write_retries_with_exact_remainder() {
        // A controller accepting two bytes per window turns a 5-byte write
        // into exactly three transactions totalling 5 bytes.
        let expectations = [
            TransactionExpectation::Write {
                expect: &[1, 2, 3, 4, 5],
                accept: 2,
            },
            TransactionExpectation::Write {
                expect: &[3, 4, 5],
                accept: 2,
            },
            TransactionExpectation::Write {
                expect: &[5],
                accept: 1,
            },
        ];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        transport.write(&[1, 2, 3, 4, 5]).unwrap();
    }

    #[test]
    fn stalled_write_fails_instead_of_spinning() {
        let expectations = [
            TransactionExpectation::Write {
                expect: &[1, 2, 3, 4, 5],
                accept: 2,
            },
            TransactionExpectation::Write {
                expect: &[3, 4, 5],
                accept: 0,
            },
        ];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        assert_eq!(
            transport.write(&[1, 2, 3, 4, 5]),
            Err(Error::ShortWrite {
                requested: 5,
                written: 2
            })
        );
    }

    #[test]
    fn write_that_never_starts_reports_zero_progress() {
        let expectations = [TransactionExpectation::Write {
            expect: &[0x2D],
            accept: 0,
        }];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        assert_eq!(
            transport.write(&[0x2D]),
            Err(Error::ShortWrite {
                requested: 1,
                written: 0
            })
        );
    }

    #[test]
    fn empty_write_is_a_no_op() {
        let expectations: [TransactionExpectation; 0] = [];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        transport.write(&[]).unwrap();
    }

    #[test]
    fn read_fills_the_buffer() {
        let expectations = [TransactionExpectation::Read {
            fill: &[0xAA, 0x55],
        }];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        let mut buffer = [0u8; 2];
        transport.read(&mut buffer).unwrap();
        assert_eq!(buffer, [0xAA, 0x55]);
    }

    #[test]
    fn short_read_is_not_retried() {
        let expectations = [TransactionExpectation::Read { fill: &[0xAA] }];
        let mut transport = BusTransport::new(ScriptedBus::new(&expectations), config());

        let mut buffer = [0u8; 6];
        assert_eq!(
            transport.read(&mut buffer),
            Err(Error::ShortRead {
                requested: 6,
                read: 1
            })
        );
    }

    #[test]
    fn timeout_propagates_unchanged() {
        let mut transport = BusTransport::new(TimedOutBus, config());

        assert_eq!(transport.write(&[0x00]), Err(Error::Timeout));
        let mut buffer = [0u8; 1];
        assert_eq!(transport.read(&mut buffer), Err(Error::Timeout));
    }

    #[test]
    fn bus_address_rejects_out_of_range_values() {
        assert!(BusAddress::new(0x7F).is_some());
        assert!(BusAddress::new(0x80).is_none());
        assert_eq!(BusAddress::new(0x53).unwrap().value(), 0x53);
    }

    #[test]
    fn config_overrides_apply() {
        let config = BusConfig::new(BusAddress::new(0x1D).unwrap())
            .with_clock_khz(100)
            .with_timeout_ms(250);

        assert_eq!(config.address.value(), 0x1D);
        assert_eq!(config.clock_khz, 100);
        assert_eq!(config.timeout_ms, 250);
    }
}
