//! Error handling primitives for the ADXL345 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus controller.
    Interface(E),
    /// A single transaction attempt exceeded its timeout window.
    Timeout,
    /// The bus stopped accepting bytes before the full buffer was delivered.
    ShortWrite {
        /// Total number of bytes the operation was asked to deliver.
        requested: usize,
        /// Number of bytes the device acknowledged before progress stalled.
        written: usize,
    },
    /// The bus returned fewer bytes than requested.
    ShortRead {
        /// Number of bytes the operation was asked to read.
        requested: usize,
        /// Number of bytes actually received.
        read: usize,
    },
    /// A burst write exceeds the internal staging buffer.
    BurstTooLong {
        /// Requested payload length.
        requested: usize,
        /// Largest supported payload length.
        max: usize,
    },
    /// The `DATA_FORMAT` range field decoded to a value outside the 2-bit map.
    InvalidRangeCode(u8),
    /// The `DEVID` register did not match the ADXL345 signature.
    DeviceIdMismatch,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
