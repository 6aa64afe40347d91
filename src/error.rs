//! Errors that can occur when using the MS5540C device.
//!
//! The sensor protocol has no status register and no checksum, so the only thing that can fail
//! is the serial transport itself. [`Ms5540cError`] is generic over that transport's error type.

use core::fmt::{Debug, Display, Formatter};

/// This represents all possible errors that can occur when using the MS5540C device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ms5540cError<BusError> {
    /// An error has occurred in the underlying SPI driver.
    ///
    /// The transaction that was in flight is abandoned. No retry is attempted by the driver.
    Bus(BusError),
}

/// Type alias used to simplify return types throughout the driver
pub type Ms5540cResult<T, BusError> = Result<T, Ms5540cError<BusError>>;

impl<BusError> Ms5540cError<BusError> {
    /// Returns the error reported by the transport.
    pub fn into_inner(self) -> BusError {
        match self {
            Ms5540cError::Bus(e) => e,
        }
    }
}

impl<BusError: Debug> Display for Ms5540cError<BusError> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Ms5540cError::Bus(e) => write!(f, "serial transport failure: {:?}", e),
        }
    }
}

impl<BusError: core::error::Error + 'static> core::error::Error for Ms5540cError<BusError> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Ms5540cError::Bus(e) => Some(e),
        }
    }
}
