//! Error types for eeprog-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // SPI errors
    /// SPI transfer failed at the transport layer
    SpiTransferFailed,
    /// General master/transport error
    MasterError,
    /// Opcode is not part of the ee25xx command set
    OpcodeNotSupported,

    // Argument errors
    /// Write length is zero or exceeds the page size
    InvalidLength,
    /// Address plus payload length would cross a page boundary
    PageBoundaryCrossed,
    /// Address is beyond the device size
    AddressOutOfBounds,

    // Concurrency errors
    /// A shared master's lock was poisoned by a panicking holder
    LockPoisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpiTransferFailed => write!(f, "SPI transfer failed"),
            Self::MasterError => write!(f, "SPI master error"),
            Self::OpcodeNotSupported => write!(f, "opcode not in the ee25xx command set"),
            Self::InvalidLength => write!(f, "invalid write length for page-bounded operation"),
            Self::PageBoundaryCrossed => write!(f, "write would cross a page boundary"),
            Self::AddressOutOfBounds => write!(f, "address out of bounds"),
            Self::LockPoisoned => write!(f, "shared master lock poisoned"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
