//! eeprog-core - Core library for ee25xx SPI EEPROM access
//!
//! This crate implements the command protocol of the Microchip ee25xx
//! family of SPI serial EEPROMs: opcode encoding, 16-bit addressing,
//! chip-select framed transactions, write-enable latch control and the
//! post-write settle time. It is designed to be `no_std` compatible for
//! use in embedded environments.
//!
//! # Features
//!
//! - `std` - Enable standard library support (includes `alloc`)
//! - `alloc` - Enable heap allocation for the transfer helpers
//! - `is_sync` - Compile the async seams as blocking/synchronous code
//!
//! # Example
//!
//! ```ignore
//! use eeprog_core::device::{Eeprom, EepromConfig};
//!
//! let mut eeprom = Eeprom::new(master, EepromConfig::default());
//! eeprom.write_enable()?;
//! eeprom.write_page(0x0000, &page)?;
//! let mut buf = [0u8; 16];
//! eeprom.read_page(0x0000, &mut buf)?;
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
// Allow async fn in traits - we use maybe-async for dual sync/async support
#![allow(async_fn_in_trait)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod device;
pub mod error;
pub mod master;
pub mod protocol;
pub mod spi;

pub use error::{Error, Result};
