//! eeprog-linux-spi - Linux spidev transport
//!
//! This crate drives an ee25xx EEPROM through the Linux spidev
//! character device interface (`/dev/spidevX.Y` where X is the bus
//! number and Y is the chip select).
//!
//! # Example
//!
//! ```no_run
//! use eeprog_linux_spi::{LinuxSpi, LinuxSpiConfig};
//! use eeprog_core::device::{Eeprom, EepromConfig};
//!
//! let config = LinuxSpiConfig::new("/dev/spidev0.0")
//!     .with_speed(500_000)
//!     .with_mode(0);
//! let spi = LinuxSpi::open(&config)?;
//!
//! let mut eeprom = Eeprom::new(spi, EepromConfig::default());
//! let status = eeprom.read_status()?;
//! println!("status register: 0x{:02X}", status);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # System Requirements
//!
//! - Linux kernel with spidev support enabled (`CONFIG_SPI_SPIDEV`)
//! - Read/write access to the `/dev/spidevX.Y` device

pub mod device;
pub mod error;

// Re-exports
pub use device::{mode, parse_options, LinuxSpi, LinuxSpiConfig};
pub use error::{LinuxSpiError, Result};

/// Open a Linux SPI device and return a boxed SpiMaster
///
/// This is a convenience function for use in the CLI programmer dispatch.
///
/// # Example Options
///
/// - `dev=/dev/spidev0.0` - Required: device path
/// - `spispeed=500` - Optional: speed in kHz (default: 500)
/// - `mode=0` - Optional: SPI mode 0-3 (default: 0)
pub fn open_linux_spi(
    options: &[(&str, &str)],
) -> std::result::Result<Box<dyn eeprog_core::master::SpiMaster + Send>, Box<dyn std::error::Error>>
{
    let config = parse_options(options)?;
    let spi = LinuxSpi::open(&config)?;
    Ok(Box::new(spi))
}
