//! Linux SPI device implementation
//!
//! This module provides the `LinuxSpi` struct that implements the
//! `SpiMaster` trait using Linux's spidev interface. The kernel driver
//! owns the select line: the write-then-read message below is submitted
//! as one `SPI_IOC_MESSAGE`, so chip select stays asserted across both
//! phases and is deasserted by the kernel afterwards - including when
//! the transfer fails partway.

use crate::error::{LinuxSpiError, Result};

use eeprog_core::error::{Error as CoreError, Result as CoreResult};
use eeprog_core::master::{default_execute, SpiMaster};
use eeprog_core::spi::EepromCommand;

use std::fs::{File, OpenOptions};
use std::os::unix::io::AsRawFd;

/// Path to kernel spidev buffer size parameter
const BUF_SIZE_SYSFS: &str = "/sys/module/spidev/parameters/bufsiz";

/// Default SPI clock speed in Hz (500 kHz, conservative for ee25xx parts)
const DEFAULT_SPEED_HZ: u32 = 500_000;

/// Worst-case header: opcode plus two address bytes
const HEADER_LEN: usize = 3;

/// SPI mode constants
pub mod mode {
    /// SPI mode 0: CPOL=0, CPHA=0 (ee25xx default)
    pub const MODE_0: u8 = 0;
    /// SPI mode 1: CPOL=0, CPHA=1
    pub const MODE_1: u8 = 1;
    /// SPI mode 2: CPOL=1, CPHA=0
    pub const MODE_2: u8 = 2;
    /// SPI mode 3: CPOL=1, CPHA=1
    pub const MODE_3: u8 = 3;
}

/// Linux spidev ioctl constants
mod ioctl {
    use nix::ioctl_write_ptr;

    // SPI ioctl magic number
    const SPI_IOC_MAGIC: u8 = b'k';

    // SPI ioctl type numbers
    const SPI_IOC_TYPE_MODE: u8 = 1;
    const SPI_IOC_TYPE_BITS_PER_WORD: u8 = 3;
    const SPI_IOC_TYPE_MAX_SPEED_HZ: u8 = 4;

    ioctl_write_ptr!(spi_ioc_wr_mode, SPI_IOC_MAGIC, SPI_IOC_TYPE_MODE, u8);
    ioctl_write_ptr!(
        spi_ioc_wr_bits_per_word,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_BITS_PER_WORD,
        u8
    );
    ioctl_write_ptr!(
        spi_ioc_wr_max_speed_hz,
        SPI_IOC_MAGIC,
        SPI_IOC_TYPE_MAX_SPEED_HZ,
        u32
    );

    /// Size of spi_ioc_transfer struct (for 64-bit systems)
    pub const SPI_IOC_TRANSFER_SIZE: usize = 32;

    /// Calculate ioctl number for SPI_IOC_MESSAGE(n)
    ///
    /// SPI_IOC_MESSAGE(n) = _IOW(SPI_IOC_MAGIC, 0, char[n * sizeof(struct spi_ioc_transfer)])
    pub fn spi_ioc_message(n: u8) -> libc::c_ulong {
        let size = (n as usize) * SPI_IOC_TRANSFER_SIZE;
        // _IOC(dir, type, nr, size) = ((dir)<<30)|((size)<<16)|((type)<<8)|(nr)
        ((1u32 << 30) | ((size as u32) << 16) | ((SPI_IOC_MAGIC as u32) << 8)) as libc::c_ulong
    }
}

/// SPI transfer structure for ioctl
/// This must match the kernel's struct spi_ioc_transfer layout
#[repr(C)]
#[derive(Debug, Default, Clone)]
struct SpiIocTransfer {
    tx_buf: u64,
    rx_buf: u64,
    len: u32,
    speed_hz: u32,
    delay_usecs: u16,
    bits_per_word: u8,
    cs_change: u8,
    tx_nbits: u8,
    rx_nbits: u8,
    word_delay_usecs: u8,
    _pad: u8,
}

/// Configuration for opening a Linux SPI device
#[derive(Debug, Clone)]
pub struct LinuxSpiConfig {
    /// Device path (e.g., "/dev/spidev0.0")
    pub device: String,
    /// SPI clock speed in Hz (default: 500 kHz)
    pub speed_hz: u32,
    /// SPI mode (0-3, default: 0)
    pub mode: u8,
}

impl Default for LinuxSpiConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            speed_hz: DEFAULT_SPEED_HZ,
            mode: mode::MODE_0,
        }
    }
}

impl LinuxSpiConfig {
    /// Create a new configuration with the given device path
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            ..Default::default()
        }
    }

    /// Set the SPI clock speed in Hz
    pub fn with_speed(mut self, speed_hz: u32) -> Self {
        self.speed_hz = speed_hz;
        self
    }

    /// Set the SPI mode (0-3)
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }
}

/// Linux SPI master using the spidev interface
pub struct LinuxSpi {
    /// File handle for spidev device
    file: File,
    /// Maximum kernel buffer size
    max_kernel_buf_size: usize,
    /// Current speed in Hz
    speed_hz: u32,
}

impl LinuxSpi {
    /// Open a Linux SPI device with the given configuration
    pub fn open(config: &LinuxSpiConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxSpiError::NoDevice);
        }

        log::debug!("linux_spi: Opening device {}", config.device);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device)
            .map_err(|e| LinuxSpiError::OpenFailed {
                path: config.device.clone(),
                source: e,
            })?;

        let fd = file.as_raw_fd();

        let mode = config.mode;
        unsafe {
            ioctl::spi_ioc_wr_mode(fd, &mode).map_err(|e| LinuxSpiError::SetModeFailed {
                mode,
                source: std::io::Error::from_raw_os_error(e as i32),
            })?;
        }

        let bits: u8 = 8;
        unsafe {
            ioctl::spi_ioc_wr_bits_per_word(fd, &bits).map_err(|e| {
                LinuxSpiError::SetBitsPerWordFailed {
                    bits,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        let speed = config.speed_hz;
        unsafe {
            ioctl::spi_ioc_wr_max_speed_hz(fd, &speed).map_err(|e| {
                LinuxSpiError::SetSpeedFailed {
                    speed,
                    source: std::io::Error::from_raw_os_error(e as i32),
                }
            })?;
        }

        log::info!(
            "linux_spi: Opened {} (mode={}, speed={} kHz)",
            config.device,
            mode,
            speed / 1000
        );

        let max_kernel_buf_size = get_max_kernel_buf_size();
        log::debug!(
            "linux_spi: Max kernel buffer size: {} bytes",
            max_kernel_buf_size
        );

        Ok(Self {
            file,
            max_kernel_buf_size,
            speed_hz: speed,
        })
    }

    /// Open a device with default settings
    pub fn open_device(device: &str) -> Result<Self> {
        Self::open(&LinuxSpiConfig::new(device))
    }

    /// Perform one framed SPI transfer
    ///
    /// Submits a write phase and an optional read phase as a single
    /// `SPI_IOC_MESSAGE`, keeping chip select asserted across both.
    fn spi_transfer(&mut self, write_data: &[u8], read_buf: &mut [u8]) -> Result<()> {
        let fd = self.file.as_raw_fd();

        if write_data.is_empty() {
            return Err(LinuxSpiError::InvalidParameter(
                "Write data cannot be empty".into(),
            ));
        }

        let mut transfers = vec![SpiIocTransfer {
            tx_buf: write_data.as_ptr() as u64,
            rx_buf: 0,
            len: write_data.len() as u32,
            speed_hz: self.speed_hz,
            bits_per_word: 8,
            cs_change: 0, // Keep CS asserted for the read phase
            ..Default::default()
        }];

        if !read_buf.is_empty() {
            transfers.push(SpiIocTransfer {
                tx_buf: 0,
                rx_buf: read_buf.as_mut_ptr() as u64,
                len: read_buf.len() as u32,
                speed_hz: self.speed_hz,
                bits_per_word: 8,
                cs_change: 0,
                ..Default::default()
            });
        }

        let ioctl_num = ioctl::spi_ioc_message(transfers.len() as u8);
        let ret = unsafe { libc::ioctl(fd, ioctl_num, transfers.as_ptr()) };

        if ret < 0 {
            return Err(LinuxSpiError::TransferFailed(
                std::io::Error::last_os_error(),
            ));
        }

        Ok(())
    }

    /// Get current speed setting
    pub fn speed_hz(&self) -> u32 {
        self.speed_hz
    }
}

impl SpiMaster for LinuxSpi {
    fn max_read_len(&self) -> usize {
        self.max_kernel_buf_size.saturating_sub(HEADER_LEN)
    }

    fn max_write_len(&self) -> usize {
        self.max_kernel_buf_size.saturating_sub(HEADER_LEN)
    }

    fn execute(&mut self, cmd: &mut EepromCommand<'_>) -> CoreResult<()> {
        default_execute(cmd, |write_data, read_buf| {
            self.spi_transfer(write_data, read_buf).map_err(|e| {
                log::error!("linux_spi: transfer failed: {}", e);
                CoreError::SpiTransferFailed
            })
        })
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(std::time::Duration::from_micros(us as u64));
    }
}

/// Read the maximum kernel buffer size from sysfs, or use page size as fallback
fn get_max_kernel_buf_size() -> usize {
    if let Ok(content) = std::fs::read_to_string(BUF_SIZE_SYSFS) {
        if let Ok(size) = content.trim().parse::<usize>() {
            if size > 0 {
                log::debug!("linux_spi: Using buffer size {} from sysfs", size);
                return size;
            }
        }
        log::warn!("linux_spi: Invalid buffer size in {}", BUF_SIZE_SYSFS);
    } else {
        log::debug!("linux_spi: Cannot read {}, using page size", BUF_SIZE_SYSFS);
    }

    let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) } as usize;
    log::debug!("linux_spi: Using page size {} as buffer size", page_size);
    page_size
}

/// Parse programmer options from a list of key-value pairs
pub fn parse_options(options: &[(&str, &str)]) -> std::result::Result<LinuxSpiConfig, String> {
    let mut config = LinuxSpiConfig::default();

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "spispeed" => {
                // Parse speed in kHz
                let speed_khz: u32 = value
                    .parse()
                    .map_err(|_| format!("Invalid spispeed value: {}", value))?;
                config.speed_hz = speed_khz * 1000;
            }
            "mode" => {
                let mode: u8 = value
                    .parse()
                    .map_err(|_| format!("Invalid mode value: {}", value))?;
                if mode > 3 {
                    return Err(format!("Invalid SPI mode: {} (must be 0-3)", mode));
                }
                config.mode = mode;
            }
            _ => {
                log::warn!("linux_spi: Unknown option: {}={}", key, value);
            }
        }
    }

    if config.device.is_empty() {
        return Err("No device specified. Use dev=/dev/spidevX.Y".to_string());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_options_accepts_speed_and_mode() {
        let config = parse_options(&[
            ("dev", "/dev/spidev0.0"),
            ("spispeed", "500"),
            ("mode", "0"),
        ])
        .unwrap();
        assert_eq!(config.device, "/dev/spidev0.0");
        assert_eq!(config.speed_hz, 500_000);
        assert_eq!(config.mode, 0);
    }

    #[test]
    fn parse_options_requires_device() {
        assert!(parse_options(&[("spispeed", "500")]).is_err());
    }

    #[test]
    fn parse_options_rejects_bad_mode() {
        assert!(parse_options(&[("dev", "/dev/spidev0.0"), ("mode", "7")]).is_err());
    }
}
