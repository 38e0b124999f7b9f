//! Device-level EEPROM driver
//!
//! [`Eeprom`] owns the SPI master handle and layers bounds checks and
//! the post-write settle delay over the raw [`protocol`](crate::protocol)
//! sequences. There is no other state: each operation is a
//! self-contained transaction, and the write-enable latch lives in the
//! device, not here.

use crate::error::{Error, Result};
use crate::master::SpiMaster;
use crate::protocol;
use crate::spi::Status;
use maybe_async::maybe_async;

/// Physical parameters of the attached EEPROM part
#[derive(Debug, Clone)]
pub struct EepromConfig {
    /// Total size in bytes
    pub size: usize,
    /// Number of bytes per page; depends on the EEPROM model
    pub page_size: usize,
    /// Internal write cycle time in milliseconds
    ///
    /// Applied as a blocking settle delay after every transaction;
    /// conservative for reads and status operations, required after
    /// writes before the device accepts the next command.
    pub write_cycle_ms: u32,
}

impl Default for EepromConfig {
    fn default() -> Self {
        // 25LC160-class part: 2 KiB array, 16-byte pages, 10 ms settle
        Self {
            size: 2048,
            page_size: 16,
            write_cycle_ms: 10,
        }
    }
}

/// Driver handle for an ee25xx SPI EEPROM
///
/// Borrows nothing globally: the master handle is owned by the driver
/// instance and passed by `&mut self` to every operation, so a single
/// handle cannot interleave transactions. To share one bus across
/// threads, wrap the master in `Arc<Mutex<_>>` (see
/// [`SpiMaster`](crate::master::SpiMaster)).
///
/// The device keeps an internal write-enable latch, set by
/// [`write_enable`](Self::write_enable), cleared by
/// [`write_disable`](Self::write_disable) or automatically after a
/// completed write. The driver does not track it; callers must enable
/// before every write operation.
pub struct Eeprom<M> {
    master: M,
    config: EepromConfig,
}

#[maybe_async]
impl<M: SpiMaster> Eeprom<M> {
    /// Create a driver for the given master and part parameters
    pub fn new(master: M, config: EepromConfig) -> Self {
        Self { master, config }
    }

    /// Get the part parameters
    pub fn config(&self) -> &EepromConfig {
        &self.config
    }

    /// Consume the driver and return the master handle
    pub fn into_inner(self) -> M {
        self.master
    }

    /// Set the device's write-enable latch (WREN in its own frame)
    pub async fn write_enable(&mut self) -> Result<()> {
        protocol::write_enable(&mut self.master).await?;
        self.settle().await;
        Ok(())
    }

    /// Clear the device's write-enable latch (WRDI in its own frame)
    pub async fn write_disable(&mut self) -> Result<()> {
        protocol::write_disable(&mut self.master).await?;
        self.settle().await;
        Ok(())
    }

    /// Read the raw status register byte
    pub async fn read_status(&mut self) -> Result<u8> {
        let value = protocol::read_status(&mut self.master).await?;
        self.settle().await;
        Ok(value)
    }

    /// Read the status register and decode the assigned bits
    pub async fn status(&mut self) -> Result<Status> {
        Ok(Status::from_bits_truncate(self.read_status().await?))
    }

    /// Write the status register
    ///
    /// Requires a prior [`write_enable`](Self::write_enable).
    pub async fn write_status(&mut self, value: u8) -> Result<()> {
        protocol::write_status(&mut self.master, value).await?;
        self.settle().await;
        Ok(())
    }

    /// Read `buf.len()` bytes starting at `addr`
    ///
    /// Sequential reads may span page boundaries up to the end of the
    /// array; every call re-reads the device, nothing is cached.
    pub async fn read(&mut self, addr: u16, buf: &mut [u8]) -> Result<()> {
        self.check_range(addr, buf.len())?;
        protocol::read(&mut self.master, addr, buf).await?;
        self.settle().await;
        Ok(())
    }

    /// Read at most one page starting at `addr`
    ///
    /// The buffer must fit within the page containing `addr`.
    pub async fn read_page(&mut self, addr: u16, buf: &mut [u8]) -> Result<()> {
        protocol::check_page_bounds(self.config.page_size, addr, buf.len())?;
        self.read(addr, buf).await
    }

    /// Read a single byte at `addr`
    pub async fn read_byte(&mut self, addr: u16) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read(addr, &mut buf).await?;
        Ok(buf[0])
    }

    /// Write up to one page of data at `addr`
    ///
    /// Rejects payloads that would cross the page boundary before any
    /// bus traffic. Requires a prior
    /// [`write_enable`](Self::write_enable); the settle delay for the
    /// device's internal write cycle is imposed before returning.
    pub async fn write_page(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        self.check_range(addr, data.len())?;
        protocol::write_page(&mut self.master, self.config.page_size, addr, data).await?;
        self.settle().await;
        Ok(())
    }

    /// Write a single byte at `addr`
    ///
    /// Requires a prior [`write_enable`](Self::write_enable).
    pub async fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        self.check_range(addr, 1)?;
        protocol::write_byte(&mut self.master, addr, value).await?;
        self.settle().await;
        Ok(())
    }

    /// Write an arbitrary-length buffer starting at `addr`
    ///
    /// Convenience over [`write_page`](Self::write_page): splits the
    /// data on page boundaries and sets the write-enable latch before
    /// each page frame (the device clears it after every completed
    /// write). Each page gets its own settle delay.
    pub async fn write(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        self.check_range(addr, data.len())?;

        let page_size = self.config.page_size;
        let mut offset = 0;
        while offset < data.len() {
            let chunk_addr = addr as usize + offset;
            let room = page_size - (chunk_addr % page_size);
            let chunk_len = core::cmp::min(room, data.len() - offset);

            log::trace!(
                "write: page chunk at 0x{:04X}, {} bytes",
                chunk_addr,
                chunk_len
            );

            protocol::write_enable(&mut self.master).await?;
            protocol::write_page(
                &mut self.master,
                page_size,
                chunk_addr as u16,
                &data[offset..offset + chunk_len],
            )
            .await?;
            self.settle().await;

            offset += chunk_len;
        }

        Ok(())
    }

    fn check_range(&self, addr: u16, len: usize) -> Result<()> {
        if addr as usize + len > self.config.size {
            return Err(Error::AddressOutOfBounds);
        }
        Ok(())
    }

    async fn settle(&mut self) {
        self.master.delay_us(self.config.write_cycle_ms * 1_000).await;
    }
}
