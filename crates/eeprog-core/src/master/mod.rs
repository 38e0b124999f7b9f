//! SPI master trait definitions
//!
//! These traits use `maybe_async` to support both sync and async modes.
//! - By default, traits are async (suitable for Embassy, tokio)
//! - With the `is_sync` feature, traits become synchronous

pub mod bitbang;

use crate::error::Result;
use crate::spi::EepromCommand;
use maybe_async::maybe_async;

/// SPI master trait (sync or async depending on `is_sync` feature)
///
/// A master executes one [`EepromCommand`] per `execute` call as a
/// single chip-select framed transaction: the select line is asserted
/// before the first byte and deasserted after the last, with no other
/// traffic in between. Implementations must deassert the select line
/// even when the transfer fails partway, so the device is never left
/// in a partially-addressed state.
///
/// Framing is not reentrant: a caller that shares a master across
/// threads must serialize whole transactions, e.g. through the
/// [`Arc<Mutex<M>>`](std::sync::Mutex) impl provided under `std`.
#[maybe_async(AFIT)]
pub trait SpiMaster {
    /// Get the maximum number of bytes that can be read in a single transaction
    fn max_read_len(&self) -> usize;

    /// Get the maximum number of bytes that can be written in a single transaction
    fn max_write_len(&self) -> usize;

    /// Execute a single framed SPI command
    async fn execute(&mut self, cmd: &mut EepromCommand<'_>) -> Result<()>;

    /// Delay for the specified number of microseconds
    ///
    /// Used for the post-write settle time; the delay must block (or
    /// suspend) the caller for at least `us` microseconds.
    async fn delay_us(&mut self, us: u32);
}

// Blanket impl for boxed masters to allow trait objects (sync mode only)
// In async mode, traits with async fn are not object-safe
#[cfg(all(feature = "alloc", feature = "is_sync"))]
impl SpiMaster for alloc::boxed::Box<dyn SpiMaster + Send> {
    fn max_read_len(&self) -> usize {
        (**self).max_read_len()
    }

    fn max_write_len(&self) -> usize {
        (**self).max_write_len()
    }

    fn execute(&mut self, cmd: &mut EepromCommand<'_>) -> Result<()> {
        (**self).execute(cmd)
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }
}

// Shared-master impl: the mutex is held for the whole select..deselect
// frame, so transactions from different threads are totally ordered and
// never interleave bytes on the wire (sync mode only).
#[cfg(all(feature = "std", feature = "is_sync"))]
impl<M: SpiMaster> SpiMaster for std::sync::Arc<std::sync::Mutex<M>> {
    fn max_read_len(&self) -> usize {
        match self.lock() {
            Ok(inner) => inner.max_read_len(),
            Err(_) => 0,
        }
    }

    fn max_write_len(&self) -> usize {
        match self.lock() {
            Ok(inner) => inner.max_write_len(),
            Err(_) => 0,
        }
    }

    fn execute(&mut self, cmd: &mut EepromCommand<'_>) -> Result<()> {
        let mut inner = self.lock().map_err(|_| crate::Error::LockPoisoned)?;
        inner.execute(cmd)
    }

    fn delay_us(&mut self, us: u32) {
        if let Ok(mut inner) = self.lock() {
            inner.delay_us(us);
        }
    }
}

/// Helper function for implementing [`SpiMaster::execute`].
///
/// Most transport implementations follow the same pattern:
/// 1. Build a write buffer from the command header + write data
/// 2. Call an internal transfer method
/// 3. Let the transfer fill the command's read buffer directly
///
/// This function handles step 1, delegating the rest to the provided
/// closure. The closure receives the bytes to clock out and the buffer
/// to clock data into, all within one chip-select frame.
#[cfg(feature = "alloc")]
pub fn default_execute<F>(cmd: &mut EepromCommand<'_>, transfer_fn: F) -> Result<()>
where
    F: FnOnce(&[u8], &mut [u8]) -> Result<()>,
{
    let header_len = cmd.header_len();
    let mut write_data = alloc::vec![0u8; header_len + cmd.write_data.len()];
    cmd.encode_header(&mut write_data);
    write_data[header_len..].copy_from_slice(cmd.write_data);

    transfer_fn(&write_data, cmd.read_buf)
}
