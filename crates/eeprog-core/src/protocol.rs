//! ee25xx command sequences
//!
//! This module implements the ee25xx command protocol on top of the
//! [`SpiMaster`] seam: one framed transaction per function call.
//!
//! Uses `maybe_async` to support both sync and async modes:
//! - With `is_sync` feature: blocking/synchronous
//! - Without `is_sync` feature: async
//!
//! Latch discipline is deliberately left to the caller: none of the
//! write functions issue WREN themselves, because the write-enable
//! latch must be set in its own framed transaction (the device has one
//! command context per select-assertion period). Without a prior
//! [`write_enable`], the device silently refuses WRITE and WRSR.

use crate::error::{Error, Result};
use crate::master::SpiMaster;
use crate::spi::{opcodes, EepromCommand};
use maybe_async::maybe_async;

/// Send the Write Enable command (WREN alone in one frame)
#[maybe_async]
pub async fn write_enable<M: SpiMaster + ?Sized>(master: &mut M) -> Result<()> {
    let mut cmd = EepromCommand::simple(opcodes::WREN);
    master.execute(&mut cmd).await
}

/// Send the Write Disable command (WRDI alone in one frame)
#[maybe_async]
pub async fn write_disable<M: SpiMaster + ?Sized>(master: &mut M) -> Result<()> {
    let mut cmd = EepromCommand::simple(opcodes::WRDI);
    master.execute(&mut cmd).await
}

/// Read the status register
///
/// Transmits RDSR, then clocks in exactly one byte while the select
/// line stays asserted. The returned bits are not interpreted here.
#[maybe_async]
pub async fn read_status<M: SpiMaster + ?Sized>(master: &mut M) -> Result<u8> {
    let mut buf = [0u8; 1];
    let mut cmd = EepromCommand::read_reg(opcodes::RDSR, &mut buf);
    master.execute(&mut cmd).await?;
    Ok(buf[0])
}

/// Write the status register
///
/// Requires a prior [`write_enable`] in a separate frame.
#[maybe_async]
pub async fn write_status<M: SpiMaster + ?Sized>(master: &mut M, value: u8) -> Result<()> {
    let data = [value];
    let mut cmd = EepromCommand::write_reg(opcodes::WRSR, &data);
    master.execute(&mut cmd).await
}

/// Read `buf.len()` bytes starting at `addr`
///
/// The device advances its internal address sequentially on reads, past
/// page boundaries, so reads may span the full address space. Large
/// reads are chunked by the master's per-transaction limit.
#[maybe_async]
pub async fn read<M: SpiMaster + ?Sized>(master: &mut M, addr: u16, buf: &mut [u8]) -> Result<()> {
    let max_len = master.max_read_len();
    let mut offset = 0;

    while offset < buf.len() {
        let chunk_len = core::cmp::min(max_len, buf.len() - offset);
        let chunk_addr = addr
            .checked_add(offset as u16)
            .ok_or(Error::AddressOutOfBounds)?;
        let chunk = &mut buf[offset..offset + chunk_len];
        let mut cmd = EepromCommand::read_at(opcodes::READ, chunk_addr, chunk);
        master.execute(&mut cmd).await?;
        offset += chunk_len;
    }

    Ok(())
}

/// Check that a write of `len` bytes at `addr` stays within one page
///
/// Unlike reads, the ee25xx wraps within the current page when a write
/// runs past its end, silently corrupting data at the page start. Such
/// writes are rejected here before anything is put on the wire.
pub fn check_page_bounds(page_size: usize, addr: u16, len: usize) -> Result<()> {
    if len == 0 || len > page_size {
        return Err(Error::InvalidLength);
    }
    let start = addr as usize;
    if start / page_size != (start + len - 1) / page_size {
        return Err(Error::PageBoundaryCrossed);
    }
    Ok(())
}

/// Write up to one page of data at `addr`
///
/// Transmits WRITE, the address (low byte first) and the payload in one
/// contiguous frame. Returns [`Error::InvalidLength`] or
/// [`Error::PageBoundaryCrossed`] without any bus traffic if the
/// payload does not fit the page at `addr`.
///
/// Requires a prior [`write_enable`] in a separate frame, and the
/// device needs its write cycle time after the frame before it accepts
/// the next command (imposed by the device layer).
#[maybe_async]
pub async fn write_page<M: SpiMaster + ?Sized>(
    master: &mut M,
    page_size: usize,
    addr: u16,
    data: &[u8],
) -> Result<()> {
    check_page_bounds(page_size, addr, data.len())?;
    if data.len() > master.max_write_len() {
        return Err(Error::InvalidLength);
    }

    let mut cmd = EepromCommand::write_at(opcodes::WRITE, addr, data);
    master.execute(&mut cmd).await
}

/// Write a single byte at `addr`
///
/// Same framing as [`write_page`] with a one-byte payload; a single
/// byte can never cross a page boundary.
#[maybe_async]
pub async fn write_byte<M: SpiMaster + ?Sized>(master: &mut M, addr: u16, value: u8) -> Result<()> {
    let data = [value];
    let mut cmd = EepromCommand::write_at(opcodes::WRITE, addr, &data);
    master.execute(&mut cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_accepts_full_aligned_page() {
        assert_eq!(check_page_bounds(16, 0x0000, 16), Ok(()));
        assert_eq!(check_page_bounds(16, 0x0010, 16), Ok(()));
    }

    #[test]
    fn page_bounds_accepts_partial_page_tail() {
        assert_eq!(check_page_bounds(16, 0x000C, 4), Ok(()));
    }

    #[test]
    fn page_bounds_rejects_crossing() {
        assert_eq!(
            check_page_bounds(16, 0x000C, 5),
            Err(Error::PageBoundaryCrossed)
        );
        assert_eq!(
            check_page_bounds(16, 0x0001, 16),
            Err(Error::PageBoundaryCrossed)
        );
    }

    #[test]
    fn page_bounds_rejects_bad_lengths() {
        assert_eq!(check_page_bounds(16, 0x0000, 0), Err(Error::InvalidLength));
        assert_eq!(check_page_bounds(16, 0x0000, 17), Err(Error::InvalidLength));
    }
}
