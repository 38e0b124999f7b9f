//! ee25xx SPI EEPROM opcodes
//!
//! The Microchip ee25xx family uses a small, fixed command set. Each
//! value is a protocol constant from the datasheet, never computed.

// ============================================================================
// Array access
// ============================================================================

/// Read data from the memory array beginning at the selected address
pub const READ: u8 = 0x03;
/// Write data to the memory array beginning at the selected address
pub const WRITE: u8 = 0x02;

// ============================================================================
// Write control
// ============================================================================

/// Reset the write enable latch (disable write operations)
pub const WRDI: u8 = 0x04;
/// Set the write enable latch (enable write operations)
pub const WREN: u8 = 0x06;

// ============================================================================
// Status register operations
// ============================================================================

/// Read the STATUS register
pub const RDSR: u8 = 0x05;
/// Write the STATUS register
pub const WRSR: u8 = 0x01;

// ============================================================================
// Status register bit definitions
// ============================================================================

/// Status register: Write In Progress
pub const SR_WIP: u8 = 0x01;
/// Status register: Write Enable Latch
pub const SR_WEL: u8 = 0x02;
/// Status register: Block Protect bit 0
pub const SR_BP0: u8 = 0x04;
/// Status register: Block Protect bit 1
pub const SR_BP1: u8 = 0x08;
/// Status register: Write Protect Enable
pub const SR_WPEN: u8 = 0x80;
