//! SPI command structure

/// A single framed SPI transaction
///
/// Designed to avoid allocation - uses slices for data. The lifetime
/// parameter `'a` ties the command to the buffers it references.
///
/// One `EepromCommand` corresponds to exactly one chip-select assertion
/// period on the wire: opcode, optional 16-bit address, optional write
/// payload clocked out, optional read bytes clocked in.
pub struct EepromCommand<'a> {
    /// The opcode byte
    pub opcode: u8,

    /// Address (if any), 16-bit offset into the linear byte space
    pub address: Option<u16>,

    /// Data to write after opcode/address
    pub write_data: &'a [u8],

    /// Buffer to read into (mutable)
    pub read_buf: &'a mut [u8],
}

impl<'a> EepromCommand<'a> {
    /// Create a command with no address or data (WREN, WRDI)
    pub fn simple(opcode: u8) -> Self {
        Self {
            opcode,
            address: None,
            write_data: &[],
            read_buf: &mut [],
        }
    }

    /// Create a read register command with no address (RDSR)
    pub fn read_reg(opcode: u8, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: None,
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create a write register command with no address (WRSR)
    pub fn write_reg(opcode: u8, data: &'a [u8]) -> Self {
        Self {
            opcode,
            address: None,
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Create an addressed read command (READ)
    pub fn read_at(opcode: u8, addr: u16, buf: &'a mut [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            write_data: &[],
            read_buf: buf,
        }
    }

    /// Create an addressed write command (WRITE)
    pub fn write_at(opcode: u8, addr: u16, data: &'a [u8]) -> Self {
        Self {
            opcode,
            address: Some(addr),
            write_data: data,
            read_buf: &mut [],
        }
    }

    /// Returns true if this command has a read phase
    pub fn has_read(&self) -> bool {
        !self.read_buf.is_empty()
    }

    /// Returns true if this command has a write phase
    pub fn has_write(&self) -> bool {
        !self.write_data.is_empty()
    }

    /// Length of the header (opcode plus address bytes)
    pub fn header_len(&self) -> usize {
        if self.address.is_some() {
            3
        } else {
            1
        }
    }

    /// Encode the header into `buf`
    ///
    /// The ee25xx sends the address low byte first, then the high byte,
    /// after the opcode. `buf` must be at least `header_len()` bytes.
    pub fn encode_header(&self, buf: &mut [u8]) {
        buf[0] = self.opcode;
        if let Some(addr) = self.address {
            buf[1] = addr as u8;
            buf[2] = (addr >> 8) as u8;
        }
    }

    /// Total number of bytes clocked during this transaction
    pub fn total_bytes(&self) -> usize {
        self.header_len() + self.write_data.len() + self.read_buf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::opcodes;

    #[test]
    fn header_encodes_address_low_byte_first() {
        let cmd = EepromCommand::write_at(opcodes::WRITE, 0x1234, &[0xAA]);
        let mut header = [0u8; 3];
        cmd.encode_header(&mut header);
        assert_eq!(header, [0x02, 0x34, 0x12]);
    }

    #[test]
    fn simple_command_has_one_byte_header() {
        let cmd = EepromCommand::simple(opcodes::WREN);
        assert_eq!(cmd.header_len(), 1);
        assert_eq!(cmd.total_bytes(), 1);
        let mut header = [0u8; 1];
        cmd.encode_header(&mut header);
        assert_eq!(header, [0x06]);
    }

    #[test]
    fn read_command_counts_clocked_in_bytes() {
        let mut buf = [0u8; 16];
        let cmd = EepromCommand::read_at(opcodes::READ, 0x0000, &mut buf);
        assert_eq!(cmd.header_len(), 3);
        assert_eq!(cmd.total_bytes(), 19);
        assert!(cmd.has_read());
        assert!(!cmd.has_write());
    }
}
