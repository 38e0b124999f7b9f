//! Status register decode

use super::opcodes;
use bitflags::bitflags;

bitflags! {
    /// ee25xx status register bits
    ///
    /// The driver surfaces the register as a raw byte; this decode is a
    /// convenience for callers that want to poll the Write In Progress
    /// or Write Enable Latch bits themselves. The driver never branches
    /// on these bits internally.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Status: u8 {
        /// Write In Progress - an internal write cycle is running
        const WIP  = opcodes::SR_WIP;
        /// Write Enable Latch - set by WREN, cleared by WRDI or a
        /// completed write
        const WEL  = opcodes::SR_WEL;
        /// Block Protect bit 0
        const BP0  = opcodes::SR_BP0;
        /// Block Protect bit 1
        const BP1  = opcodes::SR_BP1;
        /// Write Protect Enable
        const WPEN = opcodes::SR_WPEN;
    }
}

impl Status {
    /// True while the device runs its internal write cycle
    pub fn busy(&self) -> bool {
        self.contains(Status::WIP)
    }

    /// True when the write enable latch is set
    pub fn write_enabled(&self) -> bool {
        self.contains(Status::WEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ignores_unassigned_bits() {
        let status = Status::from_bits_truncate(0x42);
        assert!(status.write_enabled());
        assert!(!status.busy());
    }
}
