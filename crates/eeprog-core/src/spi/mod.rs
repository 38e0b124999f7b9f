//! SPI types and command structures
//!
//! This module provides the ee25xx opcode set, the borrowed-buffer
//! transaction type and the status register decode.

mod command;
pub mod opcodes;
mod status;

pub use command::EepromCommand;
pub use opcodes::*;
pub use status::Status;
