//! CLI argument parsing

use crate::programmers;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a string as a hex or decimal u16
fn parse_hex_u16(s: &str) -> Result<u16, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u16>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Generate dynamic help text for the programmer argument
fn programmer_help() -> String {
    format!(
        "Programmer to use [available: {}]",
        programmers::programmer_names_short()
    )
}

#[derive(Parser)]
#[command(name = "eeprog")]
#[command(author, version, about = "ee25xx SPI EEPROM programmer", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub part: PartArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Physical parameters of the attached part, overriding the
/// 25LC160-class defaults
#[derive(clap::Args, Debug, Clone)]
pub struct PartArgs {
    /// EEPROM size in bytes
    #[arg(long, default_value_t = 2048, global = true)]
    pub size: usize,

    /// Page size in bytes
    #[arg(long, default_value_t = 16, global = true)]
    pub page_size: usize,

    /// Internal write cycle (settle) time in milliseconds
    #[arg(long, default_value_t = 10, global = true)]
    pub write_cycle_ms: u32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read and print the status register
    Status {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,
    },

    /// Read EEPROM contents
    Read {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,

        /// Start address (hex with 0x prefix, or decimal)
        #[arg(short, long, value_parser = parse_hex_u16, default_value = "0x0000")]
        address: u16,

        /// Number of bytes to read (defaults to the rest of the array)
        #[arg(short, long)]
        length: Option<usize>,

        /// Output file (hex dump to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a file to the EEPROM
    Write {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,

        /// Start address (hex with 0x prefix, or decimal)
        #[arg(short, long, value_parser = parse_hex_u16, default_value = "0x0000")]
        address: u16,

        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Read back and compare after writing
        #[arg(long)]
        verify: bool,
    },

    /// Write a test page and read it back (the classic demo loop)
    Exercise {
        /// Programmer to use
        #[arg(short, long, help = programmer_help())]
        programmer: String,

        /// Number of write/read iterations
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: u32,
    },
}
