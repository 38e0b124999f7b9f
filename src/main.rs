//! eeprog - an ee25xx SPI EEPROM programmer
//!
//! Drives Microchip ee25xx-family serial EEPROMs through a pluggable
//! SPI master: the Linux spidev interface for real hardware, or an
//! in-memory emulator for trying the tool without a device attached.

mod cli;
mod commands;
mod programmers;

use clap::Parser;
use cli::{Cli, Commands};
use eeprog_core::device::{Eeprom, EepromConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let config = EepromConfig {
        size: cli.part.size,
        page_size: cli.part.page_size,
        write_cycle_ms: cli.part.write_cycle_ms,
    };

    match cli.command {
        Commands::Status { programmer } => {
            let mut eeprom = open_eeprom(&programmer, &config)?;
            commands::run_status(&mut eeprom)
        }
        Commands::Read {
            programmer,
            address,
            length,
            output,
        } => {
            let mut eeprom = open_eeprom(&programmer, &config)?;
            commands::run_read(&mut eeprom, address, length, output.as_deref())
        }
        Commands::Write {
            programmer,
            address,
            input,
            verify,
        } => {
            let mut eeprom = open_eeprom(&programmer, &config)?;
            commands::run_write(&mut eeprom, address, &input, verify)
        }
        Commands::Exercise {
            programmer,
            iterations,
        } => {
            let mut eeprom = open_eeprom(&programmer, &config)?;
            commands::run_exercise(&mut eeprom, iterations)
        }
    }
}

/// Open the selected programmer and wrap it in a driver handle
fn open_eeprom(
    programmer: &str,
    config: &EepromConfig,
) -> Result<Eeprom<programmers::BoxedMaster>, Box<dyn std::error::Error>> {
    let master = programmers::open_master(programmer)?;
    Ok(Eeprom::new(master, config.clone()))
}
