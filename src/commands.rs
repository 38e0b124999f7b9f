//! CLI command implementations

use crate::programmers::BoxedMaster;
use eeprog_core::device::Eeprom;
use std::path::Path;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The page pattern the original exercise loop wrote to the device
const EXERCISE_PAGE: [u8; 16] = [
    0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C,
];

/// Print a buffer as space-separated hex bytes, 16 per line
fn print_data(data: &[u8]) {
    for line in data.chunks(16) {
        let bytes: Vec<String> = line.iter().map(|b| format!("0x{:02X}", b)).collect();
        println!("{}", bytes.join(" "));
    }
}

fn print_status(eeprom: &mut Eeprom<BoxedMaster>) -> CmdResult {
    let raw = eeprom.read_status()?;
    let decoded = eeprog_core::spi::Status::from_bits_truncate(raw);
    println!("Status register: 0x{:02X} ({:?})", raw, decoded);
    Ok(())
}

pub fn run_status(eeprom: &mut Eeprom<BoxedMaster>) -> CmdResult {
    print_status(eeprom)
}

pub fn run_read(
    eeprom: &mut Eeprom<BoxedMaster>,
    address: u16,
    length: Option<usize>,
    output: Option<&Path>,
) -> CmdResult {
    let remaining = eeprom.config().size.saturating_sub(address as usize);
    let length = length.unwrap_or(remaining);

    log::info!("Reading {} bytes from 0x{:04X}", length, address);
    let mut buf = vec![0u8; length];
    eeprom.read(address, &mut buf)?;

    match output {
        Some(path) => {
            std::fs::write(path, &buf)?;
            println!("Wrote {} bytes to {}", buf.len(), path.display());
        }
        None => print_data(&buf),
    }
    Ok(())
}

pub fn run_write(
    eeprom: &mut Eeprom<BoxedMaster>,
    address: u16,
    input: &Path,
    verify: bool,
) -> CmdResult {
    let data = std::fs::read(input)?;

    log::info!(
        "Writing {} bytes from {} at 0x{:04X}",
        data.len(),
        input.display(),
        address
    );
    eeprom.write(address, &data)?;

    if verify {
        let mut readback = vec![0u8; data.len()];
        eeprom.read(address, &mut readback)?;
        if readback != data {
            return Err("verify failed: readback differs from input".into());
        }
        println!("Verified {} bytes", data.len());
    }

    println!("Wrote {} bytes", data.len());
    Ok(())
}

/// The reference demo loop, bounded: write-enable, show status, write a
/// test page at 0x0000, read it back, dump it, write-disable, show
/// status again.
pub fn run_exercise(eeprom: &mut Eeprom<BoxedMaster>, iterations: u32) -> CmdResult {
    println!("Writing and reading a page via SPI...");
    let address = 0x0000;

    for i in 0..iterations {
        log::debug!("exercise iteration {}", i + 1);

        eeprom.write_enable()?;
        print_status(eeprom)?;

        eeprom.write_page(address, &EXERCISE_PAGE)?;
        let mut readback = [0u8; 16];
        eeprom.read_page(address, &mut readback)?;
        print_data(&readback);

        if readback != EXERCISE_PAGE {
            return Err("exercise failed: readback differs from test page".into());
        }

        eeprom.write_disable()?;
        print_status(eeprom)?;
    }

    Ok(())
}
