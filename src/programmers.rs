//! Programmer registration and dispatch
//!
//! Programmer strings follow the flashrom convention:
//! `name` or `name:key=value,key=value`.

use eeprog_core::master::SpiMaster;

/// A ready-to-use boxed master handle
pub type BoxedMaster = Box<dyn SpiMaster + Send>;

/// Information about a programmer
pub struct ProgrammerInfo {
    /// Primary name (used for matching)
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
}

/// Get information about all available programmers (enabled at compile time)
#[allow(unused_mut, clippy::vec_init_then_push)]
pub fn available_programmers() -> Vec<ProgrammerInfo> {
    let mut programmers = Vec::new();

    #[cfg(feature = "dummy")]
    programmers.push(ProgrammerInfo {
        name: "dummy",
        description: "In-memory ee25xx emulator for testing",
    });

    #[cfg(feature = "linux-spi")]
    programmers.push(ProgrammerInfo {
        name: "linux_spi",
        description: "Linux spidev interface (dev=/dev/spidevX.Y,spispeed=<kHz>,mode=<0-3>)",
    });

    programmers
}

/// Generate a short list of programmer names for CLI help
pub fn programmer_names_short() -> String {
    let names: Vec<&str> = available_programmers().iter().map(|p| p.name).collect();
    names.join(", ")
}

/// Open a master from a programmer string
pub fn open_master(programmer: &str) -> Result<BoxedMaster, Box<dyn std::error::Error>> {
    let (name, option_str) = match programmer.split_once(':') {
        Some((name, rest)) => (name, rest),
        None => (programmer, ""),
    };

    let options: Vec<(&str, &str)> = option_str
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
        .collect();

    log::debug!("opening programmer {} with options {:?}", name, options);

    match name {
        #[cfg(feature = "dummy")]
        "dummy" => Ok(Box::new(eeprog_dummy::DummyEeprom::new_default())),

        #[cfg(feature = "linux-spi")]
        "linux_spi" | "linux-spi" | "spidev" => eeprog_linux_spi::open_linux_spi(&options),

        _ => Err(format!(
            "Unknown programmer '{}' (available: {})",
            name,
            programmer_names_short()
        )
        .into()),
    }
}
