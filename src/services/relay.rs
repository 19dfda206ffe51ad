//! Relay boards that physically release drinks.
//!
//! The real board drives Linux sysfs GPIO pins; when no GPIO is available the
//! simulated board keeps the same interface with no side effects.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{config::AppConfig, error::DispenserError};

/// Switchable outputs used by the dispenser.
pub trait RelayBoard: Send {
    /// Human readable backend name for logs.
    fn name(&self) -> &'static str;
    /// Pins driven together for a zero-based tier, `None` when unmapped.
    fn tier_switches(&self, tier: usize) -> Option<&[u8]>;
    /// Pin of the shared indicator light.
    fn light_switch(&self) -> Option<u8>;
    /// Close the relay on `pin`.
    fn activate(&mut self, pin: u8) -> Result<(), DispenserError>;
    /// Open the relay on `pin`.
    fn deactivate(&mut self, pin: u8) -> Result<(), DispenserError>;
}

/// Board used when no relay hardware is attached.
#[derive(Debug, Default)]
pub struct SimulatedBoard;

impl RelayBoard for SimulatedBoard {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn tier_switches(&self, _tier: usize) -> Option<&[u8]> {
        None
    }

    fn light_switch(&self) -> Option<u8> {
        None
    }

    fn activate(&mut self, pin: u8) -> Result<(), DispenserError> {
        debug!(pin, "simulated relay on");
        Ok(())
    }

    fn deactivate(&mut self, pin: u8) -> Result<(), DispenserError> {
        debug!(pin, "simulated relay off");
        Ok(())
    }
}

/// Relays wired to sysfs GPIO outputs.
#[derive(Debug)]
pub struct GpioBoard {
    root: PathBuf,
    tier_pins: Vec<Vec<u8>>,
    light_pin: u8,
}

impl GpioBoard {
    /// Export every configured pin as an output, switched off.
    pub fn open(
        root: impl Into<PathBuf>,
        tier_pins: Vec<Vec<u8>>,
        light_pin: u8,
    ) -> io::Result<Self> {
        let board = Self {
            root: root.into(),
            tier_pins,
            light_pin,
        };
        for pin in board.all_pins() {
            board.export(pin)?;
            board.write_value(pin, false)?;
        }
        Ok(board)
    }

    fn all_pins(&self) -> Vec<u8> {
        let mut pins: Vec<u8> = self.tier_pins.iter().flatten().copied().collect();
        pins.push(self.light_pin);
        pins.sort_unstable();
        pins.dedup();
        pins
    }

    fn pin_dir(&self, pin: u8) -> PathBuf {
        self.root.join(format!("gpio{pin}"))
    }

    fn export(&self, pin: u8) -> io::Result<()> {
        if !self.pin_dir(pin).exists() {
            fs::write(self.root.join("export"), pin.to_string())?;
        }
        fs::write(self.pin_dir(pin).join("direction"), "out")
    }

    fn write_value(&self, pin: u8, on: bool) -> io::Result<()> {
        fs::write(self.pin_dir(pin).join("value"), if on { "1" } else { "0" })
    }
}

impl RelayBoard for GpioBoard {
    fn name(&self) -> &'static str {
        "gpio"
    }

    fn tier_switches(&self, tier: usize) -> Option<&[u8]> {
        self.tier_pins.get(tier).map(Vec::as_slice)
    }

    fn light_switch(&self) -> Option<u8> {
        Some(self.light_pin)
    }

    fn activate(&mut self, pin: u8) -> Result<(), DispenserError> {
        self.write_value(pin, true)
            .map_err(|source| DispenserError::Gpio { pin, source })
    }

    fn deactivate(&mut self, pin: u8) -> Result<(), DispenserError> {
        self.write_value(pin, false)
            .map_err(|source| DispenserError::Gpio { pin, source })
    }
}

impl Drop for GpioBoard {
    fn drop(&mut self) {
        for pin in self.all_pins() {
            if let Err(err) = self.write_value(pin, false) {
                warn!(pin, error = %err, "failed to switch relay off on shutdown");
            }
        }
    }
}

/// Pick the GPIO board when the sysfs interface is present and usable,
/// the simulated board otherwise.
pub fn probe(config: &AppConfig) -> Box<dyn RelayBoard> {
    probe_at(&config.gpio_root, config.tier_pins.clone(), config.light_pin)
}

fn probe_at(root: &Path, tier_pins: Vec<Vec<u8>>, light_pin: u8) -> Box<dyn RelayBoard> {
    if !root.join("export").exists() {
        info!(root = %root.display(), "no GPIO interface found; dispensing in simulation mode");
        return Box::new(SimulatedBoard);
    }
    match GpioBoard::open(root, tier_pins, light_pin) {
        Ok(board) => {
            info!(root = %root.display(), "relay board ready");
            Box::new(board)
        }
        Err(err) => {
            warn!(
                root = %root.display(),
                error = %err,
                "failed to claim GPIO pins; dispensing in simulation mode"
            );
            Box::new(SimulatedBoard)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use uuid::Uuid;

    fn fake_sysfs(pins: &[u8]) -> PathBuf {
        let root = env::temp_dir().join(format!("whiskey-ball-gpio-{}", Uuid::new_v4()));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("export"), "").unwrap();
        for pin in pins {
            fs::create_dir_all(root.join(format!("gpio{pin}"))).unwrap();
        }
        root
    }

    fn read_value(root: &Path, pin: u8) -> String {
        fs::read_to_string(root.join(format!("gpio{pin}/value"))).unwrap()
    }

    #[test]
    fn missing_sysfs_selects_simulation() {
        let root = env::temp_dir().join(format!("whiskey-ball-none-{}", Uuid::new_v4()));
        let board = probe_at(&root, vec![vec![1]], 2);
        assert_eq!(board.name(), "simulated");
        assert!(board.tier_switches(0).is_none());
    }

    #[test]
    fn gpio_board_drives_pin_values() {
        let root = fake_sysfs(&[0, 5, 26]);
        {
            let mut board = GpioBoard::open(&root, vec![vec![0, 5]], 26).unwrap();
            assert_eq!(read_value(&root, 5), "0");
            assert_eq!(fs::read_to_string(root.join("gpio5/direction")).unwrap(), "out");

            board.activate(5).unwrap();
            assert_eq!(read_value(&root, 5), "1");
            assert_eq!(board.tier_switches(0), Some(&[0u8, 5][..]));
            assert_eq!(board.light_switch(), Some(26));
        }
        assert_eq!(read_value(&root, 5), "0");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn unusable_pins_fall_back_to_simulation() {
        // export is a plain file, so no gpioN directory ever appears
        let root = fake_sysfs(&[]);
        let board = probe_at(&root, vec![vec![7]], 8);
        assert_eq!(board.name(), "simulated");
        fs::remove_dir_all(root).unwrap();
    }
}
