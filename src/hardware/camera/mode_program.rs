//! Mode programs: ordered, sentinel-terminated register tables.
//!
//! Entry order is significant (bank selects precede the writes that depend on
//! them), so programs are only ever replayed front to back.

use embedded_hal::i2c::I2c;
use log::debug;

use crate::error::{CameraError, CameraResult};
use crate::hardware::bus::SccbBus;

/// One (register, value) pair of a mode program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReg {
    pub reg: u16,
    pub val: u16,
}

impl SensorReg {
    /// End-of-table marker.
    pub const END: SensorReg = SensorReg::new(0xFF, 0xFF);

    pub const fn new(reg: u16, val: u16) -> Self {
        Self { reg, val }
    }

    pub const fn is_sentinel(&self) -> bool {
        self.reg == 0xFF && self.val == 0xFF
    }
}

/// An immutable register table shipped with the driver.
#[derive(Debug, Clone, Copy)]
pub struct ModeProgram {
    name: &'static str,
    regs: &'static [SensorReg],
}

impl ModeProgram {
    pub const fn new(name: &'static str, regs: &'static [SensorReg]) -> Self {
        Self { name, regs }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Entries up to, not including, the sentinel.
    pub fn entries(&self) -> impl Iterator<Item = &'static SensorReg> {
        let regs: &'static [SensorReg] = self.regs;
        regs.iter().take_while(|entry| !entry.is_sentinel())
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks every entry fits an 8-bit register address and value.
    pub fn validate(&self) -> CameraResult<()> {
        match self.entries().find(|e| e.reg > 0xFF || e.val > 0xFF) {
            Some(e) => Err(CameraError::ProgramValueOutOfRange { reg: e.reg, val: e.val }),
            None => Ok(()),
        }
    }

    /// Writes the program to the sensor in table order.
    ///
    /// The table is validated first so a bad entry never leaves the sensor
    /// half programmed.
    pub fn apply<I2C: I2c>(&self, sccb: &mut SccbBus<I2C>) -> CameraResult<()> {
        self.validate()?;
        debug!("applying mode program {} ({} entries)", self.name, self.len());
        for entry in self.entries() {
            sccb.write_sensor_reg(entry.reg as u8, entry.val as u8)?;
        }
        Ok(())
    }
}
