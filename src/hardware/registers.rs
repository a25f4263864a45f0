//! ArduChip register map and single-bit read-modify-write helpers.
//!
//! The helpers are generic over the register word so the same code serves
//! 8-bit register files and wider ones (32-bit port registers on ARM hosts).

use core::ops::{BitAnd, BitOr, Not};

use crate::hardware::bus::BusError;

// ArduChip registers
pub const ARDUCHIP_TEST1: u8 = 0x00;
pub const ARDUCHIP_FIFO: u8 = 0x04;
pub const ARDUCHIP_RESET: u8 = 0x07;
pub const ARDUCHIP_TRIG: u8 = 0x41;
pub const FIFO_SIZE1: u8 = 0x42;
pub const FIFO_SIZE2: u8 = 0x43;
pub const FIFO_SIZE3: u8 = 0x44;

/// Command byte that starts a sequential FIFO read.
pub const BURST_FIFO_READ: u8 = 0x3C;
/// Bit 7 of the address byte marks a register write.
pub const ARDUCHIP_WRITE_FLAG: u8 = 0x80;

// ARDUCHIP_FIFO bits
pub const FIFO_CLEAR_MASK: u8 = 0x01;
pub const FIFO_START_MASK: u8 = 0x02;
pub const FIFO_RDPTR_RST_MASK: u8 = 0x10;
pub const FIFO_WRPTR_RST_MASK: u8 = 0x20;

// ARDUCHIP_TRIG bits
pub const VSYNC_MASK: u8 = 0x01;
pub const SHUTTER_MASK: u8 = 0x02;
pub const CAP_DONE_MASK: u8 = 0x08;

// ARDUCHIP_RESET values
pub const CPLD_RESET_ASSERT: u8 = 0x80;
pub const CPLD_RESET_RELEASE: u8 = 0x00;

/// Value written to the test register during bring-up.
pub const TEST_PATTERN: u8 = 0x55;

/// FIFO length registers report 23 significant bits.
pub const FIFO_LENGTH_MASK: u32 = 0x7F_FFFF;
/// Capacity of the Mini 2MP frame buffer (384 KiB).
pub const MAX_FIFO_SIZE: u32 = 0x5_FFFF;

/// A register word: `u8` on AVR-class parts, wider elsewhere.
pub trait RegisterWord:
    Copy + PartialEq + BitAnd<Output = Self> + BitOr<Output = Self> + Not<Output = Self>
{
    const ZERO: Self;
}

impl RegisterWord for u8 {
    const ZERO: Self = 0;
}

impl RegisterWord for u16 {
    const ZERO: Self = 0;
}

impl RegisterWord for u32 {
    const ZERO: Self = 0;
}

/// Byte-addressed register file.
pub trait RegisterAccess {
    type Word: RegisterWord;

    fn read_register(&mut self, address: u8) -> Result<Self::Word, BusError>;
    fn write_register(&mut self, address: u8, value: Self::Word) -> Result<(), BusError>;
}

/// Sets the bits in `mask` at `address`.
pub fn set_bit<R: RegisterAccess>(regs: &mut R, address: u8, mask: R::Word) -> Result<(), BusError> {
    let value = regs.read_register(address)?;
    regs.write_register(address, value | mask)
}

/// Clears the bits in `mask` at `address`.
pub fn clear_bit<R: RegisterAccess>(regs: &mut R, address: u8, mask: R::Word) -> Result<(), BusError> {
    let value = regs.read_register(address)?;
    regs.write_register(address, value & !mask)
}

/// Returns the masked bits at `address`; zero means none are set.
pub fn get_bit<R: RegisterAccess>(regs: &mut R, address: u8, mask: R::Word) -> Result<R::Word, BusError> {
    Ok(regs.read_register(address)? & mask)
}

/// True if any bit of `mask` is set at `address`.
pub fn is_bit_set<R: RegisterAccess>(regs: &mut R, address: u8, mask: R::Word) -> Result<bool, BusError> {
    Ok(get_bit(regs, address, mask)? != R::Word::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 32bit ワードのレジスタファイル
    struct WideRegisters {
        regs: [u32; 4],
        writes: usize,
    }

    impl RegisterAccess for WideRegisters {
        type Word = u32;

        fn read_register(&mut self, address: u8) -> Result<u32, BusError> {
            Ok(self.regs[address as usize])
        }

        fn write_register(&mut self, address: u8, value: u32) -> Result<(), BusError> {
            self.writes += 1;
            self.regs[address as usize] = value;
            Ok(())
        }
    }

    struct NarrowRegisters {
        regs: [u8; 4],
    }

    impl RegisterAccess for NarrowRegisters {
        type Word = u8;

        fn read_register(&mut self, address: u8) -> Result<u8, BusError> {
            Ok(self.regs[address as usize])
        }

        fn write_register(&mut self, address: u8, value: u8) -> Result<(), BusError> {
            self.regs[address as usize] = value;
            Ok(())
        }
    }

    #[test]
    fn test_set_and_clear_preserve_other_bits() {
        let mut narrow = NarrowRegisters { regs: [0x81, 0, 0, 0] };
        set_bit(&mut narrow, 0, 0x08).unwrap();
        assert_eq!(narrow.regs[0], 0x89);
        clear_bit(&mut narrow, 0, 0x80).unwrap();
        assert_eq!(narrow.regs[0], 0x09);
    }

    #[test]
    fn test_wide_registers_keep_upper_bits() {
        let mut wide = WideRegisters { regs: [0xDEAD_0000, 0, 0, 0], writes: 0 };
        set_bit(&mut wide, 0, 0x0000_0010).unwrap();
        assert_eq!(wide.regs[0], 0xDEAD_0010);
        clear_bit(&mut wide, 0, 0x0000_0010).unwrap();
        assert_eq!(wide.regs[0], 0xDEAD_0000);
        assert_eq!(wide.writes, 2);
    }

    #[test]
    fn test_get_bit_masks() {
        let mut narrow = NarrowRegisters { regs: [0, CAP_DONE_MASK | VSYNC_MASK, 0, 0] };
        assert_eq!(get_bit(&mut narrow, 1, CAP_DONE_MASK).unwrap(), CAP_DONE_MASK);
        assert!(is_bit_set(&mut narrow, 1, CAP_DONE_MASK).unwrap());
        assert!(!is_bit_set(&mut narrow, 1, SHUTTER_MASK).unwrap());

        let mut wide = WideRegisters { regs: [0, 0x8000_0000, 0, 0], writes: 0 };
        assert!(is_bit_set(&mut wide, 1, 0x8000_0000).unwrap());
        assert!(!is_bit_set(&mut wide, 1, 0x1).unwrap());
    }
}
