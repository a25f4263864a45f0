//! Bus access layer.
//!
//! The ArduCAM Mini exposes two buses:
//! - the capture bus (SPI, chip-select gated) reaching the ArduChip register
//!   file and its frame FIFO
//! - the control bus (SCCB, an I2C dialect) reaching the OV2640 sensor registers
//!
//! Chip-select is held by a guard for every capture-bus transaction and released
//! when the guard goes out of scope, so no exit path can leave the ArduChip
//! mid-transaction.

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, I2c};
use embedded_hal::spi::{self, SpiBus};
use log::{debug, warn};

use crate::hardware::registers::{RegisterAccess, ARDUCHIP_WRITE_FLAG, BURST_FIFO_READ};

/// OV2640 の SCCB 7bit アドレス (0x60 >> 1)
pub const OV2640_SCCB_ADDR: u8 = 0x30;

/// バス通信エラー
///
/// HAL 固有のエラーは `embedded-hal` の `ErrorKind` に変換して保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    /// SPI (capture bus) transfer failed
    #[error("capture bus transfer failed: {0:?}")]
    Spi(spi::ErrorKind),
    /// I2C/SCCB (control bus) transfer failed
    #[error("control bus transfer failed: {0:?}")]
    I2c(i2c::ErrorKind),
    /// The chip-select line could not be driven
    #[error("chip-select could not be driven: {0:?}")]
    ChipSelect(digital::ErrorKind),
}

impl BusError {
    /// 一時的な NACK でリトライ可能かどうか
    pub fn is_nack(&self) -> bool {
        matches!(self, BusError::I2c(i2c::ErrorKind::NoAcknowledge(_)))
    }
}

fn spi_error<E: spi::Error>(e: E) -> BusError {
    BusError::Spi(e.kind())
}

fn cs_error<E: digital::Error>(e: E) -> BusError {
    BusError::ChipSelect(e.kind())
}

fn i2c_error<E: i2c::Error>(e: E) -> BusError {
    BusError::I2c(e.kind())
}

/// Asserted chip-select. Deasserts on drop.
struct ChipSelect<'a, CS: OutputPin> {
    pin: &'a mut CS,
    released: bool,
}

impl<'a, CS: OutputPin> ChipSelect<'a, CS> {
    fn assert(pin: &'a mut CS) -> Result<Self, BusError> {
        pin.set_low().map_err(cs_error)?;
        Ok(Self { pin, released: false })
    }

    /// Releases the line and reports whether the pin accepted it.
    fn release(mut self) -> Result<(), BusError> {
        self.released = true;
        self.pin.set_high().map_err(cs_error)
    }
}

impl<CS: OutputPin> Drop for ChipSelect<'_, CS> {
    fn drop(&mut self) {
        if !self.released && self.pin.set_high().is_err() {
            warn!("chip-select release failed on abort path");
        }
    }
}

/// ArduChip へのアクセス (SPI + CS)
///
/// Register addresses carry the write flag in bit 7, as the ArduChip expects.
pub struct ArduChipBus<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> ArduChipBus<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Takes ownership of the SPI bus and the chip-select pin.
    ///
    /// The pin is driven high (idle) before returning.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, BusError> {
        cs.set_high().map_err(cs_error)?;
        Ok(Self { spi, cs })
    }

    /// Raw bus write: one address byte followed by one data byte.
    pub fn bus_write(&mut self, address: u8, value: u8) -> Result<(), BusError> {
        let cs = ChipSelect::assert(&mut self.cs)?;
        self.spi.write(&[address, value]).map_err(spi_error)?;
        self.spi.flush().map_err(spi_error)?;
        cs.release()
    }

    /// Raw bus read: one address byte out, one data byte back.
    pub fn bus_read(&mut self, address: u8) -> Result<u8, BusError> {
        let cs = ChipSelect::assert(&mut self.cs)?;
        let mut frame = [address, 0x00];
        self.spi.transfer_in_place(&mut frame).map_err(spi_error)?;
        self.spi.flush().map_err(spi_error)?;
        cs.release()?;
        Ok(frame[1])
    }

    /// レジスタ書き込み
    pub fn write_reg(&mut self, address: u8, value: u8) -> Result<(), BusError> {
        self.bus_write(address | ARDUCHIP_WRITE_FLAG, value)
    }

    /// レジスタ読み込み
    pub fn read_reg(&mut self, address: u8) -> Result<u8, BusError> {
        self.bus_read(address & !ARDUCHIP_WRITE_FLAG)
    }

    /// Switches the bus into sequential FIFO read mode.
    ///
    /// Chip-select stays asserted for as long as the returned [`Burst`] lives.
    pub fn burst(&mut self) -> Result<Burst<'_, SPI, CS>, BusError> {
        let cs = ChipSelect::assert(&mut self.cs)?;
        self.spi.write(&[BURST_FIFO_READ]).map_err(spi_error)?;
        debug!("FIFO burst read started");
        Ok(Burst {
            spi: &mut self.spi,
            cs,
            bytes_read: 0,
        })
    }

    /// Returns the owned bus and pin.
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> RegisterAccess for ArduChipBus<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    type Word = u8;

    fn read_register(&mut self, address: u8) -> Result<u8, BusError> {
        self.read_reg(address)
    }

    fn write_register(&mut self, address: u8, value: u8) -> Result<(), BusError> {
        self.write_reg(address, value)
    }
}

/// Source of drained FIFO bytes.
pub trait FifoSource {
    /// Fills `buf` with the next bytes of the frame.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError>;
}

/// An in-progress burst read with chip-select held low.
pub struct Burst<'a, SPI: SpiBus<u8>, CS: OutputPin> {
    spi: &'a mut SPI,
    cs: ChipSelect<'a, CS>,
    bytes_read: u32,
}

impl<SPI: SpiBus<u8>, CS: OutputPin> Burst<'_, SPI, CS> {
    /// Reads a single FIFO byte.
    pub fn read_fifo(&mut self) -> Result<u8, BusError> {
        let mut byte = [0u8];
        self.read_into(&mut byte)?;
        Ok(byte[0])
    }

    /// バースト中に読み出したバイト数
    pub fn bytes_read(&self) -> u32 {
        self.bytes_read
    }

    /// Ends the burst, releasing chip-select.
    pub fn finish(self) -> Result<u32, BusError> {
        let Burst { spi, cs, bytes_read } = self;
        spi.flush().map_err(spi_error)?;
        cs.release()?;
        debug!("FIFO burst read finished after {} bytes", bytes_read);
        Ok(bytes_read)
    }
}

impl<SPI: SpiBus<u8>, CS: OutputPin> FifoSource for Burst<'_, SPI, CS> {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        self.spi.read(buf).map_err(spi_error)?;
        self.bytes_read = self.bytes_read.saturating_add(buf.len() as u32);
        Ok(())
    }
}

/// OV2640 センサーレジスタへのアクセス (SCCB)
pub struct SccbBus<I2C> {
    i2c: I2C,
    address: u8,
    retries: u8,
}

impl<I2C: I2c> SccbBus<I2C> {
    /// Creates a control bus at the OV2640 address with `retries` extra
    /// attempts on NACK.
    pub fn new(i2c: I2C, retries: u8) -> Self {
        Self {
            i2c,
            address: OV2640_SCCB_ADDR,
            retries,
        }
    }

    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Writes one 8-bit sensor register.
    pub fn write_sensor_reg(&mut self, reg: u8, value: u8) -> Result<(), BusError> {
        let address = self.address;
        let i2c = &mut self.i2c;
        with_retries(self.retries, || i2c.write(address, &[reg, value]).map_err(i2c_error))
    }

    /// Reads one 8-bit sensor register.
    ///
    /// SCCB has no repeated start, so the address phase and the read phase are
    /// separate transactions.
    pub fn read_sensor_reg(&mut self, reg: u8) -> Result<u8, BusError> {
        let address = self.address;
        let i2c = &mut self.i2c;
        with_retries(self.retries, || {
            i2c.write(address, &[reg]).map_err(i2c_error)?;
            let mut value = [0u8];
            i2c.read(address, &mut value).map_err(i2c_error)?;
            Ok(value[0])
        })
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// Runs `op`, retrying up to `retries` more times while it fails with a NACK.
fn with_retries<T>(
    retries: u8,
    mut op: impl FnMut() -> Result<T, BusError>,
) -> Result<T, BusError> {
    let mut attempt = 0u8;
    loop {
        match op() {
            Err(e) if e.is_nack() && attempt < retries => {
                attempt += 1;
                warn!("SCCB NACK, retry {}/{}", attempt, retries);
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::NoAcknowledgeSource;

    const NACK: BusError = BusError::I2c(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));

    #[test]
    fn test_retry_recovers_after_transient_nack() {
        let mut failures = 2;
        let result = with_retries(3, || {
            if failures > 0 {
                failures -= 1;
                Err(NACK)
            } else {
                Ok(0x26)
            }
        });
        assert_eq!(result, Ok(0x26));
    }

    #[test]
    fn test_retry_is_bounded() {
        let mut calls = 0;
        let result: Result<(), BusError> = with_retries(3, || {
            calls += 1;
            Err(NACK)
        });
        assert_eq!(result, Err(NACK));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_non_nack_errors_are_not_retried() {
        let mut calls = 0;
        let result: Result<(), BusError> = with_retries(3, || {
            calls += 1;
            Err(BusError::I2c(i2c::ErrorKind::ArbitrationLoss))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
