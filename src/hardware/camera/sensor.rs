//! OV2640 bring-up and mode programming.
//!
//! The sensor itself is reached over SCCB; the ArduChip side of the bring-up
//! (reset pulse and test register check) goes over the capture bus.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;
use log::{debug, info};

use super::mode_program::ModeProgram;
use super::ov2640_regs::{OV2640_COMMON_INIT, OV2640_JPEG, OV2640_QVGA_RGB565, OV2640_YUV422};
use crate::error::{CameraError, CameraResult};
use crate::hardware::bus::{ArduChipBus, SccbBus};
use crate::hardware::registers::{
    ARDUCHIP_RESET, ARDUCHIP_TEST1, CPLD_RESET_ASSERT, CPLD_RESET_RELEASE, TEST_PATTERN,
};

// OV2640 バンク切り替え
pub const REG_BANK_SEL: u8 = 0xFF;
pub const BANK_DSP: u8 = 0x00;
pub const BANK_SENSOR: u8 = 0x01;

// Sensor bank registers
const REG_PIDH: u8 = 0x0A;
const REG_PIDL: u8 = 0x0B;
const REG_COM7: u8 = 0x12;
const REG_COM10: u8 = 0x15;
const COM7_SRST: u8 = 0x80;

pub const OV2640_VID: u8 = 0x26;
pub const OV2640_PIDS: [u8; 2] = [0x41, 0x42];

/// Settling time after a reset pulse.
const RESET_SETTLE_MS: u32 = 100;

/// Pulses the ArduChip reset line.
pub fn reset_arduchip<SPI, CS, D>(chip: &mut ArduChipBus<SPI, CS>, delay: &mut D) -> CameraResult<()>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    D: DelayNs,
{
    chip.write_reg(ARDUCHIP_RESET, CPLD_RESET_ASSERT)?;
    delay.delay_ms(RESET_SETTLE_MS);
    chip.write_reg(ARDUCHIP_RESET, CPLD_RESET_RELEASE)?;
    delay.delay_ms(RESET_SETTLE_MS);
    Ok(())
}

/// Writes the test pattern to the ArduChip test register and reads it back.
pub fn check_capture_bus<SPI, CS>(chip: &mut ArduChipBus<SPI, CS>) -> CameraResult<()>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    chip.write_reg(ARDUCHIP_TEST1, TEST_PATTERN)?;
    let read = chip.read_reg(ARDUCHIP_TEST1)?;
    if read != TEST_PATTERN {
        return Err(CameraError::InterfaceMismatch {
            wrote: TEST_PATTERN,
            read,
        });
    }
    debug!("capture bus check passed");
    Ok(())
}

/// OV2640 センサー
pub struct Ov2640<I2C> {
    sccb: SccbBus<I2C>,
}

impl<I2C: I2c> Ov2640<I2C> {
    pub fn new(sccb: SccbBus<I2C>) -> Self {
        Self { sccb }
    }

    /// Reads the product id from the sensor bank and checks it is an OV2640.
    ///
    /// Returns `(vid, pid)` on success.
    pub fn detect(&mut self) -> CameraResult<(u8, u8)> {
        self.sccb.write_sensor_reg(REG_BANK_SEL, BANK_SENSOR)?;
        let vid = self.sccb.read_sensor_reg(REG_PIDH)?;
        let pid = self.sccb.read_sensor_reg(REG_PIDL)?;
        if vid != OV2640_VID || !OV2640_PIDS.contains(&pid) {
            return Err(CameraError::SensorNotDetected { vid, pid });
        }
        info!("OV2640 detected (vid {:#04x}, pid {:#04x})", vid, pid);
        Ok((vid, pid))
    }

    /// COM7 ソフトリセット
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> CameraResult<()> {
        self.sccb.write_sensor_reg(REG_BANK_SEL, BANK_SENSOR)?;
        self.sccb.write_sensor_reg(REG_COM7, COM7_SRST)?;
        delay.delay_ms(RESET_SETTLE_MS);
        Ok(())
    }

    /// Applies one mode program in table order.
    pub fn apply(&mut self, program: &ModeProgram) -> CameraResult<()> {
        program.apply(&mut self.sccb)
    }

    /// Programs 320x240 RGB565 raw output.
    pub fn configure_raw(&mut self) -> CameraResult<()> {
        self.apply(&OV2640_COMMON_INIT)?;
        self.apply(&OV2640_QVGA_RGB565)?;
        info!("OV2640 configured for raw 320x240 RGB565");
        Ok(())
    }

    /// Programs JPEG output followed by the given resolution program.
    pub fn configure_jpeg(&mut self, resolution: &ModeProgram) -> CameraResult<()> {
        self.apply(&OV2640_COMMON_INIT)?;
        self.apply(&OV2640_YUV422)?;
        self.apply(&OV2640_JPEG)?;
        self.sccb.write_sensor_reg(REG_BANK_SEL, BANK_SENSOR)?;
        self.sccb.write_sensor_reg(REG_COM10, 0x00)?;
        self.apply(resolution)?;
        info!("OV2640 configured for JPEG ({})", resolution.name());
        Ok(())
    }

    pub fn sccb_mut(&mut self) -> &mut SccbBus<I2C> {
        &mut self.sccb
    }

    pub fn release(self) -> I2C {
        self.sccb.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::camera::ov2640_regs::OV2640_640X480_JPEG;
    use crate::mock::{MockArduChip, MockSccb, NoopDelay};

    fn sensor(mock: &MockSccb) -> Ov2640<MockSccb> {
        Ov2640::new(SccbBus::new(mock.clone(), 3))
    }

    #[test]
    fn test_detect_accepts_both_product_ids() {
        let mock = MockSccb::new();
        assert_eq!(sensor(&mock).detect(), Ok((0x26, 0x42)));

        mock.set_sensor_reg(BANK_SENSOR, REG_PIDL, 0x41);
        assert_eq!(sensor(&mock).detect(), Ok((0x26, 0x41)));
    }

    #[test]
    fn test_detect_rejects_other_sensors() {
        let mock = MockSccb::new();
        mock.set_sensor_reg(BANK_SENSOR, REG_PIDH, 0x77);
        mock.set_sensor_reg(BANK_SENSOR, REG_PIDL, 0x40);
        assert_eq!(
            sensor(&mock).detect(),
            Err(CameraError::SensorNotDetected { vid: 0x77, pid: 0x40 })
        );
    }

    #[test]
    fn test_jpeg_bring_up_clears_com10_in_sensor_bank() {
        let mock = MockSccb::new();
        mock.set_sensor_reg(BANK_SENSOR, REG_COM10, 0x20);
        sensor(&mock).configure_jpeg(&OV2640_640X480_JPEG).unwrap();
        assert_eq!(mock.sensor_reg(BANK_SENSOR, REG_COM10), Some(0x00));
        // 解像度テーブルの最後の書き込みは DSP バンク
        assert_eq!(mock.sensor_reg(BANK_DSP, 0x5a), Some(0xa0));
    }

    #[test]
    fn test_soft_reset_waits_for_settling() {
        let mock = MockSccb::new();
        let mut delay = NoopDelay::new();
        sensor(&mock).soft_reset(&mut delay).unwrap();
        assert_eq!(mock.sensor_reg(BANK_SENSOR, REG_COM7), Some(COM7_SRST));
        assert_eq!(delay.elapsed_ms(), u64::from(RESET_SETTLE_MS));
    }

    #[test]
    fn test_capture_bus_check_reports_mismatch() {
        let chip = MockArduChip::new();
        chip.set_test_register_stuck(Some(0x00));
        let mut bus = ArduChipBus::new(chip.spi(), chip.cs()).unwrap();
        assert_eq!(
            check_capture_bus(&mut bus),
            Err(CameraError::InterfaceMismatch { wrote: 0x55, read: 0x00 })
        );
        assert!(!chip.cs_asserted());
    }

    #[test]
    fn test_reset_pulse_sequence() {
        let chip = MockArduChip::new();
        let mut bus = ArduChipBus::new(chip.spi(), chip.cs()).unwrap();
        let mut delay = NoopDelay::new();
        reset_arduchip(&mut bus, &mut delay).unwrap();
        assert_eq!(
            chip.register_writes(ARDUCHIP_RESET),
            vec![CPLD_RESET_ASSERT, CPLD_RESET_RELEASE]
        );
        assert_eq!(delay.elapsed_ms(), 200);
    }
}
