//! FIFO キャプチャ制御
//!
//! Drives the ArduChip frame buffer through one capture cycle:
//!
//! ```text
//! Idle -> Armed -> Filling -> Ready -> Draining -> Idle
//! ```
//!
//! Any failure (bus error, implausible length, completion timeout) aborts the
//! cycle and returns the controller to `Idle`; the next trigger starts over.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use log::{debug, error, warn};

use crate::config::CaptureConfig;
use crate::error::{CameraError, CameraResult};
use crate::hardware::bus::{ArduChipBus, Burst, BusError};
use crate::hardware::registers::{
    is_bit_set, ARDUCHIP_FIFO, ARDUCHIP_TRIG, CAP_DONE_MASK, FIFO_CLEAR_MASK, FIFO_LENGTH_MASK,
    FIFO_RDPTR_RST_MASK, FIFO_SIZE1, FIFO_SIZE2, FIFO_SIZE3, FIFO_START_MASK, FIFO_WRPTR_RST_MASK,
};

/// FIFO の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FifoState {
    Idle,
    /// Capture triggered, completion not yet polled
    Armed,
    /// Completion polled at least once and not yet reported
    Filling,
    /// Capture complete, length not yet consumed
    Ready,
    /// Burst read in progress
    Draining,
}

#[derive(Debug)]
pub struct FifoController {
    state: FifoState,
    max_polls: u32,
    poll_interval_us: u32,
}

impl FifoController {
    /// 新しい FIFO コントローラーを作成します
    ///
    /// # 引数
    ///
    /// * `timeout_ms` - キャプチャ完了を待つ最大時間（ミリ秒）
    /// * `poll_interval_us` - 完了フラグのポーリング間隔（マイクロ秒）
    ///
    /// ポーリング回数は `timeout_ms * 1000 / poll_interval_us`（最低1回）です。
    pub fn new(timeout_ms: u32, poll_interval_us: u32) -> Self {
        let poll_interval_us = poll_interval_us.max(1);
        let max_polls = (timeout_ms.saturating_mul(1000) / poll_interval_us).max(1);
        Self {
            state: FifoState::Idle,
            max_polls,
            poll_interval_us,
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(config.capture_timeout_ms, config.poll_interval_us)
    }

    pub fn state(&self) -> FifoState {
        self.state
    }

    pub fn max_polls(&self) -> u32 {
        self.max_polls
    }

    /// Resets both FIFO pointers, discarding stale data.
    pub fn flush_fifo<SPI: SpiBus<u8>, CS: OutputPin>(
        &self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> Result<(), BusError> {
        chip.write_reg(ARDUCHIP_FIFO, FIFO_RDPTR_RST_MASK | FIFO_WRPTR_RST_MASK)
    }

    /// Clears the capture-done flag.
    pub fn clear_fifo_flag<SPI: SpiBus<u8>, CS: OutputPin>(
        &self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> Result<(), BusError> {
        chip.write_reg(ARDUCHIP_FIFO, FIFO_CLEAR_MASK)
    }

    /// Tells the ArduChip to store the next sensor frame.
    pub fn start_capture<SPI: SpiBus<u8>, CS: OutputPin>(
        &self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> Result<(), BusError> {
        chip.write_reg(ARDUCHIP_FIFO, FIFO_START_MASK)
    }

    /// Reads the 23-bit captured length.
    pub fn read_fifo_length<SPI: SpiBus<u8>, CS: OutputPin>(
        &self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> Result<u32, BusError> {
        let len1 = u32::from(chip.read_reg(FIFO_SIZE1)?);
        let len2 = u32::from(chip.read_reg(FIFO_SIZE2)?);
        let len3 = u32::from(chip.read_reg(FIFO_SIZE3)?);
        Ok(((len3 << 16) | (len2 << 8) | len1) & FIFO_LENGTH_MASK)
    }

    /// キャプチャを開始します (`Idle -> Armed`)
    ///
    /// FIFO をフラッシュし、完了フラグをクリアしてからトリガーします。
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<()>` - バスエラー時は `Idle` に戻してからエラーを返す
    pub fn arm<SPI: SpiBus<u8>, CS: OutputPin>(
        &mut self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> CameraResult<()> {
        if self.state != FifoState::Idle {
            warn!("arming FIFO from {:?}, forcing restart", self.state);
        }
        let result = self
            .flush_fifo(chip)
            .and_then(|_| self.clear_fifo_flag(chip))
            .and_then(|_| self.start_capture(chip));
        match result {
            Ok(()) => {
                self.state = FifoState::Armed;
                debug!("FIFO armed");
                Ok(())
            }
            Err(e) => {
                self.abort(chip);
                Err(e.into())
            }
        }
    }

    /// キャプチャ完了を待ちます (`Armed -> Filling -> Ready`)
    ///
    /// # 引数
    ///
    /// * `chip` - ArduChip バス
    /// * `delay` - ポーリング間隔の遅延
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<()>` - 規定回数内に完了しなければ
    ///   `CameraError::CaptureTimeout`
    pub fn wait_ready<SPI, CS, D>(
        &mut self,
        chip: &mut ArduChipBus<SPI, CS>,
        delay: &mut D,
    ) -> CameraResult<()>
    where
        SPI: SpiBus<u8>,
        CS: OutputPin,
        D: DelayNs,
    {
        if self.state == FifoState::Ready {
            return Ok(());
        }
        for poll in 0..self.max_polls {
            match is_bit_set(chip, ARDUCHIP_TRIG, CAP_DONE_MASK) {
                Ok(true) => {
                    self.state = FifoState::Ready;
                    debug!("FIFO ready after {} polls", poll + 1);
                    return Ok(());
                }
                Ok(false) => {
                    self.state = FifoState::Filling;
                    delay.delay_us(self.poll_interval_us);
                }
                Err(e) => {
                    self.abort(chip);
                    return Err(e.into());
                }
            }
        }
        error!("capture did not complete within {} polls", self.max_polls);
        self.abort(chip);
        Err(CameraError::CaptureTimeout {
            polls: self.max_polls,
        })
    }

    /// フレーム長を読み取り、妥当性を確認します
    ///
    /// A zero or oversized length aborts the cycle; it is never retried within
    /// the same trigger.
    ///
    /// # 引数
    ///
    /// * `chip` - ArduChip バス
    /// * `max` - 許容する最大フレーム長
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<u32>` - フレーム長、または `CameraError::InvalidFrameLength`
    pub fn take_length<SPI: SpiBus<u8>, CS: OutputPin>(
        &mut self,
        chip: &mut ArduChipBus<SPI, CS>,
        max: u32,
    ) -> CameraResult<u32> {
        let length = match self.read_fifo_length(chip) {
            Ok(length) => length,
            Err(e) => {
                self.abort(chip);
                return Err(e.into());
            }
        };
        if length == 0 || length > max {
            error!("implausible FIFO length {} (max {}), aborting", length, max);
            self.abort(chip);
            return Err(CameraError::InvalidFrameLength { length, max });
        }
        debug!("FIFO length {}", length);
        Ok(length)
    }

    /// バースト読み出しを開始します (`Ready -> Draining`)
    ///
    /// Chip-select is held until the returned burst is finished or dropped.
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<Burst>` - FIFO を1バイトずつ読み出すバースト
    pub fn begin_drain<'c, SPI: SpiBus<u8>, CS: OutputPin>(
        &mut self,
        chip: &'c mut ArduChipBus<SPI, CS>,
    ) -> CameraResult<Burst<'c, SPI, CS>> {
        let burst = chip.burst()?;
        self.state = FifoState::Draining;
        Ok(burst)
    }

    /// `Draining -> Idle` after the burst has been finished.
    pub fn finish<SPI: SpiBus<u8>, CS: OutputPin>(
        &mut self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> CameraResult<()> {
        self.state = FifoState::Idle;
        self.clear_fifo_flag(chip)?;
        debug!("FIFO drained");
        Ok(())
    }

    /// どの状態からでも `Idle` に戻します
    ///
    /// バスエラーはログに記録するのみで、返しません。
    pub fn abort<SPI: SpiBus<u8>, CS: OutputPin>(&mut self, chip: &mut ArduChipBus<SPI, CS>) {
        if self.state != FifoState::Idle {
            debug!("FIFO abort from {:?}", self.state);
        }
        self.state = FifoState::Idle;
        if let Err(e) = self.clear_fifo_flag(chip) {
            warn!("FIFO flag clear failed during abort: {}", e);
        }
    }

    /// Continuous mode: skip straight back to `Armed` after a drained frame.
    pub fn rearm<SPI: SpiBus<u8>, CS: OutputPin>(
        &mut self,
        chip: &mut ArduChipBus<SPI, CS>,
    ) -> CameraResult<()> {
        self.state = FifoState::Idle;
        self.arm(chip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockArduChip, MockCsPin, MockSpi, NoopDelay};

    fn setup() -> (MockArduChip, ArduChipBus<MockSpi, MockCsPin>) {
        let chip = MockArduChip::new();
        let bus = ArduChipBus::new(chip.spi(), chip.cs()).unwrap();
        (chip, bus)
    }

    #[test]
    fn test_poll_budget_from_timeout() {
        assert_eq!(FifoController::new(1000, 100).max_polls(), 10_000);
        assert_eq!(FifoController::new(0, 100).max_polls(), 1);
        assert_eq!(FifoController::new(10, 0).max_polls(), 10_000);
    }

    #[test]
    fn test_arm_writes_flush_clear_start() {
        let (chip, mut bus) = setup();
        let mut fifo = FifoController::new(10, 100);
        fifo.arm(&mut bus).unwrap();
        assert_eq!(fifo.state(), FifoState::Armed);
        assert_eq!(
            chip.register_writes(ARDUCHIP_FIFO),
            vec![FIFO_RDPTR_RST_MASK | FIFO_WRPTR_RST_MASK, FIFO_CLEAR_MASK, FIFO_START_MASK]
        );
    }

    #[test]
    fn test_wait_ready_passes_through_filling() {
        let (chip, mut bus) = setup();
        chip.set_frame(vec![0xAA; 16]);
        chip.set_pending_polls(3);
        let mut fifo = FifoController::new(10, 100);
        let mut delay = NoopDelay::new();
        fifo.arm(&mut bus).unwrap();
        fifo.wait_ready(&mut bus, &mut delay).unwrap();
        assert_eq!(fifo.state(), FifoState::Ready);
        assert_eq!(delay.elapsed_ns(), 3 * 100_000);
    }

    #[test]
    fn test_wait_ready_times_out() {
        let (chip, mut bus) = setup();
        chip.set_never_completes(true);
        let mut fifo = FifoController::new(1, 100);
        let mut delay = NoopDelay::new();
        fifo.arm(&mut bus).unwrap();
        assert_eq!(
            fifo.wait_ready(&mut bus, &mut delay),
            Err(CameraError::CaptureTimeout { polls: 10 })
        );
        assert_eq!(fifo.state(), FifoState::Idle);
    }

    #[test]
    fn test_length_bounds() {
        let (chip, mut bus) = setup();
        let mut fifo = FifoController::new(10, 100);

        chip.set_reported_length(0);
        assert_eq!(
            fifo.take_length(&mut bus, 1000),
            Err(CameraError::InvalidFrameLength { length: 0, max: 1000 })
        );
        assert_eq!(fifo.state(), FifoState::Idle);

        chip.set_reported_length(1001);
        assert!(fifo.take_length(&mut bus, 1000).is_err());

        chip.set_reported_length(1000);
        assert_eq!(fifo.take_length(&mut bus, 1000), Ok(1000));
    }

    #[test]
    fn test_length_is_masked_to_23_bits() {
        let (chip, mut bus) = setup();
        let fifo = FifoController::new(10, 100);
        chip.set_reported_length(0xFF_0102);
        assert_eq!(fifo.read_fifo_length(&mut bus), Ok(0x7F_0102));
    }

    #[test]
    fn test_dropped_burst_releases_chip_select() {
        let (chip, mut bus) = setup();
        chip.set_frame(vec![1, 2, 3, 4]);
        let mut fifo = FifoController::new(10, 100);
        {
            let mut burst = fifo.begin_drain(&mut bus).unwrap();
            assert_eq!(burst.read_fifo().unwrap(), 1);
            assert!(chip.cs_asserted());
        }
        assert!(!chip.cs_asserted());
        fifo.abort(&mut bus);
        assert_eq!(fifo.state(), FifoState::Idle);
    }
}
