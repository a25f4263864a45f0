//! The driver object and its `capture()` step.
//!
//! `capture()` is meant to be called once per tick of the owner's main loop.
//! Each call either reports `Idle` (no start request), streams one frame, or
//! returns an error; every error leaves the driver idle with chip-select
//! released, ready for the next start request.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;
use log::{error, info, warn};

use super::frame::{grab_jpeg_frame, grab_raw_frame};
use super::session::{CaptureMode, CaptureSession, JpegResolution, RawParams};
use super::stats::CaptureStats;
use crate::communication::Transport;
use crate::config::CaptureConfig;
use crate::error::{CameraError, CameraResult};
use crate::hardware::bus::{ArduChipBus, SccbBus};
use crate::hardware::camera::fifo::{FifoController, FifoState};
use crate::hardware::camera::sensor::{check_capture_bus, reset_arduchip, Ov2640};

/// What one `capture()` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// No start request; nothing touched
    Idle,
    /// A full frame was forwarded
    FrameSent { bytes: u32 },
    /// The transport asked to stop; `bytes` were forwarded first
    Stopped { bytes: u32 },
}

/// ArduCAM Mini 2MP ドライバー
///
/// Owns both buses, a delay source and the transport the frames go to.
pub struct ArduCam<SPI, CS, I2C, D, T> {
    chip: ArduChipBus<SPI, CS>,
    sensor: Ov2640<I2C>,
    delay: D,
    transport: T,
    config: CaptureConfig,
    session: CaptureSession,
    fifo: FifoController,
    stats: CaptureStats,
}

impl<SPI, CS, I2C, D, T> ArduCam<SPI, CS, I2C, D, T>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
    I2C: I2c,
    D: DelayNs,
    T: Transport,
{
    /// 新しいドライバーを作成します
    ///
    /// No bus traffic happens beyond driving chip-select idle; call one of the
    /// `begin_*` operations before the first `capture()`.
    ///
    /// # 引数
    ///
    /// * `spi` - ArduChip に接続された SPI バス
    /// * `cs` - ArduChip のチップセレクトピン
    /// * `i2c` - OV2640 に接続された SCCB (I2C) バス
    /// * `delay` - リセット待ちとポーリング間隔に使う遅延
    /// * `transport` - 開始/停止要求の受け取りとフレーム送信先
    /// * `config` - キャプチャ設定
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<Self>` - 設定が無効な場合は`CameraError::Config`
    pub fn new(
        spi: SPI,
        cs: CS,
        i2c: I2C,
        delay: D,
        transport: T,
        config: CaptureConfig,
    ) -> CameraResult<Self> {
        config.validate()?;
        let chip = ArduChipBus::new(spi, cs)?;
        let sensor = Ov2640::new(SccbBus::new(i2c, config.bus_retries));
        Ok(Self {
            chip,
            sensor,
            delay,
            transport,
            fifo: FifoController::from_config(&config),
            config,
            session: CaptureSession::new(),
            stats: CaptureStats::default(),
        })
    }

    /// 全モード共通の初期化
    ///
    /// ArduChip reset, capture-bus check, sensor detection and soft reset.
    /// The selected mode is not touched; use a `begin_*` operation to
    /// (re)configure.
    pub fn begin(&mut self) -> CameraResult<()> {
        reset_arduchip(&mut self.chip, &mut self.delay)?;
        check_capture_bus(&mut self.chip)?;
        self.sensor.detect()?;
        self.sensor.soft_reset(&mut self.delay)?;
        Ok(())
    }

    /// raw 320x240 モードで初期化します
    ///
    /// 各方向を `2^scaledown` 分の1に縮小し、`grayscale` なら1画素1バイトの
    /// 輝度で送信します。初期化に失敗した場合、以前のモードは破棄され
    /// `capture()` は `NotConfigured` を返します。
    ///
    /// # 引数
    ///
    /// * `scaledown` - 縮小指数 (0..=4)
    /// * `grayscale` - 輝度のみを送信するか
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<()>` - 範囲外の `scaledown` はハードウェアに触れずに
    ///   `CameraError::InvalidScaledown`
    pub fn begin_qvga(&mut self, scaledown: u8, grayscale: bool) -> CameraResult<()> {
        let params = RawParams::new(scaledown, grayscale)?;
        self.deconfigure();
        self.begin()?;
        self.sensor.configure_raw()?;
        self.select(CaptureMode::Raw(params));
        Ok(())
    }

    /// JPEG モードで初期化します
    ///
    /// 初期化に失敗した場合、以前のモードは破棄されます。
    ///
    /// # 引数
    ///
    /// * `resolution` - 出力解像度
    pub fn begin_jpeg(&mut self, resolution: JpegResolution) -> CameraResult<()> {
        self.deconfigure();
        self.begin()?;
        self.sensor.configure_jpeg(resolution.program())?;
        self.select(CaptureMode::Jpeg(resolution));
        Ok(())
    }

    /// Brings the camera up in the mode named by the configuration.
    pub fn begin_configured(&mut self) -> CameraResult<()> {
        match self.config.mode {
            CaptureMode::Raw(params) => self.begin_qvga(params.scaledown(), params.grayscale()),
            CaptureMode::Jpeg(resolution) => self.begin_jpeg(resolution),
        }
    }

    pub fn begin_jpeg_160x120(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R160x120)
    }

    pub fn begin_jpeg_176x144(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R176x144)
    }

    pub fn begin_jpeg_320x240(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R320x240)
    }

    pub fn begin_jpeg_352x288(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R352x288)
    }

    pub fn begin_jpeg_640x480(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R640x480)
    }

    pub fn begin_jpeg_800x600(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R800x600)
    }

    pub fn begin_jpeg_1024x768(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R1024x768)
    }

    pub fn begin_jpeg_1280x1024(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R1280x1024)
    }

    pub fn begin_jpeg_1600x1200(&mut self) -> CameraResult<()> {
        self.begin_jpeg(JpegResolution::R1600x1200)
    }

    /// Drops the current mode before the sensor is reset.
    fn deconfigure(&mut self) {
        if self.fifo.state() != FifoState::Idle {
            self.fifo.abort(&mut self.chip);
        }
        self.session = CaptureSession::new();
    }

    fn select(&mut self, mode: CaptureMode) {
        self.session.configure(mode);
        info!("capture mode set: {:?}", mode);
    }

    /// キャプチャループの1ステップ
    ///
    /// アイドル中は開始要求を確認し、要求があれば FIFO を起動して1フレームを
    /// トランスポートへ送信します。停止要求は安全なチェックポイントで確認されます。
    ///
    /// # 戻り値
    ///
    /// * `CameraResult<CaptureEvent>` - このステップで何が起きたか。
    ///   エラー時もドライバーはアイドルに戻り、チップセレクトは解放済み
    pub fn capture(&mut self) -> CameraResult<CaptureEvent> {
        let mode = self.session.mode().ok_or(CameraError::NotConfigured)?;

        if !self.session.is_capturing() {
            if !self.transport.got_start_request() {
                return Ok(CaptureEvent::Idle);
            }
            info!("start request acknowledged");
            self.session.reset();
            if let Err(e) = self.fifo.arm(&mut self.chip) {
                return Err(self.fail(e));
            }
            self.session.mark_triggered();
        }

        match self.run_cycle(mode) {
            Ok(event) => Ok(event),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn run_cycle(&mut self, mode: CaptureMode) -> CameraResult<CaptureEvent> {
        if self.transport.got_stop_request() {
            return Ok(self.stopped(0));
        }

        self.fifo.wait_ready(&mut self.chip, &mut self.delay)?;
        let max = mode.max_frame_len(self.config.max_frame_len);
        let length = self.fifo.take_length(&mut self.chip, max)?;
        self.session.mark_extracting();

        if self.transport.got_stop_request() {
            return Ok(self.stopped(0));
        }

        let mut burst = self.fifo.begin_drain(&mut self.chip)?;
        let outcome = match mode {
            CaptureMode::Jpeg(_) => grab_jpeg_frame(
                &mut burst,
                length,
                &mut self.transport,
                &mut self.delay,
                &self.config,
            ),
            CaptureMode::Raw(params) => grab_raw_frame(
                &mut burst,
                length,
                &params,
                &mut self.transport,
                &mut self.delay,
                &self.config,
            ),
        }?;
        burst.finish()?;
        self.fifo.finish(&mut self.chip)?;

        if outcome.stopped {
            return Ok(self.stopped(outcome.bytes_sent));
        }

        self.stats.record_frame(outcome.bytes_sent);
        info!("frame sent: {} bytes (FIFO length {})", outcome.bytes_sent, length);

        if self.config.continuous {
            self.fifo.rearm(&mut self.chip)?;
            self.session.mark_triggered();
        } else {
            self.session.reset();
        }
        Ok(CaptureEvent::FrameSent {
            bytes: outcome.bytes_sent,
        })
    }

    fn stopped(&mut self, bytes: u32) -> CaptureEvent {
        warn!("capture stopped by transport after {} bytes", bytes);
        if self.fifo.state() != FifoState::Idle {
            self.fifo.abort(&mut self.chip);
        }
        self.session.reset();
        self.stats.record_stop(bytes);
        CaptureEvent::Stopped { bytes }
    }

    fn fail(&mut self, error: CameraError) -> CameraError {
        error!("capture aborted: {}", error);
        self.fifo.abort(&mut self.chip);
        self.session.reset();
        self.stats.record_error(&error);
        error
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn fifo_state(&self) -> FifoState {
        self.fifo.state()
    }

    pub fn stats(&self) -> &CaptureStats {
        &self.stats
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// ハードウェアとトランスポートを返却します
    ///
    /// # 戻り値
    ///
    /// * `(SPI, CS, I2C, D, T)` - コンストラクタに渡した順
    pub fn free(self) -> (SPI, CS, I2C, D, T) {
        let (spi, cs) = self.chip.release();
        (spi, cs, self.sensor.release(), self.delay, self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockArduChip, MockSccb, MockTransport, NoopDelay};

    #[test]
    fn test_capture_before_begin_is_a_fault() {
        let chip = MockArduChip::new();
        let transport = MockTransport::new();
        transport.queue_start();
        let mut cam = ArduCam::new(
            chip.spi(),
            chip.cs(),
            MockSccb::new(),
            NoopDelay::new(),
            transport.clone(),
            CaptureConfig::default(),
        )
        .unwrap();
        assert_eq!(cam.capture(), Err(CameraError::NotConfigured));
        // 開始要求は消費されない
        assert_eq!(transport.start_queries(), 0);
        assert_eq!(chip.captures_started(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let chip = MockArduChip::new();
        let result = ArduCam::new(
            chip.spi(),
            chip.cs(),
            MockSccb::new(),
            NoopDelay::new(),
            MockTransport::new(),
            CaptureConfig::default().with_checkpoint_bytes(0),
        );
        assert!(matches!(
            result.err(),
            Some(CameraError::Config(crate::config::ConfigError::ZeroCheckpoint))
        ));
    }

    #[test]
    fn test_invalid_scaledown_touches_no_hardware() {
        let chip = MockArduChip::new();
        let sccb = MockSccb::new();
        let mut cam = ArduCam::new(
            chip.spi(),
            chip.cs(),
            sccb.clone(),
            NoopDelay::new(),
            MockTransport::new(),
            CaptureConfig::default(),
        )
        .unwrap();
        assert_eq!(
            cam.begin_qvga(5, false),
            Err(CameraError::InvalidScaledown { requested: 5, max: 4 })
        );
        assert_eq!(sccb.write_count(), 0);
        assert!(cam.session().mode().is_none());
    }
}
