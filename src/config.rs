use crate::core::session::{CaptureMode, JpegResolution, MAX_SCALEDOWN};
use crate::hardware::registers::MAX_FIFO_SIZE;

/// ビルド時設定
///
/// `cfg.toml` の `[arducam-mini-2mp]` セクションから読み込まれます。
/// ファイルがない場合は下記のデフォルト値が使われます。
#[toml_cfg::toml_config]
pub struct Config {
    #[default(0x5FFFF)] // Mini 2MP の FIFO 容量 (384 KiB)
    max_frame_len: u32,

    #[default(1000)]
    capture_timeout_ms: u32,

    #[default(100)]
    poll_interval_us: u32,

    #[default(3)]
    bus_retries: u8,

    #[default(256)]
    checkpoint_bytes: u32,

    #[default(0)]
    byte_delay_us: u32,

    #[default(false)]
    continuous: bool,

    #[default(false)]
    jpeg_trim_markers: bool,

    #[default("jpeg320x240")]
    mode: &'static str,

    #[default(0)]
    scaledown: u8,

    #[default(false)]
    grayscale: bool,
}

/// 設定エラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_frame_len の値が無効です (1-{max}): {value}")]
    InvalidMaxFrameLen { value: u32, max: u32 },
    #[error("capture_timeout_ms は 1 以上が必要です")]
    ZeroCaptureTimeout,
    #[error("poll_interval_us は 1 以上が必要です")]
    ZeroPollInterval,
    #[error("checkpoint_bytes は 1 以上が必要です")]
    ZeroCheckpoint,
    #[error("scaledown の値が無効です (0-{max}): {value}")]
    InvalidScaledown { value: u8, max: u8 },
    #[error("不明なキャプチャモードです")]
    UnknownMode,
}

/// 実行時のキャプチャ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Upper bound on a plausible FIFO length
    pub max_frame_len: u32,
    pub capture_timeout_ms: u32,
    pub poll_interval_us: u32,
    /// Extra attempts on a control-bus NACK
    pub bus_retries: u8,
    /// JPEG bytes between stop-request checks
    pub checkpoint_bytes: u32,
    /// Busy delay after each forwarded byte
    pub byte_delay_us: u32,
    /// Re-arm after every frame until a stop request
    pub continuous: bool,
    /// Forward only SOI..EOI of a JPEG frame
    pub jpeg_trim_markers: bool,
    /// Mode selected by `ArduCam::begin_configured`
    pub mode: CaptureMode,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_frame_len: MAX_FIFO_SIZE,
            capture_timeout_ms: 1000,
            poll_interval_us: 100,
            bus_retries: 3,
            checkpoint_bytes: 256,
            byte_delay_us: 0,
            continuous: false,
            jpeg_trim_markers: false,
            mode: CaptureMode::Jpeg(JpegResolution::R320x240),
        }
    }
}

impl CaptureConfig {
    /// Reads `cfg.toml` values baked in at build time.
    pub fn from_build_config() -> Result<Self, ConfigError> {
        let cfg = CONFIG;
        let mode = CaptureMode::parse(cfg.mode, cfg.scaledown, cfg.grayscale)?;
        let config = Self {
            max_frame_len: cfg.max_frame_len,
            capture_timeout_ms: cfg.capture_timeout_ms,
            poll_interval_us: cfg.poll_interval_us,
            bus_retries: cfg.bus_retries,
            checkpoint_bytes: cfg.checkpoint_bytes,
            byte_delay_us: cfg.byte_delay_us,
            continuous: cfg.continuous,
            jpeg_trim_markers: cfg.jpeg_trim_markers,
            mode,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frame_len == 0 || self.max_frame_len > MAX_FIFO_SIZE {
            return Err(ConfigError::InvalidMaxFrameLen {
                value: self.max_frame_len,
                max: MAX_FIFO_SIZE,
            });
        }
        if self.capture_timeout_ms == 0 {
            return Err(ConfigError::ZeroCaptureTimeout);
        }
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.checkpoint_bytes == 0 {
            return Err(ConfigError::ZeroCheckpoint);
        }
        if let CaptureMode::Raw(params) = self.mode {
            if params.scaledown() > MAX_SCALEDOWN {
                return Err(ConfigError::InvalidScaledown {
                    value: params.scaledown(),
                    max: MAX_SCALEDOWN,
                });
            }
        }
        Ok(())
    }

    pub fn with_max_frame_len(mut self, max_frame_len: u32) -> Self {
        self.max_frame_len = max_frame_len;
        self
    }

    pub fn with_capture_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.capture_timeout_ms = timeout_ms;
        self
    }

    pub fn with_poll_interval_us(mut self, interval_us: u32) -> Self {
        self.poll_interval_us = interval_us;
        self
    }

    pub fn with_bus_retries(mut self, retries: u8) -> Self {
        self.bus_retries = retries;
        self
    }

    pub fn with_checkpoint_bytes(mut self, bytes: u32) -> Self {
        self.checkpoint_bytes = bytes;
        self
    }

    pub fn with_byte_delay_us(mut self, delay_us: u32) -> Self {
        self.byte_delay_us = delay_us;
        self
    }

    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn with_jpeg_trim_markers(mut self, trim: bool) -> Self {
        self.jpeg_trim_markers = trim;
        self
    }

    pub fn with_mode(mut self, mode: CaptureMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::RawParams;

    #[test]
    fn test_defaults_are_valid() {
        let config = CaptureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_frame_len, 0x5FFFF);
        assert_eq!(config.checkpoint_bytes, 256);
        assert!(!config.continuous);
    }

    #[test]
    fn test_build_config_without_cfg_toml() {
        // cfg.toml がなければデフォルト値になる
        let config = CaptureConfig::from_build_config().unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let base = CaptureConfig::default();
        assert_eq!(
            base.with_checkpoint_bytes(0).validate(),
            Err(ConfigError::ZeroCheckpoint)
        );
        assert_eq!(
            base.with_poll_interval_us(0).validate(),
            Err(ConfigError::ZeroPollInterval)
        );
        assert_eq!(
            base.with_capture_timeout_ms(0).validate(),
            Err(ConfigError::ZeroCaptureTimeout)
        );
        assert_eq!(
            base.with_max_frame_len(0).validate(),
            Err(ConfigError::InvalidMaxFrameLen { value: 0, max: 0x5FFFF })
        );
    }

    #[test]
    fn test_max_frame_len_cannot_exceed_fifo() {
        let config = CaptureConfig::default().with_max_frame_len(0x60000);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMaxFrameLen { value: 0x60000, .. })
        ));
    }

    #[test]
    fn test_raw_mode_in_config() {
        let raw = RawParams::new(2, true).unwrap();
        let config = CaptureConfig::default().with_mode(CaptureMode::Raw(raw));
        assert!(config.validate().is_ok());
    }
}
