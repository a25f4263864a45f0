//! Error taxonomy for the capture driver.
//!
//! Bus failures, implausible FIFO lengths and caller misuse are all reported
//! through `CameraResult`; nothing in the driver panics.

use crate::config::ConfigError;
use crate::hardware::bus::BusError;

/// ドライバー操作の結果型
pub type CameraResult<T> = Result<T, CameraError>;

/// カメラドライバーのエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    /// A bus transaction failed (no acknowledgment, SPI fault, chip-select fault)
    #[error("bus transaction failed: {0}")]
    Bus(#[from] BusError),

    /// The ArduChip test register did not read back what was written
    #[error("capture bus check failed: wrote {wrote:#04x}, read {read:#04x}")]
    InterfaceMismatch { wrote: u8, read: u8 },

    /// The control bus answered but the sensor is not an OV2640
    #[error("OV2640 not detected (vid {vid:#04x}, pid {pid:#04x})")]
    SensorNotDetected { vid: u8, pid: u8 },

    /// Raw-mode scale-down exponent outside the supported range
    #[error("scaledown {requested} out of range (0..={max})")]
    InvalidScaledown { requested: u8, max: u8 },

    /// A mode program entry does not fit the sensor's 8-bit register space
    #[error("mode program entry {reg:#06x}={val:#06x} does not fit an 8-bit register")]
    ProgramValueOutOfRange { reg: u16, val: u16 },

    /// `capture()` was called before any `begin_*` operation
    #[error("no capture mode configured; call a begin_* operation first")]
    NotConfigured,

    /// The FIFO reported a zero or implausibly large frame
    #[error("implausible FIFO length {length} (max {max})")]
    InvalidFrameLength { length: u32, max: u32 },

    /// The capture-complete flag never rose within the configured timeout
    #[error("capture did not complete after {polls} polls")]
    CaptureTimeout { polls: u32 },

    /// Invalid driver configuration
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl CameraError {
    /// FIFO 長の異常やタイムアウトなど、次のトリガーで回復できるエラーかどうか
    pub fn is_capture_fault(&self) -> bool {
        matches!(
            self,
            CameraError::InvalidFrameLength { .. } | CameraError::CaptureTimeout { .. }
        )
    }
}
