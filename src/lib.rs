/*!
 * # ArduCAM Mini 2MP Capture Driver
 *
 * Streams frames from the OV2640-based ArduCAM Mini 2MP FIFO to a pluggable
 * transport (a host on a serial link, a local buffer, ...).
 *
 * ## モジュール構成
 * - `hardware`: bus access, register bit helpers, sensor mode programs, FIFO controller
 * - `core`: capture session, frame extraction and the `capture()` loop
 * - `communication`: the transport capability and its concrete consumers
 * - `config`: build-time settings from `cfg.toml`
 *
 * The library is `no_std` unless the `std` feature (on by default) is enabled.
 */

#![cfg_attr(not(feature = "std"), no_std)]

pub mod communication;
pub mod config;
pub mod core;
pub mod error;
pub mod hardware;

// Mock実装（テストとホストビルドで使用可能）
#[cfg(feature = "std")]
pub mod mock;

pub use communication::{BufferTransport, CommandLatch, HostCommand, SerialPort, SerialTransport, Transport};
pub use config::{CaptureConfig, ConfigError};
pub use crate::core::{
    ArduCam, CaptureEvent, CaptureMode, CaptureSession, CaptureStats, FrameOutcome, JpegResolution, RawParams,
};
pub use error::{CameraError, CameraResult};
pub use hardware::bus::{ArduChipBus, BusError, SccbBus};
pub use hardware::camera::{FifoController, FifoState, ModeProgram, Ov2640, SensorReg};

/// ライブラリのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
