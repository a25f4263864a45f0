/// キャプチャループ (ArduCam ドライバー本体)
pub mod capture_loop;
/// フレーム抽出 (JPEG / raw)
pub mod frame;
/// キャプチャモードとセッション状態
pub mod session;
/// キャプチャ統計
pub mod stats;

pub use capture_loop::{ArduCam, CaptureEvent};
pub use frame::FrameOutcome;
pub use session::{CaptureMode, CaptureSession, JpegResolution, RawParams};
pub use stats::CaptureStats;
