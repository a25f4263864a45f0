/// ローカルバッファへのトランスポート
pub mod buffer;
/// ホストコマンド (開始/停止)
pub mod command;
/// シリアルリンク上のトランスポート
pub mod serial;
/// トランスポート機能 (開始要求・停止要求・バイト送信)
pub mod transport;

// ESP32 USB シリアル（実機ビルドのみ）
#[cfg(feature = "esp")]
pub mod usb_serial;

pub use buffer::BufferTransport;
pub use command::{CommandLatch, HostCommand};
pub use serial::{SerialPort, SerialTransport};
pub use transport::Transport;
