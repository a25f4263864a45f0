/// FIFO キャプチャ制御
pub mod fifo;
/// モードプログラム (レジスタテーブル)
pub mod mode_program;
/// OV2640 レジスタテーブル
pub mod ov2640_regs;
/// センサー初期化とモード設定
pub mod sensor;

pub use fifo::{FifoController, FifoState};
pub use mode_program::{ModeProgram, SensorReg};
pub use sensor::Ov2640;
