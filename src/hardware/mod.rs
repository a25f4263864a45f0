/// バスアクセス層 (SPI capture bus / SCCB control bus)
pub mod bus;
/// カメラ制御モジュール
pub mod camera;
/// ArduChip レジスタマップとビット操作
pub mod registers;
