//! ESP32 USB シリアル (USB-Serial-JTAG) ポート

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::usb_serial::{
    UsbDMinGpio, UsbDPlusGpio, UsbSerialConfig, UsbSerialDriver, USB_SERIAL,
};
use esp_idf_svc::sys::EspError;
use log::{debug, warn};

/// 書き込みタイムアウト (ティック)
const WRITE_TIMEOUT_TICKS: u32 = 10;
/// 連続書き込み失敗の上限
const MAX_WRITE_RETRIES: u32 = 5;

/// USB シリアルドライバーを [`SerialPort`](super::SerialPort) として扱う
pub struct UsbSerialPort<'d> {
    driver: UsbSerialDriver<'d>,
    dropped: u32,
}

impl<'d> UsbSerialPort<'d> {
    /// 新しい USB シリアルポートを作成します
    ///
    /// # 引数
    ///
    /// * `usb_serial` - USBシリアルペリフェラル
    /// * `pin_d_minus` - USBのD-ピン (ESP32-C3では通常GPIO18)
    /// * `pin_d_plus` - USBのD+ピン (ESP32-C3では通常GPIO19)
    pub fn new<U, DN, DP>(usb_serial: U, pin_d_minus: DN, pin_d_plus: DP) -> Result<Self, EspError>
    where
        U: Peripheral<P = USB_SERIAL> + 'd,
        DN: Peripheral<P = UsbDMinGpio>,
        DP: Peripheral<P = UsbDPlusGpio>,
    {
        let mut config = UsbSerialConfig::new();
        config.tx_buffer_size = 4096;
        config.rx_buffer_size = 256;

        let driver = UsbSerialDriver::new(usb_serial, pin_d_minus, pin_d_plus, &config)?;
        debug!("USB serial initialized (TX 4096 / RX 256 bytes)");
        Ok(Self { driver, dropped: 0 })
    }

    /// 書き込みに失敗して捨てたバイト数
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl super::SerialPort for UsbSerialPort<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8];
        match self.driver.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                debug!("USB serial read failed: {}", e);
                None
            }
        }
    }

    fn write_byte(&mut self, byte: u8) {
        for _ in 0..MAX_WRITE_RETRIES {
            match self.driver.write(&[byte], WRITE_TIMEOUT_TICKS) {
                Ok(1) => return,
                Ok(_) => continue,
                Err(e) => {
                    debug!("USB serial write timeout: {}", e);
                }
            }
        }
        if self.dropped == 0 {
            warn!("USB serial host not reading, dropping frame bytes");
        }
        self.dropped = self.dropped.saturating_add(1);
    }
}
