//! ArduCAM Mini 2MP ファームウェア (ESP32-C3)
//!
//! Streams frames to a host over USB serial. The host sends a nonzero byte to
//! request a frame and a zero byte to stop.

use anyhow::Result;
use arducam_mini_2mp::communication::usb_serial::UsbSerialPort;
use arducam_mini_2mp::{ArduCam, CaptureConfig, CaptureEvent, SerialTransport};
use esp_idf_svc::hal::delay::{Delay, FreeRtos};
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::spi::config::Config as SpiConfig;
use esp_idf_svc::hal::spi::{SpiBusDriver, SpiDriver, SpiDriverConfig};
use esp_idf_svc::hal::units::FromValueType;
use log::{error, info, warn};

/// ループ1回あたりの待機時間 (アイドル時)
const IDLE_TICK_MS: u32 = 10;
/// 連続エラー時の待機時間
const ERROR_BACKOFF_MS: u32 = 500;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::set_max_level(log::LevelFilter::Info);

    info!("ArduCAM Mini 2MP v{}", arducam_mini_2mp::VERSION);

    let config = CaptureConfig::from_build_config()?;
    info!("capture config: {:?}", config);

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // SPI (capture bus): SCLK=GPIO6, MOSI=GPIO7, MISO=GPIO2, CS=GPIO10
    let spi_driver = SpiDriver::new(
        peripherals.spi2,
        pins.gpio6,
        pins.gpio7,
        Some(pins.gpio2),
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiBusDriver::new(spi_driver, &SpiConfig::new().baudrate(8.MHz().into()))?;
    let cs = PinDriver::output(pins.gpio10)?;

    // SCCB (control bus): SDA=GPIO4, SCL=GPIO5
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio4,
        pins.gpio5,
        &I2cConfig::new().baudrate(100.kHz().into()),
    )?;

    let port = UsbSerialPort::new(peripherals.usb_serial, pins.gpio18, pins.gpio19)?;
    let transport = SerialTransport::new(port);

    let mut camera = ArduCam::new(spi, cs, i2c, Delay::new_default(), transport, config)?;
    camera.begin_configured()?;
    info!("camera ready, waiting for host requests");

    loop {
        match camera.capture() {
            Ok(CaptureEvent::Idle) => FreeRtos::delay_ms(IDLE_TICK_MS),
            Ok(CaptureEvent::FrameSent { bytes }) => {
                info!("frame {} sent ({} bytes)", camera.stats().frames_completed, bytes);
            }
            Ok(CaptureEvent::Stopped { bytes }) => {
                info!("stream stopped after {} bytes", bytes);
            }
            Err(e) if e.is_capture_fault() => {
                warn!("capture fault: {} (faults so far: {})", e, camera.stats().total_faults());
            }
            Err(e) => {
                error!("capture error: {}", e);
                FreeRtos::delay_ms(ERROR_BACKOFF_MS);
            }
        }
    }
}
