//! Capture modes and the per-cycle session state.

use crate::config::ConfigError;
use crate::error::{CameraError, CameraResult};
use crate::hardware::camera::mode_program::ModeProgram;
use crate::hardware::camera::ov2640_regs::{
    OV2640_1024X768_JPEG, OV2640_1280X1024_JPEG, OV2640_1600X1200_JPEG, OV2640_160X120_JPEG,
    OV2640_176X144_JPEG, OV2640_320X240_JPEG, OV2640_352X288_JPEG, OV2640_640X480_JPEG,
    OV2640_800X600_JPEG,
};

/// Largest raw-mode scale-down exponent (240 / 2^4 = 15 rows).
pub const MAX_SCALEDOWN: u8 = 4;

/// Raw-mode frame geometry (RGB565, 2 bytes per pixel).
pub const RAW_WIDTH: usize = 320;
pub const RAW_HEIGHT: usize = 240;
pub const RAW_BYTES_PER_PIXEL: usize = 2;
pub const RAW_FRAME_BYTES: u32 = (RAW_WIDTH * RAW_HEIGHT * RAW_BYTES_PER_PIXEL) as u32;

/// Slack the ArduChip may add to a raw frame's reported length.
const RAW_LENGTH_SLACK: u32 = 8;

/// JPEG 出力解像度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegResolution {
    R160x120,
    R176x144,
    R320x240,
    R352x288,
    R640x480,
    R800x600,
    R1024x768,
    R1280x1024,
    R1600x1200,
}

impl JpegResolution {
    pub const ALL: [JpegResolution; 9] = [
        JpegResolution::R160x120,
        JpegResolution::R176x144,
        JpegResolution::R320x240,
        JpegResolution::R352x288,
        JpegResolution::R640x480,
        JpegResolution::R800x600,
        JpegResolution::R1024x768,
        JpegResolution::R1280x1024,
        JpegResolution::R1600x1200,
    ];

    /// (width, height) in pixels
    pub fn dims(self) -> (u16, u16) {
        match self {
            JpegResolution::R160x120 => (160, 120),
            JpegResolution::R176x144 => (176, 144),
            JpegResolution::R320x240 => (320, 240),
            JpegResolution::R352x288 => (352, 288),
            JpegResolution::R640x480 => (640, 480),
            JpegResolution::R800x600 => (800, 600),
            JpegResolution::R1024x768 => (1024, 768),
            JpegResolution::R1280x1024 => (1280, 1024),
            JpegResolution::R1600x1200 => (1600, 1200),
        }
    }

    /// The resolution's register table.
    pub fn program(self) -> &'static ModeProgram {
        match self {
            JpegResolution::R160x120 => &OV2640_160X120_JPEG,
            JpegResolution::R176x144 => &OV2640_176X144_JPEG,
            JpegResolution::R320x240 => &OV2640_320X240_JPEG,
            JpegResolution::R352x288 => &OV2640_352X288_JPEG,
            JpegResolution::R640x480 => &OV2640_640X480_JPEG,
            JpegResolution::R800x600 => &OV2640_800X600_JPEG,
            JpegResolution::R1024x768 => &OV2640_1024X768_JPEG,
            JpegResolution::R1280x1024 => &OV2640_1280X1024_JPEG,
            JpegResolution::R1600x1200 => &OV2640_1600X1200_JPEG,
        }
    }

    /// Parses `"160x120"` style names.
    pub fn from_dims_str(dims: &str) -> Option<Self> {
        JpegResolution::ALL.into_iter().find(|res| {
            let (w, h) = res.dims();
            let mut parts = dims.splitn(2, ['x', 'X']);
            let width = parts.next().and_then(|p| p.parse::<u16>().ok());
            let height = parts.next().and_then(|p| p.parse::<u16>().ok());
            width == Some(w) && height == Some(h)
        })
    }
}

/// Raw-mode parameters: scale-down exponent and grayscale flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawParams {
    scaledown: u8,
    grayscale: bool,
}

impl RawParams {
    /// Out-of-range exponents are rejected, never clamped.
    pub fn new(scaledown: u8, grayscale: bool) -> CameraResult<Self> {
        if scaledown > MAX_SCALEDOWN {
            return Err(CameraError::InvalidScaledown {
                requested: scaledown,
                max: MAX_SCALEDOWN,
            });
        }
        Ok(Self {
            scaledown,
            grayscale,
        })
    }

    pub fn scaledown(&self) -> u8 {
        self.scaledown
    }

    pub fn grayscale(&self) -> bool {
        self.grayscale
    }

    /// Keep every `step()`-th pixel in both directions.
    pub fn step(&self) -> usize {
        1 << self.scaledown
    }

    pub fn output_width(&self) -> usize {
        RAW_WIDTH >> self.scaledown
    }

    pub fn output_height(&self) -> usize {
        RAW_HEIGHT >> self.scaledown
    }

    /// Bytes forwarded for one full raw frame.
    pub fn output_len(&self) -> usize {
        let bytes_per_pixel = if self.grayscale { 1 } else { RAW_BYTES_PER_PIXEL };
        self.output_width() * self.output_height() * bytes_per_pixel
    }
}

/// キャプチャモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// 320x240 RGB565, reduced while streaming
    Raw(RawParams),
    Jpeg(JpegResolution),
}

impl CaptureMode {
    /// Maps a configuration name (`"qvga"`, `"jpeg640x480"`, ...) to a mode.
    /// Names are matched without regard to ASCII case.
    ///
    /// `scaledown` and `grayscale` only apply to `"qvga"`.
    pub fn parse(name: &str, scaledown: u8, grayscale: bool) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("qvga") {
            let params = RawParams::new(scaledown, grayscale).map_err(|_| {
                ConfigError::InvalidScaledown {
                    value: scaledown,
                    max: MAX_SCALEDOWN,
                }
            })?;
            return Ok(CaptureMode::Raw(params));
        }
        name.get(..4)
            .filter(|prefix| prefix.eq_ignore_ascii_case("jpeg"))
            .and_then(|_| name.get(4..))
            .and_then(JpegResolution::from_dims_str)
            .map(CaptureMode::Jpeg)
            .ok_or(ConfigError::UnknownMode)
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, CaptureMode::Jpeg(_))
    }

    /// Largest FIFO length accepted for this mode.
    pub fn max_frame_len(&self, configured_max: u32) -> u32 {
        match self {
            CaptureMode::Jpeg(_) => configured_max,
            CaptureMode::Raw(_) => configured_max.min(RAW_FRAME_BYTES + RAW_LENGTH_SLACK),
        }
    }
}

/// One capture cycle's state.
///
/// `capturing` is true from a successful trigger until the frame is drained
/// or abandoned; `starting` is true from the trigger until frame extraction
/// begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSession {
    mode: Option<CaptureMode>,
    using_jpeg: bool,
    capturing: bool,
    starting: bool,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a mode, discarding any cycle in progress.
    pub fn configure(&mut self, mode: CaptureMode) {
        *self = Self {
            mode: Some(mode),
            using_jpeg: mode.is_jpeg(),
            capturing: false,
            starting: false,
        };
    }

    pub fn mode(&self) -> Option<CaptureMode> {
        self.mode
    }

    pub fn using_jpeg(&self) -> bool {
        self.using_jpeg
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn is_starting(&self) -> bool {
        self.starting
    }

    /// FIFO triggered.
    pub fn mark_triggered(&mut self) {
        self.capturing = true;
        self.starting = true;
    }

    /// Frame extraction has begun.
    pub fn mark_extracting(&mut self) {
        self.starting = false;
    }

    /// Back to idle; the mode is kept.
    pub fn reset(&mut self) {
        self.capturing = false;
        self.starting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_names() {
        assert_eq!(
            CaptureMode::parse("jpeg640x480", 0, false),
            Ok(CaptureMode::Jpeg(JpegResolution::R640x480))
        );
        assert_eq!(
            CaptureMode::parse("jpeg1600x1200", 0, false),
            Ok(CaptureMode::Jpeg(JpegResolution::R1600x1200))
        );
        assert_eq!(
            CaptureMode::parse("QVGA", 3, true),
            Ok(CaptureMode::Raw(RawParams::new(3, true).unwrap()))
        );
        assert_eq!(
            CaptureMode::parse("JPEG640X480", 0, false),
            Ok(CaptureMode::Jpeg(JpegResolution::R640x480))
        );
        assert_eq!(
            CaptureMode::parse("Jpeg1024x768", 0, false),
            Ok(CaptureMode::Jpeg(JpegResolution::R1024x768))
        );
        assert_eq!(CaptureMode::parse("jpeg640x481", 0, false), Err(ConfigError::UnknownMode));
        assert_eq!(CaptureMode::parse("jpg", 0, false), Err(ConfigError::UnknownMode));
        assert_eq!(CaptureMode::parse("éjpeg", 0, false), Err(ConfigError::UnknownMode));
        assert_eq!(CaptureMode::parse("bmp", 0, false), Err(ConfigError::UnknownMode));
        assert_eq!(
            CaptureMode::parse("qvga", 5, false),
            Err(ConfigError::InvalidScaledown { value: 5, max: 4 })
        );
    }

    #[test]
    fn test_every_resolution_parses_from_its_name() {
        for res in JpegResolution::ALL {
            let (w, h) = res.dims();
            let name = format!("jpeg{}x{}", w, h);
            assert_eq!(CaptureMode::parse(&name, 0, false), Ok(CaptureMode::Jpeg(res)));
        }
    }

    #[test]
    fn test_scaledown_range() {
        assert!(RawParams::new(MAX_SCALEDOWN, false).is_ok());
        assert_eq!(
            RawParams::new(MAX_SCALEDOWN + 1, false),
            Err(CameraError::InvalidScaledown { requested: 5, max: 4 })
        );
    }

    #[test]
    fn test_output_len_shrinks_with_scaledown() {
        let mut previous = usize::MAX;
        for s in 0..=MAX_SCALEDOWN {
            let len = RawParams::new(s, false).unwrap().output_len();
            assert!(len < previous);
            previous = len;
        }
        assert_eq!(RawParams::new(0, false).unwrap().output_len(), 153_600);
        assert_eq!(RawParams::new(4, false).unwrap().output_len(), 600);
    }

    #[test]
    fn test_grayscale_halves_output() {
        for s in 0..=MAX_SCALEDOWN {
            let color = RawParams::new(s, false).unwrap().output_len();
            let gray = RawParams::new(s, true).unwrap().output_len();
            assert_eq!(gray * 2, color);
        }
    }

    #[test]
    fn test_raw_max_frame_len() {
        let raw = CaptureMode::Raw(RawParams::new(0, false).unwrap());
        assert_eq!(raw.max_frame_len(0x5FFFF), RAW_FRAME_BYTES + 8);
        assert_eq!(raw.max_frame_len(1000), 1000);
        let jpeg = CaptureMode::Jpeg(JpegResolution::R320x240);
        assert_eq!(jpeg.max_frame_len(0x5FFFF), 0x5FFFF);
    }

    #[test]
    fn test_session_flags() {
        let mut session = CaptureSession::new();
        assert_eq!(session.mode(), None);
        session.configure(CaptureMode::Jpeg(JpegResolution::R640x480));
        assert!(session.using_jpeg());
        session.mark_triggered();
        assert!(session.is_capturing() && session.is_starting());
        session.mark_extracting();
        assert!(session.is_capturing() && !session.is_starting());
        session.reset();
        assert!(!session.is_capturing());
        assert!(session.mode().is_some());
    }
}
