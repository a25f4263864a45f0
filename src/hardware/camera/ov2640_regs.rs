//! OV2640 register tables for the ArduCAM Mini 2MP.
//!
//! Sensor bank (0xFF = 0x01) entries set the sensor window; DSP bank
//! (0xFF = 0x00) entries set the DSP input size and the zoom output size
//! (ZMOW/ZMOH = width/4, height/4, overflow bits in ZMHH).

use super::mode_program::{ModeProgram, SensorReg};

/// Sensor and DSP defaults shared by every mode.
pub static OV2640_COMMON_INIT_REGS: [SensorReg; 176] = [
    SensorReg::new(0xff, 0x00), SensorReg::new(0x2c, 0xff), SensorReg::new(0x2e, 0xdf), SensorReg::new(0xff, 0x01),
    SensorReg::new(0x3c, 0x32), SensorReg::new(0x11, 0x00), SensorReg::new(0x09, 0x02), SensorReg::new(0x04, 0x28),
    SensorReg::new(0x13, 0xe5), SensorReg::new(0x14, 0x48), SensorReg::new(0x2c, 0x0c), SensorReg::new(0x33, 0x78),
    SensorReg::new(0x3a, 0x33), SensorReg::new(0x3b, 0xfb), SensorReg::new(0x3e, 0x00), SensorReg::new(0x43, 0x11),
    SensorReg::new(0x16, 0x10), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0x48, 0x00), SensorReg::new(0x5b, 0x00), SensorReg::new(0x42, 0x03),
    SensorReg::new(0x4a, 0x81), SensorReg::new(0x21, 0x99), SensorReg::new(0x24, 0x40), SensorReg::new(0x25, 0x38),
    SensorReg::new(0x26, 0x82), SensorReg::new(0x5c, 0x00), SensorReg::new(0x63, 0x00), SensorReg::new(0x61, 0x70),
    SensorReg::new(0x62, 0x80), SensorReg::new(0x7c, 0x05), SensorReg::new(0x20, 0x80), SensorReg::new(0x28, 0x30),
    SensorReg::new(0x6c, 0x00), SensorReg::new(0x6d, 0x80), SensorReg::new(0x6e, 0x00), SensorReg::new(0x70, 0x02),
    SensorReg::new(0x71, 0x94), SensorReg::new(0x73, 0xc1), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x43), SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x4b), SensorReg::new(0x32, 0x09),
    SensorReg::new(0x37, 0xc0), SensorReg::new(0x4f, 0x60), SensorReg::new(0x50, 0xa8), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x46, 0x3f), SensorReg::new(0x4f, 0x60), SensorReg::new(0x0c, 0x3c),
    SensorReg::new(0xff, 0x00), SensorReg::new(0xe5, 0x7f), SensorReg::new(0xf9, 0xc0), SensorReg::new(0x41, 0x24),
    SensorReg::new(0xe0, 0x14), SensorReg::new(0x76, 0xff), SensorReg::new(0x33, 0xa0), SensorReg::new(0x42, 0x20),
    SensorReg::new(0x43, 0x18), SensorReg::new(0x4c, 0x00), SensorReg::new(0x87, 0xd5), SensorReg::new(0x88, 0x3f),
    SensorReg::new(0xd7, 0x03), SensorReg::new(0xd9, 0x10), SensorReg::new(0xd3, 0x82), SensorReg::new(0xc8, 0x08),
    SensorReg::new(0xc9, 0x80), SensorReg::new(0x7c, 0x00), SensorReg::new(0x7d, 0x00), SensorReg::new(0x7c, 0x03),
    SensorReg::new(0x7d, 0x48), SensorReg::new(0x7d, 0x48), SensorReg::new(0x7c, 0x08), SensorReg::new(0x7d, 0x20),
    SensorReg::new(0x7d, 0x10), SensorReg::new(0x7d, 0x0e), SensorReg::new(0x90, 0x00), SensorReg::new(0x91, 0x0e),
    SensorReg::new(0x91, 0x1a), SensorReg::new(0x91, 0x31), SensorReg::new(0x91, 0x5a), SensorReg::new(0x91, 0x69),
    SensorReg::new(0x91, 0x75), SensorReg::new(0x91, 0x7e), SensorReg::new(0x91, 0x88), SensorReg::new(0x91, 0x8f),
    SensorReg::new(0x91, 0x96), SensorReg::new(0x91, 0xa3), SensorReg::new(0x91, 0xaf), SensorReg::new(0x91, 0xc4),
    SensorReg::new(0x91, 0xd7), SensorReg::new(0x91, 0xe8), SensorReg::new(0x91, 0x20), SensorReg::new(0x92, 0x00),
    SensorReg::new(0x93, 0x06), SensorReg::new(0x93, 0xe3), SensorReg::new(0x93, 0x05), SensorReg::new(0x93, 0x05),
    SensorReg::new(0x93, 0x00), SensorReg::new(0x93, 0x04), SensorReg::new(0x93, 0x00), SensorReg::new(0x93, 0x00),
    SensorReg::new(0x93, 0x00), SensorReg::new(0x93, 0x00), SensorReg::new(0x93, 0x00), SensorReg::new(0x93, 0x00),
    SensorReg::new(0x93, 0x00), SensorReg::new(0x96, 0x00), SensorReg::new(0x97, 0x08), SensorReg::new(0x97, 0x19),
    SensorReg::new(0x97, 0x02), SensorReg::new(0x97, 0x0c), SensorReg::new(0x97, 0x24), SensorReg::new(0x97, 0x30),
    SensorReg::new(0x97, 0x28), SensorReg::new(0x97, 0x26), SensorReg::new(0x97, 0x02), SensorReg::new(0x97, 0x98),
    SensorReg::new(0x97, 0x80), SensorReg::new(0x97, 0x00), SensorReg::new(0x97, 0x00), SensorReg::new(0xc3, 0xed),
    SensorReg::new(0xa4, 0x00), SensorReg::new(0xa8, 0x00), SensorReg::new(0xc5, 0x11), SensorReg::new(0xc6, 0x51),
    SensorReg::new(0xbf, 0x80), SensorReg::new(0xc7, 0x10), SensorReg::new(0xb6, 0x66), SensorReg::new(0xb8, 0xa5),
    SensorReg::new(0xb7, 0x64), SensorReg::new(0xb9, 0x7c), SensorReg::new(0xb3, 0xaf), SensorReg::new(0xb4, 0x97),
    SensorReg::new(0xb5, 0xff), SensorReg::new(0xb0, 0xc5), SensorReg::new(0xb1, 0x94), SensorReg::new(0xb2, 0x0f),
    SensorReg::new(0xc4, 0x5c), SensorReg::new(0xc0, 0x64), SensorReg::new(0xc1, 0x4b), SensorReg::new(0x8c, 0x00),
    SensorReg::new(0x86, 0x3d), SensorReg::new(0x50, 0x00), SensorReg::new(0x51, 0xc8), SensorReg::new(0x52, 0x96),
    SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00), SensorReg::new(0x5a, 0xc8),
    SensorReg::new(0x5b, 0x96), SensorReg::new(0x5c, 0x00), SensorReg::new(0xd3, 0x00), SensorReg::new(0xc3, 0xed),
    SensorReg::new(0x7f, 0x00), SensorReg::new(0xda, 0x00), SensorReg::new(0xe5, 0x1f), SensorReg::new(0xe1, 0x67),
    SensorReg::new(0xe0, 0x00), SensorReg::new(0xdd, 0x7f), SensorReg::new(0x05, 0x00), SensorReg::END,
];
/// YUV422 DSP output, the JPEG encoder's input format.
pub static OV2640_YUV422_REGS: [SensorReg; 10] = [
    SensorReg::new(0xff, 0x00), SensorReg::new(0x05, 0x00), SensorReg::new(0xda, 0x10), SensorReg::new(0xd7, 0x03),
    SensorReg::new(0xdf, 0x00), SensorReg::new(0x33, 0x80), SensorReg::new(0x3c, 0x40), SensorReg::new(0xe1, 0x77),
    SensorReg::new(0x00, 0x00), SensorReg::END,
];
/// Enables the JPEG encoder.
pub static OV2640_JPEG_REGS: [SensorReg; 9] = [
    SensorReg::new(0xe0, 0x14), SensorReg::new(0xe1, 0x77), SensorReg::new(0xe5, 0x1f), SensorReg::new(0xd7, 0x03),
    SensorReg::new(0xda, 0x10), SensorReg::new(0xe0, 0x00), SensorReg::new(0xff, 0x01), SensorReg::new(0x04, 0x08),
    SensorReg::END,
];
/// 320x240 RGB565 raw output (SVGA window, DSP zoom to QVGA).
pub static OV2640_QVGA_RGB565_REGS: [SensorReg; 48] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11), SensorReg::new(0x18, 0x43),
    SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x25), SensorReg::new(0x32, 0x89), SensorReg::new(0x37, 0xc0),
    SensorReg::new(0x4f, 0xca), SensorReg::new(0x50, 0xa8), SensorReg::new(0x5a, 0x23), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0x64),
    SensorReg::new(0xc1, 0x4b), SensorReg::new(0x86, 0x35), SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0xc8),
    SensorReg::new(0x52, 0x96), SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00),
    SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x50), SensorReg::new(0x5b, 0x3c), SensorReg::new(0x5c, 0x00),
    SensorReg::new(0xe0, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0x05, 0x00), SensorReg::new(0xda, 0x08),
    SensorReg::new(0xd7, 0x03), SensorReg::new(0xe0, 0x00), SensorReg::new(0x05, 0x00), SensorReg::END,
];
/// 160x120 JPEG window (SVGA sensor readout).
pub static OV2640_160X120_JPEG_REGS: [SensorReg; 42] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11), SensorReg::new(0x18, 0x43),
    SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x25), SensorReg::new(0x32, 0x89), SensorReg::new(0x37, 0xc0),
    SensorReg::new(0x4f, 0xca), SensorReg::new(0x50, 0xa8), SensorReg::new(0x5a, 0x23), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0x64),
    SensorReg::new(0xc1, 0x4b), SensorReg::new(0x86, 0x35), SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0xc8),
    SensorReg::new(0x52, 0x96), SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00),
    SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x28), SensorReg::new(0x5b, 0x1e), SensorReg::new(0x5c, 0x00),
    SensorReg::new(0xe0, 0x00), SensorReg::END,
];
/// 176x144 JPEG window (SVGA sensor readout).
pub static OV2640_176X144_JPEG_REGS: [SensorReg; 42] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11), SensorReg::new(0x18, 0x43),
    SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x25), SensorReg::new(0x32, 0x89), SensorReg::new(0x37, 0xc0),
    SensorReg::new(0x4f, 0xca), SensorReg::new(0x50, 0xa8), SensorReg::new(0x5a, 0x23), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0x64),
    SensorReg::new(0xc1, 0x4b), SensorReg::new(0x86, 0x35), SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0xc8),
    SensorReg::new(0x52, 0x96), SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00),
    SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x2c), SensorReg::new(0x5b, 0x24), SensorReg::new(0x5c, 0x00),
    SensorReg::new(0xe0, 0x00), SensorReg::END,
];
/// 320x240 JPEG window (SVGA sensor readout).
pub static OV2640_320X240_JPEG_REGS: [SensorReg; 42] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11), SensorReg::new(0x18, 0x43),
    SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x25), SensorReg::new(0x32, 0x89), SensorReg::new(0x37, 0xc0),
    SensorReg::new(0x4f, 0xca), SensorReg::new(0x50, 0xa8), SensorReg::new(0x5a, 0x23), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0x64),
    SensorReg::new(0xc1, 0x4b), SensorReg::new(0x86, 0x35), SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0xc8),
    SensorReg::new(0x52, 0x96), SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00),
    SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x50), SensorReg::new(0x5b, 0x3c), SensorReg::new(0x5c, 0x00),
    SensorReg::new(0xe0, 0x00), SensorReg::END,
];
/// 352x288 JPEG window (SVGA sensor readout).
pub static OV2640_352X288_JPEG_REGS: [SensorReg; 42] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x12, 0x40), SensorReg::new(0x17, 0x11), SensorReg::new(0x18, 0x43),
    SensorReg::new(0x19, 0x00), SensorReg::new(0x1a, 0x25), SensorReg::new(0x32, 0x89), SensorReg::new(0x37, 0xc0),
    SensorReg::new(0x4f, 0xca), SensorReg::new(0x50, 0xa8), SensorReg::new(0x5a, 0x23), SensorReg::new(0x6d, 0x00),
    SensorReg::new(0x3d, 0x38), SensorReg::new(0x39, 0x92), SensorReg::new(0x35, 0xda), SensorReg::new(0x22, 0x1a),
    SensorReg::new(0x37, 0xc3), SensorReg::new(0x23, 0x00), SensorReg::new(0x34, 0xc0), SensorReg::new(0x36, 0x1a),
    SensorReg::new(0x06, 0x88), SensorReg::new(0x07, 0xc0), SensorReg::new(0x0d, 0x87), SensorReg::new(0x0e, 0x41),
    SensorReg::new(0x4c, 0x00), SensorReg::new(0xff, 0x00), SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0x64),
    SensorReg::new(0xc1, 0x4b), SensorReg::new(0x86, 0x35), SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0xc8),
    SensorReg::new(0x52, 0x96), SensorReg::new(0x53, 0x00), SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x00),
    SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x58), SensorReg::new(0x5b, 0x48), SensorReg::new(0x5c, 0x00),
    SensorReg::new(0xe0, 0x00), SensorReg::END,
];
/// 640x480 JPEG window (UXGA sensor readout).
pub static OV2640_640X480_JPEG_REGS: [SensorReg; 41] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x11, 0x01), SensorReg::new(0x12, 0x00), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x75), SensorReg::new(0x32, 0x36), SensorReg::new(0x19, 0x01), SensorReg::new(0x1a, 0x97),
    SensorReg::new(0x03, 0x0f), SensorReg::new(0x37, 0x40), SensorReg::new(0x4f, 0xbb), SensorReg::new(0x50, 0x9c),
    SensorReg::new(0x5a, 0x57), SensorReg::new(0x6d, 0x80), SensorReg::new(0x3d, 0x34), SensorReg::new(0x39, 0x02),
    SensorReg::new(0x35, 0x88), SensorReg::new(0x22, 0x0a), SensorReg::new(0x37, 0x40), SensorReg::new(0x34, 0xa0),
    SensorReg::new(0x06, 0x02), SensorReg::new(0x0d, 0xb7), SensorReg::new(0x0e, 0x01), SensorReg::new(0xff, 0x00),
    SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0xc8), SensorReg::new(0xc1, 0x96), SensorReg::new(0x86, 0x3d),
    SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0x90), SensorReg::new(0x52, 0x2c), SensorReg::new(0x53, 0x00),
    SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x88), SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0xa0),
    SensorReg::new(0x5b, 0x78), SensorReg::new(0x5c, 0x00), SensorReg::new(0xd3, 0x04), SensorReg::new(0xe0, 0x00),
    SensorReg::END,
];
/// 800x600 JPEG window (UXGA sensor readout).
pub static OV2640_800X600_JPEG_REGS: [SensorReg; 41] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x11, 0x01), SensorReg::new(0x12, 0x00), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x75), SensorReg::new(0x32, 0x36), SensorReg::new(0x19, 0x01), SensorReg::new(0x1a, 0x97),
    SensorReg::new(0x03, 0x0f), SensorReg::new(0x37, 0x40), SensorReg::new(0x4f, 0xbb), SensorReg::new(0x50, 0x9c),
    SensorReg::new(0x5a, 0x57), SensorReg::new(0x6d, 0x80), SensorReg::new(0x3d, 0x34), SensorReg::new(0x39, 0x02),
    SensorReg::new(0x35, 0x88), SensorReg::new(0x22, 0x0a), SensorReg::new(0x37, 0x40), SensorReg::new(0x34, 0xa0),
    SensorReg::new(0x06, 0x02), SensorReg::new(0x0d, 0xb7), SensorReg::new(0x0e, 0x01), SensorReg::new(0xff, 0x00),
    SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0xc8), SensorReg::new(0xc1, 0x96), SensorReg::new(0x86, 0x3d),
    SensorReg::new(0x50, 0x89), SensorReg::new(0x51, 0x90), SensorReg::new(0x52, 0x2c), SensorReg::new(0x53, 0x00),
    SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x88), SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0xc8),
    SensorReg::new(0x5b, 0x96), SensorReg::new(0x5c, 0x00), SensorReg::new(0xd3, 0x04), SensorReg::new(0xe0, 0x00),
    SensorReg::END,
];
/// 1024x768 JPEG window (UXGA sensor readout).
pub static OV2640_1024X768_JPEG_REGS: [SensorReg; 41] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x11, 0x01), SensorReg::new(0x12, 0x00), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x75), SensorReg::new(0x32, 0x36), SensorReg::new(0x19, 0x01), SensorReg::new(0x1a, 0x97),
    SensorReg::new(0x03, 0x0f), SensorReg::new(0x37, 0x40), SensorReg::new(0x4f, 0xbb), SensorReg::new(0x50, 0x9c),
    SensorReg::new(0x5a, 0x57), SensorReg::new(0x6d, 0x80), SensorReg::new(0x3d, 0x34), SensorReg::new(0x39, 0x02),
    SensorReg::new(0x35, 0x88), SensorReg::new(0x22, 0x0a), SensorReg::new(0x37, 0x40), SensorReg::new(0x34, 0xa0),
    SensorReg::new(0x06, 0x02), SensorReg::new(0x0d, 0xb7), SensorReg::new(0x0e, 0x01), SensorReg::new(0xff, 0x00),
    SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0xc8), SensorReg::new(0xc1, 0x96), SensorReg::new(0x86, 0x3d),
    SensorReg::new(0x50, 0x80), SensorReg::new(0x51, 0x90), SensorReg::new(0x52, 0x2c), SensorReg::new(0x53, 0x00),
    SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x88), SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x00),
    SensorReg::new(0x5b, 0xc0), SensorReg::new(0x5c, 0x01), SensorReg::new(0xd3, 0x04), SensorReg::new(0xe0, 0x00),
    SensorReg::END,
];
/// 1280x1024 JPEG window (UXGA sensor readout).
pub static OV2640_1280X1024_JPEG_REGS: [SensorReg; 41] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x11, 0x01), SensorReg::new(0x12, 0x00), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x75), SensorReg::new(0x32, 0x36), SensorReg::new(0x19, 0x01), SensorReg::new(0x1a, 0x97),
    SensorReg::new(0x03, 0x0f), SensorReg::new(0x37, 0x40), SensorReg::new(0x4f, 0xbb), SensorReg::new(0x50, 0x9c),
    SensorReg::new(0x5a, 0x57), SensorReg::new(0x6d, 0x80), SensorReg::new(0x3d, 0x34), SensorReg::new(0x39, 0x02),
    SensorReg::new(0x35, 0x88), SensorReg::new(0x22, 0x0a), SensorReg::new(0x37, 0x40), SensorReg::new(0x34, 0xa0),
    SensorReg::new(0x06, 0x02), SensorReg::new(0x0d, 0xb7), SensorReg::new(0x0e, 0x01), SensorReg::new(0xff, 0x00),
    SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0xc8), SensorReg::new(0xc1, 0x96), SensorReg::new(0x86, 0x3d),
    SensorReg::new(0x50, 0x80), SensorReg::new(0x51, 0x90), SensorReg::new(0x52, 0x2c), SensorReg::new(0x53, 0x00),
    SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x88), SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x40),
    SensorReg::new(0x5b, 0x00), SensorReg::new(0x5c, 0x05), SensorReg::new(0xd3, 0x04), SensorReg::new(0xe0, 0x00),
    SensorReg::END,
];
/// 1600x1200 JPEG window (UXGA sensor readout).
pub static OV2640_1600X1200_JPEG_REGS: [SensorReg; 41] = [
    SensorReg::new(0xff, 0x01), SensorReg::new(0x11, 0x01), SensorReg::new(0x12, 0x00), SensorReg::new(0x17, 0x11),
    SensorReg::new(0x18, 0x75), SensorReg::new(0x32, 0x36), SensorReg::new(0x19, 0x01), SensorReg::new(0x1a, 0x97),
    SensorReg::new(0x03, 0x0f), SensorReg::new(0x37, 0x40), SensorReg::new(0x4f, 0xbb), SensorReg::new(0x50, 0x9c),
    SensorReg::new(0x5a, 0x57), SensorReg::new(0x6d, 0x80), SensorReg::new(0x3d, 0x34), SensorReg::new(0x39, 0x02),
    SensorReg::new(0x35, 0x88), SensorReg::new(0x22, 0x0a), SensorReg::new(0x37, 0x40), SensorReg::new(0x34, 0xa0),
    SensorReg::new(0x06, 0x02), SensorReg::new(0x0d, 0xb7), SensorReg::new(0x0e, 0x01), SensorReg::new(0xff, 0x00),
    SensorReg::new(0xe0, 0x04), SensorReg::new(0xc0, 0xc8), SensorReg::new(0xc1, 0x96), SensorReg::new(0x86, 0x3d),
    SensorReg::new(0x50, 0x80), SensorReg::new(0x51, 0x90), SensorReg::new(0x52, 0x2c), SensorReg::new(0x53, 0x00),
    SensorReg::new(0x54, 0x00), SensorReg::new(0x55, 0x88), SensorReg::new(0x57, 0x00), SensorReg::new(0x5a, 0x90),
    SensorReg::new(0x5b, 0x2c), SensorReg::new(0x5c, 0x05), SensorReg::new(0xd3, 0x04), SensorReg::new(0xe0, 0x00),
    SensorReg::END,
];
pub static OV2640_COMMON_INIT: ModeProgram = ModeProgram::new("ov2640_common_init", &OV2640_COMMON_INIT_REGS);
pub static OV2640_YUV422: ModeProgram = ModeProgram::new("ov2640_yuv422", &OV2640_YUV422_REGS);
pub static OV2640_JPEG: ModeProgram = ModeProgram::new("ov2640_jpeg", &OV2640_JPEG_REGS);
pub static OV2640_QVGA_RGB565: ModeProgram = ModeProgram::new("ov2640_qvga_rgb565", &OV2640_QVGA_RGB565_REGS);
pub static OV2640_160X120_JPEG: ModeProgram = ModeProgram::new("ov2640_160x120_jpeg", &OV2640_160X120_JPEG_REGS);
pub static OV2640_176X144_JPEG: ModeProgram = ModeProgram::new("ov2640_176x144_jpeg", &OV2640_176X144_JPEG_REGS);
pub static OV2640_320X240_JPEG: ModeProgram = ModeProgram::new("ov2640_320x240_jpeg", &OV2640_320X240_JPEG_REGS);
pub static OV2640_352X288_JPEG: ModeProgram = ModeProgram::new("ov2640_352x288_jpeg", &OV2640_352X288_JPEG_REGS);
pub static OV2640_640X480_JPEG: ModeProgram = ModeProgram::new("ov2640_640x480_jpeg", &OV2640_640X480_JPEG_REGS);
pub static OV2640_800X600_JPEG: ModeProgram = ModeProgram::new("ov2640_800x600_jpeg", &OV2640_800X600_JPEG_REGS);
pub static OV2640_1024X768_JPEG: ModeProgram = ModeProgram::new("ov2640_1024x768_jpeg", &OV2640_1024X768_JPEG_REGS);
pub static OV2640_1280X1024_JPEG: ModeProgram = ModeProgram::new("ov2640_1280x1024_jpeg", &OV2640_1280X1024_JPEG_REGS);
pub static OV2640_1600X1200_JPEG: ModeProgram = ModeProgram::new("ov2640_1600x1200_jpeg", &OV2640_1600X1200_JPEG_REGS);
