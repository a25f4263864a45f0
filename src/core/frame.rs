//! フレーム抽出
//!
//! Streams a drained FIFO to the transport through a small stack window; the
//! driver never holds a whole frame.
//!
//! - JPEG: bytes are forwarded verbatim (optionally trimmed to SOI..EOI).
//! - Raw: 320x240 RGB565 rows are reduced by the scale-down step and, for
//!   grayscale, collapsed to one luma byte per kept pixel.
//!
//! Stop requests are honored between reads, never inside one.

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use super::session::{RawParams, RAW_BYTES_PER_PIXEL, RAW_FRAME_BYTES, RAW_HEIGHT, RAW_WIDTH};
use crate::communication::Transport;
use crate::config::CaptureConfig;
use crate::hardware::bus::{BusError, FifoSource};

/// JPEG drain window
const JPEG_WINDOW: usize = 32;
const ROW_BYTES: usize = RAW_WIDTH * RAW_BYTES_PER_PIXEL;

const JPEG_MARKER: u8 = 0xFF;
const JPEG_SOI: u8 = 0xD8;
const JPEG_EOI: u8 = 0xD9;

/// Result of streaming one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Bytes clocked out of the FIFO
    pub bytes_read: u32,
    /// Bytes handed to the transport
    pub bytes_sent: u32,
    /// The transport asked to stop before the frame was complete
    pub stopped: bool,
}

/// Forwards bytes to the transport, pacing them if configured.
struct Sink<'a, T, D> {
    transport: &'a mut T,
    delay: &'a mut D,
    byte_delay_us: u32,
    sent: u32,
}

impl<T: Transport, D: DelayNs> Sink<'_, T, D> {
    fn send(&mut self, byte: u8) {
        self.transport.send_byte(byte);
        self.sent += 1;
        if self.byte_delay_us > 0 {
            self.delay.delay_us(self.byte_delay_us);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrimState {
    BeforeSoi { after_marker: bool },
    InFrame { after_marker: bool },
    Done,
}

/// What to do with one byte when trimming to SOI..EOI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrimAction {
    Drop,
    Emit,
    /// The byte completes SOI; emit the held 0xFF first
    EmitSoi,
    /// The byte completes EOI; emit it and stop
    EmitLast,
}

impl TrimState {
    fn new() -> Self {
        TrimState::BeforeSoi {
            after_marker: false,
        }
    }

    fn push(&mut self, byte: u8) -> TrimAction {
        match *self {
            TrimState::BeforeSoi { after_marker } => {
                if after_marker && byte == JPEG_SOI {
                    *self = TrimState::InFrame {
                        after_marker: false,
                    };
                    TrimAction::EmitSoi
                } else {
                    *self = TrimState::BeforeSoi {
                        after_marker: byte == JPEG_MARKER,
                    };
                    TrimAction::Drop
                }
            }
            TrimState::InFrame { after_marker } => {
                if after_marker && byte == JPEG_EOI {
                    *self = TrimState::Done;
                    TrimAction::EmitLast
                } else {
                    *self = TrimState::InFrame {
                        after_marker: byte == JPEG_MARKER,
                    };
                    TrimAction::Emit
                }
            }
            TrimState::Done => TrimAction::Drop,
        }
    }
}

/// Streams a JPEG frame of `length` bytes from `source` to `transport`.
///
/// The stop request is checked before the first byte and then every
/// `checkpoint_bytes`. Without marker trimming exactly `length` bytes are sent
/// unless a stop arrives first.
pub fn grab_jpeg_frame<S, T, D>(
    source: &mut S,
    length: u32,
    transport: &mut T,
    delay: &mut D,
    config: &CaptureConfig,
) -> Result<FrameOutcome, BusError>
where
    S: FifoSource,
    T: Transport,
    D: DelayNs,
{
    let checkpoint = config.checkpoint_bytes.max(1);
    let mut sink = Sink {
        transport,
        delay,
        byte_delay_us: config.byte_delay_us,
        sent: 0,
    };
    let mut trim = config.jpeg_trim_markers.then(TrimState::new);
    let mut window = [0u8; JPEG_WINDOW];
    let mut offset = 0u32;
    let mut stopped = false;

    'drain: while offset < length {
        let since_checkpoint = offset % checkpoint;
        if since_checkpoint == 0 && sink.transport.got_stop_request() {
            warn!("stop request after {} of {} JPEG bytes", offset, length);
            stopped = true;
            break;
        }
        let chunk = (length - offset)
            .min(JPEG_WINDOW as u32)
            .min(checkpoint - since_checkpoint) as usize;
        source.read_into(&mut window[..chunk])?;
        offset += chunk as u32;

        for &byte in &window[..chunk] {
            match trim.as_mut().map(|state| state.push(byte)) {
                None | Some(TrimAction::Emit) => sink.send(byte),
                Some(TrimAction::Drop) => {}
                Some(TrimAction::EmitSoi) => {
                    sink.send(JPEG_MARKER);
                    sink.send(byte);
                }
                Some(TrimAction::EmitLast) => {
                    sink.send(byte);
                    debug!("EOI at byte {}, {} trailing bytes left", offset, length - offset);
                    break 'drain;
                }
            }
        }
    }

    Ok(FrameOutcome {
        bytes_read: offset,
        bytes_sent: sink.sent,
        stopped,
    })
}

/// BT.601 luma of a big-endian RGB565 pixel.
pub fn rgb565_to_luma(hi: u8, lo: u8) -> u8 {
    let pixel = u16::from_be_bytes([hi, lo]);
    let r5 = u32::from(pixel >> 11);
    let g6 = u32::from((pixel >> 5) & 0x3F);
    let b5 = u32::from(pixel & 0x1F);
    let r = (r5 << 3) | (r5 >> 2);
    let g = (g6 << 2) | (g6 >> 4);
    let b = (b5 << 3) | (b5 >> 2);
    ((77 * r + 150 * g + 29 * b) >> 8) as u8
}

/// Streams a raw 320x240 RGB565 frame, reducing it on the fly.
///
/// Rows are read whole; rows and columns that are not multiples of the
/// scale-down step are dropped. The stop request is checked before every row.
/// A short frame yields the complete pixels it contains.
pub fn grab_raw_frame<S, T, D>(
    source: &mut S,
    length: u32,
    params: &RawParams,
    transport: &mut T,
    delay: &mut D,
    config: &CaptureConfig,
) -> Result<FrameOutcome, BusError>
where
    S: FifoSource,
    T: Transport,
    D: DelayNs,
{
    let mut sink = Sink {
        transport,
        delay,
        byte_delay_us: config.byte_delay_us,
        sent: 0,
    };
    let available = length.min(RAW_FRAME_BYTES);
    let step = params.step();
    let mut row = [0u8; ROW_BYTES];
    let mut read = 0u32;
    let mut stopped = false;

    for y in 0..RAW_HEIGHT {
        if read >= available {
            break;
        }
        if sink.transport.got_stop_request() {
            warn!("stop request at raw row {}", y);
            stopped = true;
            break;
        }
        let row_len = (available - read).min(ROW_BYTES as u32) as usize;
        source.read_into(&mut row[..row_len])?;
        read += row_len as u32;

        if y % step != 0 {
            continue;
        }
        for pixel in row[..row_len].chunks_exact(RAW_BYTES_PER_PIXEL).step_by(step) {
            let (hi, lo) = (pixel[0], pixel[1]);
            if params.grayscale() {
                sink.send(rgb565_to_luma(hi, lo));
            } else {
                sink.send(hi);
                sink.send(lo);
            }
        }
    }

    Ok(FrameOutcome {
        bytes_read: read,
        bytes_sent: sink.sent,
        stopped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockTransport, NoopDelay, StopPolicy};

    /// テスト用の FIFO ソース
    struct SliceSource {
        data: Vec<u8>,
        pos: usize,
    }

    impl SliceSource {
        fn new(data: Vec<u8>) -> Self {
            Self { data, pos: 0 }
        }
    }

    impl FifoSource for SliceSource {
        fn read_into(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
            for slot in buf.iter_mut() {
                *slot = self.data.get(self.pos).copied().unwrap_or(0);
                self.pos += 1;
            }
            Ok(())
        }
    }

    fn jpeg_bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn test_jpeg_forwards_exact_length() {
        let data = jpeg_bytes(1000);
        let mut source = SliceSource::new(data.clone());
        let transport = MockTransport::new();
        let outcome = grab_jpeg_frame(
            &mut source,
            1000,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.bytes_sent, 1000);
        assert_eq!(outcome.bytes_read, 1000);
        assert!(!outcome.stopped);
        assert_eq!(transport.sent_bytes(), data);
    }

    #[test]
    fn test_jpeg_checks_stop_at_each_checkpoint() {
        let mut source = SliceSource::new(jpeg_bytes(1000));
        let transport = MockTransport::new();
        let config = CaptureConfig::default().with_checkpoint_bytes(100);
        grab_jpeg_frame(&mut source, 1000, &mut transport.clone(), &mut NoopDelay::new(), &config)
            .unwrap();
        assert_eq!(transport.stop_queries(), 10);
    }

    #[test]
    fn test_jpeg_stop_halts_at_checkpoint() {
        let mut source = SliceSource::new(jpeg_bytes(1000));
        let transport = MockTransport::new();
        transport.set_stop_policy(StopPolicy::AfterBytes(150));
        let config = CaptureConfig::default().with_checkpoint_bytes(100);
        let outcome =
            grab_jpeg_frame(&mut source, 1000, &mut transport.clone(), &mut NoopDelay::new(), &config)
                .unwrap();
        assert!(outcome.stopped);
        assert_eq!(outcome.bytes_read, 200);
        assert_eq!(source.pos, 200);
    }

    #[test]
    fn test_jpeg_immediate_stop_reads_nothing() {
        let mut source = SliceSource::new(jpeg_bytes(64));
        let transport = MockTransport::new();
        transport.set_stop_policy(StopPolicy::Always);
        let outcome = grab_jpeg_frame(
            &mut source,
            64,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        assert!(outcome.stopped);
        assert_eq!(source.pos, 0);
        assert_eq!(transport.sent_len(), 0);
    }

    #[test]
    fn test_jpeg_trim_markers() {
        let data = vec![0x00, 0x12, 0xFF, 0xD8, 0x01, 0xFF, 0x00, 0xFF, 0xD9, 0x55, 0x66];
        let mut source = SliceSource::new(data.clone());
        let transport = MockTransport::new();
        let config = CaptureConfig::default().with_jpeg_trim_markers(true);
        let outcome = grab_jpeg_frame(
            &mut source,
            data.len() as u32,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &config,
        )
        .unwrap();
        assert_eq!(transport.sent_bytes(), vec![0xFF, 0xD8, 0x01, 0xFF, 0x00, 0xFF, 0xD9]);
        assert_eq!(outcome.bytes_sent, 7);
    }

    #[test]
    fn test_byte_pacing() {
        let mut source = SliceSource::new(jpeg_bytes(10));
        let transport = MockTransport::new();
        let mut delay = NoopDelay::new();
        let config = CaptureConfig::default().with_byte_delay_us(5);
        grab_jpeg_frame(&mut source, 10, &mut transport.clone(), &mut delay, &config).unwrap();
        assert_eq!(delay.elapsed_ns(), 10 * 5_000);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(rgb565_to_luma(0x00, 0x00), 0);
        assert_eq!(rgb565_to_luma(0xFF, 0xFF), 255);
        // 純粋な緑は赤より明るい
        assert!(rgb565_to_luma(0x07, 0xE0) > rgb565_to_luma(0xF8, 0x00));
    }

    fn raw_frame() -> Vec<u8> {
        let mut data = Vec::with_capacity(RAW_FRAME_BYTES as usize);
        for y in 0..RAW_HEIGHT {
            for x in 0..RAW_WIDTH {
                data.push(y as u8);
                data.push(x as u8);
            }
        }
        data
    }

    #[test]
    fn test_raw_full_frame_is_verbatim() {
        let data = raw_frame();
        let params = RawParams::new(0, false).unwrap();
        let mut source = SliceSource::new(data.clone());
        let transport = MockTransport::new();
        let outcome = grab_raw_frame(
            &mut source,
            RAW_FRAME_BYTES,
            &params,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.bytes_sent as usize, params.output_len());
        assert_eq!(transport.sent_bytes(), data);
    }

    #[test]
    fn test_raw_scaledown_keeps_multiples_of_step() {
        let params = RawParams::new(2, false).unwrap();
        let mut source = SliceSource::new(raw_frame());
        let transport = MockTransport::new();
        grab_raw_frame(
            &mut source,
            RAW_FRAME_BYTES + 8,
            &params,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        let sent = transport.sent_bytes();
        assert_eq!(sent.len(), 80 * 60 * 2);
        // 2行目の先頭は y=4, x=0、2画素目は x=4
        assert_eq!(&sent[..4], &[0, 0, 0, 4]);
        assert_eq!(&sent[160..162], &[4, 0]);
        // トレーラーは読まない
        assert_eq!(source.pos, RAW_FRAME_BYTES as usize);
    }

    #[test]
    fn test_raw_grayscale_sizes() {
        for s in 0..=4 {
            let params = RawParams::new(s, true).unwrap();
            let mut source = SliceSource::new(raw_frame());
            let transport = MockTransport::new();
            let outcome = grab_raw_frame(
                &mut source,
                RAW_FRAME_BYTES,
                &params,
                &mut transport.clone(),
                &mut NoopDelay::new(),
                &CaptureConfig::default(),
            )
            .unwrap();
            assert_eq!(outcome.bytes_sent as usize, params.output_len());
        }
    }

    #[test]
    fn test_raw_stop_checked_per_row() {
        let params = RawParams::new(0, false).unwrap();
        let mut source = SliceSource::new(raw_frame());
        let transport = MockTransport::new();
        transport.set_stop_policy(StopPolicy::AfterBytes(ROW_BYTES * 3));
        let outcome = grab_raw_frame(
            &mut source,
            RAW_FRAME_BYTES,
            &params,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        assert!(outcome.stopped);
        assert_eq!(outcome.bytes_read as usize, ROW_BYTES * 3);
    }

    #[test]
    fn test_raw_short_frame() {
        let params = RawParams::new(0, true).unwrap();
        let mut source = SliceSource::new(raw_frame());
        let transport = MockTransport::new();
        let outcome = grab_raw_frame(
            &mut source,
            ROW_BYTES as u32 + 3,
            &params,
            &mut transport.clone(),
            &mut NoopDelay::new(),
            &CaptureConfig::default(),
        )
        .unwrap();
        // 1行分 + 完全な1画素
        assert_eq!(outcome.bytes_sent, 321);
        assert_eq!(outcome.bytes_read, ROW_BYTES as u32 + 3);
    }
}
