//! ローカルバッファへのトランスポート
//!
//! Collects frames into a fixed-capacity buffer on the device itself, for
//! callers that process the image locally instead of streaming it out.

use heapless::Vec;
use log::warn;

use super::transport::Transport;

pub struct BufferTransport<const N: usize> {
    frame: Vec<u8, N>,
    overflowed: u32,
    start_pending: bool,
    stop_pending: bool,
    stop_when_full: bool,
}

impl<const N: usize> Default for BufferTransport<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BufferTransport<N> {
    pub fn new() -> Self {
        Self {
            frame: Vec::new(),
            overflowed: 0,
            start_pending: false,
            stop_pending: false,
            stop_when_full: false,
        }
    }

    /// Ask the capture loop to stop once the buffer is full instead of
    /// counting the rest of the frame as overflow.
    pub fn with_stop_when_full(mut self, enable: bool) -> Self {
        self.stop_when_full = enable;
        self
    }

    /// Requests one frame. The buffer is cleared when the request is taken.
    pub fn request_capture(&mut self) {
        self.start_pending = true;
    }

    pub fn request_stop(&mut self) {
        self.stop_pending = true;
    }

    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    pub fn is_full(&self) -> bool {
        self.frame.is_full()
    }

    /// Bytes dropped because the buffer was full.
    pub fn overflowed(&self) -> u32 {
        self.overflowed
    }

    pub fn clear(&mut self) {
        self.frame.clear();
        self.overflowed = 0;
    }
}

impl<const N: usize> Transport for BufferTransport<N> {
    fn got_start_request(&mut self) -> bool {
        if !self.start_pending {
            return false;
        }
        self.start_pending = false;
        self.stop_pending = false;
        self.clear();
        true
    }

    fn got_stop_request(&mut self) -> bool {
        if self.stop_pending {
            self.stop_pending = false;
            return true;
        }
        self.stop_when_full && self.frame.is_full()
    }

    fn send_byte(&mut self, byte: u8) {
        if self.frame.push(byte).is_err() {
            if self.overflowed == 0 {
                warn!("frame buffer full ({} bytes), dropping the rest", N);
            }
            self.overflowed = self.overflowed.saturating_add(1);
        }
    }
}
