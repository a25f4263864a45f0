//! The capability the capture loop is driven by.

/// トランスポート
///
/// Anything that can answer "may I start?" and "should I stop?" and accept
/// frame bytes can drive the capture loop: a host on a serial link, a local
/// buffer, a socket.
pub trait Transport {
    /// True when the consumer wants a new frame.
    fn got_start_request(&mut self) -> bool;

    /// True when the consumer wants the current frame (or stream) to end.
    fn got_stop_request(&mut self) -> bool;

    /// Forwards one frame byte.
    fn send_byte(&mut self, byte: u8);

    fn send_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.send_byte(byte);
        }
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn got_start_request(&mut self) -> bool {
        (**self).got_start_request()
    }

    fn got_stop_request(&mut self) -> bool {
        (**self).got_stop_request()
    }

    fn send_byte(&mut self, byte: u8) {
        (**self).send_byte(byte)
    }

    fn send_bytes(&mut self, bytes: &[u8]) {
        (**self).send_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        bytes: usize,
    }

    impl Transport for Counter {
        fn got_start_request(&mut self) -> bool {
            true
        }

        fn got_stop_request(&mut self) -> bool {
            false
        }

        fn send_byte(&mut self, _byte: u8) {
            self.bytes += 1;
        }
    }

    fn drive<T: Transport>(mut transport: T) {
        if transport.got_start_request() && !transport.got_stop_request() {
            transport.send_bytes(&[0xFF, 0xD8, 0xFF, 0xD9]);
        }
    }

    #[test]
    fn test_borrowed_transport_forwards() {
        let mut counter = Counter { bytes: 0 };
        drive(&mut counter);
        drive(&mut counter);
        assert_eq!(counter.bytes, 8);
    }
}
