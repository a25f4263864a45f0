//! シリアルリンク上のトランスポート
//!
//! Start and stop requests arrive as single command bytes from the host and
//! frame bytes are written back verbatim.

use log::{debug, info};

use super::command::{CommandLatch, HostCommand};
use super::transport::Transport;

/// A byte-oriented serial link.
pub trait SerialPort {
    /// Next received byte, without blocking.
    fn read_byte(&mut self) -> Option<u8>;

    fn write_byte(&mut self, byte: u8);
}

impl<P: SerialPort + ?Sized> SerialPort for &mut P {
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }
}

pub struct SerialTransport<P> {
    port: P,
    latch: CommandLatch,
    bytes_written: u32,
}

impl<P: SerialPort> SerialTransport<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            latch: CommandLatch::new(),
            bytes_written: 0,
        }
    }

    /// Bytes written since construction.
    pub fn bytes_written(&self) -> u32 {
        self.bytes_written
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_inner(self) -> P {
        self.port
    }

    fn poll(&mut self) {
        if self.latch.is_empty() {
            if let Some(byte) = self.port.read_byte() {
                self.latch.offer(byte);
            }
        }
    }
}

impl<P: SerialPort> Transport for SerialTransport<P> {
    fn got_start_request(&mut self) -> bool {
        self.poll();
        let start = self.latch.take_start();
        if start {
            info!("host start request ({:#04x})", HostCommand::Start.to_byte());
        }
        start
    }

    /// Reads every pending byte: starts collapse into one held start, a stop
    /// ends the query and discards the held start.
    fn got_stop_request(&mut self) -> bool {
        if self.latch.take_stop() {
            info!("host stop request");
            return true;
        }
        while let Some(byte) = self.port.read_byte() {
            match HostCommand::from_byte(byte) {
                HostCommand::Stop => {
                    self.latch.clear();
                    info!("host stop request");
                    return true;
                }
                HostCommand::Start => {
                    if !self.latch.offer(byte) {
                        debug!("repeated start request during frame, merged");
                    }
                }
            }
        }
        false
    }

    fn send_byte(&mut self, byte: u8) {
        self.port.write_byte(byte);
        self.bytes_written = self.bytes_written.wrapping_add(1);
    }
}
