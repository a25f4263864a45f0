//! ホストコマンド
//!
//! The host speaks single bytes: any nonzero byte asks for a frame, a zero
//! byte asks the camera to stop.

use log::debug;

/// 解析されたホストコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Start,
    Stop,
}

impl HostCommand {
    pub fn from_byte(byte: u8) -> Self {
        if byte == 0 {
            HostCommand::Stop
        } else {
            HostCommand::Start
        }
    }

    /// Canonical wire byte for this command.
    pub fn to_byte(self) -> u8 {
        match self {
            HostCommand::Start => 0x01,
            HostCommand::Stop => 0x00,
        }
    }
}

/// Holds one decoded command between the start and stop queries.
///
/// A byte read by one query is kept for the other: a start read while a frame
/// is in flight waits for the next trigger, and repeated starts collapse into
/// that one. A stop read while idle has nothing to stop and is dropped; a stop
/// read during a frame discards the held start.
#[derive(Debug, Default)]
pub struct CommandLatch {
    pending: Option<HostCommand>,
}

impl CommandLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }

    /// 保留中のコマンドを破棄
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Latches a freshly received byte unless a command is already waiting.
    pub fn offer(&mut self, byte: u8) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(HostCommand::from_byte(byte));
        true
    }

    pub fn take_start(&mut self) -> bool {
        match self.pending {
            Some(HostCommand::Start) => {
                self.pending = None;
                true
            }
            Some(HostCommand::Stop) => {
                debug!("stop request while idle, dropped");
                self.pending = None;
                false
            }
            None => false,
        }
    }

    pub fn take_stop(&mut self) -> bool {
        match self.pending {
            Some(HostCommand::Stop) => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_stop() {
        assert_eq!(HostCommand::from_byte(0x00), HostCommand::Stop);
        assert_eq!(HostCommand::from_byte(0x01), HostCommand::Start);
        assert_eq!(HostCommand::from_byte(0xFF), HostCommand::Start);
        assert_eq!(HostCommand::from_byte(HostCommand::Stop.to_byte()), HostCommand::Stop);
    }

    #[test]
    fn test_start_survives_stop_query() {
        let mut latch = CommandLatch::new();
        latch.offer(0x01);
        assert!(!latch.take_stop());
        assert!(latch.take_start());
        assert!(latch.is_empty());
    }

    #[test]
    fn test_stop_while_idle_is_dropped() {
        let mut latch = CommandLatch::new();
        latch.offer(0x00);
        assert!(!latch.take_start());
        assert!(latch.is_empty());
    }

    #[test]
    fn test_clear_drops_held_start() {
        let mut latch = CommandLatch::new();
        latch.offer(0x01);
        latch.clear();
        assert!(latch.is_empty());
        assert!(!latch.take_start());
    }

    #[test]
    fn test_offer_does_not_overwrite() {
        let mut latch = CommandLatch::new();
        assert!(latch.offer(0x01));
        assert!(!latch.offer(0x00));
        assert!(latch.take_start());
    }
}
