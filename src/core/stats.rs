use crate::error::CameraError;

/// キャプチャ統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub frames_completed: u32,
    pub frames_stopped: u32,
    pub bytes_sent: u64,
    pub length_faults: u32,
    pub timeouts: u32,
    pub bus_faults: u32,
}

impl CaptureStats {
    pub fn record_frame(&mut self, bytes: u32) {
        self.frames_completed = self.frames_completed.saturating_add(1);
        self.bytes_sent = self.bytes_sent.saturating_add(u64::from(bytes));
    }

    pub fn record_stop(&mut self, bytes: u32) {
        self.frames_stopped = self.frames_stopped.saturating_add(1);
        self.bytes_sent = self.bytes_sent.saturating_add(u64::from(bytes));
    }

    pub fn record_error(&mut self, error: &CameraError) {
        let counter = match error {
            CameraError::InvalidFrameLength { .. } => &mut self.length_faults,
            CameraError::CaptureTimeout { .. } => &mut self.timeouts,
            CameraError::Bus(_) => &mut self.bus_faults,
            _ => return,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn total_faults(&self) -> u32 {
        self.length_faults
            .saturating_add(self.timeouts)
            .saturating_add(self.bus_faults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::bus::BusError;
    use embedded_hal::spi::ErrorKind;

    #[test]
    fn test_error_classification() {
        let mut stats = CaptureStats::default();
        stats.record_error(&CameraError::InvalidFrameLength { length: 0, max: 1 });
        stats.record_error(&CameraError::CaptureTimeout { polls: 1 });
        stats.record_error(&CameraError::Bus(BusError::Spi(ErrorKind::Other)));
        stats.record_error(&CameraError::NotConfigured);
        assert_eq!(stats.length_faults, 1);
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.bus_faults, 1);
        assert_eq!(stats.total_faults(), 3);
    }

    #[test]
    fn test_fault_counters_saturate() {
        let mut stats = CaptureStats {
            timeouts: u32::MAX,
            bus_faults: u32::MAX,
            ..CaptureStats::default()
        };
        stats.record_error(&CameraError::CaptureTimeout { polls: 1 });
        assert_eq!(stats.timeouts, u32::MAX);
        assert_eq!(stats.total_faults(), u32::MAX);
    }

    #[test]
    fn test_bytes_accumulate() {
        let mut stats = CaptureStats::default();
        stats.record_frame(100);
        stats.record_stop(20);
        assert_eq!(stats.bytes_sent, 120);
        assert_eq!(stats.frames_completed, 1);
        assert_eq!(stats.frames_stopped, 1);
    }
}
