use std::time::{Duration, Instant};

/// Holds the loop to a fixed frame rate.
///
/// Clocks and animations count frames, not seconds, so their cadence is only
/// as steady as the loop that ticks them.
pub struct FramePacer {
    frame_length: Duration,
    deadline: Instant,
}

impl FramePacer {
    pub fn new(frames_per_second: u32) -> Self {
        let frame_length = Duration::from_secs(1) / frames_per_second.max(1);
        Self {
            frame_length,
            deadline: Instant::now() + frame_length,
        }
    }

    pub fn frame_length(&self) -> Duration {
        self.frame_length
    }

    /// Sleep until the end of the current frame slot.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if now < self.deadline {
            std::thread::sleep(self.deadline - now);
            self.deadline += self.frame_length;
        } else {
            self.resync(now);
        }
    }

    /// After a long stall, start counting from `now` instead of racing to catch up.
    fn resync(&mut self, now: Instant) {
        if now - self.deadline > self.frame_length {
            log::debug!(
                "frame pacer fell {:?} behind; resyncing",
                now - self.deadline
            );
            self.deadline = now + self.frame_length;
        } else {
            self.deadline += self.frame_length;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_hz_frame_is_about_sixteen_ms() {
        let pacer = FramePacer::new(60);
        assert_eq!(pacer.frame_length().as_micros(), 16_666);
    }

    #[test]
    fn zero_rate_is_treated_as_one() {
        assert_eq!(FramePacer::new(0).frame_length(), Duration::from_secs(1));
    }

    #[test]
    fn stall_moves_deadline_past_now() {
        let mut pacer = FramePacer::new(60);
        let later = pacer.deadline + Duration::from_millis(500);
        pacer.resync(later);
        assert_eq!(pacer.deadline, later + pacer.frame_length);
    }

    #[test]
    fn small_overrun_keeps_the_schedule() {
        let mut pacer = FramePacer::new(60);
        let original = pacer.deadline;
        pacer.resync(original + Duration::from_millis(1));
        assert_eq!(pacer.deadline, original + pacer.frame_length);
    }
}
