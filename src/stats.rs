//! Session statistics: live counters while typing, frozen summary after.

use std::time::{Duration, Instant};

/// Counters for one in-flight session. All counts only ever grow; the clock
/// starts when the session starts typing, not when the window is focused.
#[derive(Debug)]
pub struct SessionStats {
    chars_typed: usize,
    typos: usize,
    pauses: usize,
    started: Instant,
}

impl SessionStats {
    pub fn start() -> Self {
        Self {
            chars_typed: 0,
            typos: 0,
            pauses: 0,
            started: Instant::now(),
        }
    }

    pub fn record_char(&mut self) {
        self.chars_typed += 1;
    }

    pub fn record_typo(&mut self) {
        self.typos += 1;
    }

    pub fn record_pause(&mut self) {
        self.pauses += 1;
    }

    pub fn chars_typed(&self) -> usize {
        self.chars_typed
    }

    /// Freeze the counters into the final summary.
    pub fn finish(self) -> Summary {
        Summary {
            chars_typed: self.chars_typed,
            typos: self.typos,
            pauses: self.pauses,
            elapsed: self.started.elapsed(),
        }
    }
}

/// The numbers reported once a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub chars_typed: usize,
    pub typos: usize,
    pub pauses: usize,
    pub elapsed: Duration,
}

impl Summary {
    /// Average characters per second. A session too short to measure reports
    /// the raw character count instead of dividing by zero.
    pub fn chars_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.chars_typed as f64 / secs
        } else {
            self.chars_typed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_carries_the_counters() {
        let mut stats = SessionStats::start();
        for _ in 0..5 {
            stats.record_char();
        }
        stats.record_typo();
        stats.record_pause();
        stats.record_pause();

        let summary = stats.finish();
        assert_eq!(summary.chars_typed, 5);
        assert_eq!(summary.typos, 1);
        assert_eq!(summary.pauses, 2);
    }

    #[test]
    fn average_speed_divides_by_elapsed() {
        let summary = Summary {
            chars_typed: 10,
            typos: 0,
            pauses: 0,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(summary.chars_per_sec(), 5.0);
    }

    #[test]
    fn zero_elapsed_reports_the_char_count() {
        let summary = Summary {
            chars_typed: 2,
            typos: 0,
            pauses: 0,
            elapsed: Duration::ZERO,
        };
        assert_eq!(summary.chars_per_sec(), 2.0);
    }
}
