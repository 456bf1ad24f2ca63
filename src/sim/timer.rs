//! Run timer
//!
//! Wall-clock time is passed in as milliseconds so the simulation never
//! reads a clock itself.

use serde::{Deserialize, Serialize};

/// Idle -> Running -> Stopped; only [`RunTimer::reset`] goes back to Idle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RunTimer {
    #[default]
    Idle,
    Running {
        start_ms: f64,
    },
    Stopped {
        final_ms: f64,
    },
}

impl RunTimer {
    /// Start counting from `now_ms`. No effect unless idle.
    pub fn start(&mut self, now_ms: f64) {
        if let RunTimer::Idle = self {
            *self = RunTimer::Running { start_ms: now_ms };
        }
    }

    /// Freeze the elapsed time. No effect unless running.
    pub fn stop(&mut self, now_ms: f64) {
        if let RunTimer::Running { start_ms } = *self {
            *self = RunTimer::Stopped {
                final_ms: (now_ms - start_ms).max(0.0),
            };
        }
    }

    pub fn reset(&mut self) {
        *self = RunTimer::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RunTimer::Running { .. })
    }

    /// Elapsed milliseconds; constant once stopped
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        match *self {
            RunTimer::Idle => 0.0,
            RunTimer::Running { start_ms } => (now_ms - start_ms).max(0.0),
            RunTimer::Stopped { final_ms } => final_ms,
        }
    }

    /// Elapsed time as `m:ss.cc`
    pub fn formatted(&self, now_ms: f64) -> String {
        format_time(self.elapsed_ms(now_ms))
    }
}

/// Format milliseconds as `m:ss.cc` (minutes unpadded, seconds and centiseconds two digits)
pub fn format_time(ms: f64) -> String {
    let total = if ms.is_finite() && ms > 0.0 {
        ms.floor() as u64
    } else {
        0
    };
    let minutes = total / 60_000;
    let seconds = (total % 60_000) / 1000;
    let centis = (total % 1000) / 10;
    format!("{minutes}:{seconds:02}.{centis:02}")
}
