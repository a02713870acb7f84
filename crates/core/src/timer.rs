use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::Clock;

/// Elapsed-time tracker for a single test attempt.
///
/// Only the start instant is stored; every reading is recomputed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimer {
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
}

impl SessionTimer {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            started_at: None,
        }
    }

    /// Captures the start instant. Later calls keep the first instant.
    pub fn start(&mut self) -> DateTime<Utc> {
        *self.started_at.get_or_insert_with(|| self.clock.now())
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Whole seconds since `start`, or 0 if the timer never started.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(self.clock.now())
    }

    /// Whole seconds between `start` and `now`, clamped at 0.
    #[must_use]
    pub fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u64 {
        self.started_at.map_or(0, |started| {
            u64::try_from((now - started).num_seconds()).unwrap_or(0)
        })
    }

    /// Freezes the time elapsed up to `now` into a completion duration.
    #[must_use]
    pub fn final_duration_at(&self, now: DateTime<Utc>) -> CompletionDuration {
        CompletionDuration::from_secs(self.elapsed_secs_at(now))
    }

    /// Live "m:ss" reading.
    #[must_use]
    pub fn display(&self) -> String {
        format_clock(self.elapsed_secs())
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

//
// ─── COMPLETION DURATION ───────────────────────────────────────────────────────
//

/// Final time taken, rendered as "`<m> menit <s> detik`".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompletionDuration {
    seconds: u64,
}

impl CompletionDuration {
    #[must_use]
    pub fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub fn minutes_part(&self) -> u64 {
        self.seconds / 60
    }

    #[must_use]
    pub fn seconds_part(&self) -> u64 {
        self.seconds % 60
    }
}

impl fmt::Display for CompletionDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} menit {} detik",
            self.minutes_part(),
            self.seconds_part()
        )
    }
}
