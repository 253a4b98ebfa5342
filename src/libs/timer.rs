//! Wall-clock set and rest timers.
//!
//! Timers never tick. Each one is a start timestamp plus an accumulator of
//! previously banked seconds; the current reading is always recomputed as
//! `banked + (now - start)`, so a process that dies and restarts hours later
//! reports exactly the right elapsed time without any catch-up logic.
//!
//! Two layers run in parallel:
//! - cumulative timers (`cumulative_set_start_time` / `paused_set_seconds`
//!   and the rest equivalents) feed the session-wide duration split;
//! - individual timers (`set_start_time` / `rest_start_time`) measure the
//!   current set or rest interval on its own, for per-set logging.
//!
//! The struct serializes to the JSON blob stored in
//! `workout_sessions.active_timer_state`. Field names are part of the stored
//! format; the serde renames below must not change.

use crate::libs::progress::ExerciseProgress;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerState {
    pub is_set_active: bool,
    pub is_resting: bool,
    pub cumulative_set_start_time: Option<NaiveDateTime>,
    pub cumulative_rest_start_time: Option<NaiveDateTime>,
    pub set_start_time: Option<NaiveDateTime>,
    pub rest_start_time: Option<NaiveDateTime>,
    /// Set seconds banked before the currently running stretch, if any.
    pub paused_set_seconds: i64,
    pub paused_rest_seconds: i64,
    /// Per-exercise progress keyed by exercise id.
    pub exercise_progress: HashMap<i64, ExerciseProgress>,
}

impl TimerState {
    /// Opens both layers of the set timer at `now`.
    ///
    /// The cumulative layer is only opened when closed; re-opening a running
    /// cumulative timer would discard banked wall-clock time.
    pub fn open_set(&mut self, now: NaiveDateTime) {
        if self.cumulative_set_start_time.is_none() {
            self.cumulative_set_start_time = Some(now);
        }
        self.set_start_time = Some(now);
        self.is_set_active = true;
    }

    /// Opens both layers of the rest timer at `now`.
    pub fn open_rest(&mut self, now: NaiveDateTime) {
        if self.cumulative_rest_start_time.is_none() {
            self.cumulative_rest_start_time = Some(now);
        }
        self.rest_start_time = Some(now);
        self.is_resting = true;
    }

    /// Stops the set timer, banking the elapsed seconds.
    ///
    /// Idempotent: folding an already-stopped timer changes nothing, so a
    /// stop arriving through two paths cannot double-count.
    pub fn fold_set(&mut self, now: NaiveDateTime) {
        if self.is_set_active {
            if let Some(start) = self.cumulative_set_start_time {
                self.paused_set_seconds += (now - start).num_seconds().max(0);
            }
        }
        self.cumulative_set_start_time = None;
        self.set_start_time = None;
        self.is_set_active = false;
    }

    /// Stops the rest timer, banking the elapsed seconds.
    pub fn fold_rest(&mut self, now: NaiveDateTime) {
        if self.is_resting {
            if let Some(start) = self.cumulative_rest_start_time {
                self.paused_rest_seconds += (now - start).num_seconds().max(0);
            }
        }
        self.cumulative_rest_start_time = None;
        self.rest_start_time = None;
        self.is_resting = false;
    }

    /// Total set seconds for the session as of `now`, banked plus running.
    pub fn total_set_seconds(&self, now: NaiveDateTime) -> i64 {
        let mut total = self.paused_set_seconds;
        if self.is_set_active {
            if let Some(start) = self.cumulative_set_start_time {
                total += (now - start).num_seconds().max(0);
            }
        }
        total
    }

    /// Total rest seconds for the session as of `now`.
    pub fn total_rest_seconds(&self, now: NaiveDateTime) -> i64 {
        let mut total = self.paused_rest_seconds;
        if self.is_resting {
            if let Some(start) = self.cumulative_rest_start_time {
                total += (now - start).num_seconds().max(0);
            }
        }
        total
    }

    /// Seconds the current individual set has been running, if one is.
    pub fn current_set_elapsed(&self, now: NaiveDateTime) -> Option<i64> {
        if !self.is_set_active {
            return None;
        }
        self.set_start_time.map(|start| (now - start).num_seconds().max(0))
    }

    /// Seconds the current individual rest has been running, if one is.
    pub fn current_rest_elapsed(&self, now: NaiveDateTime) -> Option<i64> {
        if !self.is_resting {
            return None;
        }
        self.rest_start_time.map(|start| (now - start).num_seconds().max(0))
    }

    /// Whether either timer is currently running.
    pub fn is_running(&self) -> bool {
        self.is_set_active || self.is_resting
    }

    /// Serializes to the stored blob format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a stored blob back into timer state.
    ///
    /// Restoration keeps banked accumulators and running-timer start
    /// timestamps exactly as saved; elapsed time is recomputed from `now`
    /// at the next read, never folded in at load.
    pub fn from_json(blob: &str) -> serde_json::Result<TimerState> {
        serde_json::from_str(blob)
    }
}
