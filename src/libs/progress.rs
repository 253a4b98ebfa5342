//! Per-exercise progress carried inside the timer-state blob.
//!
//! Progress entries live in the serialized session snapshot, keyed by
//! exercise id. The `sets` vector mirrors the rows already committed to
//! `exercise_performance`; on restore it is rebuilt from those rows, with
//! only the `completed` flags taken from the blob, so the database stays the
//! single source of truth for logged sets.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One committed set as carried in the progress blob.
///
/// Field names match the `exercise_performance` columns; the blob keeps the
/// same spelling so old snapshots keep parsing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SetRecord {
    /// Row id in `exercise_performance`, used to patch rest afterwards.
    pub id: Option<i64>,
    pub set_number: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub set_duration: Option<i64>,
    pub rest_duration: Option<i64>,
    pub completed_at: Option<NaiveDateTime>,
}

/// Progress on one exercise within the live session.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExerciseProgress {
    pub sets: Vec<SetRecord>,
    pub completed: bool,
    pub total_sets: i64,
    /// When the exercise was first opened this session.
    pub start_time: Option<NaiveDateTime>,
    /// Row id of the most recent logged set, target of the next rest patch.
    pub last_set_id: Option<i64>,
}

impl ExerciseProgress {
    /// Fresh progress entry for an exercise opened at `now`.
    pub fn opened_at(now: NaiveDateTime) -> Self {
        ExerciseProgress {
            start_time: Some(now),
            ..Default::default()
        }
    }

    /// Number of sets already committed.
    pub fn completed_sets(&self) -> usize {
        self.sets.len()
    }

    /// Next set number, starting at 1.
    pub fn next_set_number(&self) -> i64 {
        self.sets.len() as i64 + 1
    }

    /// Appends a committed set and tracks it as the rest-patch target.
    pub fn record_set(&mut self, set: SetRecord) {
        self.last_set_id = set.id;
        self.sets.push(set);
        self.total_sets = self.sets.len() as i64;
    }

    /// Reps and weight of the latest set, used as input defaults.
    pub fn last_set(&self) -> Option<&SetRecord> {
        self.sets.last()
    }
}
