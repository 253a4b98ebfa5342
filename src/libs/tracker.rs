//! Live workout session tracking.
//!
//! [`SessionTracker`] is the single writer for one active session: it owns
//! the in-memory [`TimerState`], applies every lifecycle operation against
//! an explicit `now`, and persists snapshots through a trailing-edge save
//! gate. In-memory state is always the source of truth; a failed write is
//! logged and retried on the next flush, never surfaced as fatal.
//!
//! Set commit is two-phase. Stopping a set freezes its duration and opens
//! the rest timer immediately, returning a [`PendingSet`] while reps and
//! weight are confirmed; rest accrues during confirmation instead of being
//! lost to it. The committed row only exists after [`SessionTracker::commit_set`].

use crate::db::plans::PlanExercise;
use crate::db::sessions::{Session, Sessions};
use crate::db::sets::Sets;
use crate::libs::messages::Message;
use crate::libs::progress::{ExerciseProgress, SetRecord};
use crate::libs::summary::{ActiveSessionSummary, SessionStatus, SummarySink};
use crate::libs::timer::TimerState;
use crate::{msg_bail_anyhow, msg_warning};
use anyhow::Result;
use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Set input rejected before commit; timer state is unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("reps must be a positive whole number")]
    InvalidReps,
    #[error("weight must be a non-negative number")]
    InvalidWeight,
}

/// A stopped set awaiting reps and weight confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSet {
    pub set_number: i64,
    /// Individual set timer reading frozen at the moment the set stopped.
    pub set_duration: i64,
    pub default_reps: i64,
    pub default_weight: Option<f64>,
}

/// Outcome of selecting an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The exercise was already current; nothing changed.
    AlreadySelected,
    /// A running timer had no owning exercise and was attached as-is.
    Adopted,
    /// Timers were folded and the current exercise switched.
    Switched,
}

/// Trailing-edge debounce gate for session snapshot writes.
///
/// Every state change re-arms the window, so the write happens once changes
/// stop arriving for the full debounce interval. An unconditional flush
/// clears the gate, which keeps a stale queued write from superseding a
/// teardown write.
#[derive(Debug)]
pub struct SaveGate {
    debounce: Duration,
    dirty_since: Option<NaiveDateTime>,
}

impl SaveGate {
    pub fn new(debounce_secs: u64) -> Self {
        SaveGate {
            debounce: Duration::seconds(debounce_secs as i64),
            dirty_since: None,
        }
    }

    /// Marks state dirty and restarts the debounce window at `now`.
    pub fn schedule(&mut self, now: NaiveDateTime) {
        self.dirty_since = Some(now);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Whether the armed window has fully elapsed as of `now`.
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        match self.dirty_since {
            Some(since) => now - since >= self.debounce,
            None => false,
        }
    }

    /// Disarms the gate. Called after any successful write.
    pub fn clear(&mut self) {
        self.dirty_since = None;
    }
}

pub struct SessionTracker {
    session_id: i64,
    plan_id: Option<i64>,
    day_id: Option<i64>,
    check_in_time: NaiveDateTime,
    exercises: Vec<PlanExercise>,
    current_exercise_id: Option<i64>,
    timer: TimerState,
    pending_set: Option<PendingSet>,
    gate: SaveGate,
    sessions: Sessions,
    sets: Sets,
    sink: Box<dyn SummarySink>,
}

impl SessionTracker {
    /// Checks in a new session at `now`.
    ///
    /// Fails when another session is already active.
    pub fn begin(
        now: NaiveDateTime,
        plan_id: Option<i64>,
        day_id: Option<i64>,
        exercises: Vec<PlanExercise>,
        debounce_secs: u64,
        sink: Box<dyn SummarySink>,
    ) -> Result<Self> {
        let mut sessions = Sessions::new()?;
        let session_id = sessions.create(now, plan_id, day_id)?;

        let mut tracker = SessionTracker {
            session_id,
            plan_id,
            day_id,
            check_in_time: now,
            exercises,
            current_exercise_id: None,
            timer: TimerState::default(),
            pending_set: None,
            gate: SaveGate::new(debounce_secs),
            sessions,
            sets: Sets::new()?,
            sink,
        };
        tracker.push_summary();
        Ok(tracker)
    }

    /// Re-attaches to the active session after a process restart.
    ///
    /// The timer blob is restored verbatim: banked accumulators and any
    /// running-timer start timestamps come back exactly as saved, and
    /// elapsed time is recomputed from `now` at the next read. Logged sets
    /// are rebuilt from their rows in the database; only the completed
    /// flags and exercise start times are trusted from the blob.
    pub fn resume(exercises: Vec<PlanExercise>, debounce_secs: u64, sink: Box<dyn SummarySink>) -> Result<Self> {
        let mut sessions = Sessions::new()?;
        let session = match sessions.get_active()? {
            Some(session) => session,
            None => msg_bail_anyhow!(Message::NoActiveSession),
        };
        let mut sets = Sets::new()?;

        let mut timer = Self::parse_timer_blob(&session);
        Self::rebuild_progress(&mut timer, &mut sets, session.id)?;

        // A pointer to an exercise no longer in the day is treated as null;
        // a running timer left behind gets adopted on the next selection.
        let current_exercise_id = session
            .current_exercise_id
            .filter(|id| exercises.iter().any(|e| e.exercise_id == *id));

        let mut tracker = SessionTracker {
            session_id: session.id,
            plan_id: session.plan_id,
            day_id: session.day_id,
            check_in_time: session.check_in_time,
            exercises,
            current_exercise_id,
            timer,
            pending_set: None,
            gate: SaveGate::new(debounce_secs),
            sessions,
            sets,
            sink,
        };
        tracker.push_summary();
        Ok(tracker)
    }

    fn parse_timer_blob(session: &Session) -> TimerState {
        // Without a usable blob the timers come back idle, seeded from the
        // last reconciled duration columns so banked time is not lost.
        let fallback = || TimerState {
            paused_set_seconds: session.total_set_duration,
            paused_rest_seconds: session.total_rest_duration,
            ..Default::default()
        };

        let blob = match session.active_timer_state.as_deref() {
            Some(blob) => blob,
            None => return fallback(),
        };
        match TimerState::from_json(blob) {
            Ok(mut timer) => {
                // Corrupt snapshots claiming both timers are running keep
                // the set and drop the rest.
                if timer.is_set_active && timer.is_resting {
                    timer.is_resting = false;
                    timer.cumulative_rest_start_time = None;
                    timer.rest_start_time = None;
                }
                timer
            }
            Err(_) => {
                msg_warning!(Message::TimerStateParseFailed);
                fallback()
            }
        }
    }

    fn rebuild_progress(timer: &mut TimerState, sets: &mut Sets, session_id: i64) -> Result<()> {
        let rows = sets.fetch_for_session(session_id)?;

        let mut rebuilt: std::collections::HashMap<i64, ExerciseProgress> = std::collections::HashMap::new();
        for row in rows {
            let entry = rebuilt.entry(row.exercise_id).or_insert_with(|| {
                let saved = timer.exercise_progress.get(&row.exercise_id);
                ExerciseProgress {
                    completed: saved.map(|p| p.completed).unwrap_or(false),
                    start_time: saved.and_then(|p| p.start_time).or(row.completed_at),
                    ..Default::default()
                }
            });
            entry.record_set(SetRecord {
                id: Some(row.id),
                set_number: row.set_number,
                reps: row.reps,
                weight: row.weight,
                set_duration: row.set_duration,
                rest_duration: row.rest_duration,
                completed_at: row.completed_at,
            });
        }

        // Keep blob-only entries (exercise opened, no sets logged yet) but
        // drop any set lists they carried; the rows are authoritative.
        for (exercise_id, saved) in timer.exercise_progress.iter() {
            rebuilt.entry(*exercise_id).or_insert_with(|| ExerciseProgress {
                completed: saved.completed,
                start_time: saved.start_time,
                ..Default::default()
            });
        }

        timer.exercise_progress = rebuilt;
        Ok(())
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn check_in_time(&self) -> NaiveDateTime {
        self.check_in_time
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn exercises(&self) -> &[PlanExercise] {
        &self.exercises
    }

    pub fn pending_set(&self) -> Option<&PendingSet> {
        self.pending_set.as_ref()
    }

    /// The currently selected exercise, if any.
    pub fn current_exercise(&self) -> Option<&PlanExercise> {
        let id = self.current_exercise_id?;
        self.exercises.iter().find(|e| e.exercise_id == id)
    }

    /// Progress entry for an exercise, if it has been touched this session.
    pub fn progress(&self, exercise_id: i64) -> Option<&ExerciseProgress> {
        self.timer.exercise_progress.get(&exercise_id)
    }

    /// Makes `exercise_id` the current exercise.
    ///
    /// A running timer with no owning exercise is adopted as-is, banked
    /// seconds and open run included; this is the designed recovery path for
    /// a restore that lost its exercise pointer. Switching away from another
    /// exercise folds both timers first so no wall-clock time leaks across
    /// exercises.
    pub fn select_exercise(&mut self, exercise_id: i64, now: NaiveDateTime) -> Result<SelectOutcome> {
        if !self.exercises.iter().any(|e| e.exercise_id == exercise_id) {
            msg_bail_anyhow!(Message::ExerciseNotInWorkout(exercise_id.to_string()));
        }

        if self.current_exercise_id == Some(exercise_id) {
            return Ok(SelectOutcome::AlreadySelected);
        }

        let outcome = if self.current_exercise_id.is_none() && self.timer.is_running() {
            SelectOutcome::Adopted
        } else {
            self.timer.fold_set(now);
            self.timer.fold_rest(now);
            self.pending_set = None;
            SelectOutcome::Switched
        };

        self.current_exercise_id = Some(exercise_id);
        self.timer
            .exercise_progress
            .entry(exercise_id)
            .or_insert_with(|| ExerciseProgress::opened_at(now));

        self.gate.schedule(now);
        self.push_summary();
        Ok(outcome)
    }

    /// Starts a set on the current exercise.
    ///
    /// If a rest is running it ends here: the previous set's rest duration
    /// is patched from the individual rest timer before the set opens. A
    /// second start while a set is already running is a no-op.
    pub fn start_set(&mut self, now: NaiveDateTime) -> Result<i64> {
        let exercise_id = match self.current_exercise_id {
            Some(id) => id,
            None => msg_bail_anyhow!(Message::NoExerciseSelected),
        };
        if self.timer.is_set_active {
            msg_bail_anyhow!(Message::SetAlreadyActive);
        }

        if self.timer.is_resting {
            let rest_elapsed = self.timer.current_rest_elapsed(now).unwrap_or(0);
            if let Some(last_set_id) = self.timer.exercise_progress.get(&exercise_id).and_then(|p| p.last_set_id) {
                if let Err(e) = self.sets.patch_rest(last_set_id, rest_elapsed) {
                    msg_warning!(Message::SessionSaveFailed(e.to_string()));
                }
            }
            self.timer.fold_rest(now);
        }

        self.pending_set = None;
        self.timer.open_set(now);

        let set_number = self
            .timer
            .exercise_progress
            .get(&exercise_id)
            .map(|p| p.next_set_number())
            .unwrap_or(1);

        self.gate.schedule(now);
        self.push_summary();
        Ok(set_number)
    }

    /// Stops the running set and opens the rest timer in the same instant.
    ///
    /// Returns the frozen set pending confirmation, or `None` when no set
    /// was running (duplicate events are guards, not errors).
    pub fn complete_set(&mut self, now: NaiveDateTime) -> Option<PendingSet> {
        if !self.timer.is_set_active {
            return None;
        }

        let set_duration = self.timer.current_set_elapsed(now).unwrap_or(0);
        self.timer.fold_set(now);
        self.timer.open_rest(now);

        let exercise_id = self.current_exercise_id;
        let progress = exercise_id.and_then(|id| self.timer.exercise_progress.get(&id));
        let set_number = progress.map(|p| p.next_set_number()).unwrap_or(1);

        // Defaults come from the last set this session, then the last
        // completed session, then the target rep range.
        let (default_reps, default_weight) = match progress.and_then(|p| p.last_set()) {
            Some(last) => (last.reps, last.weight),
            None => {
                let prior = exercise_id.and_then(|id| self.sets.last_performance(id).unwrap_or(None));
                match prior {
                    Some((reps, weight)) => (reps, weight),
                    None => {
                        let reps = self
                            .current_exercise()
                            .map(|e| parse_min_reps(&e.target_reps))
                            .unwrap_or(10);
                        (reps, None)
                    }
                }
            }
        };

        let pending = PendingSet {
            set_number,
            set_duration,
            default_reps,
            default_weight,
        };
        self.pending_set = Some(pending.clone());

        self.gate.schedule(now);
        self.push_summary();
        Some(pending)
    }

    /// Validates and commits the pending set to the database.
    ///
    /// Validation failure leaves the pending set and the already-stopped
    /// timers untouched, so the caller can retry without losing timing data.
    pub fn commit_set(&mut self, reps: i64, weight: Option<f64>, now: NaiveDateTime) -> Result<SetRecord> {
        if reps < 1 {
            return Err(InputError::InvalidReps.into());
        }
        if weight.is_some_and(|w| w < 0.0 || !w.is_finite()) {
            return Err(InputError::InvalidWeight.into());
        }

        let exercise = match self.current_exercise() {
            Some(exercise) => exercise.clone(),
            None => msg_bail_anyhow!(Message::NoExerciseSelected),
        };
        let pending = match self.pending_set.take() {
            Some(pending) => pending,
            None => msg_bail_anyhow!(Message::NoSetActive),
        };

        let row_id = self.sets.log_set(
            self.session_id,
            exercise.exercise_id,
            &exercise.exercise_name,
            pending.set_number,
            reps,
            weight,
            Some(pending.set_duration),
            None,
            now,
        )?;

        let record = SetRecord {
            id: Some(row_id),
            set_number: pending.set_number,
            reps,
            weight,
            set_duration: Some(pending.set_duration),
            rest_duration: None,
            completed_at: Some(now),
        };
        self.timer
            .exercise_progress
            .entry(exercise.exercise_id)
            .or_insert_with(|| ExerciseProgress::opened_at(now))
            .record_set(record.clone());

        self.gate.schedule(now);
        Ok(record)
    }

    /// Closes out the current exercise, folding both timers.
    ///
    /// No-op when no exercise is selected, so a duplicate completion cannot
    /// change the banked accumulators.
    pub fn complete_exercise(&mut self, mark_complete: bool, now: NaiveDateTime) -> Option<String> {
        let exercise = self.current_exercise()?.clone();

        self.timer.fold_set(now);
        self.timer.fold_rest(now);
        self.pending_set = None;

        self.timer
            .exercise_progress
            .entry(exercise.exercise_id)
            .or_insert_with(|| ExerciseProgress::opened_at(now))
            .completed = mark_complete;
        self.current_exercise_id = None;

        self.gate.schedule(now);
        self.push_summary();
        Some(exercise.exercise_name)
    }

    /// Finishes the workout: folds everything, writes the final totals and
    /// the check-out stamp, and clears the live timer columns.
    ///
    /// Returns the session's total duration in whole minutes.
    pub fn finish(&mut self, now: NaiveDateTime) -> Result<i64> {
        self.timer.fold_set(now);
        self.timer.fold_rest(now);
        self.pending_set = None;

        let total_minutes = (now - self.check_in_time).num_seconds().max(0) / 60;
        self.sessions.finalize(
            self.session_id,
            now,
            total_minutes,
            self.timer.total_set_seconds(now),
            self.timer.total_rest_seconds(now),
        )?;
        self.gate.clear();
        Ok(total_minutes)
    }

    /// Cancels the workout and deletes the session with its logged sets.
    pub fn cancel(&mut self) -> Result<()> {
        self.sessions.delete(self.session_id)?;
        self.gate.clear();
        Ok(())
    }

    /// Writes a snapshot if the debounce window has elapsed.
    ///
    /// Returns whether a write happened. A failed write keeps the gate
    /// armed; in-memory state stays authoritative until a write lands.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        if !self.gate.is_due(now) {
            return false;
        }
        self.flush(now)
    }

    /// Unconditionally writes a snapshot, bypassing and clearing the gate.
    ///
    /// This is the teardown path; clearing the gate guarantees no stale
    /// queued write can follow and supersede this one.
    pub fn flush(&mut self, now: NaiveDateTime) -> bool {
        let blob = match self.timer.to_json() {
            Ok(blob) => blob,
            Err(e) => {
                msg_warning!(Message::SessionSaveFailed(e.to_string()));
                return false;
            }
        };
        let result = self.sessions.update_timer_state(
            self.session_id,
            Some(&blob),
            self.current_exercise_id,
            self.timer.total_set_seconds(now),
            self.timer.total_rest_seconds(now),
        );
        match result {
            Ok(()) => {
                self.gate.clear();
                true
            }
            Err(e) => {
                msg_warning!(Message::SessionSaveFailed(e.to_string()));
                false
            }
        }
    }

    /// Whether a snapshot write is pending.
    pub fn is_dirty(&self) -> bool {
        self.gate.is_dirty()
    }

    // Status mirrors the timer flags: a running set is working, a running
    // rest is resting, idle is paused.
    fn push_summary(&mut self) {
        let (status, start_time) = if self.timer.is_set_active {
            (SessionStatus::Working, self.timer.set_start_time)
        } else if self.timer.is_resting {
            (SessionStatus::Resting, self.timer.rest_start_time)
        } else {
            (SessionStatus::Paused, None)
        };
        let summary = ActiveSessionSummary {
            session_id: self.session_id,
            plan_id: self.plan_id,
            day_id: self.day_id,
            exercise_name: self.current_exercise().map(|e| e.exercise_name.clone()),
            status,
            start_time,
        };
        self.sink.push(&summary);
    }
}

/// Parses a weight prompt entry. Empty means bodyweight; anything else must
/// be a non-negative finite number.
pub fn parse_weight(raw: &str) -> Result<Option<f64>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(weight) if weight.is_finite() && weight >= 0.0 => Ok(Some(weight)),
        _ => Err(InputError::InvalidWeight),
    }
}

/// Lower bound of a "8-12" style rep target, falling back to 10.
pub fn parse_min_reps(target_reps: &str) -> i64 {
    target_reps
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| !part.is_empty())
        .and_then(|part| part.parse().ok())
        .unwrap_or(10)
}
