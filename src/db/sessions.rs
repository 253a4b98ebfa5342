//! Workout session storage.
//!
//! A session row is the durable record of one gym visit: check-in and
//! check-out timestamps, reconciled set/rest duration totals, and while the
//! session is live, the serialized timer-state blob that lets a new process
//! pick the workout back up. At most one session may be active at a time.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;

const INSERT_SESSION: &str = "INSERT INTO workout_sessions (plan_id, day_id, check_in_time, session_date) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BY_ID: &str = "SELECT id, plan_id, day_id, check_in_time, check_out_time, total_duration, session_date, notes, is_completed, \
     active_timer_state, current_exercise_id, total_set_duration, total_rest_duration \
     FROM workout_sessions WHERE id = ?1";
const SELECT_ACTIVE: &str = "SELECT id, plan_id, day_id, check_in_time, check_out_time, total_duration, session_date, notes, is_completed, \
     active_timer_state, current_exercise_id, total_set_duration, total_rest_duration \
     FROM workout_sessions WHERE is_completed = 0 AND check_out_time IS NULL ORDER BY id DESC LIMIT 1";
const UPDATE_TIMER_STATE: &str = "UPDATE workout_sessions SET active_timer_state = ?1, current_exercise_id = ?2, \
     total_set_duration = ?3, total_rest_duration = ?4 WHERE id = ?5";
const FINALIZE_SESSION: &str = "UPDATE workout_sessions SET check_out_time = ?1, total_duration = ?2, is_completed = 1, \
     active_timer_state = NULL, current_exercise_id = NULL, total_set_duration = ?3, total_rest_duration = ?4 WHERE id = ?5";
const UPDATE_DURATIONS: &str = "UPDATE workout_sessions SET total_set_duration = ?1, total_rest_duration = ?2 WHERE id = ?3";
const UPDATE_NOTES: &str = "UPDATE workout_sessions SET notes = ?1 WHERE id = ?2";
const DELETE_SESSION: &str = "DELETE FROM workout_sessions WHERE id = ?1";
const SELECT_COMPLETED_DATES: &str = "SELECT DISTINCT session_date FROM workout_sessions WHERE is_completed = 1";
const SELECT_COMPLETED: &str = "SELECT id, plan_id, day_id, check_in_time, check_out_time, total_duration, session_date, notes, is_completed, \
     active_timer_state, current_exercise_id, total_set_duration, total_rest_duration \
     FROM workout_sessions WHERE is_completed = 1 ORDER BY check_in_time DESC LIMIT ?1";

/// One gym visit as stored in `workout_sessions`.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub plan_id: Option<i64>,
    pub day_id: Option<i64>,
    pub check_in_time: NaiveDateTime,
    pub check_out_time: Option<NaiveDateTime>,
    /// Whole minutes between check-in and check-out, set at finalize.
    pub total_duration: Option<i64>,
    pub session_date: NaiveDate,
    pub notes: Option<String>,
    pub is_completed: bool,
    /// Serialized timer-state blob, present only while the session is live.
    pub active_timer_state: Option<String>,
    pub current_exercise_id: Option<i64>,
    pub total_set_duration: i64,
    pub total_rest_duration: i64,
}

pub struct Sessions {
    pub conn: Connection,
}

impl Sessions {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Sessions { conn: db.conn })
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
        Ok(Session {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            day_id: row.get(2)?,
            check_in_time: row.get(3)?,
            check_out_time: row.get(4)?,
            total_duration: row.get(5)?,
            session_date: row.get(6)?,
            notes: row.get(7)?,
            is_completed: row.get::<_, i64>(8)? != 0,
            active_timer_state: row.get(9)?,
            current_exercise_id: row.get(10)?,
            total_set_duration: row.get(11)?,
            total_rest_duration: row.get(12)?,
        })
    }

    /// Creates a new session checked in at `now`.
    ///
    /// Fails when another session is still active; the caller should resume
    /// or finish that one instead.
    pub fn create(&mut self, now: NaiveDateTime, plan_id: Option<i64>, day_id: Option<i64>) -> Result<i64> {
        if let Some(active) = self.get_active()? {
            msg_bail_anyhow!(Message::SessionAlreadyActive(active.id));
        }

        self.conn.execute(INSERT_SESSION, params![plan_id, day_id, now, now.date()])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Session>> {
        let session = self.conn.query_row(SELECT_BY_ID, params![id], Self::from_row).optional()?;
        Ok(session)
    }

    /// Returns the live session, if any.
    pub fn get_active(&mut self) -> Result<Option<Session>> {
        let session = self.conn.query_row(SELECT_ACTIVE, [], Self::from_row).optional()?;
        Ok(session)
    }

    /// Persists the live timer snapshot for a session.
    ///
    /// The duration totals are reconciled wall-clock values computed by the
    /// tracker at write time, not incremented counters.
    pub fn update_timer_state(
        &mut self,
        id: i64,
        timer_state: Option<&str>,
        current_exercise_id: Option<i64>,
        total_set_duration: i64,
        total_rest_duration: i64,
    ) -> Result<()> {
        self.conn.execute(
            UPDATE_TIMER_STATE,
            params![timer_state, current_exercise_id, total_set_duration, total_rest_duration, id],
        )?;
        Ok(())
    }

    /// Updates only the reconciled duration totals, leaving the blob alone.
    pub fn update_durations(&mut self, id: i64, total_set_duration: i64, total_rest_duration: i64) -> Result<()> {
        self.conn.execute(UPDATE_DURATIONS, params![total_set_duration, total_rest_duration, id])?;
        Ok(())
    }

    /// Completes a session: stamps check-out, stores the minute total and the
    /// final duration split, and clears the live timer columns.
    pub fn finalize(
        &mut self,
        id: i64,
        check_out: NaiveDateTime,
        total_minutes: i64,
        total_set_duration: i64,
        total_rest_duration: i64,
    ) -> Result<()> {
        self.conn.execute(
            FINALIZE_SESSION,
            params![check_out, total_minutes, total_set_duration, total_rest_duration, id],
        )?;
        Ok(())
    }

    pub fn update_notes(&mut self, id: i64, notes: &str) -> Result<()> {
        self.conn.execute(UPDATE_NOTES, params![notes, id])?;
        Ok(())
    }

    /// Deletes a session; logged sets cascade with it.
    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_SESSION, params![id])?;
        Ok(())
    }

    /// Distinct dates with at least one completed workout, for streak math.
    pub fn completed_dates(&mut self) -> Result<HashSet<NaiveDate>> {
        let mut stmt = self.conn.prepare(SELECT_COMPLETED_DATES)?;
        let dates = stmt.query_map([], |row| row.get::<_, NaiveDate>(0))?;

        let mut set = HashSet::new();
        for date in dates {
            set.insert(date?);
        }
        Ok(set)
    }

    /// Most recent completed sessions, newest first.
    pub fn fetch_completed(&mut self, limit: u32) -> Result<Vec<Session>> {
        let mut stmt = self.conn.prepare(SELECT_COMPLETED)?;
        let rows = stmt.query_map(params![limit], Self::from_row)?;

        let mut sessions = Vec::new();
        for session in rows {
            sessions.push(session?);
        }
        Ok(sessions)
    }
}
