//! Logged set storage.
//!
//! Each row in `exercise_performance` is one committed set. The set's own
//! duration is known when the row is inserted; its rest duration is patched
//! in afterwards, once the rest that followed it actually ends.

use crate::db::db::Db;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_SET: &str = "INSERT INTO exercise_performance \
     (session_id, exercise_id, exercise_name, set_number, reps, weight, set_duration, rest_duration, completed_at, notes) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const UPDATE_REST: &str = "UPDATE exercise_performance SET rest_duration = ?1 WHERE id = ?2";
const SELECT_BY_SESSION: &str = "SELECT id, session_id, exercise_id, exercise_name, set_number, reps, weight, set_duration, rest_duration, \
     completed_at, notes FROM exercise_performance WHERE session_id = ?1 ORDER BY completed_at";
const SELECT_LAST_FOR_EXERCISE: &str = "SELECT ep.reps, ep.weight FROM exercise_performance ep \
     JOIN workout_sessions ws ON ep.session_id = ws.id \
     WHERE ep.exercise_id = ?1 AND ws.is_completed = 1 \
     ORDER BY ws.session_date DESC, ep.completed_at DESC LIMIT 1";

/// One committed set.
#[derive(Debug, Clone)]
pub struct SetRow {
    pub id: i64,
    pub session_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub set_number: i64,
    pub reps: i64,
    pub weight: Option<f64>,
    pub set_duration: Option<i64>,
    pub rest_duration: Option<i64>,
    pub completed_at: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

pub struct Sets {
    pub conn: Connection,
}

impl Sets {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Sets { conn: db.conn })
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<SetRow> {
        Ok(SetRow {
            id: row.get(0)?,
            session_id: row.get(1)?,
            exercise_id: row.get(2)?,
            exercise_name: row.get(3)?,
            set_number: row.get(4)?,
            reps: row.get(5)?,
            weight: row.get(6)?,
            set_duration: row.get(7)?,
            rest_duration: row.get(8)?,
            completed_at: row.get(9)?,
            notes: row.get(10)?,
        })
    }

    /// Inserts a committed set and returns its row id.
    ///
    /// `rest_duration` is usually `None` here: the rest following this set
    /// has not happened yet and gets patched in via [`Sets::patch_rest`].
    #[allow(clippy::too_many_arguments)]
    pub fn log_set(
        &mut self,
        session_id: i64,
        exercise_id: i64,
        exercise_name: &str,
        set_number: i64,
        reps: i64,
        weight: Option<f64>,
        set_duration: Option<i64>,
        rest_duration: Option<i64>,
        completed_at: NaiveDateTime,
    ) -> Result<i64> {
        self.conn.execute(
            INSERT_SET,
            params![
                session_id,
                exercise_id,
                exercise_name,
                set_number,
                reps,
                weight,
                set_duration,
                rest_duration,
                completed_at,
                Option::<String>::None,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Backfills the rest duration on an already-logged set.
    pub fn patch_rest(&mut self, set_id: i64, rest_duration: i64) -> Result<()> {
        self.conn.execute(UPDATE_REST, params![rest_duration, set_id])?;
        Ok(())
    }

    /// All sets logged for a session in completion order.
    pub fn fetch_for_session(&mut self, session_id: i64) -> Result<Vec<SetRow>> {
        let mut stmt = self.conn.prepare(SELECT_BY_SESSION)?;
        let rows = stmt.query_map(params![session_id], Self::from_row)?;

        let mut sets = Vec::new();
        for set in rows {
            sets.push(set?);
        }
        Ok(sets)
    }

    /// Reps and weight of the most recent completed-session set for an
    /// exercise, used to prefill input prompts.
    pub fn last_performance(&mut self, exercise_id: i64) -> Result<Option<(i64, Option<f64>)>> {
        let last = self
            .conn
            .query_row(SELECT_LAST_FOR_EXERCISE, params![exercise_id], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;
        Ok(last)
    }
}
