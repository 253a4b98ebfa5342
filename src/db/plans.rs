//! Workout plan storage.
//!
//! A plan is an ordered rotation of days, each day an ordered list of
//! exercises with set and rep targets. Exactly one plan can be active; the
//! active plan drives session day selection and the streak grace period,
//! which scales with the rotation length.

use crate::db::db::Db;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_PLAN: &str = "INSERT INTO workout_plans (name, description) VALUES (?1, ?2)";
const INSERT_DAY: &str = "INSERT INTO plan_days (plan_id, day_name, day_order) VALUES (?1, ?2, ?3)";
const INSERT_PLAN_EXERCISE: &str = "INSERT INTO plan_exercises (day_id, exercise_id, exercise_order, target_sets, target_reps) \
     VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_EXERCISE_BY_NAME: &str = "SELECT id FROM exercises WHERE name = ?1";
const INSERT_EXERCISE: &str = "INSERT INTO exercises (name, target_muscle, category) VALUES (?1, ?2, ?3)";
const DEACTIVATE_ALL: &str = "UPDATE workout_plans SET is_active = 0";
const ACTIVATE_PLAN: &str = "UPDATE workout_plans SET is_active = 1 WHERE id = ?1";
const SELECT_PLAN_BY_ID: &str = "SELECT id, name, description, is_active FROM workout_plans WHERE id = ?1";
const SELECT_ACTIVE_PLAN: &str = "SELECT id, name, description, is_active FROM workout_plans WHERE is_active = 1 LIMIT 1";
const SELECT_ALL_PLANS: &str = "SELECT id, name, description, is_active FROM workout_plans ORDER BY id";
const SELECT_DAYS: &str = "SELECT id, plan_id, day_name, day_order FROM plan_days WHERE plan_id = ?1 ORDER BY day_order";
const SELECT_DAY_BY_ID: &str = "SELECT id, plan_id, day_name, day_order FROM plan_days WHERE id = ?1";
const COUNT_DAYS: &str = "SELECT COUNT(*) FROM plan_days WHERE plan_id = ?1";
const SELECT_DAY_EXERCISES: &str = "SELECT pe.id, pe.day_id, pe.exercise_id, e.name, pe.exercise_order, pe.target_sets, pe.target_reps \
     FROM plan_exercises pe JOIN exercises e ON pe.exercise_id = e.id \
     WHERE pe.day_id = ?1 ORDER BY pe.exercise_order";

#[derive(Debug, Clone)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct PlanDay {
    pub id: i64,
    pub plan_id: i64,
    pub day_name: String,
    pub day_order: i64,
}

/// One exercise slot within a plan day, with the exercise name joined in.
#[derive(Debug, Clone)]
pub struct PlanExercise {
    pub id: i64,
    pub day_id: i64,
    pub exercise_id: i64,
    pub exercise_name: String,
    pub exercise_order: i64,
    pub target_sets: i64,
    pub target_reps: String,
}

pub struct Plans {
    pub conn: Connection,
}

impl Plans {
    pub fn new() -> Result<Self> {
        let db = Db::new()?;
        Ok(Plans { conn: db.conn })
    }

    fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
        Ok(Plan {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            is_active: row.get::<_, i64>(3)? != 0,
        })
    }

    fn day_from_row(row: &Row<'_>) -> rusqlite::Result<PlanDay> {
        Ok(PlanDay {
            id: row.get(0)?,
            plan_id: row.get(1)?,
            day_name: row.get(2)?,
            day_order: row.get(3)?,
        })
    }

    fn exercise_from_row(row: &Row<'_>) -> rusqlite::Result<PlanExercise> {
        Ok(PlanExercise {
            id: row.get(0)?,
            day_id: row.get(1)?,
            exercise_id: row.get(2)?,
            exercise_name: row.get(3)?,
            exercise_order: row.get(4)?,
            target_sets: row.get(5)?,
            target_reps: row.get(6)?,
        })
    }

    pub fn create(&mut self, name: &str, description: Option<&str>) -> Result<i64> {
        self.conn.execute(INSERT_PLAN, params![name, description])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn add_day(&mut self, plan_id: i64, day_name: &str, day_order: i64) -> Result<i64> {
        self.conn.execute(INSERT_DAY, params![plan_id, day_name, day_order])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Adds an exercise slot to a day, registering the exercise by name if it
    /// is not in the library yet.
    pub fn add_exercise(
        &mut self,
        day_id: i64,
        exercise_name: &str,
        target_muscle: &str,
        exercise_order: i64,
        target_sets: i64,
        target_reps: &str,
    ) -> Result<i64> {
        let exercise_id = self.get_or_create_exercise(exercise_name, target_muscle)?;
        self.conn.execute(
            INSERT_PLAN_EXERCISE,
            params![day_id, exercise_id, exercise_order, target_sets, target_reps],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_or_create_exercise(&mut self, name: &str, target_muscle: &str) -> Result<i64> {
        let existing: Option<i64> = self.conn.query_row(SELECT_EXERCISE_BY_NAME, params![name], |row| row.get(0)).optional()?;
        if let Some(id) = existing {
            return Ok(id);
        }
        self.conn.execute(INSERT_EXERCISE, params![name, target_muscle, "Strength"])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Makes `id` the single active plan.
    pub fn set_active(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(DEACTIVATE_ALL, [])?;
        tx.execute(ACTIVATE_PLAN, params![id])?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_by_id(&mut self, id: i64) -> Result<Option<Plan>> {
        let plan = self.conn.query_row(SELECT_PLAN_BY_ID, params![id], Self::plan_from_row).optional()?;
        Ok(plan)
    }

    pub fn get_active(&mut self) -> Result<Option<Plan>> {
        let plan = self.conn.query_row(SELECT_ACTIVE_PLAN, [], Self::plan_from_row).optional()?;
        Ok(plan)
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Plan>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_PLANS)?;
        let rows = stmt.query_map([], Self::plan_from_row)?;

        let mut plans = Vec::new();
        for plan in rows {
            plans.push(plan?);
        }
        Ok(plans)
    }

    pub fn days(&mut self, plan_id: i64) -> Result<Vec<PlanDay>> {
        let mut stmt = self.conn.prepare(SELECT_DAYS)?;
        let rows = stmt.query_map(params![plan_id], Self::day_from_row)?;

        let mut days = Vec::new();
        for day in rows {
            days.push(day?);
        }
        Ok(days)
    }

    pub fn get_day(&mut self, day_id: i64) -> Result<Option<PlanDay>> {
        let day = self.conn.query_row(SELECT_DAY_BY_ID, params![day_id], Self::day_from_row).optional()?;
        Ok(day)
    }

    /// Rotation length of a plan in days.
    pub fn day_count(&mut self, plan_id: i64) -> Result<u32> {
        let count: u32 = self.conn.query_row(COUNT_DAYS, params![plan_id], |row| row.get(0))?;
        Ok(count)
    }

    pub fn day_exercises(&mut self, day_id: i64) -> Result<Vec<PlanExercise>> {
        let mut stmt = self.conn.prepare(SELECT_DAY_EXERCISES)?;
        let rows = stmt.query_map(params![day_id], Self::exercise_from_row)?;

        let mut exercises = Vec::new();
        for exercise in rows {
            exercises.push(exercise?);
        }
        Ok(exercises)
    }
}
