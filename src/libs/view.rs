//! Terminal table rendering.

use crate::db::plans::{Plan, PlanExercise};
use crate::db::sessions::Session;
use crate::libs::formatter::format_seconds;
use crate::libs::progress::ExerciseProgress;
use crate::libs::timer::TimerState;
use anyhow::Result;
use chrono::NaiveDateTime;
use prettytable::{row, Table};
use std::collections::HashMap;

pub struct View {}

impl View {
    /// Live session status: one row per exercise with set progress, plus the
    /// running timers recomputed at `now`.
    pub fn status(exercises: &[PlanExercise], progress: &HashMap<i64, ExerciseProgress>, timer: &TimerState, now: NaiveDateTime) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["EXERCISE", "SETS", "TARGET", "STATUS"]);
        for exercise in exercises {
            let entry = progress.get(&exercise.exercise_id);
            let done = entry.map(|p| p.completed_sets()).unwrap_or(0);
            let status = match entry {
                Some(p) if p.completed => "complete",
                Some(_) => "in progress",
                None => "-",
            };
            table.add_row(row![exercise.exercise_name, done, exercise.target_sets, status]);
        }
        table.printstd();

        println!(
            "Set {}  |  Rest {}",
            format_seconds(timer.total_set_seconds(now)),
            format_seconds(timer.total_rest_seconds(now))
        );

        Ok(())
    }

    /// Completed session history, newest first.
    pub fn history(sessions: &[Session]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "DATE", "CHECK-IN", "CHECK-OUT", "MINUTES", "SET TIME", "REST TIME"]);
        for session in sessions {
            table.add_row(row![
                session.id,
                session.session_date,
                session.check_in_time.format("%H:%M:%S"),
                session.check_out_time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default(),
                session.total_duration.unwrap_or(0),
                format_seconds(session.total_set_duration),
                format_seconds(session.total_rest_duration),
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Plan list with the active one flagged.
    pub fn plans(plans: &[Plan]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "DESCRIPTION", "ACTIVE"]);
        for plan in plans {
            table.add_row(row![
                plan.id,
                plan.name,
                plan.description.as_deref().unwrap_or(""),
                if plan.is_active { "*" } else { "" },
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Exercises of a plan day with their targets.
    pub fn day_exercises(exercises: &[PlanExercise]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "EXERCISE", "TARGET SETS", "TARGET REPS"]);
        for exercise in exercises {
            table.add_row(row![exercise.exercise_order, exercise.exercise_name, exercise.target_sets, exercise.target_reps]);
        }
        table.printstd();

        Ok(())
    }
}
