//! Exercise selection and completion command.
//!
//! `ironlog exercise <name>` switches to an exercise; `ironlog exercise
//! --done` closes out the current one. Switching away from a running timer
//! and reopening a completed exercise both ask for confirmation. A running
//! timer with no owning exercise is adopted silently when one is selected.

use crate::commands::resume_tracker;
use crate::libs::messages::Message;
use crate::libs::tracker::SelectOutcome;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Select};

#[derive(Debug, Args)]
pub struct ExerciseArgs {
    /// Exercise to select, by name or rotation order.
    name: Option<String>,

    /// Close out the current exercise instead of selecting one.
    #[arg(short, long)]
    done: bool,
}

pub fn cmd(args: ExerciseArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let mut tracker = resume_tracker()?;
    let theme = ColorfulTheme::default();

    if args.done {
        let exercise = match tracker.current_exercise() {
            Some(exercise) => exercise.clone(),
            None => msg_bail_anyhow!(Message::NoExerciseSelected),
        };
        let done = tracker.progress(exercise.exercise_id).map(|p| p.completed_sets()).unwrap_or(0);
        let target = exercise.target_sets as usize;

        let mark_complete = if done < target {
            let choice = Select::with_theme(&theme)
                .with_prompt(Message::ConfirmCompleteExercise(done, target).to_string())
                .items(&["Mark complete", "Mark incomplete", "Cancel"])
                .default(0)
                .interact()?;
            match choice {
                0 => true,
                1 => false,
                _ => {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
        } else {
            true
        };

        if let Some(name) = tracker.complete_exercise(mark_complete, now) {
            tracker.flush(now);
            if mark_complete {
                msg_success!(Message::ExerciseCompleted(name));
            } else {
                msg_info!(Message::ExerciseMarkedIncomplete(name));
            }
        }
        return Ok(());
    }

    let query = match args.name {
        Some(query) => query,
        None => msg_bail_anyhow!(Message::NoExerciseSelected),
    };
    let target = match find_exercise(&tracker, &query) {
        Some(exercise) => exercise,
        None => msg_bail_anyhow!(Message::ExerciseNotInWorkout(query)),
    };

    if tracker.current_exercise().map(|e| e.exercise_id) != Some(target.0) {
        if let Some(current) = tracker.current_exercise() {
            if tracker.timer().is_running() {
                let confirmed = Confirm::with_theme(&theme)
                    .with_prompt(Message::ConfirmSwitchExercise(current.exercise_name.clone(), target.1.clone()).to_string())
                    .default(true)
                    .interact()?;
                if !confirmed {
                    msg_info!(Message::OperationCancelled);
                    return Ok(());
                }
            }
        }

        if tracker.progress(target.0).map(|p| p.completed).unwrap_or(false) {
            let confirmed = Confirm::with_theme(&theme)
                .with_prompt(Message::ConfirmReopenCompleted(target.1.clone()).to_string())
                .default(false)
                .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
        }
    }

    match tracker.select_exercise(target.0, now)? {
        SelectOutcome::AlreadySelected => msg_info!(Message::ExerciseAlreadySelected(target.1)),
        SelectOutcome::Adopted => {
            tracker.flush(now);
            msg_success!(Message::OrphanTimerAdopted(target.1));
        }
        SelectOutcome::Switched => {
            tracker.flush(now);
            msg_success!(Message::ExerciseSelected(target.1));
        }
    }
    Ok(())
}

/// Resolves an exercise by rotation order or case-insensitive name prefix.
fn find_exercise(tracker: &crate::libs::tracker::SessionTracker, query: &str) -> Option<(i64, String)> {
    if let Ok(order) = query.parse::<i64>() {
        if let Some(exercise) = tracker.exercises().iter().find(|e| e.exercise_order == order) {
            return Some((exercise.exercise_id, exercise.exercise_name.clone()));
        }
    }

    let lowered = query.to_lowercase();
    tracker
        .exercises()
        .iter()
        .find(|e| e.exercise_name.to_lowercase().starts_with(&lowered))
        .map(|e| (e.exercise_id, e.exercise_name.clone()))
}
