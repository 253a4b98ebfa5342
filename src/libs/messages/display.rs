//! Display implementation for ironlog application messages.
//!
//! Provides the `Display` trait implementation for the `Message` enum,
//! converting structured message data into human-readable terminal text.
//! All user-facing text lives here so wording stays consistent across the
//! application and parameters are interpolated in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === SESSION MESSAGES ===
            Message::SessionStarted(id) => format!("Workout session {} started. Pick an exercise and go!", id),
            Message::SessionAlreadyActive(id) => format!("A workout session is already in progress (session {})", id),
            Message::NoActiveSession => "No workout session is in progress".to_string(),
            Message::SessionFinished(id, minutes) => format!("Workout session {} finished: {} min total", id, minutes),
            Message::SessionCancelled(id) => format!("Workout session {} cancelled and deleted", id),
            Message::SessionSaveFailed(err) => format!("Failed to save session state (continuing from memory): {}", err),
            Message::TimerStateParseFailed => "Saved timer state could not be parsed; timers reset to idle".to_string(),

            // === EXERCISE MESSAGES ===
            Message::ExerciseSelected(name) => format!("Now on: {}", name),
            Message::ExerciseAlreadySelected(name) => format!("Already on {} - keep going", name),
            Message::ExerciseNotInWorkout(name) => format!("Exercise '{}' is not part of this workout", name),
            Message::ExerciseCompleted(name) => format!("{} marked complete", name),
            Message::ExerciseMarkedIncomplete(name) => format!("{} left incomplete", name),
            Message::NoExerciseSelected => "Select an exercise first".to_string(),
            Message::OrphanTimerAdopted(name) => format!("Recovered running timer and attached it to {}", name),
            Message::ConfirmSwitchExercise(current, next) => {
                format!("A timer is running on {}. Switch to {}?", current, next)
            }
            Message::ConfirmReopenCompleted(name) => format!("{} is marked complete. Open it anyway?", name),
            Message::ConfirmCompleteExercise(done, target) => {
                format!("Only {}/{} target sets done. Mark the exercise complete?", done, target)
            }

            // === SET MESSAGES ===
            Message::SetStarted(number) => format!("Set {} started", number),
            Message::SetAlreadyActive => "A set is already running".to_string(),
            Message::NoSetActive => "No set is running".to_string(),
            Message::SetLogged(number, reps) => format!("Set {} logged: {} reps", number, reps),
            Message::TargetSetsReached(done, target) => format!("Target reached: {}/{} sets done", done, target),
            Message::RestStarted => "Rest timer running".to_string(),
            Message::PromptReps => "Reps".to_string(),
            Message::PromptWeight => "Weight in kg (empty for bodyweight)".to_string(),
            Message::InvalidSetInput(reason) => format!("Invalid set input: {}", reason),

            // === PLAN MESSAGES ===
            Message::PlanCreated(id, name) => format!("Plan '{}' created with id {}", name, id),
            Message::PlanDayAdded(id, name) => format!("Day '{}' added with id {}", name, id),
            Message::PlanExerciseAdded(name) => format!("Exercise '{}' added to the day", name),
            Message::PlanActivated(id) => format!("Plan {} is now active", id),
            Message::PlanNotFound(id) => format!("Plan {} not found", id),
            Message::PlanDayNotFound(id) => format!("Plan day {} not found", id),
            Message::NoPlansFound => "No workout plans found".to_string(),

            // === STREAK MESSAGES ===
            Message::StreakNew => "Start your streak today 💪".to_string(),
            Message::StreakActive(days) => format!("🔥 {} Day Streak", days),
            Message::StreakWarningLow(days) => {
                format!("⏳ {} day streak - work out today to keep it going", days)
            }
            Message::StreakWarningHigh(days) => {
                format!("Last chance! Work out today or lose your {} day streak", days)
            }
            Message::StreakBroken => "💔 Streak broken - start a new one today".to_string(),

            // === HISTORY MESSAGES ===
            Message::HistoryEmpty => "No completed workouts yet".to_string(),
            Message::HistoryExported(path) => format!("History exported to {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDebouncePrompt => "Save debounce in seconds".to_string(),
            Message::ConfigPollIntervalPrompt => "Status poll interval in milliseconds".to_string(),

            // === DATABASE MESSAGES ===
            Message::MigrationsFound(count) => format!("Applying {} pending database migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration {}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration {} applied", version),
            Message::MigrationFailed(version, err) => format!("Migration {} failed: {}", version, err),
            Message::AllMigrationsCompleted => "Database schema is up to date".to_string(),

            // === GENERIC MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::StatusHeader => "🏋️ Active Workout".to_string(),
            Message::WorkoutHeader(day) => format!("🏋️ {}", day),
        };

        write!(f, "{}", text)
    }
}
