//! Command-line interface definition and dispatch.

pub mod cancel;
pub mod exercise;
pub mod finish;
pub mod history;
pub mod init;
pub mod plan;
pub mod set;
pub mod start;
pub mod status;
pub mod streak;

use crate::db::plans::{PlanExercise, Plans};
use crate::db::sessions::Sessions;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::summary::LogSink;
use crate::libs::tracker::SessionTracker;
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Check in and start a workout session")]
    Start(start::StartArgs),
    #[command(about = "Select or complete an exercise")]
    Exercise(exercise::ExerciseArgs),
    #[command(about = "Start or finish a set")]
    Set(set::SetArgs),
    #[command(about = "Check out and finish the active session")]
    Finish,
    #[command(about = "Cancel and delete the active session")]
    Cancel,
    #[command(about = "Show the live session status")]
    Status(status::StatusArgs),
    #[command(about = "Show the workout streak")]
    Streak,
    #[command(about = "Show completed workout history")]
    History(history::HistoryArgs),
    #[command(about = "Manage workout plans")]
    Plan(plan::PlanArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        if crate::libs::messages::macros::is_debug_mode() {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .init();
        }

        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args),
            Commands::Exercise(args) => exercise::cmd(args),
            Commands::Set(args) => set::cmd(args),
            Commands::Finish => finish::cmd(),
            Commands::Cancel => cancel::cmd(),
            Commands::Status(args) => status::cmd(args).await,
            Commands::Streak => streak::cmd(),
            Commands::History(args) => history::cmd(args),
            Commands::Plan(args) => plan::cmd(args),
        }
    }
}

/// Exercises of the active session's plan day, empty for unplanned sessions.
pub(crate) fn active_day_exercises() -> Result<Vec<PlanExercise>> {
    let session = match Sessions::new()?.get_active()? {
        Some(session) => session,
        None => msg_bail_anyhow!(Message::NoActiveSession),
    };
    match session.day_id {
        Some(day_id) => Plans::new()?.day_exercises(day_id),
        None => Ok(Vec::new()),
    }
}

/// Re-attaches a tracker to the active session.
pub(crate) fn resume_tracker() -> Result<SessionTracker> {
    let exercises = active_day_exercises()?;
    let config = Config::read()?.tracker();
    SessionTracker::resume(exercises, config.save_debounce_secs, Box::new(LogSink))
}
