//! Set start and completion commands.
//!
//! `ironlog set start` opens the set timer, patching the previous set's rest
//! on the way. `ironlog set done` stops the set, starts the rest timer right
//! away, and then asks for reps and weight; rest keeps accruing while the
//! numbers are typed in.

use crate::commands::resume_tracker;
use crate::libs::messages::Message;
use crate::libs::tracker::{parse_weight, InputError, SessionTracker};
use crate::{msg_bail_anyhow, msg_error, msg_info, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};

#[derive(Debug, Args)]
pub struct SetArgs {
    #[command(subcommand)]
    command: SetCommands,
}

#[derive(Debug, Subcommand)]
enum SetCommands {
    #[command(about = "Start the set timer")]
    Start,
    #[command(about = "Stop the set and log reps and weight")]
    Done(DoneArgs),
}

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Reps performed; prompted for when omitted.
    #[arg(short, long)]
    reps: Option<i64>,

    /// Weight in kg; prompted for when omitted.
    #[arg(short, long)]
    weight: Option<f64>,
}

pub fn cmd(args: SetArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let mut tracker = resume_tracker()?;

    match args.command {
        SetCommands::Start => start(&mut tracker, now),
        SetCommands::Done(done_args) => done(&mut tracker, done_args, now),
    }
}

fn start(tracker: &mut SessionTracker, now: NaiveDateTime) -> Result<()> {
    if let Some(exercise) = tracker.current_exercise() {
        let done = tracker.progress(exercise.exercise_id).map(|p| p.completed_sets()).unwrap_or(0);
        let target = exercise.target_sets as usize;
        if done >= target {
            let choice = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::TargetSetsReached(done, target).to_string())
                .items(&["Add extra set", "Stop here"])
                .default(0)
                .interact()?;
            if choice != 0 {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
        }
    }

    let set_number = tracker.start_set(now)?;
    tracker.flush(now);
    msg_success!(Message::SetStarted(set_number));
    Ok(())
}

fn done(tracker: &mut SessionTracker, args: DoneArgs, now: NaiveDateTime) -> Result<()> {
    let pending = match tracker.complete_set(now) {
        Some(pending) => pending,
        None => msg_bail_anyhow!(Message::NoSetActive),
    };
    let theme = ColorfulTheme::default();

    let reps = match args.reps {
        Some(reps) => reps,
        None => Input::with_theme(&theme)
            .with_prompt(Message::PromptReps.to_string())
            .default(pending.default_reps)
            .interact_text()?,
    };
    // A typo must not abort the command: the pending set and its frozen
    // duration only survive inside this process, so re-prompt instead of
    // propagating a parse error.
    let weight = match args.weight {
        Some(weight) => Some(weight),
        None => loop {
            let raw: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptWeight.to_string())
                .with_initial_text(pending.default_weight.map(|w| w.to_string()).unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            match parse_weight(&raw) {
                Ok(weight) => break weight,
                Err(e) => msg_error!(Message::InvalidSetInput(e.to_string())),
            }
        },
    };

    let record = match tracker.commit_set(reps, weight, Local::now().naive_local()) {
        Ok(record) => record,
        Err(e) if e.is::<InputError>() => {
            msg_error!(Message::InvalidSetInput(e.to_string()));
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    tracker.flush(Local::now().naive_local());

    msg_success!(Message::SetLogged(record.set_number, record.reps));
    msg_info!(Message::RestStarted);

    if let Some(exercise) = tracker.current_exercise() {
        let done = tracker.progress(exercise.exercise_id).map(|p| p.completed_sets()).unwrap_or(0);
        let target = exercise.target_sets as usize;
        if done >= target {
            msg_info!(Message::TargetSetsReached(done, target));
        }
    }
    Ok(())
}
