//! Session check-in command.
//!
//! Starts a workout session against the active plan. The plan day can be
//! given by its rotation order; otherwise the day is picked interactively.
//! Without any plan, the session runs unplanned with no exercise list.

use crate::db::plans::Plans;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::summary::LogSink;
use crate::libs::tracker::SessionTracker;
use crate::libs::view::View;
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Plan day to train, by rotation order (1-based).
    #[arg(short, long)]
    day: Option<i64>,
}

pub fn cmd(args: StartArgs) -> Result<()> {
    let now = Local::now().naive_local();
    let config = Config::read()?.tracker();

    let mut plans = Plans::new()?;
    let (plan_id, day) = match plans.get_active()? {
        Some(plan) => {
            let days = plans.days(plan.id)?;
            let day = match args.day {
                Some(order) => days.into_iter().find(|d| d.day_order == order),
                None if days.is_empty() => None,
                None => {
                    let names: Vec<&str> = days.iter().map(|d| d.day_name.as_str()).collect();
                    let picked = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt("Which day are you training?")
                        .items(&names)
                        .default(0)
                        .interact()?;
                    days.into_iter().nth(picked)
                }
            };
            (Some(plan.id), day)
        }
        None => (None, None),
    };

    let exercises = match &day {
        Some(day) => plans.day_exercises(day.id)?,
        None => Vec::new(),
    };

    let mut tracker = SessionTracker::begin(
        now,
        plan_id,
        day.as_ref().map(|d| d.id),
        exercises,
        config.save_debounce_secs,
        Box::new(LogSink),
    )?;
    tracker.flush(now);

    msg_success!(Message::SessionStarted(tracker.session_id()));
    if let Some(day) = day {
        msg_print!(Message::WorkoutHeader(day.day_name));
        View::day_exercises(tracker.exercises())?;
    }
    Ok(())
}
