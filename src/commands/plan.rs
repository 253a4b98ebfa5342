//! Workout plan management commands.

use crate::db::plans::Plans;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_print, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[command(subcommand)]
    command: PlanCommands,
}

#[derive(Debug, Subcommand)]
enum PlanCommands {
    #[command(about = "Create a new workout plan")]
    New(NewArgs),
    #[command(about = "Add a rotation day to a plan")]
    AddDay(AddDayArgs),
    #[command(about = "Add an exercise to a plan day")]
    AddExercise(AddExerciseArgs),
    #[command(about = "Make a plan the active one")]
    Activate(ActivateArgs),
    #[command(about = "List all plans")]
    List,
    #[command(about = "Show a plan's days and exercises")]
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct NewArgs {
    name: String,
    #[arg(short, long)]
    description: Option<String>,
}

#[derive(Debug, Args)]
struct AddDayArgs {
    plan_id: i64,
    name: String,
}

#[derive(Debug, Args)]
struct AddExerciseArgs {
    day_id: i64,
    name: String,
    #[arg(short, long, default_value = "Full Body")]
    muscle: String,
    #[arg(short, long, default_value_t = 3)]
    sets: i64,
    #[arg(short, long, default_value = "8-12")]
    reps: String,
}

#[derive(Debug, Args)]
struct ActivateArgs {
    plan_id: i64,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Plan to show; defaults to the active plan.
    plan_id: Option<i64>,
}

pub fn cmd(args: PlanArgs) -> Result<()> {
    let mut plans = Plans::new()?;

    match args.command {
        PlanCommands::New(new_args) => {
            let id = plans.create(&new_args.name, new_args.description.as_deref())?;
            msg_success!(Message::PlanCreated(id, new_args.name));
        }
        PlanCommands::AddDay(day_args) => {
            if plans.get_by_id(day_args.plan_id)?.is_none() {
                msg_bail_anyhow!(Message::PlanNotFound(day_args.plan_id));
            }
            let order = plans.day_count(day_args.plan_id)? as i64 + 1;
            let id = plans.add_day(day_args.plan_id, &day_args.name, order)?;
            msg_success!(Message::PlanDayAdded(id, day_args.name));
        }
        PlanCommands::AddExercise(ex_args) => {
            if plans.get_day(ex_args.day_id)?.is_none() {
                msg_bail_anyhow!(Message::PlanDayNotFound(ex_args.day_id));
            }
            let order = plans.day_exercises(ex_args.day_id)?.len() as i64 + 1;
            plans.add_exercise(ex_args.day_id, &ex_args.name, &ex_args.muscle, order, ex_args.sets, &ex_args.reps)?;
            msg_success!(Message::PlanExerciseAdded(ex_args.name));
        }
        PlanCommands::Activate(activate_args) => {
            if plans.get_by_id(activate_args.plan_id)?.is_none() {
                msg_bail_anyhow!(Message::PlanNotFound(activate_args.plan_id));
            }
            plans.set_active(activate_args.plan_id)?;
            msg_success!(Message::PlanActivated(activate_args.plan_id));
        }
        PlanCommands::List => {
            let all = plans.fetch_all()?;
            if all.is_empty() {
                msg_info!(Message::NoPlansFound);
            } else {
                View::plans(&all)?;
            }
        }
        PlanCommands::Show(show_args) => {
            let plan = match show_args.plan_id {
                Some(id) => plans.get_by_id(id)?,
                None => plans.get_active()?,
            };
            let plan = match plan {
                Some(plan) => plan,
                None => msg_bail_anyhow!(Message::NoPlansFound),
            };
            for day in plans.days(plan.id)? {
                msg_print!(Message::WorkoutHeader(day.day_name));
                View::day_exercises(&plans.day_exercises(day.id)?)?;
            }
        }
    }
    Ok(())
}
