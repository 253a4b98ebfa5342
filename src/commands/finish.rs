//! Session check-out command.

use crate::commands::resume_tracker;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm};

pub fn cmd() -> Result<()> {
    let now = Local::now().naive_local();
    let mut tracker = resume_tracker()?;

    let completed = tracker.timer().exercise_progress.values().filter(|p| p.completed).count();
    let total = tracker.exercises().len();
    if total > 0 && completed < total {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("You completed {}/{} exercises. End session?", completed, total))
            .default(true)
            .interact()?;
        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let minutes = tracker.finish(now)?;
    msg_success!(Message::SessionFinished(tracker.session_id(), minutes));
    Ok(())
}
