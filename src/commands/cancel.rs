//! Session cancellation command.
//!
//! Deletes the active session outright, logged sets included.

use crate::commands::resume_tracker;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm};

pub fn cmd() -> Result<()> {
    let mut tracker = resume_tracker()?;

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Cancel this workout and delete its logged sets?")
        .default(false)
        .interact()?;
    if !confirmed {
        msg_info!(Message::OperationCancelled);
        return Ok(());
    }

    tracker.cancel()?;
    msg_success!(Message::SessionCancelled(tracker.session_id()));
    Ok(())
}
