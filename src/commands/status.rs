//! Live session status command.
//!
//! Renders the active session once, or with `--follow` keeps re-rendering on
//! a poll interval. Every pass re-reads the session row and timer blob from
//! the database, so set and exercise commands running in another terminal
//! show up on the next refresh. Polling is display-only: elapsed time is
//! recomputed from stored timestamps and nothing is written back.

use crate::commands::resume_tracker;
use crate::db::sessions::Sessions;
use crate::libs::config::Config;
use crate::libs::formatter::format_seconds;
use crate::libs::messages::Message;
use crate::libs::summary::{ActiveSessionSummary, SessionStatus};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Keep refreshing until interrupted.
    #[arg(short, long)]
    follow: bool,
}

pub async fn cmd(args: StatusArgs) -> Result<()> {
    let config = Config::read()?.tracker();

    loop {
        let session = match Sessions::new()?.get_active()? {
            Some(session) => session,
            None => {
                msg_info!(Message::NoActiveSession);
                return Ok(());
            }
        };
        let tracker = resume_tracker()?;
        let now = Local::now().naive_local();

        msg_print!(Message::StatusHeader);

        let summary = ActiveSessionSummary::from_session(
            &session,
            tracker.timer(),
            tracker.current_exercise().map(|e| e.exercise_name.clone()),
        );
        match (&summary.exercise_name, summary.status) {
            (Some(name), SessionStatus::Working) => {
                let elapsed = tracker.timer().current_set_elapsed(now).unwrap_or(0);
                println!("{} - set running {}", name, format_seconds(elapsed));
            }
            (Some(name), SessionStatus::Resting) => {
                let elapsed = tracker.timer().current_rest_elapsed(now).unwrap_or(0);
                println!("{} - resting {}", name, format_seconds(elapsed));
            }
            (Some(name), SessionStatus::Paused) => println!("{} - paused", name),
            (None, _) => {}
        }

        View::status(tracker.exercises(), &tracker.timer().exercise_progress, tracker.timer(), now)?;

        if !args.follow {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(config.poll_interval_ms)).await;
    }
}
