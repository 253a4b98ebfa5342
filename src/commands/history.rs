//! Completed workout history command.

use crate::db::sessions::Sessions;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Maximum number of sessions to show.
    #[arg(short, long, default_value_t = 20)]
    limit: u32,

    /// Export to a CSV file instead of printing a table.
    #[arg(long)]
    csv: Option<PathBuf>,
}

pub fn cmd(args: HistoryArgs) -> Result<()> {
    let sessions = Sessions::new()?.fetch_completed(args.limit)?;
    if sessions.is_empty() {
        msg_info!(Message::HistoryEmpty);
        return Ok(());
    }

    match args.csv {
        Some(path) => {
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record([
                "id",
                "date",
                "check_in",
                "check_out",
                "total_minutes",
                "set_seconds",
                "rest_seconds",
            ])?;
            for session in &sessions {
                writer.write_record([
                    session.id.to_string(),
                    session.session_date.to_string(),
                    session.check_in_time.format("%H:%M:%S").to_string(),
                    session.check_out_time.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default(),
                    session.total_duration.unwrap_or(0).to_string(),
                    session.total_set_duration.to_string(),
                    session.total_rest_duration.to_string(),
                ])?;
            }
            writer.flush()?;
            msg_success!(Message::HistoryExported(path.display().to_string()));
        }
        None => View::history(&sessions)?,
    }
    Ok(())
}
