//! Workout streak command.

use crate::db::plans::Plans;
use crate::db::sessions::Sessions;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::streak::{self, StreakStatus};
use crate::msg_print;
use anyhow::Result;
use chrono::Local;

pub fn cmd() -> Result<()> {
    let config = Config::read()?.tracker();
    let dates = Sessions::new()?.completed_dates()?;

    let mut plans = Plans::new()?;
    let rotation_days = match plans.get_active()? {
        Some(plan) => Some(plans.day_count(plan.id)?),
        None => None,
    };

    let grace = streak::grace_period(rotation_days, config.default_grace_period_days);
    let streak = streak::calculate(&dates, Local::now().date_naive(), grace);

    let message = match streak.status {
        StreakStatus::New => Message::StreakNew,
        StreakStatus::Active => Message::StreakActive(streak.count),
        StreakStatus::WarningLow => Message::StreakWarningLow(streak.count),
        StreakStatus::WarningHigh => Message::StreakWarningHigh(streak.count),
        StreakStatus::Broken => Message::StreakBroken,
    };
    msg_print!(message);
    Ok(())
}
