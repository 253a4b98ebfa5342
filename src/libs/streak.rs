//! Workout streak calculation.
//!
//! Pure date arithmetic over the set of calendar days with a completed
//! session. Status depends only on how many whole days have passed since the
//! most recent workout; the streak count comes from a backward day-by-day
//! walk that tolerates short gaps up to a grace period derived from the
//! active plan's rotation length.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

/// Urgency classification for the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakStatus {
    /// No completed workouts yet.
    New,
    /// Worked out today.
    Active,
    /// One day since the last workout.
    WarningLow,
    /// Two days since the last workout, last chance before the break.
    WarningHigh,
    /// Three or more days since the last workout.
    Broken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    pub status: StreakStatus,
    /// Consecutive-ish workout days counted by the grace-tolerant walk.
    /// Always 0 when the status is `New` or `Broken`.
    pub count: u32,
}

/// Grace period in days for the streak walk.
///
/// A plan with fewer distinct rotation days per week has naturally longer
/// gaps between sessions, so the tolerance scales as `ceil(7 / N)`, clamped
/// to `[2, 3]` so it never becomes too strict or too generous. Without an
/// active plan the caller-supplied default applies.
pub fn grace_period(rotation_days: Option<u32>, default_days: u32) -> u32 {
    match rotation_days {
        Some(n) if n > 0 => 7u32.div_ceil(n).clamp(2, 3),
        _ => default_days,
    }
}

/// Computes the streak from the set of completed-workout dates.
///
/// Status is classified purely by the whole-day gap between `today` and the
/// most recent workout: 0 is active, 1 and 2 are escalating warnings, 3 or
/// more is broken with the count reset to 0 regardless of history.
///
/// When not broken, the count walks backward from the most recent workout
/// date, incrementing on each hit and tracking consecutive misses; the walk
/// stops once the misses in a row exceed `grace_days`. A hit resets the miss
/// run, so isolated short gaps survive but an old gap beyond tolerance is
/// never seen through.
pub fn calculate(dates: &HashSet<NaiveDate>, today: NaiveDate, grace_days: u32) -> Streak {
    let most_recent = match dates.iter().max() {
        Some(date) => *date,
        None => return Streak { status: StreakStatus::New, count: 0 },
    };

    let days_since_last = (today - most_recent).num_days();
    let status = match days_since_last {
        i64::MIN..=0 => StreakStatus::Active,
        1 => StreakStatus::WarningLow,
        2 => StreakStatus::WarningHigh,
        _ => StreakStatus::Broken,
    };

    if status == StreakStatus::Broken {
        return Streak { status, count: 0 };
    }

    let mut count = 0u32;
    let mut misses = 0u32;
    let mut cursor = most_recent;

    loop {
        if dates.contains(&cursor) {
            count += 1;
            misses = 0;
        } else {
            misses += 1;
            if misses > grace_days {
                break;
            }
        }
        cursor -= Duration::days(1);
    }

    Streak { status, count }
}
