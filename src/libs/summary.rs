//! Active-session summary push interface.
//!
//! Whenever a tracker operation changes status-relevant state it pushes a
//! small summary record to a sink. The sink is a one-way notification for
//! banners or status displays; the tracker never blocks on it and never
//! reads anything back.

use crate::db::sessions::Session;
use crate::libs::timer::TimerState;
use chrono::NaiveDateTime;

/// What the lifter is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Working,
    Resting,
    Paused,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Working => "working",
            SessionStatus::Resting => "resting",
            SessionStatus::Paused => "paused",
        }
    }
}

/// Snapshot pushed to the sink after each status-relevant change.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSessionSummary {
    pub session_id: i64,
    pub plan_id: Option<i64>,
    pub day_id: Option<i64>,
    pub exercise_name: Option<String>,
    pub status: SessionStatus,
    /// When the current set or rest interval started, if one is running.
    pub start_time: Option<NaiveDateTime>,
}

impl ActiveSessionSummary {
    /// Rebuilds the banner summary from a stored session row and its
    /// restored timer state, as done once on startup.
    pub fn from_session(session: &Session, timer: &TimerState, exercise_name: Option<String>) -> Self {
        let (status, start_time) = if timer.is_set_active {
            (SessionStatus::Working, timer.set_start_time)
        } else if timer.is_resting {
            (SessionStatus::Resting, timer.rest_start_time)
        } else {
            (SessionStatus::Paused, None)
        };
        ActiveSessionSummary {
            session_id: session.id,
            plan_id: session.plan_id,
            day_id: session.day_id,
            exercise_name,
            status,
            start_time,
        }
    }
}

pub trait SummarySink {
    fn push(&mut self, summary: &ActiveSessionSummary);
}

/// Discards all summaries.
#[derive(Debug, Default)]
pub struct NullSink;

impl SummarySink for NullSink {
    fn push(&mut self, _summary: &ActiveSessionSummary) {}
}

/// Emits each summary as a tracing event.
#[derive(Debug, Default)]
pub struct LogSink;

impl SummarySink for LogSink {
    fn push(&mut self, summary: &ActiveSessionSummary) {
        tracing::debug!(
            session_id = summary.session_id,
            exercise = summary.exercise_name.as_deref().unwrap_or("-"),
            status = summary.status.as_str(),
            "session status changed"
        );
    }
}
