//! Time formatting utilities for timer and history display.
//!
//! All timer values in ironlog are second counts derived from wall-clock
//! subtraction, so the formatters here take plain seconds. Durations render
//! as "M:SS" below one hour and "H:MM:SS" above, matching what the live
//! session view shows on screen.

/// Formats a second count as "M:SS", or "H:MM:SS" once an hour is reached.
///
/// Negative values are clamped to zero so in-flight clock skew can never
/// render a nonsense timer.
///
/// # Examples
///
/// ```rust
/// use ironlog::libs::formatter::format_seconds;
///
/// assert_eq!(format_seconds(0), "0:00");
/// assert_eq!(format_seconds(75), "1:15");
/// assert_eq!(format_seconds(3725), "1:02:05");
/// assert_eq!(format_seconds(-5), "0:00");
/// ```
pub fn format_seconds(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hrs = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hrs > 0 {
        format!("{}:{:02}:{:02}", hrs, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}
