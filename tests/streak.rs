#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ironlog::libs::streak::{calculate, grace_period, StreakStatus};
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(days: &[(i32, u32, u32)]) -> HashSet<NaiveDate> {
        days.iter().map(|&(y, m, d)| date(y, m, d)).collect()
    }

    #[test]
    fn test_no_workouts_is_new() {
        let streak = calculate(&HashSet::new(), date(2024, 1, 12), 2);
        assert_eq!(streak.status, StreakStatus::New);
        assert_eq!(streak.count, 0);
    }

    #[test]
    fn test_workout_today_is_active() {
        let streak = calculate(&dates(&[(2024, 1, 12), (2024, 1, 11)]), date(2024, 1, 12), 2);
        assert_eq!(streak.status, StreakStatus::Active);
        assert_eq!(streak.count, 2);
    }

    #[test]
    fn test_one_day_gap_is_warning_low() {
        let streak = calculate(&dates(&[(2024, 1, 11)]), date(2024, 1, 12), 2);
        assert_eq!(streak.status, StreakStatus::WarningLow);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_two_day_gap_counts_prior_run() {
        // Three consecutive workout days, then two days off.
        let streak = calculate(&dates(&[(2024, 1, 10), (2024, 1, 9), (2024, 1, 8)]), date(2024, 1, 12), 2);
        assert_eq!(streak.status, StreakStatus::WarningHigh);
        assert_eq!(streak.count, 3);
    }

    #[test]
    fn test_long_gap_is_broken() {
        let streak = calculate(&dates(&[(2024, 1, 1)]), date(2024, 1, 10), 2);
        assert_eq!(streak.status, StreakStatus::Broken);
        assert_eq!(streak.count, 0);
    }

    #[test]
    fn test_three_day_gap_is_broken_regardless_of_history() {
        let streak = calculate(&dates(&[(2024, 1, 9), (2024, 1, 8), (2024, 1, 7)]), date(2024, 1, 12), 2);
        assert_eq!(streak.status, StreakStatus::Broken);
        assert_eq!(streak.count, 0);
    }

    #[test]
    fn test_gap_within_grace_survives() {
        // Two-day hole between workouts is tolerated at grace 2.
        let streak = calculate(&dates(&[(2024, 1, 10), (2024, 1, 7)]), date(2024, 1, 10), 2);
        assert_eq!(streak.status, StreakStatus::Active);
        assert_eq!(streak.count, 2);
    }

    #[test]
    fn test_gap_beyond_grace_stops_the_walk() {
        // Three-day hole exceeds grace 2; only the trailing day counts.
        let streak = calculate(&dates(&[(2024, 1, 10), (2024, 1, 6)]), date(2024, 1, 10), 2);
        assert_eq!(streak.status, StreakStatus::Active);
        assert_eq!(streak.count, 1);
    }

    #[test]
    fn test_walk_does_not_see_through_old_broken_gap() {
        let history = dates(&[(2024, 1, 1), (2024, 1, 2), (2024, 1, 3), (2024, 1, 8), (2024, 1, 9), (2024, 1, 10)]);
        let streak = calculate(&history, date(2024, 1, 10), 2);
        assert_eq!(streak.status, StreakStatus::Active);
        assert_eq!(streak.count, 3);
    }

    #[test]
    fn test_grace_period_defaults_without_plan() {
        assert_eq!(grace_period(None, 2), 2);
        assert_eq!(grace_period(Some(0), 2), 2);
    }

    #[test]
    fn test_grace_period_scales_and_clamps() {
        // Seven rotation days would give ceil(7/7) = 1, clamped up to 2.
        assert_eq!(grace_period(Some(7), 2), 2);
        assert_eq!(grace_period(Some(4), 2), 2);
        assert_eq!(grace_period(Some(3), 2), 3);
        // A 2-day split would give 4, clamped down to 3.
        assert_eq!(grace_period(Some(2), 2), 3);
        assert_eq!(grace_period(Some(1), 2), 3);
    }
}
