#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use ironlog::libs::progress::{ExerciseProgress, SetRecord};
    use ironlog::libs::timer::TimerState;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_open_and_fold_banks_elapsed_seconds() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        assert!(timer.is_set_active);
        assert_eq!(timer.total_set_seconds(at(10, 0, 45)), 45);

        timer.fold_set(at(10, 0, 45));
        assert!(!timer.is_set_active);
        assert_eq!(timer.paused_set_seconds, 45);
        // Banked total no longer moves with the clock.
        assert_eq!(timer.total_set_seconds(at(10, 5, 0)), 45);
    }

    #[test]
    fn test_fold_is_idempotent() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        timer.fold_set(at(10, 1, 0));
        timer.fold_set(at(10, 2, 0));
        timer.fold_set(at(10, 3, 0));
        assert_eq!(timer.paused_set_seconds, 60);

        timer.open_rest(at(10, 3, 0));
        timer.fold_rest(at(10, 3, 30));
        timer.fold_rest(at(10, 4, 0));
        assert_eq!(timer.paused_rest_seconds, 30);
    }

    #[test]
    fn test_reopen_accumulates_across_runs() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        timer.fold_set(at(10, 1, 0));
        timer.open_set(at(10, 5, 0));
        assert_eq!(timer.total_set_seconds(at(10, 5, 30)), 90);
    }

    #[test]
    fn test_individual_timer_tracks_current_run_only() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        timer.fold_set(at(10, 1, 0));
        timer.open_set(at(10, 5, 0));

        // Cumulative carries the bank; the individual timer restarts.
        assert_eq!(timer.total_set_seconds(at(10, 5, 20)), 80);
        assert_eq!(timer.current_set_elapsed(at(10, 5, 20)), Some(20));

        timer.fold_set(at(10, 5, 20));
        assert_eq!(timer.current_set_elapsed(at(10, 5, 21)), None);
    }

    #[test]
    fn test_restore_does_not_double_count() {
        let mut timer = TimerState::default();
        timer.paused_set_seconds = 100;
        timer.open_set(at(10, 0, 0));

        // Serialize mid-run, restore, read 5 seconds later.
        let blob = timer.to_json().unwrap();
        let restored = TimerState::from_json(&blob).unwrap();
        assert_eq!(restored.total_set_seconds(at(10, 0, 5)), 105);
    }

    #[test]
    fn test_blob_uses_stored_field_names() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        timer.paused_rest_seconds = 30;

        let blob = timer.to_json().unwrap();
        assert!(blob.contains("\"isSetActive\":true"));
        assert!(blob.contains("\"isResting\":false"));
        assert!(blob.contains("\"cumulativeSetStartTime\""));
        assert!(blob.contains("\"pausedRestSeconds\":30"));
        assert!(blob.contains("\"exerciseProgress\""));
    }

    #[test]
    fn test_blob_round_trips_progress_map() {
        let mut timer = TimerState::default();
        let mut progress = ExerciseProgress::opened_at(at(10, 0, 0));
        progress.record_set(SetRecord {
            id: Some(7),
            set_number: 1,
            reps: 10,
            weight: Some(60.0),
            set_duration: Some(45),
            rest_duration: None,
            completed_at: Some(at(10, 1, 0)),
        });
        progress.completed = true;
        timer.exercise_progress.insert(42, progress);

        let restored = TimerState::from_json(&timer.to_json().unwrap()).unwrap();
        assert_eq!(restored, timer);
        let entry = &restored.exercise_progress[&42];
        assert!(entry.completed);
        assert_eq!(entry.last_set_id, Some(7));
        assert_eq!(entry.sets[0].weight, Some(60.0));
    }

    #[test]
    fn test_unknown_blob_fields_are_ignored() {
        let blob = r#"{"isSetActive":false,"isResting":true,"restStartTime":"2024-01-15T10:00:00","pausedRestSeconds":12,"legacyField":true}"#;
        let timer = TimerState::from_json(blob).unwrap();
        assert!(timer.is_resting);
        assert_eq!(timer.paused_rest_seconds, 12);
        assert_eq!(timer.current_rest_elapsed(at(10, 0, 8)), Some(8));
    }

    #[test]
    fn test_clock_skew_clamps_to_zero() {
        let mut timer = TimerState::default();
        timer.open_set(at(10, 0, 0));
        // A reading earlier than the start must not go negative.
        assert_eq!(timer.total_set_seconds(at(9, 59, 0)), 0);
        timer.fold_set(at(10, 0, 0) - Duration::seconds(30));
        assert_eq!(timer.paused_set_seconds, 0);
    }
}
