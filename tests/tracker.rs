#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use ironlog::db::plans::{PlanExercise, Plans};
    use ironlog::db::sessions::Sessions;
    use ironlog::db::sets::Sets;
    use ironlog::libs::summary::{ActiveSessionSummary, NullSink, SessionStatus, SummarySink};
    use ironlog::libs::tracker::{parse_weight, SelectOutcome, SessionTracker};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RecordingSink(Rc<RefCell<Vec<SessionStatus>>>);

    impl SummarySink for RecordingSink {
        fn push(&mut self, summary: &ActiveSessionSummary) {
            self.0.borrow_mut().push(summary.status);
        }
    }

    struct TrackerTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for TrackerTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TrackerTestContext { _temp_dir: temp_dir }
        }
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    /// Push day with two exercises, activated.
    fn seed_plan() -> (i64, i64, Vec<PlanExercise>) {
        let mut plans = Plans::new().unwrap();
        let plan_id = plans.create("PPL", None).unwrap();
        let day_id = plans.add_day(plan_id, "Push", 1).unwrap();
        plans.add_exercise(day_id, "Bench Press", "Chest", 1, 3, "8-12").unwrap();
        plans.add_exercise(day_id, "Overhead Press", "Shoulders", 2, 3, "8-12").unwrap();
        plans.set_active(plan_id).unwrap();
        let exercises = plans.day_exercises(day_id).unwrap();
        (plan_id, day_id, exercises)
    }

    fn begin_tracker() -> (SessionTracker, Vec<PlanExercise>) {
        let (plan_id, day_id, exercises) = seed_plan();
        let tracker = SessionTracker::begin(at(10, 0, 0), Some(plan_id), Some(day_id), exercises.clone(), 2, Box::new(NullSink)).unwrap();
        (tracker, exercises)
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_second_session_is_rejected(_ctx: &mut TrackerTestContext) {
        let (tracker, exercises) = begin_tracker();
        let result = SessionTracker::begin(at(10, 5, 0), None, None, exercises, 2, Box::new(NullSink));
        assert!(result.is_err());
        drop(tracker);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_set_numbering_is_sequential(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        let bench = exercises[0].exercise_id;
        tracker.select_exercise(bench, at(10, 0, 30)).unwrap();

        let mut clock = at(10, 1, 0);
        for _ in 0..3 {
            tracker.start_set(clock).unwrap();
            clock += chrono::Duration::seconds(40);
            tracker.complete_set(clock).unwrap();
            clock += chrono::Duration::seconds(10);
            tracker.commit_set(10, Some(60.0), clock).unwrap();
            clock += chrono::Duration::seconds(60);
        }

        let rows = Sets::new().unwrap().fetch_for_session(tracker.session_id()).unwrap();
        let numbers: Vec<i64> = rows.iter().map(|r| r.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_rest_duration_is_patched_when_next_set_starts(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();

        tracker.start_set(at(10, 1, 0)).unwrap();
        // Rest opens the moment the set stops, before reps are confirmed.
        let pending = tracker.complete_set(at(10, 1, 45)).unwrap();
        assert_eq!(pending.set_duration, 45);
        tracker.commit_set(10, None, at(10, 1, 55)).unwrap();

        // Next set starts 90 seconds after the rest began.
        tracker.start_set(at(10, 3, 15)).unwrap();

        let rows = Sets::new().unwrap().fetch_for_session(tracker.session_id()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].set_duration, Some(45));
        assert_eq!(rows[0].rest_duration, Some(90));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_set_and_rest_are_mutually_exclusive(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();

        let check = |t: &SessionTracker| {
            assert!(!(t.timer().is_set_active && t.timer().is_resting));
        };

        check(&tracker);
        tracker.start_set(at(10, 1, 0)).unwrap();
        check(&tracker);
        tracker.complete_set(at(10, 1, 40)).unwrap();
        check(&tracker);
        tracker.commit_set(8, None, at(10, 1, 50)).unwrap();
        check(&tracker);
        tracker.start_set(at(10, 3, 0)).unwrap();
        check(&tracker);
        tracker.complete_exercise(false, at(10, 4, 0));
        check(&tracker);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_duplicate_completion_does_not_change_accumulators(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_exercise(true, at(10, 2, 0));

        let set_bank = tracker.timer().paused_set_seconds;
        let rest_bank = tracker.timer().paused_rest_seconds;

        // Pointer is already null; the second completion is a no-op.
        assert!(tracker.complete_exercise(true, at(10, 5, 0)).is_none());
        assert_eq!(tracker.timer().paused_set_seconds, set_bank);
        assert_eq!(tracker.timer().paused_rest_seconds, rest_bank);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_complete_set_without_running_set_is_noop(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        assert!(tracker.complete_set(at(10, 1, 0)).is_none());
        assert!(!tracker.timer().is_resting);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_invalid_input_keeps_pending_set(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_set(at(10, 1, 40)).unwrap();

        assert!(tracker.commit_set(0, None, at(10, 1, 50)).is_err());
        assert!(tracker.commit_set(10, Some(-5.0), at(10, 1, 50)).is_err());
        assert!(tracker.pending_set().is_some());

        // Retry with valid input succeeds using the same frozen duration.
        let record = tracker.commit_set(10, Some(60.0), at(10, 1, 55)).unwrap();
        assert_eq!(record.set_duration, Some(40));
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_finish_floors_to_whole_minutes(_ctx: &mut TrackerTestContext) {
        let (mut tracker, _) = begin_tracker();
        assert_eq!(tracker.check_in_time(), at(10, 0, 0));
        // Check-in 10:00:00, check-out 10:47:30 is 47 minutes, not 48.
        let minutes = tracker.finish(at(10, 47, 30)).unwrap();
        assert!(!tracker.is_dirty());
        assert_eq!(minutes, 47);

        let session = Sessions::new().unwrap().get_by_id(tracker.session_id()).unwrap().unwrap();
        assert!(session.is_completed);
        assert_eq!(session.total_duration, Some(47));
        assert!(session.active_timer_state.is_none());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_cancel_deletes_session_and_sets(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_set(at(10, 1, 40)).unwrap();
        tracker.commit_set(10, None, at(10, 1, 50)).unwrap();

        tracker.cancel().unwrap();

        let mut sessions = Sessions::new().unwrap();
        assert!(sessions.get_by_id(tracker.session_id()).unwrap().is_none());
        let rows = Sets::new().unwrap().fetch_for_session(tracker.session_id()).unwrap();
        assert!(rows.is_empty());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_resume_restores_running_timer_without_folding(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        let bench = exercises[0].exercise_id;
        tracker.select_exercise(bench, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_set(at(10, 1, 40)).unwrap();
        tracker.commit_set(10, Some(60.0), at(10, 1, 50)).unwrap();
        tracker.start_set(at(10, 3, 0)).unwrap();
        tracker.flush(at(10, 3, 0));
        drop(tracker);

        let resumed = SessionTracker::resume(exercises, 2, Box::new(NullSink)).unwrap();
        assert!(resumed.timer().is_set_active);
        assert_eq!(resumed.timer().paused_set_seconds, 40);
        // The open run keeps accruing from its saved start timestamp.
        assert_eq!(resumed.timer().total_set_seconds(at(10, 3, 25)), 65);

        // Logged sets come back from their rows, not the blob.
        let progress = resumed.progress(bench).unwrap();
        assert_eq!(progress.completed_sets(), 1);
        assert_eq!(progress.sets[0].reps, 10);
        assert_eq!(resumed.current_exercise().unwrap().exercise_id, bench);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_corrupt_blob_falls_back_to_idle(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_set(at(10, 1, 40)).unwrap();
        tracker.commit_set(10, None, at(10, 1, 50)).unwrap();
        tracker.flush(at(10, 1, 50));

        let session_id = tracker.session_id();
        Sessions::new()
            .unwrap()
            .update_timer_state(session_id, Some("{not json"), None, 0, 0)
            .unwrap();
        drop(tracker);

        let resumed = SessionTracker::resume(exercises, 2, Box::new(NullSink)).unwrap();
        assert!(!resumed.timer().is_running());
        assert_eq!(resumed.timer().paused_set_seconds, 0);
        // Raw logged sets stay visible even though the blob was lost.
        let progress = resumed.timer().exercise_progress.values().next().unwrap();
        assert_eq!(progress.completed_sets(), 1);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_fallback_seeds_banked_time_from_duration_columns(_ctx: &mut TrackerTestContext) {
        let (tracker, exercises) = begin_tracker();
        let session_id = tracker.session_id();
        Sessions::new()
            .unwrap()
            .update_timer_state(session_id, Some("{not json"), None, 120, 30)
            .unwrap();
        drop(tracker);

        // The reconciled totals survive a lost blob as paused bases.
        let resumed = SessionTracker::resume(exercises, 2, Box::new(NullSink)).unwrap();
        assert!(!resumed.timer().is_running());
        assert_eq!(resumed.timer().paused_set_seconds, 120);
        assert_eq!(resumed.timer().paused_rest_seconds, 30);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_orphan_timer_is_adopted_on_selection(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        let bench = exercises[0].exercise_id;
        tracker.select_exercise(bench, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.flush(at(10, 1, 0));

        // Simulate a restore that lost the exercise pointer but kept the
        // running timer blob.
        let session_id = tracker.session_id();
        let mut sessions = Sessions::new().unwrap();
        let blob = sessions.get_by_id(session_id).unwrap().unwrap().active_timer_state.unwrap();
        sessions.update_timer_state(session_id, Some(&blob), None, 0, 0).unwrap();
        drop(tracker);

        let mut resumed = SessionTracker::resume(exercises, 2, Box::new(NullSink)).unwrap();
        assert!(resumed.current_exercise().is_none());
        assert!(resumed.timer().is_set_active);

        let outcome = resumed.select_exercise(bench, at(10, 2, 0)).unwrap();
        assert_eq!(outcome, SelectOutcome::Adopted);
        // The open run survived adoption intact.
        assert!(resumed.timer().is_set_active);
        assert_eq!(resumed.timer().total_set_seconds(at(10, 2, 0)), 60);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_summary_status_mirrors_timer_state(_ctx: &mut TrackerTestContext) {
        let (plan_id, day_id, exercises) = seed_plan();
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let mut tracker = SessionTracker::begin(
            at(10, 0, 0),
            Some(plan_id),
            Some(day_id),
            exercises.clone(),
            2,
            Box::new(RecordingSink(statuses.clone())),
        )
        .unwrap();

        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.complete_set(at(10, 1, 40)).unwrap();
        tracker.commit_set(10, None, at(10, 1, 50)).unwrap();
        tracker.complete_exercise(true, at(10, 2, 0));

        assert_eq!(
            *statuses.borrow(),
            vec![
                SessionStatus::Paused,  // checked in, no timers yet
                SessionStatus::Paused,  // exercise selected, still idle
                SessionStatus::Working, // set running
                SessionStatus::Resting, // set stopped, rest running
                SessionStatus::Paused,  // exercise closed out
            ]
        );

        // A resume with idle timers reports paused too.
        tracker.flush(at(10, 2, 0));
        drop(tracker);
        let resumed_statuses = Rc::new(RefCell::new(Vec::new()));
        let _resumed = SessionTracker::resume(exercises, 2, Box::new(RecordingSink(resumed_statuses.clone()))).unwrap();
        assert_eq!(*resumed_statuses.borrow(), vec![SessionStatus::Paused]);
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_fresh_resume_sees_writes_from_another_handle(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        tracker.flush(at(10, 0, 0));

        // First snapshot: nothing running yet.
        let first = SessionTracker::resume(exercises.clone(), 2, Box::new(NullSink)).unwrap();
        assert!(!first.timer().is_running());

        // Another handle starts a set and flushes, as a second process would.
        tracker.select_exercise(exercises[0].exercise_id, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        tracker.flush(at(10, 1, 0));

        // Only a fresh resume picks up the new state; the old snapshot is stale.
        let second = SessionTracker::resume(exercises.clone(), 2, Box::new(NullSink)).unwrap();
        assert!(second.timer().is_set_active);
        assert_eq!(second.current_exercise().unwrap().exercise_id, exercises[0].exercise_id);
        assert!(!first.timer().is_running());
    }

    #[test]
    fn test_weight_entry_parsing() {
        assert_eq!(parse_weight("").unwrap(), None);
        assert_eq!(parse_weight("  ").unwrap(), None);
        assert_eq!(parse_weight("60.5").unwrap(), Some(60.5));
        assert_eq!(parse_weight(" 80 ").unwrap(), Some(80.0));
        assert!(parse_weight("6o").is_err());
        assert!(parse_weight("-5").is_err());
        assert!(parse_weight("inf").is_err());
    }

    #[test_context(TrackerTestContext)]
    #[test]
    fn test_switching_exercises_folds_timers(_ctx: &mut TrackerTestContext) {
        let (mut tracker, exercises) = begin_tracker();
        let bench = exercises[0].exercise_id;
        let ohp = exercises[1].exercise_id;

        tracker.select_exercise(bench, at(10, 0, 30)).unwrap();
        tracker.start_set(at(10, 1, 0)).unwrap();
        let outcome = tracker.select_exercise(ohp, at(10, 1, 50)).unwrap();
        assert_eq!(outcome, SelectOutcome::Switched);

        assert!(!tracker.timer().is_running());
        assert_eq!(tracker.timer().paused_set_seconds, 50);
        assert_eq!(tracker.current_exercise().unwrap().exercise_id, ohp);
    }
}
