#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use ironlog::db::sessions::Sessions;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SessionTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SessionTestContext { _temp_dir: temp_dir }
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_create_and_fetch_active(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let check_in = at(2024, 1, 15, 10, 0, 0);
        let id = sessions.create(check_in, None, None).unwrap();

        let active = sessions.get_active().unwrap().unwrap();
        assert_eq!(active.id, id);
        assert_eq!(active.check_in_time, check_in);
        assert_eq!(active.session_date, check_in.date());
        assert!(!active.is_completed);
        assert!(active.active_timer_state.is_none());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_create_rejects_second_active(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        sessions.create(at(2024, 1, 15, 10, 0, 0), None, None).unwrap();
        assert!(sessions.create(at(2024, 1, 15, 11, 0, 0), None, None).is_err());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_timer_state_round_trip(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let id = sessions.create(at(2024, 1, 15, 10, 0, 0), None, None).unwrap();

        sessions.update_timer_state(id, Some(r#"{"isSetActive":true}"#), Some(42), 120, 60).unwrap();

        let session = sessions.get_by_id(id).unwrap().unwrap();
        assert_eq!(session.active_timer_state.as_deref(), Some(r#"{"isSetActive":true}"#));
        assert_eq!(session.current_exercise_id, Some(42));
        assert_eq!(session.total_set_duration, 120);
        assert_eq!(session.total_rest_duration, 60);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_finalize_clears_live_columns(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let id = sessions.create(at(2024, 1, 15, 10, 0, 0), None, None).unwrap();
        sessions.update_timer_state(id, Some("{}"), Some(42), 120, 60).unwrap();

        sessions.finalize(id, at(2024, 1, 15, 10, 47, 30), 47, 1500, 900).unwrap();

        let session = sessions.get_by_id(id).unwrap().unwrap();
        assert!(session.is_completed);
        assert_eq!(session.total_duration, Some(47));
        assert_eq!(session.total_set_duration, 1500);
        assert!(session.active_timer_state.is_none());
        assert!(session.current_exercise_id.is_none());
        assert!(sessions.get_active().unwrap().is_none());

        // A finished session frees the slot for a new one.
        assert!(sessions.create(at(2024, 1, 15, 18, 0, 0), None, None).is_ok());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_completed_dates_are_distinct(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();

        // Two sessions on the same day, one on another.
        let first = sessions.create(at(2024, 1, 15, 8, 0, 0), None, None).unwrap();
        sessions.finalize(first, at(2024, 1, 15, 9, 0, 0), 60, 0, 0).unwrap();
        let second = sessions.create(at(2024, 1, 15, 18, 0, 0), None, None).unwrap();
        sessions.finalize(second, at(2024, 1, 15, 19, 0, 0), 60, 0, 0).unwrap();
        let third = sessions.create(at(2024, 1, 17, 8, 0, 0), None, None).unwrap();
        sessions.finalize(third, at(2024, 1, 17, 9, 0, 0), 60, 0, 0).unwrap();

        // Still-active sessions do not count.
        sessions.create(at(2024, 1, 18, 8, 0, 0), None, None).unwrap();

        let dates = sessions.completed_dates().unwrap();
        assert_eq!(dates.len(), 2);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_fetch_completed_newest_first(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let first = sessions.create(at(2024, 1, 15, 8, 0, 0), None, None).unwrap();
        sessions.finalize(first, at(2024, 1, 15, 9, 0, 0), 60, 0, 0).unwrap();
        let second = sessions.create(at(2024, 1, 16, 8, 0, 0), None, None).unwrap();
        sessions.finalize(second, at(2024, 1, 16, 9, 0, 0), 60, 0, 0).unwrap();

        let completed = sessions.fetch_completed(10).unwrap();
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].id, second);
        assert_eq!(completed[1].id, first);

        let limited = sessions.fetch_completed(1).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_update_durations_and_notes(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let id = sessions.create(at(2024, 1, 15, 10, 0, 0), None, None).unwrap();
        sessions.update_timer_state(id, Some("{}"), None, 10, 5).unwrap();

        sessions.update_durations(id, 300, 150).unwrap();
        sessions.update_notes(id, "shoulder felt off").unwrap();

        let session = sessions.get_by_id(id).unwrap().unwrap();
        assert_eq!(session.total_set_duration, 300);
        assert_eq!(session.total_rest_duration, 150);
        assert_eq!(session.notes.as_deref(), Some("shoulder felt off"));
        // The blob is untouched by a durations-only update.
        assert_eq!(session.active_timer_state.as_deref(), Some("{}"));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_delete_session(_ctx: &mut SessionTestContext) {
        let mut sessions = Sessions::new().unwrap();
        let id = sessions.create(at(2024, 1, 15, 10, 0, 0), None, None).unwrap();
        sessions.delete(id).unwrap();
        assert!(sessions.get_by_id(id).unwrap().is_none());
        assert!(sessions.get_active().unwrap().is_none());
    }
}
