#[cfg(test)]
mod tests {
    use ironlog::libs::config::{Config, TrackerConfig};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_yields_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.tracker.is_none());

        let tracker = config.tracker();
        assert_eq!(tracker.save_debounce_secs, 2);
        assert_eq!(tracker.poll_interval_ms, 1000);
        assert_eq!(tracker.default_grace_period_days, 2);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            tracker: Some(TrackerConfig {
                save_debounce_secs: 5,
                poll_interval_ms: 250,
                default_grace_period_days: 3,
            }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.tracker().save_debounce_secs, 5);
    }
}
