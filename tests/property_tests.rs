//! Property-based tests for rust_log_facade using proptest

use proptest::prelude::*;
use rust_log_facade::prelude::*;
use rust_log_facade::derive_error_filename;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::DPanic),
        Just(Level::Panic),
        Just(Level::Fatal),
    ]
}

/// Levels that never unwind or exit
fn quiet_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level in any letter case
    #[test]
    fn test_level_parse_case_insensitive(level in any_level(), mask in prop::collection::vec(any::<bool>(), 6)) {
        let mixed: String = level
            .as_str()
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let parsed: Level = mixed.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// Ordering agrees with the numeric representation
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as i8) < (b as i8));
        prop_assert!(a < Level::Invalid);
    }

    /// Unknown text never parses and never moves the threshold
    #[test]
    fn test_bogus_level_text_rejected(text in "[a-z]{1,10}") {
        prop_assume!(!["debug", "info", "warn", "warning", "error", "dpanic", "panic", "fatal"]
            .contains(&text.as_str()));

        let level = AtomicLevel::new(Level::Warn);
        prop_assert!(level.set_level_from_text(&text).is_err());
        prop_assert_eq!(level.level(), Level::Warn);
    }

    /// The threshold predicate and the fixed predicate agree with `>=`
    #[test]
    fn test_filters_gate_by_order(threshold in any_level(), record in any_level()) {
        let shared = AtomicLevel::new(threshold);
        prop_assert_eq!(LevelFilter::Threshold(shared).enabled(record), record >= threshold);
        prop_assert_eq!(LevelFilter::AtLeast(Level::Error).enabled(record), record >= Level::Error);
    }
}

// ============================================================================
// File Name Tests
// ============================================================================

proptest! {
    /// `-error` lands right before the last extension
    #[test]
    fn test_error_filename_with_extension(stem in "[a-z][a-z.]{0,12}", ext in "[a-z]{1,4}") {
        let derived = derive_error_filename(&format!("{}.{}", stem, ext));
        prop_assert_eq!(derived, format!("{}-error.{}", stem, ext));
    }

    /// Without an extension `-error` is appended
    #[test]
    fn test_error_filename_without_extension(dir in "[a-z.]{1,8}", name in "[a-z]{1,12}") {
        let derived = derive_error_filename(&format!("{}/{}", dir, name));
        prop_assert_eq!(derived, format!("{}/{}-error", dir, name));
    }
}

// ============================================================================
// Emission Tests
// ============================================================================

proptest! {
    /// A record is written iff its level clears the threshold at emission time
    #[test]
    fn test_emission_respects_latest_threshold(
        steps in prop::collection::vec((quiet_level(), quiet_level()), 1..20)
    ) {
        let log = Facade::new();
        let console = BufferAppender::new();
        Config::new().build_with_console(&log, console.clone()).unwrap();

        let mut expected = 0;
        for (threshold, record) in steps {
            log.set_level(threshold);
            log.log(record, "sample");
            if record >= threshold {
                expected += 1;
            }
        }
        prop_assert_eq!(console.lines().len(), expected);
    }

    /// Arbitrary messages and field values always encode as one JSON line
    #[test]
    fn test_any_message_is_one_json_line(message in ".*", value in any::<i64>(), text in ".*") {
        let log = Facade::new();
        let console = BufferAppender::new();
        Config::new().build_with_console(&log, console.clone()).unwrap();

        log.with("n", value).with("text", text.as_str()).info(&message);

        let lines = console.lines();
        prop_assert_eq!(lines.len(), 1);
        let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(json["msg"].as_str(), Some(message.as_str()));
        prop_assert_eq!(json["n"].as_i64(), Some(value));
        prop_assert_eq!(json["text"].as_str(), Some(text.as_str()));
    }
}
