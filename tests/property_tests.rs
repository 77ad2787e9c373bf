//! Property-based tests for chalk_log using proptest

use chalk_log::core::{
    classify, render_value, Ambient, FieldMap, Layout, LayoutConfig, LogLevel, LogValue,
    OutputFormat,
};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn ambient() -> Ambient {
    let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
    Ambient::new(LogLevel::Info, time, 4242)
}

fn leaf_value() -> impl Strategy<Value = LogValue> {
    prop_oneof![
        Just(LogValue::Nil),
        any::<bool>().prop_map(LogValue::Bool),
        any::<i64>().prop_map(LogValue::Int),
        any::<f64>().prop_map(LogValue::Float),
        ".*".prop_map(LogValue::Text),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(LogValue::Bytes),
    ]
}

fn value() -> impl Strategy<Value = LogValue> {
    leaf_value().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(LogValue::List),
            proptest::collection::vec(("[a-z_]{1,8}", inner), 0..4)
                .prop_map(|entries| LogValue::Map(entries.into_iter().collect::<FieldMap>())),
        ]
    })
}

fn quiet(format: OutputFormat) -> LayoutConfig {
    LayoutConfig::new()
        .with_output_format(format)
        .with_fault_reports(false)
}

// ============================================================================
// Output Contract
// ============================================================================

proptest! {
    /// Every call ends in exactly one newline, whatever the arguments
    #[test]
    fn test_output_ends_in_one_newline(
        args in proptest::collection::vec(value(), 0..5),
        structured in any::<bool>(),
        tagging_disabled in any::<bool>(),
    ) {
        let format = if structured { OutputFormat::Structured } else { OutputFormat::TaggedText };
        let layout = Layout::new(quiet(format).with_tagging_disabled(tagging_disabled));
        let out = layout.format(&args, &ambient()).unwrap();

        prop_assert!(out.ends_with('\n'), "missing newline: {:?}", out);
        prop_assert!(!out.ends_with("\n\n"), "extra newline: {:?}", out);
    }

    /// Every tagged line carries the prefix, including backtrace lines
    #[test]
    fn test_every_line_is_tagged(
        message in ".*",
        frames in proptest::collection::vec("[a-z:0-9 ]{0,12}", 0..4),
    ) {
        let error = chalk_log::CapturedError::new("StandardError", "msg").with_backtrace(frames);
        let args = vec![LogValue::from(message), LogValue::from(error)];
        let layout = Layout::new(quiet(OutputFormat::TaggedText));
        let out = layout.format(&args, &ambient().with_action_id("act")).unwrap();

        for line in out.lines() {
            prop_assert!(line.starts_with("[4242|act] "), "untagged line {:?} in {:?}", line, out);
        }
    }

    /// Structured output is a single parseable JSON line
    #[test]
    fn test_structured_is_single_json_line(message in ".*", n in any::<i64>()) {
        let mut info = FieldMap::new();
        info.insert("n", n);
        let args = vec![LogValue::from(message.clone()), LogValue::from(info)];
        let layout = Layout::new(quiet(OutputFormat::Structured));
        let out = layout.format(&args, &ambient()).unwrap();

        prop_assert_eq!(out.matches('\n').count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(parsed["message"].as_str(), Some(message.as_str()));
        prop_assert_eq!(parsed["info"]["n"].as_i64(), Some(n));
    }
}

// ============================================================================
// Renderer
// ============================================================================

proptest! {
    /// Rendering the same value twice yields identical output
    #[test]
    fn test_rendering_is_deterministic(v in value()) {
        prop_assert_eq!(render_value(&v), render_value(&v));
    }

    /// Only the inspect fallback is flagged, and only for unencodable values
    #[test]
    fn test_valid_utf8_text_never_fails(s in ".*") {
        let rendered = render_value(&LogValue::Text(s));
        prop_assert!(!rendered.json_failed);
    }

    /// Simple capitalized words lose their quotes, nothing else does
    #[test]
    fn test_capitalized_words_are_bare(word in "[A-Z][A-Za-z0-9_]{0,10}") {
        prop_assert_eq!(render_value(&LogValue::Text(word.clone())).text, word);
    }

    #[test]
    fn test_lowercase_words_keep_quotes(word in "[a-z][A-Za-z0-9_]{0,10}") {
        prop_assert_eq!(render_value(&LogValue::Text(word.clone())).text, format!("\"{}\"", word));
    }
}

// ============================================================================
// Classifier
// ============================================================================

proptest! {
    /// Message followed by info always classifies into exactly those fields
    #[test]
    fn test_message_and_info_classify(message in ".*", key in "[a-z]{1,6}", v in any::<i64>()) {
        let mut info = FieldMap::new();
        info.insert(key, v);
        let args = vec![LogValue::from(message.clone()), LogValue::from(info.clone())];

        let classified = classify(&args, None).unwrap();
        prop_assert_eq!(classified.message, Some(message));
        prop_assert_eq!(classified.info, Some(info));
        prop_assert!(classified.error.is_none());
        prop_assert!(classified.meta.is_none());
    }

    /// Trailing nils and booleans never change the result
    #[test]
    fn test_trailing_ignorables(message in ".*", trailing in proptest::collection::vec(
        prop_oneof![Just(LogValue::Nil), any::<bool>().prop_map(LogValue::Bool)], 0..4)
    ) {
        let mut args = vec![LogValue::from(message.clone())];
        args.extend(trailing);

        let classified = classify(&args, None).unwrap();
        prop_assert_eq!(classified.message, Some(message));
    }

    /// A leading integer is never consumed
    #[test]
    fn test_leading_integer_is_leftover(n in any::<i64>(), message in ".*") {
        let args = vec![LogValue::Int(n), LogValue::from(message)];
        let err = classify(&args, None).unwrap_err();
        prop_assert_eq!(err.to_string(), format!("Invalid leftover arguments: [{}]", n));
    }
}
