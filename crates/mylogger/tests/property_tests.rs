#![allow(clippy::unwrap_used, clippy::expect_used)]

use mylogger::{Fields, Format, Helper, Level, LogConfig, Logger, Overrides, Pipeline, TestCapture};
use proptest::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

fn json_logger(exclude: &[&str]) -> (Logger, TestCapture) {
    let config = LogConfig::default().apply(Overrides::new().format(Format::Json).exclude(exclude));
    let (pipeline, capture) = Pipeline::with_capture(config);
    (Logger::new("prop").with_pipeline(Arc::new(pipeline)), capture)
}

fn field_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "\\PC{0,24}".prop_map(Value::from),
    ]
}

fn field_set() -> impl Strategy<Value = BTreeMap<String, Value>> {
    // Prefixed so generated keys never collide with reserved or static keys
    prop::collection::btree_map("f_[a-z_]{1,10}", field_value(), 0..6)
}

fn to_fields(map: &BTreeMap<String, Value>) -> Fields {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

proptest! {
    #[test]
    fn prop_info_emits_one_line_with_message_and_fields(
        msg in "\\PC{0,40}",
        fields in field_set(),
    ) {
        let (logger, capture) = json_logger(&[]);
        logger.info(&msg, to_fields(&fields));

        let lines = capture.lines();
        prop_assert_eq!(lines.len(), 1);
        let output: Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(&output["event"], &Value::from(msg.as_str()));
        for (key, value) in &fields {
            prop_assert_eq!(&output[key.as_str()], value);
        }
    }

    #[test]
    fn prop_helper_tag_survives_caller_field(
        index in 0..Helper::ALL.len(),
        value in field_value(),
    ) {
        let helper = Helper::ALL[index];
        let Some(tag) = helper.tag() else {
            return Ok(());
        };
        let (logger, capture) = json_logger(&[]);
        let mut fields = Fields::new();
        fields.insert(tag.key.to_string(), value);

        logger.helper(helper, "tagged", fields);

        let output = &capture.json_lines()[0];
        prop_assert_eq!(&output[tag.key], &Value::from(tag.value));
    }

    #[test]
    fn prop_excluded_levels_never_render(
        excluded in prop::collection::btree_set(prop::sample::select(Level::ALL.to_vec()), 0..5),
        calls in prop::collection::vec(prop::sample::select(Level::ALL.to_vec()), 0..20),
    ) {
        let names: Vec<&str> = excluded.iter().map(Level::as_str).collect();
        let (logger, capture) = json_logger(&names);

        for (i, level) in calls.iter().enumerate() {
            logger.log(*level, format!("call-{i}"), Fields::new());
        }

        let expected: Vec<String> = calls
            .iter()
            .enumerate()
            .filter(|(_, level)| !excluded.contains(*level))
            .map(|(i, _)| format!("call-{i}"))
            .collect();
        let seen: Vec<String> = capture
            .json_lines()
            .iter()
            .map(|l| l["event"].as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(seen, expected);
    }
}
