//! Property tests for field merging and level filtering.

use petal_log::{Fields, Flags, Level, MemoryWriter, State};
use proptest::prelude::*;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Step {
    Scope(String),
    Error(String),
    Fields(Vec<(String, i64)>),
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("scope".to_string()),
        Just("error".to_string()),
        "[a-d]{1,2}",
    ]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(Step::Scope),
        "[a-z ]{0,6}".prop_map(Step::Error),
        prop::collection::vec((key(), any::<i64>()), 0..4).prop_map(Step::Fields),
    ]
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Debug), Just(Level::Info), Just(Level::Discard)]
}

#[derive(Debug)]
struct Message(String);

impl std::fmt::Display for Message {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl std::error::Error for Message {}

proptest! {
    #[test]
    fn chained_fields_are_last_write_wins(steps in prop::collection::vec(step(), 0..8)) {
        let state = State::new();
        let mut logger = state.logger();
        let mut expected = Fields::new();

        for step in steps {
            let before = logger.fields().clone();
            let next = match step {
                Step::Scope(scope) => {
                    expected.insert("scope".to_string(), Value::from(scope.clone()));
                    logger.with_scope(&scope)
                },
                Step::Error(text) => {
                    expected.insert("error".to_string(), Value::from(text.clone()));
                    logger.with_error(&Message(text))
                },
                Step::Fields(pairs) => {
                    for (key, value) in &pairs {
                        expected.insert(key.clone(), Value::from(*value));
                    }
                    logger.with_fields(pairs)
                },
            };
            prop_assert_eq!(logger.fields(), &before);
            logger = next;
        }

        prop_assert_eq!(logger.fields(), &expected);
    }

    #[test]
    fn events_pass_iff_level_reaches_threshold(threshold in level(), candidate in level()) {
        prop_assume!(candidate != Level::Discard);

        let internal = Arc::new(MemoryWriter::new());
        let external = Arc::new(MemoryWriter::new());
        let state = State::new();
        state
            .with_output(None)
            .with_flags(Flags::empty())
            .with_internal(internal.clone())
            .with_external(Some(external.clone()))
            .with_level(threshold);

        let logger = state.with_field("k", 1);
        match candidate {
            Level::Debug => logger.debug("m"),
            _ => logger.info("m"),
        }

        let delivered = threshold != Level::Discard && candidate >= threshold;
        prop_assert_eq!(internal.events().len(), usize::from(delivered));
        prop_assert_eq!(internal.events(), external.events());
    }
}
