//! Conversion descriptors and their built-in self-tests.
//!
//! A conversion is registered with the host the same way a Signal K
//! `signalk-to-nmea2000` conversion is: a title, the option key that switches
//! it on, the kind of input it listens to, a callback and a list of literal
//! input/expected-output pairs.

use crate::error::ConversionError;
use crate::fieldset::FieldSet;
use serde::{Deserialize, Serialize};
use signalk_core::{Delta, MemoryStore, SignalKStore};

/// What a conversion listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "onDelta")]
    OnDelta,
}

/// A literal test case: deltas fed in order, field-sets expected out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTest {
    pub input: Vec<Delta>,
    pub expected: Vec<FieldSet>,
}

/// A Signal K → NMEA 2000 conversion.
pub trait Conversion {
    fn title(&self) -> String;

    /// Plugin option that switches this conversion on.
    fn option_key(&self) -> &'static str;

    fn source_type(&self) -> SourceType {
        SourceType::OnDelta
    }

    /// Convert one delta against the last-known state in `store`.
    ///
    /// `None` means the delta is of no interest to this conversion.
    fn convert(&self, store: &dyn SignalKStore, delta: &Delta) -> Option<Vec<FieldSet>>;

    fn tests(&self) -> Vec<ConversionTest> {
        Vec::new()
    }
}

/// Run every built-in test of `conversion` against a fresh store.
///
/// Each input delta is converted before it is applied to the store, as the
/// host does. Returns the number of cases that passed.
pub fn run_self_tests(
    conversion: &dyn Conversion,
    self_urn: &str,
) -> Result<usize, ConversionError> {
    let tests = conversion.tests();

    for (index, test) in tests.iter().enumerate() {
        let mut store = MemoryStore::new(self_urn);
        let mut actual = Vec::new();

        for delta in &test.input {
            if let Some(sets) = conversion.convert(&store, delta) {
                actual.extend(sets);
            }
            store.apply_delta(delta);
        }

        if actual != test.expected {
            return Err(ConversionError::SelfTest {
                title: conversion.title(),
                index,
                expected: serde_json::to_value(&test.expected)?,
                actual: serde_json::to_value(&actual)?,
            });
        }
        tracing::debug!("{}: self-test {} passed", conversion.title(), index);
    }

    Ok(tests.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fieldset::STATIC_PGN;
    use serde_json::json;

    /// Emits one field-set per delta carrying the number of values seen.
    struct Counting;

    impl Conversion for Counting {
        fn title(&self) -> String {
            "Counting".to_string()
        }

        fn option_key(&self) -> &'static str {
            "COUNTING"
        }

        fn convert(&self, _store: &dyn SignalKStore, delta: &Delta) -> Option<Vec<FieldSet>> {
            let count = delta.path_values().count();
            (count > 0).then(|| vec![FieldSet::new(STATIC_PGN).with("Count", count)])
        }

        fn tests(&self) -> Vec<ConversionTest> {
            vec![ConversionTest {
                input: vec![serde_json::from_value(json!({
                    "context": "vessels.urn:mrn:imo:mmsi:367301250",
                    "updates": [{"values": [{"path": "design.beam", "value": 7}]}]
                }))
                .unwrap()],
                expected: vec![FieldSet::new(STATIC_PGN).with("Count", 1)],
            }]
        }
    }

    #[test]
    fn test_passing_self_tests() {
        assert_eq!(run_self_tests(&Counting, "vessels.self").unwrap(), 1);
        assert_eq!(Counting.source_type(), SourceType::OnDelta);
    }

    #[test]
    fn test_mismatch_is_reported() {
        struct Broken;

        impl Conversion for Broken {
            fn title(&self) -> String {
                "Broken".to_string()
            }

            fn option_key(&self) -> &'static str {
                "BROKEN"
            }

            fn convert(&self, store: &dyn SignalKStore, delta: &Delta) -> Option<Vec<FieldSet>> {
                Counting.convert(store, delta)
            }

            fn tests(&self) -> Vec<ConversionTest> {
                let mut tests = Counting.tests();
                tests[0].expected.clear();
                tests
            }
        }

        let err = run_self_tests(&Broken, "vessels.self").unwrap_err();
        match err {
            ConversionError::SelfTest { index, expected, actual, .. } => {
                assert_eq!(index, 0);
                assert_eq!(expected, json!([]));
                assert_eq!(actual[0]["fields"]["Count"], 1);
            }
            other => panic!("Expected SelfTest, got {:?}", other),
        }
    }

    #[test]
    fn test_source_type_serialization() {
        assert_eq!(serde_json::to_value(SourceType::OnDelta).unwrap(), json!("onDelta"));
    }
}
