//! Field-sets: the pre-encoding output of the conversion.
//!
//! A field-set is a PGN-tagged map from canboat-style field names to scalar
//! JSON values. Fields whose source value is unknown are left out so the
//! downstream encoder can substitute its own "not available" sentinel.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// PGN 129038: AIS Class A position report.
pub const POSITION_PGN: u32 = 129038;

/// PGN 129794: AIS Class A static and voyage related data.
pub const STATIC_PGN: u32 = 129794;

/// PGN 129041: AIS aids to navigation (AtoN) report.
pub const ATON_PGN: u32 = 129041;

/// Default NMEA 2000 priority for AIS messages.
pub const DEFAULT_PRIORITY: u8 = 2;

/// Global (broadcast) destination address.
pub const BROADCAST_ADDRESS: u8 = 255;

/// One output record, ready to hand to an NMEA 2000 encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
    #[serde(default = "default_priority")]
    pub prio: u8,

    pub pgn: u32,

    #[serde(default = "default_destination")]
    pub dst: u8,

    pub fields: Map<String, Value>,
}

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

fn default_destination() -> u8 {
    BROADCAST_ADDRESS
}

impl FieldSet {
    /// Create an empty field-set for `pgn` with default priority and broadcast destination.
    pub fn new(pgn: u32) -> Self {
        Self {
            prio: DEFAULT_PRIORITY,
            pgn,
            dst: BROADCAST_ADDRESS,
            fields: Map::new(),
        }
    }

    /// Set a field.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Set a field only when a value is known.
    pub fn with_opt<V: Into<Value>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Get a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Render an `f64` as a JSON number, keeping integral values as integers.
///
/// Derived dimensions (`7 / 2 + 1 = 4.5`, `9 * 10 = 90`) then compare equal to
/// the literals a caller would write for them.
pub(crate) fn number(value: f64) -> Option<Value> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Some(Value::from(value as i64));
    }
    serde_json::Number::from_f64(value).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_are_omitted() {
        let set = FieldSet::new(STATIC_PGN)
            .with("Message ID", 5)
            .with_opt("Callsign", None::<&str>)
            .with_opt("Name", Some("SOME BOAT"));

        assert_eq!(set.get("Message ID"), Some(&json!(5)));
        assert_eq!(set.get("Name"), Some(&json!("SOME BOAT")));
        assert!(set.get("Callsign").is_none());
        assert_eq!(set.fields.len(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let set = FieldSet::new(ATON_PGN).with("AtoN Name", "78A");
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            json!({"prio": 2, "pgn": 129041, "dst": 255, "fields": {"AtoN Name": "78A"}})
        );

        let parsed: FieldSet =
            serde_json::from_value(json!({"pgn": 129041, "fields": {"AtoN Name": "78A"}})).unwrap();
        assert_eq!(parsed, set);
    }

    #[test]
    fn test_number_keeps_integers() {
        assert_eq!(number(3.5), Some(json!(3.5)));
        assert_eq!(number(90.0), Some(json!(90)));
        assert_eq!(number(-4.0), Some(json!(-4)));
        assert_eq!(number(f64::NAN), None);
    }
}
