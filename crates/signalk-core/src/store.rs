//! SignalK data store.
//!
//! The store maintains the last-known state of every context (vessels, aids
//! to navigation, ...) and provides methods for querying and updating it.

use crate::model::{Delta, PathValue, Update, SELF_CONTEXT};
use crate::path::Path;
use serde_json::Value;

/// Trait for SignalK data storage implementations.
pub trait SignalKStore: Send + Sync {
    /// Apply a delta to the store, merging values into the tree.
    fn apply_delta(&mut self, delta: &Delta);

    /// Get value at an absolute path (e.g., "vessels.self.navigation.position").
    fn get_path(&self, path: &str) -> Option<Value>;

    /// Get the full state for a context (e.g., "atons.urn:mrn:imo:mmsi:993672085").
    fn get_context(&self, context: &str) -> Option<Value>;

    /// Get the self vessel identifier.
    fn self_urn(&self) -> &str;

    /// True if `context` names the self vessel.
    fn is_self_context(&self, context: &str) -> bool {
        context == SELF_CONTEXT || context == self.self_urn()
    }

    /// Get the full data model as JSON.
    fn full_model(&self) -> &Value;
}

/// In-memory SignalK store implementation.
///
/// Stores the full SignalK tree as a nested JSON structure. Values written at
/// a path are wrapped as `{"value", "$source", "timestamp"}`; values written at
/// the empty path are merged bare into the context root.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// The full SignalK data tree
    data: Value,
    /// The self vessel URN
    self_urn: String,
}

impl MemoryStore {
    /// Create a new empty store with the given self vessel URN.
    ///
    /// The self_urn should be in the format "vessels.urn:mrn:signalk:uuid:..."
    /// as Signal K servers report it.
    pub fn new(self_urn: &str) -> Self {
        let urn_key = self_urn.strip_prefix("vessels.").unwrap_or(self_urn);

        let data = serde_json::json!({
            "version": "1.7.0",
            "self": self_urn,
            "vessels": {
                urn_key: {}
            },
            "sources": {}
        });

        Self {
            data,
            self_urn: self_urn.to_string(),
        }
    }

    /// Resolve "vessels.self" to the actual vessel URN.
    fn resolve_context(&self, context: &str) -> String {
        if context == SELF_CONTEXT {
            self.self_urn.clone()
        } else {
            context.to_string()
        }
    }

    /// Get the object at `path`, creating intermediate objects as needed.
    fn ensure_object(&mut self, path: &str) -> Option<&mut serde_json::Map<String, Value>> {
        let mut current = &mut self.data;

        for segment in Path::new(path).segments() {
            let map = current.as_object_mut()?;
            current = map
                .entry(segment.clone())
                .or_insert_with(|| serde_json::json!({}));
        }

        if !current.is_object() {
            *current = serde_json::json!({});
        }
        current.as_object_mut()
    }

    /// Set a value at a path below `base_path`.
    fn set_path_value(&mut self, base_path: &str, path: &str, value: Value) {
        let target = Path::new(path);
        let Some((leaf, parents)) = target.segments().split_last() else {
            return;
        };

        let parent_path = if parents.is_empty() {
            base_path.to_string()
        } else {
            format!("{}.{}", base_path, parents.join("."))
        };

        if let Some(map) = self.ensure_object(&parent_path) {
            map.insert(leaf.clone(), value);
        }
    }

    /// Merge the keys of an empty-path value into the context root.
    fn merge_root_value(&mut self, context: &str, value: &Value) {
        let Value::Object(fields) = value else {
            return;
        };
        if let Some(map) = self.ensure_object(context) {
            for (key, field) in fields {
                map.insert(key.clone(), field.clone());
            }
        }
    }

    fn apply_path_value(&mut self, context: &str, update: &Update, pv: &PathValue) {
        if pv.path.is_empty() {
            self.merge_root_value(context, &pv.value);
            return;
        }

        let value_obj = serde_json::json!({
            "value": pv.value,
            "$source": update.source_ref,
            "timestamp": update.timestamp
        });
        self.set_path_value(context, &pv.path, value_obj);
    }
}

impl SignalKStore for MemoryStore {
    fn apply_delta(&mut self, delta: &Delta) {
        let context = self.resolve_context(delta.context_or_self());

        for update in &delta.updates {
            for pv in &update.values {
                self.apply_path_value(&context, update, pv);
            }
        }
    }

    fn get_path(&self, path: &str) -> Option<Value> {
        Path::new(path).lookup(&self.data).cloned()
    }

    fn get_context(&self, context: &str) -> Option<Value> {
        let resolved = self.resolve_context(context);
        self.get_path(&resolved)
    }

    fn self_urn(&self) -> &str {
        &self.self_urn
    }

    fn full_model(&self) -> &Value {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SELF_URN: &str = "vessels.urn:mrn:signalk:uuid:test-vessel";

    fn delta(context: &str, values: Vec<PathValue>) -> Delta {
        Delta {
            context: Some(context.to_string()),
            updates: vec![Update {
                source_ref: Some("ais.AI".to_string()),
                source: None,
                timestamp: Some("2024-01-17T10:30:00.000Z".to_string()),
                values,
            }],
        }
    }

    #[test]
    fn test_new_store() {
        let store = MemoryStore::new(SELF_URN);
        assert_eq!(store.self_urn(), SELF_URN);

        let full = store.full_model();
        assert_eq!(full["version"], "1.7.0");
        assert_eq!(full["self"], SELF_URN);
        assert!(full["vessels"]["urn:mrn:signalk:uuid:test-vessel"].is_object());
        assert!(full["sources"].is_object());
    }

    #[test]
    fn test_apply_delta_wraps_values() {
        let mut store = MemoryStore::new(SELF_URN);
        store.apply_delta(&delta(
            "vessels.urn:mrn:imo:mmsi:367301250",
            vec![PathValue::new("design.beam", serde_json::json!(7))],
        ));

        let value = store
            .get_path("vessels.urn:mrn:imo:mmsi:367301250.design.beam")
            .unwrap();
        assert_eq!(value["value"], serde_json::json!(7));
        assert_eq!(value["$source"], "ais.AI");
        assert_eq!(value["timestamp"], "2024-01-17T10:30:00.000Z");
    }

    #[test]
    fn test_root_values_are_merged_bare() {
        let mut store = MemoryStore::new(SELF_URN);
        store.apply_delta(&delta(
            "atons.urn:mrn:imo:mmsi:993672085",
            vec![
                PathValue::new("", serde_json::json!({"name": "78A"})),
                PathValue::new("", serde_json::json!({"mmsi": "993672085"})),
                PathValue::new("atonType", serde_json::json!({"id": 14})),
            ],
        ));

        let aton = store.get_context("atons.urn:mrn:imo:mmsi:993672085").unwrap();
        assert_eq!(aton["name"], "78A");
        assert_eq!(aton["mmsi"], "993672085");
        assert_eq!(aton["atonType"]["value"]["id"], 14);
    }

    #[test]
    fn test_later_delta_overwrites() {
        let mut store = MemoryStore::new(SELF_URN);
        let context = "vessels.urn:mrn:imo:mmsi:367301250";
        store.apply_delta(&delta(
            context,
            vec![PathValue::new("navigation.speedOverGround", serde_json::json!(3.85))],
        ));
        store.apply_delta(&delta(
            context,
            vec![PathValue::new("navigation.speedOverGround", serde_json::json!(4.12))],
        ));

        let vessel = store.get_context(context).unwrap();
        assert_eq!(vessel["navigation"]["speedOverGround"]["value"], 4.12);
    }

    #[test]
    fn test_self_context_resolution() {
        let mut store = MemoryStore::new(SELF_URN);
        store.apply_delta(&delta(
            SELF_CONTEXT,
            vec![PathValue::new("navigation.speedOverGround", serde_json::json!(3.85))],
        ));

        let own = store.get_context(SELF_CONTEXT).unwrap();
        assert_eq!(own["navigation"]["speedOverGround"]["value"], 3.85);
        assert!(store.is_self_context(SELF_CONTEXT));
        assert!(store.is_self_context(SELF_URN));
        assert!(!store.is_self_context("vessels.urn:mrn:imo:mmsi:367301250"));
    }

    #[test]
    fn test_get_path_nonexistent() {
        let store = MemoryStore::new(SELF_URN);
        assert!(store.get_context("vessels.urn:mrn:imo:mmsi:000000000").is_none());
        assert!(store.get_path("atons").is_none());
    }
}
