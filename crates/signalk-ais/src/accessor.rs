//! Effective attribute values for one context.
//!
//! A value supplied in the incoming delta always wins over the last-known
//! state of the context. State nodes written through a path carry their value
//! wrapped as `{"value": ...}`; [`StateNode`] unwraps that before handing the
//! value out.

use serde_json::Value;
use signalk_core::{Delta, Path};

/// A node read from the last-known state tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateNode<'a> {
    /// `{"value": ..., "$source": ..., "timestamp": ...}`
    Wrapped(&'a Value),
    /// A plain value, e.g. `name` merged from an empty-path update.
    Bare(&'a Value),
}

impl<'a> StateNode<'a> {
    pub fn classify(node: &'a Value) -> Self {
        match node.as_object().and_then(|map| map.get("value")) {
            Some(inner) => StateNode::Wrapped(inner),
            None => StateNode::Bare(node),
        }
    }

    /// The bare value, `None` for JSON null.
    pub fn into_value(self) -> Option<&'a Value> {
        let value = match self {
            StateNode::Wrapped(inner) => inner,
            StateNode::Bare(value) => value,
        };
        (!value.is_null()).then_some(value)
    }
}

/// JavaScript-style truthiness, used where the host data treats `0` and `""`
/// as "not set".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The last-known state of one context paired with the delta being processed.
#[derive(Debug, Clone, Copy)]
pub struct EntityState<'a> {
    state: Option<&'a Value>,
    delta: &'a Delta,
}

impl<'a> EntityState<'a> {
    pub fn new(state: Option<&'a Value>, delta: &'a Delta) -> Self {
        Self { state, delta }
    }

    /// Effective value of `path`: first match in the delta, else last-known state.
    pub fn resolve(&self, path: &str) -> Option<&'a Value> {
        let path = Path::new(path);
        match self.from_delta(&path) {
            Some(value) => (!value.is_null()).then_some(value),
            None => self.from_state(&path),
        }
    }

    /// Value of `path` from the last-known state only.
    pub fn resolve_known(&self, path: &str) -> Option<&'a Value> {
        self.from_state(&Path::new(path))
    }

    /// A field of an object-valued attribute, e.g. `design.length` → `overall`.
    pub fn resolve_field(&self, path: &str, field: &str) -> Option<&'a Value> {
        self.resolve(path)?
            .get(field)
            .filter(|value| !value.is_null())
    }

    /// Numeric value of `path`.
    pub fn resolve_f64(&self, path: &str) -> Option<f64> {
        self.resolve(path)?.as_f64()
    }

    /// String value of `path`.
    pub fn resolve_str(&self, path: &str) -> Option<&'a str> {
        self.resolve(path)?.as_str()
    }

    fn from_delta(&self, path: &Path) -> Option<&'a Value> {
        for pv in self.delta.path_values() {
            if pv.path.is_empty() {
                if !path.is_top_level() {
                    continue;
                }
                if let Some(value) = pv.value.get(path.as_str()).filter(|v| is_truthy(v)) {
                    return Some(value);
                }
            } else if pv.path == path.as_str() {
                return Some(&pv.value);
            }
        }
        None
    }

    fn from_state(&self, path: &Path) -> Option<&'a Value> {
        let node = path.lookup(self.state?)?;
        StateNode::classify(node).into_value()
    }
}
