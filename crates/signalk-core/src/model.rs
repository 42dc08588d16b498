//! SignalK data model types.
//!
//! These types represent the core SignalK message structures:
//! - Delta messages for efficient updates
//! - Source tracking for multi-device scenarios
//! - Positions as carried by `navigation.position`

use serde::{Deserialize, Serialize};

/// Context used when a delta does not name one.
pub const SELF_CONTEXT: &str = "vessels.self";

/// Source type reported by NMEA 2000 gateways.
pub const NMEA2000_SOURCE_TYPE: &str = "NMEA2000";

/// A SignalK delta message containing one or more updates.
///
/// Deltas are the primary mechanism for transmitting changes in SignalK.
/// They contain a context (which vessel/object) and a list of updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// The context path (e.g., "vessels.urn:mrn:imo:mmsi:367301250")
    /// If None, defaults to "vessels.self"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// The list of updates in this delta
    #[serde(default)]
    pub updates: Vec<Update>,
}

impl Delta {
    /// The context this delta applies to, with the `vessels.self` default applied.
    pub fn context_or_self(&self) -> &str {
        self.context.as_deref().unwrap_or(SELF_CONTEXT)
    }

    /// Iterate over every path-value pair in declaration order.
    pub fn path_values(&self) -> impl Iterator<Item = &PathValue> {
        self.updates.iter().flat_map(|update| update.values.iter())
    }

    /// True if any update was produced by an NMEA 2000 source.
    pub fn is_from_nmea2000(&self) -> bool {
        self.updates.iter().any(|update| {
            update
                .source
                .as_ref()
                .and_then(|source| source.source_type.as_deref())
                == Some(NMEA2000_SOURCE_TYPE)
        })
    }
}

/// A single update within a delta, containing values from one source at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Reference to source in /sources (e.g., "nmea0183.GP")
    #[serde(rename = "$source", skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,

    /// Embedded source object (alternative to $source)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,

    /// ISO 8601 timestamp (UTC)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// The path-value pairs in this update
    #[serde(default)]
    pub values: Vec<PathValue>,
}

/// A single path-value pair within an update.
///
/// An empty `path` means `value` is an object whose keys are top-level
/// attributes of the context (`name`, `mmsi`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathValue {
    /// The SignalK path (e.g., "navigation.speedOverGround")
    pub path: String,

    /// The value at this path
    pub value: serde_json::Value,
}

impl PathValue {
    pub fn new(path: &str, value: serde_json::Value) -> Self {
        Self {
            path: path.to_string(),
            value,
        }
    }
}

/// Source information describing where data originated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Label identifying the source bus (e.g., "N2K-1", "serial-COM1")
    pub label: String,

    /// Type of source (e.g., "NMEA0183", "NMEA2000", "signalk")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,

    /// NMEA 2000 source address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// NMEA 2000 PGN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pgn: Option<u32>,

    /// AIS message type (1-27)
    #[serde(rename = "aisType", skip_serializing_if = "Option::is_none")]
    pub ais_type: Option<u8>,
}

/// Position in WGS84 coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Position {
    /// Read a position out of a `navigation.position` value.
    ///
    /// Returns `None` unless both coordinates are present, numeric and non-zero.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let position: Position = serde_json::from_value(value.clone()).ok()?;
        if position.latitude == 0.0 || position.longitude == 0.0 {
            return None;
        }
        Some(position)
    }
}
