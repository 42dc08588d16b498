//! Cheap checks for whether a delta touches paths a message depends on.

use signalk_core::Delta;

/// Paths that feed the static and voyage related data report.
pub const STATIC_KEYS: &[&str] = &[
    "name",
    "callsign",
    "design.aisShipType",
    "design.draft",
    "design.length",
    "design.beam",
    "sensors.ais.fromCenter",
    "sensors.ais.fromBow",
    "registrations.imo",
];

/// Paths that feed the position report.
pub const POSITION_KEYS: &[&str] = &["navigation.position"];

/// True if any value in `delta` addresses one of `keys`.
///
/// Empty-path values match when one of their object keys is in `keys`.
pub fn is_relevant(delta: &Delta, keys: &[&str]) -> bool {
    delta.path_values().any(|pv| {
        if pv.path.is_empty() {
            pv.value
                .as_object()
                .is_some_and(|map| map.keys().any(|key| keys.contains(&key.as_str())))
        } else {
            keys.contains(&pv.path.as_str())
        }
    })
}
