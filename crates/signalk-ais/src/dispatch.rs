//! The AIS conversion: routes a delta to the builders that apply to it.

use crate::accessor::{is_truthy, EntityState};
use crate::builders::{build_aton, build_position, build_static, parse_mmsi};
use crate::conversion::{Conversion, ConversionTest};
use crate::fieldset::{FieldSet, ATON_PGN, POSITION_PGN, STATIC_PGN};
use crate::options::AIS_OPTION_KEY;
use crate::relevance::{is_relevant, POSITION_KEYS, STATIC_KEYS};
use serde_json::{json, Value};
use signalk_core::{Delta, PathValue, SignalKStore, Update};

/// Namespace of a delta context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Vessel,
    Aton,
    Other,
}

impl ContextKind {
    pub fn of(context: &str) -> Self {
        if context.starts_with("vessels.") {
            ContextKind::Vessel
        } else if context.starts_with("atons.") {
            ContextKind::Aton
        } else {
            ContextKind::Other
        }
    }
}

/// Converts vessel and AtoN deltas into AIS position, static and AtoN reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct AisConverter;

impl AisConverter {
    pub fn new() -> Self {
        Self
    }

    /// Produce the field-sets for `delta`, or `None` when it is not of interest.
    ///
    /// Deltas about the self vessel and deltas read off the NMEA 2000 bus are
    /// ignored so reports are never echoed back onto the bus.
    pub fn classify(&self, store: &dyn SignalKStore, delta: &Delta) -> Option<Vec<FieldSet>> {
        let context = delta.context_or_self();

        if store.is_self_context(context) {
            return None;
        }
        if delta.is_from_nmea2000() {
            tracing::trace!("Ignoring NMEA 2000 originated delta for {}", context);
            return None;
        }

        match ContextKind::of(context) {
            ContextKind::Vessel => self.classify_vessel(store, context, delta),
            ContextKind::Aton => self.classify_aton(store, context, delta),
            ContextKind::Other => None,
        }
    }

    fn classify_vessel(
        &self,
        store: &dyn SignalKStore,
        context: &str,
        delta: &Delta,
    ) -> Option<Vec<FieldSet>> {
        let has_static = is_relevant(delta, STATIC_KEYS);
        let has_position = is_relevant(delta, POSITION_KEYS);
        if !has_static && !has_position {
            return None;
        }

        let state = store.get_context(context);
        let entity = EntityState::new(state.as_ref(), delta);
        let mmsi = resolve_mmsi(&entity, context)?;

        let mut sets = Vec::with_capacity(2);
        if has_position {
            sets.extend(build_position(&entity, mmsi));
        }
        if has_static {
            sets.push(build_static(&entity, mmsi));
        }

        tracing::trace!("{} → {} field-set(s)", context, sets.len());
        Some(sets)
    }

    fn classify_aton(
        &self,
        store: &dyn SignalKStore,
        context: &str,
        delta: &Delta,
    ) -> Option<Vec<FieldSet>> {
        let state = store.get_context(context);
        let entity = EntityState::new(state.as_ref(), delta);
        let mmsi = resolve_mmsi(&entity, context)?;

        build_aton(&entity, mmsi).map(|set| vec![set])
    }
}

fn resolve_mmsi(entity: &EntityState<'_>, context: &str) -> Option<u32> {
    let Some(raw) = entity.resolve("mmsi").filter(|v| is_truthy(v)) else {
        tracing::debug!("No MMSI known for {}, skipping", context);
        return None;
    };
    let mmsi = parse_mmsi(raw);
    if mmsi.is_none() {
        tracing::debug!("Unusable MMSI {} for {}, skipping", raw, context);
    }
    mmsi
}

impl Conversion for AisConverter {
    fn title(&self) -> String {
        format!("AIS ({}, {}, {})", STATIC_PGN, POSITION_PGN, ATON_PGN)
    }

    fn option_key(&self) -> &'static str {
        AIS_OPTION_KEY
    }

    fn convert(&self, store: &dyn SignalKStore, delta: &Delta) -> Option<Vec<FieldSet>> {
        self.classify(store, delta)
    }

    fn tests(&self) -> Vec<ConversionTest> {
        vec![
            ConversionTest {
                input: vec![delta(
                    "vessels.urn:mrn:imo:mmsi:367301250",
                    vec![
                        ("navigation.position", json!({"longitude": -76.3947165, "latitude": 39.1296167})),
                        ("navigation.courseOverGroundTrue", json!(1.501)),
                        ("navigation.speedOverGround", json!(0.05)),
                        ("navigation.headingTrue", json!(5.6199)),
                        ("navigation.rateOfTurn", json!(0)),
                        ("navigation.state", json!("motoring")),
                        ("navigation.destination.commonName", json!("BALTIMORE")),
                        ("sensors.ais.fromBow", json!(9)),
                        ("sensors.ais.fromCenter", json!(0)),
                        ("design.draft", json!({"maximum": 4.2})),
                        ("design.length", json!({"overall": 30})),
                        ("design.aisShipType", json!({"id": 52, "name": "Tug"})),
                        ("design.beam", json!(7)),
                        ("", json!({"mmsi": "367301250"})),
                        ("", json!({"name": "SOME BOAT"})),
                    ],
                )],
                expected: vec![
                    FieldSet::new(POSITION_PGN)
                        .with("Message ID", 1)
                        .with("Repeat Indicator", 0)
                        .with("User ID", 367301250)
                        .with("Longitude", -76.3947165)
                        .with("Latitude", 39.1296167)
                        .with("Position Accuracy", 0)
                        .with("RAIM", 0)
                        .with("Time Stamp", 0)
                        .with("COG", 1.501)
                        .with("SOG", 0.05)
                        .with("AIS Transceiver information", 0)
                        .with("Heading", 5.6199)
                        .with("Rate of Turn", 0)
                        .with("Nav Status", 0),
                    FieldSet::new(STATIC_PGN)
                        .with("Message ID", 5)
                        .with("Repeat indicator", 0)
                        .with("User ID", 367301250)
                        .with("IMO number", 0)
                        .with("Name", "SOME BOAT")
                        .with("Type of ship", 52)
                        .with("Length", 30)
                        .with("Beam", 7)
                        .with("Position reference from Starboard", 3.5)
                        .with("Position reference from Bow", 9)
                        .with("Draft", 4.2)
                        .with("Destination", "BALTIMORE")
                        .with("AIS version indicator", 0)
                        .with("GNSS type", 1)
                        .with("DTE", 0)
                        .with("AIS Transceiver information", 0),
                ],
            },
            ConversionTest {
                input: vec![delta(
                    "atons.urn:mrn:imo:mmsi:993672085",
                    vec![
                        ("", json!({"name": "78A"})),
                        ("navigation.position", json!({"longitude": -76.4313882, "latitude": 38.5783333})),
                        ("atonType", json!({"id": 14, "name": "Beacon, Starboard Hand"})),
                        ("", json!({"mmsi": "993672085"})),
                        ("sensors.ais.class", json!("ATON")),
                    ],
                )],
                expected: vec![FieldSet::new(ATON_PGN)
                    .with("Message ID", 0)
                    .with("Repeat Indicator", 0)
                    .with("User ID", 993672085)
                    .with("Longitude", -76.4313882)
                    .with("Latitude", 38.5783333)
                    .with("Position Accuracy", 0)
                    .with("RAIM", 0)
                    .with("Time Stamp", 0)
                    .with("AtoN Type", 14)
                    .with("AtoN Name", "78A")],
            },
        ]
    }
}

fn delta(context: &str, values: Vec<(&str, Value)>) -> Delta {
    Delta {
        context: Some(context.to_string()),
        updates: vec![Update {
            source_ref: None,
            source: None,
            timestamp: None,
            values: values
                .into_iter()
                .map(|(path, value)| PathValue::new(path, value))
                .collect(),
        }],
    }
}
