use super::from_starboard;
use crate::accessor::{is_truthy, EntityState};
use crate::fieldset::{number, FieldSet, ATON_PGN};
use signalk_core::Position;

/// Aid to navigation report (PGN 129041).
///
/// The stored name of an aid wins over one arriving in the delta. The
/// north-facing edge offset is sent in decimetres.
pub fn build_aton(entity: &EntityState<'_>, mmsi: u32) -> Option<FieldSet> {
    let position = Position::from_value(entity.resolve("navigation.position")?)?;

    let name = entity
        .resolve_known("name")
        .filter(|v| is_truthy(v))
        .or_else(|| entity.resolve("name"));
    let aton_type = entity.resolve_field("atonType", "id");
    let length = entity.resolve_field("design.length", "overall");
    let beam = entity.resolve("design.beam");
    let from_true_north = entity
        .resolve("sensors.ais.fromBow")
        .filter(|v| is_truthy(v))
        .and_then(|v| v.as_f64())
        .and_then(|metres| number(metres * 10.0));

    Some(
        FieldSet::new(ATON_PGN)
            .with("Message ID", 0)
            .with("Repeat Indicator", 0)
            .with("User ID", mmsi)
            .with("Longitude", position.longitude)
            .with("Latitude", position.latitude)
            .with("Position Accuracy", 0)
            .with("RAIM", 0)
            .with("Time Stamp", 0)
            .with_opt("Length/Diameter", length.cloned())
            .with_opt("Beam/Diameter", beam.cloned())
            .with_opt(
                "Position Reference from Starboard Edge",
                from_starboard(entity).and_then(number),
            )
            .with_opt("Position Reference from True North Facing Edge", from_true_north)
            .with_opt("AtoN Type", aton_type.cloned())
            .with_opt("AtoN Name", name.cloned()),
    )
}
