use super::valid_angle;
use crate::accessor::EntityState;
use crate::fieldset::{FieldSet, POSITION_PGN};
use crate::status::map_status;
use signalk_core::Position;

/// Class A scheduled position report (PGN 129038).
pub fn build_position(entity: &EntityState<'_>, mmsi: u32) -> Option<FieldSet> {
    let position = Position::from_value(entity.resolve("navigation.position")?)?;

    let cog = valid_angle(entity.resolve("navigation.courseOverGroundTrue"));
    let sog = entity.resolve("navigation.speedOverGround");
    let heading = valid_angle(entity.resolve("navigation.headingTrue"));
    let rot = entity.resolve("navigation.rateOfTurn");
    let status = map_status(entity.resolve_str("navigation.state"));

    Some(
        FieldSet::new(POSITION_PGN)
            .with("Message ID", 1)
            .with("Repeat Indicator", 0)
            .with("User ID", mmsi)
            .with("Longitude", position.longitude)
            .with("Latitude", position.latitude)
            .with("Position Accuracy", 0)
            .with("RAIM", 0)
            .with("Time Stamp", 0)
            .with_opt("COG", cog.cloned())
            .with_opt("SOG", sog.cloned())
            .with("AIS Transceiver information", 0)
            .with_opt("Heading", heading.cloned())
            .with_opt("Rate of Turn", rot.cloned())
            .with("Nav Status", status),
    )
}
