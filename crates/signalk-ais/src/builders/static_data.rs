use super::{from_starboard, parse_imo};
use crate::accessor::{is_truthy, EntityState};
use crate::fieldset::{number, FieldSet, STATIC_PGN};

/// Class A static and voyage related data (PGN 129794).
///
/// Always produces a report; the caller has already decided the delta is
/// relevant. Unknown dimensions are left out.
pub fn build_static(entity: &EntityState<'_>, mmsi: u32) -> FieldSet {
    let name = entity.resolve("name");
    let ship_type = entity.resolve_field("design.aisShipType", "id");
    let callsign = entity.resolve("communication.callsignVhf");
    let length = entity.resolve_field("design.length", "overall");
    let beam = entity.resolve("design.beam");
    let from_bow = entity
        .resolve("sensors.ais.fromBow")
        .filter(|v| is_truthy(v));
    let draft = entity.resolve_field("design.draft", "maximum");
    let imo = parse_imo(entity.resolve("registrations.imo"));
    let destination = entity.resolve("navigation.destination.commonName");

    FieldSet::new(STATIC_PGN)
        .with("Message ID", 5)
        .with("Repeat indicator", 0)
        .with("User ID", mmsi)
        .with("IMO number", imo)
        .with_opt("Callsign", callsign.cloned())
        .with_opt("Name", name.cloned())
        .with_opt("Type of ship", ship_type.cloned())
        .with_opt("Length", length.cloned())
        .with_opt("Beam", beam.cloned())
        .with_opt(
            "Position reference from Starboard",
            from_starboard(entity).and_then(number),
        )
        .with_opt("Position reference from Bow", from_bow.cloned())
        .with_opt("Draft", draft.cloned())
        .with_opt("Destination", destination.cloned())
        .with("AIS version indicator", 0)
        .with("GNSS type", 1)
        .with("DTE", 0)
        .with("AIS Transceiver information", 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use signalk_core::{Delta, PathValue, Update};

    fn delta(values: Vec<PathValue>) -> Delta {
        Delta {
            context: Some("vessels.urn:mrn:imo:mmsi:367301250".to_string()),
            updates: vec![Update {
                source_ref: None,
                source: None,
                timestamp: None,
                values,
            }],
        }
    }

    #[test]
    fn test_full_report() {
        let d = delta(vec![
            PathValue::new("navigation.destination.commonName", json!("BALTIMORE")),
            PathValue::new("sensors.ais.fromBow", json!(9)),
            PathValue::new("sensors.ais.fromCenter", json!(0)),
            PathValue::new("design.draft", json!({"maximum": 4.2})),
            PathValue::new("design.length", json!({"overall": 30})),
            PathValue::new("design.aisShipType", json!({"id": 52, "name": "Tug"})),
            PathValue::new("design.beam", json!(7)),
            PathValue::new("registrations.imo", json!("IMO 1234567")),
            PathValue::new("communication.callsignVhf", json!("WDC1234")),
            PathValue::new("", json!({"name": "SOME BOAT"})),
        ]);
        let set = build_static(&EntityState::new(None, &d), 367301250);

        assert_eq!(set.pgn, STATIC_PGN);
        assert_eq!(
            Value::Object(set.fields),
            json!({
                "Message ID": 5,
                "Repeat indicator": 0,
                "User ID": 367301250,
                "IMO number": 1234567,
                "Callsign": "WDC1234",
                "Name": "SOME BOAT",
                "Type of ship": 52,
                "Length": 30,
                "Beam": 7,
                "Position reference from Starboard": 3.5,
                "Position reference from Bow": 9,
                "Draft": 4.2,
                "Destination": "BALTIMORE",
                "AIS version indicator": 0,
                "GNSS type": 1,
                "DTE": 0,
                "AIS Transceiver information": 0
            })
        );
    }

    #[test]
    fn test_minimal_report() {
        let d = delta(vec![PathValue::new("", json!({"name": "SOME BOAT"}))]);
        let set = build_static(&EntityState::new(None, &d), 367301250);

        assert_eq!(set.get("Name"), Some(&json!("SOME BOAT")));
        assert_eq!(set.get("IMO number"), Some(&json!(0)));
        assert!(set.get("Position reference from Starboard").is_none());
        assert!(set.get("Length").is_none());
        assert!(set.get("Destination").is_none());
        assert_eq!(set.get("GNSS type"), Some(&json!(1)));
    }

    #[test]
    fn test_zero_bow_offset_is_unset() {
        let d = delta(vec![
            PathValue::new("sensors.ais.fromBow", json!(0)),
            PathValue::new("design.beam", json!(8)),
            PathValue::new("sensors.ais.fromCenter", json!(1)),
        ]);
        let set = build_static(&EntityState::new(None, &d), 367301250);

        assert!(set.get("Position reference from Bow").is_none());
        assert_eq!(set.get("Position reference from Starboard"), Some(&json!(5)));
    }

    #[test]
    fn test_delta_beats_known_state() {
        let d = delta(vec![PathValue::new("design.beam", json!(7))]);
        let state = json!({
            "name": "KNOWN",
            "design": {"beam": {"value": 5}, "length": {"value": {"overall": 22}}}
        });
        let set = build_static(&EntityState::new(Some(&state), &d), 367301250);

        assert_eq!(set.get("Beam"), Some(&json!(7)));
        assert_eq!(set.get("Length"), Some(&json!(22)));
        assert_eq!(set.get("Name"), Some(&json!("KNOWN")));
    }
}
