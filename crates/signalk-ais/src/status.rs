//! AIS navigational status codes and the mapping from Signal K
//! `navigation.state` phrases.

use serde::{Deserialize, Serialize};

/// AIS navigational status (ITU-R M.1371, message 1-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NavStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    HazardousMaterialHighSpeed = 9,
    HazardousMaterialWingInGround = 10,
    PowerDrivenTowingAstern = 11,
    PowerDrivenPushingAhead = 12,
    Reserved = 13,
    AisSart = 14,
    Undefined = 15,
}

/// `navigation.state` phrase → status. Several phrases share a code.
const NAV_STATUS_MAPPING: &[(&str, NavStatus)] = &[
    ("not under command", NavStatus::NotUnderCommand),
    ("anchored", NavStatus::AtAnchor),
    ("moored", NavStatus::Moored),
    ("sailing", NavStatus::UnderWaySailing),
    ("motoring", NavStatus::UnderWayUsingEngine),
    ("towing < 200m", NavStatus::RestrictedManoeuverability),
    ("towing > 200m", NavStatus::RestrictedManoeuverability),
    ("pushing", NavStatus::RestrictedManoeuverability),
    ("fishing", NavStatus::EngagedInFishing),
    ("fishing-hampered", NavStatus::EngagedInFishing),
    ("trawling", NavStatus::EngagedInFishing),
    ("trawling-shooting", NavStatus::EngagedInFishing),
    ("trawling-hauling", NavStatus::EngagedInFishing),
    ("not-under-way", NavStatus::NotUnderCommand),
    ("aground", NavStatus::Aground),
    ("restricted manouverability", NavStatus::RestrictedManoeuverability),
    ("restricted manouverability towing < 200m", NavStatus::RestrictedManoeuverability),
    ("restricted manouverability towing > 200m", NavStatus::RestrictedManoeuverability),
    ("restricted manouverability underwater operations", NavStatus::RestrictedManoeuverability),
    ("constrained by draft", NavStatus::ConstrainedByDraught),
    ("ais-sart", NavStatus::AisSart),
    ("hazardous material high speed", NavStatus::HazardousMaterialHighSpeed),
    ("hazardous material wing in ground", NavStatus::HazardousMaterialWingInGround),
];

impl NavStatus {
    /// Status used when the state is unknown or has no mapping.
    pub const DEFAULT: NavStatus = NavStatus::UnderWayUsingEngine;

    const ALL: [NavStatus; 16] = [
        NavStatus::UnderWayUsingEngine,
        NavStatus::AtAnchor,
        NavStatus::NotUnderCommand,
        NavStatus::RestrictedManoeuverability,
        NavStatus::ConstrainedByDraught,
        NavStatus::Moored,
        NavStatus::Aground,
        NavStatus::EngagedInFishing,
        NavStatus::UnderWaySailing,
        NavStatus::HazardousMaterialHighSpeed,
        NavStatus::HazardousMaterialWingInGround,
        NavStatus::PowerDrivenTowingAstern,
        NavStatus::PowerDrivenPushingAhead,
        NavStatus::Reserved,
        NavStatus::AisSart,
        NavStatus::Undefined,
    ];

    /// Look up a Signal K `navigation.state` phrase.
    pub fn from_state(phrase: &str) -> Option<Self> {
        NAV_STATUS_MAPPING
            .iter()
            .find(|(candidate, _)| *candidate == phrase)
            .map(|(_, status)| *status)
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable name as printed by NMEA 2000 decoders.
    pub fn description(self) -> &'static str {
        match self {
            NavStatus::UnderWayUsingEngine => "Under way using engine",
            NavStatus::AtAnchor => "At anchor",
            NavStatus::NotUnderCommand => "Not under command",
            NavStatus::RestrictedManoeuverability => "Restricted manoeuverability",
            NavStatus::ConstrainedByDraught => "Constrained by her draught",
            NavStatus::Moored => "Moored",
            NavStatus::Aground => "Aground",
            NavStatus::EngagedInFishing => "Engaged in Fishing",
            NavStatus::UnderWaySailing => "Under way sailing",
            NavStatus::HazardousMaterialHighSpeed => "Hazardous material - High Speed",
            NavStatus::HazardousMaterialWingInGround => "Hazardous material - Wing in Ground",
            NavStatus::PowerDrivenTowingAstern => "Power-driven vessel towing astern",
            NavStatus::PowerDrivenPushingAhead => {
                "Power-driven vessel pushing ahead or towing alongside"
            }
            NavStatus::Reserved => "Reserved",
            NavStatus::AisSart => "AIS-SART",
            NavStatus::Undefined => "Undefined",
        }
    }
}

impl std::fmt::Display for NavStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Map an optional `navigation.state` phrase to its AIS code, 0 when unknown.
pub fn map_status(phrase: Option<&str>) -> u8 {
    phrase
        .and_then(NavStatus::from_state)
        .unwrap_or(NavStatus::DEFAULT)
        .code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phrase_maps_to_its_code() {
        let expected: &[(&str, u8)] = &[
            ("not under command", 2),
            ("anchored", 1),
            ("moored", 5),
            ("sailing", 8),
            ("motoring", 0),
            ("towing < 200m", 3),
            ("towing > 200m", 3),
            ("pushing", 3),
            ("fishing", 7),
            ("fishing-hampered", 7),
            ("trawling", 7),
            ("trawling-shooting", 7),
            ("trawling-hauling", 7),
            ("not-under-way", 2),
            ("aground", 6),
            ("restricted manouverability", 3),
            ("restricted manouverability towing < 200m", 3),
            ("restricted manouverability towing > 200m", 3),
            ("restricted manouverability underwater operations", 3),
            ("constrained by draft", 4),
            ("ais-sart", 14),
            ("hazardous material high speed", 9),
            ("hazardous material wing in ground", 10),
        ];

        assert_eq!(expected.len(), NAV_STATUS_MAPPING.len());
        for (phrase, code) in expected {
            assert_eq!(map_status(Some(*phrase)), *code, "phrase {:?}", phrase);
        }
    }

    #[test]
    fn test_unknown_and_absent_default_to_engine() {
        assert_eq!(map_status(None), 0);
        assert_eq!(map_status(Some("drifting")), 0);
        assert_eq!(map_status(Some("Moored")), 0);
        assert_eq!(map_status(Some("")), 0);
    }

    #[test]
    fn test_codes_round_trip() {
        for code in 0..=15u8 {
            assert_eq!(NavStatus::from_code(code).map(NavStatus::code), Some(code));
        }
        assert_eq!(NavStatus::from_code(16), None);
    }

    #[test]
    fn test_description() {
        assert_eq!(NavStatus::DEFAULT.to_string(), "Under way using engine");
        assert_eq!(NavStatus::from_state("ais-sart").unwrap().description(), "AIS-SART");
    }
}
