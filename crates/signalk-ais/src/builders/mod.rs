//! Field-set builders for the three AIS messages.
//!
//! Each builder reads the effective state of one context and returns `None`
//! when the message cannot be produced (no position fix).

mod aton;
mod position;
mod static_data;

pub use aton::build_aton;
pub use position::build_position;
pub use static_data::build_static;

use crate::accessor::EntityState;
use serde_json::Value;
use std::f64::consts::TAU;

/// Parse an MMSI given as a string (`"367301250"`) or a number.
pub fn parse_mmsi(value: &Value) -> Option<u32> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}

/// Extract the IMO number from a registry string such as `"IMO 1234567"`.
///
/// The last whitespace-separated token is read as a base-10 integer (leading
/// digits only). Absent or unparsable values give 0.
pub fn parse_imo(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => s
            .split_whitespace()
            .last()
            .map(leading_digits)
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn leading_digits(token: &str) -> &str {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    &token[..end]
}

/// Course or heading in radians; values above one revolution are treated as unset.
fn valid_angle(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| v.as_f64().map_or(true, |radians| radians <= TAU))
}

/// Distance from the starboard side to the antenna: `beam / 2 + fromCenter`.
fn from_starboard(entity: &EntityState<'_>) -> Option<f64> {
    let beam = entity.resolve_f64("design.beam")?;
    let from_center = entity.resolve_f64("sensors.ais.fromCenter")?;
    Some(beam / 2.0 + from_center)
}
