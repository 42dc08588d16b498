//! # signalk-ais
//!
//! Converts Signal K deltas about other vessels and aids to navigation into
//! NMEA 2000 AIS field-sets:
//! - PGN 129038, Class A position report
//! - PGN 129794, Class A static and voyage related data
//! - PGN 129041, AtoN report
//!
//! The conversion is synchronous and side-effect free. It reads the incoming
//! delta and the last-known state of its context, and hands back field-sets
//! for an encoder to pack; bit-level encoding is not done here.

pub mod accessor;
pub mod builders;
pub mod conversion;
pub mod dispatch;
pub mod error;
pub mod fieldset;
pub mod options;
pub mod relevance;
pub mod status;

pub use conversion::{run_self_tests, Conversion, ConversionTest, SourceType};
pub use dispatch::{AisConverter, ContextKind};
pub use error::ConversionError;
pub use fieldset::{FieldSet, ATON_PGN, POSITION_PGN, STATIC_PGN};
pub use options::{load_options, ConversionOptions, AIS_OPTION_KEY, PLUGIN_ID};
pub use status::{map_status, NavStatus};
