//! Which conversions are switched on.
//!
//! Options come from the plugin configuration stored for
//! [`PLUGIN_ID`]. Each conversion is enabled by its option key, either as a
//! plain flag (`"AISv2": true`) or as an object (`"AISv2": {"enabled": true}`).

use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use signalk_core::{ConfigError, ConfigStorage};
use std::collections::BTreeMap;

/// Plugin id under which conversion options are stored.
pub const PLUGIN_ID: &str = "signalk-to-nmea2000";

/// Option key of the AIS conversion.
pub const AIS_OPTION_KEY: &str = "AISv2";

/// Enabled flag per option key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    flags: BTreeMap<String, bool>,
}

impl ConversionOptions {
    /// Options with the given keys switched on.
    pub fn enabled<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            flags: keys.into_iter().map(|key| (key.to_string(), true)).collect(),
        }
    }

    /// Read options from a stored plugin configuration.
    ///
    /// Accepts both the wrapped `{"enabled": .., "configuration": {..}}` form
    /// and a bare configuration object. A plugin that is switched off
    /// enables nothing.
    pub fn from_plugin_config(config: &Value) -> Self {
        if config.get("enabled").and_then(Value::as_bool) == Some(false) {
            return Self::default();
        }

        let configuration = config.get("configuration").unwrap_or(config);
        let Some(entries) = configuration.as_object() else {
            return Self::default();
        };

        let flags = entries
            .iter()
            .filter_map(|(key, value)| {
                let enabled = match value {
                    Value::Bool(b) => *b,
                    Value::Object(map) => map.get("enabled").and_then(Value::as_bool)?,
                    _ => return None,
                };
                Some((key.clone(), enabled))
            })
            .collect();

        Self { flags }
    }

    /// True if `option_key` is switched on. Missing keys are off.
    pub fn is_enabled(&self, option_key: &str) -> bool {
        self.flags.get(option_key).copied().unwrap_or(false)
    }
}

/// Load options from storage; a plugin with no saved configuration has
/// everything switched off.
pub fn load_options(storage: &dyn ConfigStorage) -> Result<ConversionOptions, ConversionError> {
    match storage.load_plugin_config(PLUGIN_ID) {
        Ok(config) => Ok(ConversionOptions::from_plugin_config(&config)),
        Err(ConfigError::NotFound(what)) => {
            tracing::debug!("No configuration for {} ({}), all conversions off", PLUGIN_ID, what);
            Ok(ConversionOptions::default())
        }
        Err(e) => Err(e.into()),
    }
}
