//! Configuration storage abstraction.
//!
//! Plugin configuration is stored per plugin id, in the same shape the
//! Signal K server keeps under `~/.signalk/plugin-config-data/<id>.json`:
//!
//! ```json
//! { "enabled": true, "configuration": { "AISv2": true } }
//! ```
//!
//! All methods are synchronous; nothing here touches a runtime.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Errors that can occur during configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested configuration was not found.
    NotFound(String),
    /// Failed to read configuration.
    ReadError(String),
    /// Failed to write configuration.
    WriteError(String),
    /// Configuration data is invalid.
    InvalidData(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Configuration not found: {}", key),
            ConfigError::ReadError(msg) => write!(f, "Read error: {}", msg),
            ConfigError::WriteError(msg) => write!(f, "Write error: {}", msg),
            ConfigError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Abstract configuration storage.
pub trait ConfigStorage: Send + Sync {
    /// Load configuration for a specific plugin.
    fn load_plugin_config(&self, plugin_id: &str) -> Result<serde_json::Value, ConfigError>;

    /// Save configuration for a specific plugin.
    fn save_plugin_config(
        &self,
        plugin_id: &str,
        config: &serde_json::Value,
    ) -> Result<(), ConfigError>;
}

/// In-memory storage, used by tests and by callers that build config in code.
#[derive(Debug, Default)]
pub struct MemoryConfigStorage {
    data: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryConfigStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStorage for MemoryConfigStorage {
    fn load_plugin_config(&self, plugin_id: &str) -> Result<serde_json::Value, ConfigError> {
        let data = self
            .data
            .read()
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;
        data.get(plugin_id)
            .cloned()
            .ok_or_else(|| ConfigError::NotFound(plugin_id.to_string()))
    }

    fn save_plugin_config(
        &self,
        plugin_id: &str,
        config: &serde_json::Value,
    ) -> Result<(), ConfigError> {
        self.data
            .write()
            .map_err(|e| ConfigError::WriteError(e.to_string()))?
            .insert(plugin_id.to_string(), config.clone());
        Ok(())
    }
}

/// File-backed storage: one `<plugin_id>.json` file per plugin in a directory.
#[derive(Debug, Clone)]
pub struct FileConfigStorage {
    dir: PathBuf,
}

impl FileConfigStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, plugin_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", plugin_id))
    }
}

impl ConfigStorage for FileConfigStorage {
    fn load_plugin_config(&self, plugin_id: &str) -> Result<serde_json::Value, ConfigError> {
        let file = self.file_for(plugin_id);
        let text = match std::fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(file.display().to_string()))
            }
            Err(e) => return Err(ConfigError::ReadError(format!("{}: {}", file.display(), e))),
        };
        serde_json::from_str(&text)
            .map_err(|e| ConfigError::InvalidData(format!("{}: {}", file.display(), e)))
    }

    fn save_plugin_config(
        &self,
        plugin_id: &str,
        config: &serde_json::Value,
    ) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        let text = serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        std::fs::write(self.file_for(plugin_id), text)
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}
