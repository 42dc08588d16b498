//! # signalk-core
//!
//! Core SignalK data model and store implementation.
//!
//! This crate provides:
//! - Data model types (Delta, Update, PathValue, Source, Position)
//! - Dot-path parsing and tree lookup
//! - In-memory store of last-known context state
//! - Plugin configuration storage
//!
//! This crate is intentionally runtime-agnostic and contains no async code.

pub mod config;
pub mod model;
pub mod path;
pub mod store;

pub use config::{ConfigError, ConfigStorage, FileConfigStorage, MemoryConfigStorage};
pub use model::*;
pub use path::Path;
pub use store::{MemoryStore, SignalKStore};
