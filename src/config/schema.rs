//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for a routewire server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name used in diagnostics.
    pub name: Option<String>,

    /// Force debug-level diagnostics regardless of the environment.
    pub debug: bool,

    /// Code-tree scanning settings.
    pub scan: ScanConfig,

    /// Listener configuration for the hosting process.
    pub listener: ListenerConfig,
}

/// Code-tree scanning settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Root directories to scan, relative to `search_root`. Empty means
    /// derive roots from the tree itself.
    pub roots: Vec<String>,

    /// Directory the roots are resolved against (default: working
    /// directory).
    pub search_root: Option<String>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}
