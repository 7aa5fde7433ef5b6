use crate::domain::{LivenessConfig, NodeId};
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone)]
pub struct StaticConfigProvider {
    bootstrap_peers: Vec<NodeId>,
    config: LivenessConfig,
}

impl StaticConfigProvider {
    /// Create with default config and no bootstrap peers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bootstrap_peers: Vec::new(),
            config: LivenessConfig::default(),
        }
    }

    /// Create with specified bootstrap peers.
    #[must_use]
    pub fn with_bootstrap_peers(mut self, peers: Vec<NodeId>) -> Self {
        self.bootstrap_peers = peers;
        self
    }

    /// Create with specified liveness config.
    #[must_use]
    pub fn with_config(mut self, config: LivenessConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for StaticConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn bootstrap_peers(&self) -> Vec<NodeId> {
        self.bootstrap_peers.clone()
    }

    fn liveness_config(&self) -> LivenessConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading (requires "network" feature)
// ============================================================================

#[cfg(feature = "network")]
mod toml_config {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use thiserror::Error;
    use tracing::warn;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        bootstrap: BootstrapSection,
        #[serde(default)]
        liveness: LivenessSection,
    }

    #[derive(Debug, Deserialize, Default)]
    struct BootstrapSection {
        #[serde(default)]
        peers: Vec<String>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct LivenessSection {
        k: Option<usize>,
        hello_timeout_ms: Option<u64>,
        round_interval_secs: Option<u64>,
        max_pending_secs: Option<u64>,
        max_pending: Option<usize>,
        max_concurrent_hellos: Option<usize>,
        node_version: Option<String>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [bootstrap]
    /// peers = [
    ///     "0101010101010101010101010101010101010101010101010101010101010101",
    /// ]
    ///
    /// [liveness]
    /// k = 20
    /// hello_timeout_ms = 5000
    /// round_interval_secs = 30
    /// max_pending_secs = 30
    /// max_pending = 1024
    /// max_concurrent_hellos = 16
    /// ```
    ///
    /// Missing keys take their defaults. Bootstrap entries that are not
    /// 64 hex characters are skipped with a warning.
    pub struct TomlConfigProvider {
        bootstrap_peers: Vec<NodeId>,
        config: LivenessConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read or parsed, or if the
        /// resulting config fails validation.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let bootstrap_peers: Vec<NodeId> = file
                .bootstrap
                .peers
                .iter()
                .filter_map(|s| match s.parse::<NodeId>() {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!(entry = %s, error = %e, "Skipping bootstrap peer");
                        None
                    }
                })
                .collect();

            let defaults = LivenessConfig::default();
            let lc = file.liveness;
            let config = LivenessConfig {
                k: lc.k.unwrap_or(defaults.k),
                hello_timeout_ms: lc.hello_timeout_ms.unwrap_or(defaults.hello_timeout_ms),
                round_interval_secs: lc
                    .round_interval_secs
                    .unwrap_or(defaults.round_interval_secs),
                max_pending_secs: lc.max_pending_secs.unwrap_or(defaults.max_pending_secs),
                max_pending: lc.max_pending.unwrap_or(defaults.max_pending),
                max_concurrent_hellos: lc
                    .max_concurrent_hellos
                    .unwrap_or(defaults.max_concurrent_hellos),
                node_version: lc.node_version.unwrap_or(defaults.node_version),
            };
            config
                .validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;

            Ok(Self {
                bootstrap_peers,
                config,
            })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn bootstrap_peers(&self) -> Vec<NodeId> {
            self.bootstrap_peers.clone()
        }

        fn liveness_config(&self) -> LivenessConfig {
            self.config.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, Error)]
    pub enum ConfigError {
        /// File I/O error.
        #[error("failed to read {path}: {error}")]
        Io {
            /// Path of the file that failed to load.
            path: String,
            /// Error message from the I/O operation.
            error: String,
        },
        /// TOML parsing error.
        #[error("failed to parse config: {0}")]
        Parse(String),
        /// Parsed values are not usable.
        #[error("{0}")]
        Invalid(String),
    }
}

#[cfg(feature = "network")]
pub use toml_config::{ConfigError, TomlConfigProvider};
