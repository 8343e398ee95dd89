/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::time::Duration;

use ember_core::Codec;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Configuration for the Ember runtime.
///
/// Loaded from TOML in XDG-compliant directories. Every section and field is optional;
/// anything missing takes its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmberConfig {
    /// Shutdown timeouts.
    pub timeouts: TimeoutConfig,
    /// Mailbox latency observability.
    pub mailbox: MailboxConfig,
    /// Node identity and codec.
    pub defaults: DefaultsConfig,
    /// Tracing filter and log file name.
    pub tracing: TracingConfig,
    /// Directories.
    pub paths: PathsConfig,
    /// Behavioral switches.
    pub behavior: BehaviorConfig,
}

/// Timeout-related configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long stopping a single actor may take, in milliseconds.
    pub actor_shutdown_timeout_ms: u64,
    /// How long stopping every actor may take, in milliseconds.
    pub system_shutdown_timeout_ms: u64,
}

/// Mailbox latency thresholds. Zero disables a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailboxConfig {
    /// Warn when an envelope waited longer than this between enqueue and dequeue.
    pub arrival_warn_ms: u64,
    /// Warn when a handler ran longer than this.
    pub handler_warn_ms: u64,
}

/// Node identity and codec selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// This node's id, the first segment of every local actor path.
    pub node_id: String,
    /// Codec used by the protocol layer and for remote calls.
    pub serializer: Codec,
}

/// Tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Prefix of the rolling log file.
    pub file_name: String,
}

/// Directory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory for log files. A leading `~` expands to `$HOME`.
    pub log_directory: String,
}

/// Behavioral configuration switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Install a tracing subscriber in [`init_tracing`](crate::common::init_tracing).
    pub enable_tracing: bool,
    /// Write logs to a rolling file instead of stdout.
    pub log_to_file: bool,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            actor_shutdown_timeout_ms: 10_000,
            system_shutdown_timeout_ms: 30_000,
        }
    }
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            arrival_warn_ms: 1_000,
            handler_warn_ms: 1_000,
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            node_id: "node".to_string(),
            serializer: Codec::Json,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_name: "ember.log".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_directory: "~/.local/share/ember/logs".to_string(),
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            enable_tracing: true,
            log_to_file: false,
        }
    }
}

impl EmberConfig {
    /// Per-actor shutdown timeout.
    pub const fn actor_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.actor_shutdown_timeout_ms)
    }

    /// System-wide shutdown timeout.
    pub const fn system_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.system_shutdown_timeout_ms)
    }

    /// Arrival latency warning threshold, `None` when disabled.
    pub fn arrival_warn(&self) -> Option<Duration> {
        (self.mailbox.arrival_warn_ms > 0).then(|| Duration::from_millis(self.mailbox.arrival_warn_ms))
    }

    /// Handler duration warning threshold, `None` when disabled.
    pub fn handler_warn(&self) -> Option<Duration> {
        (self.mailbox.handler_warn_ms > 0).then(|| Duration::from_millis(self.mailbox.handler_warn_ms))
    }

    /// Parses a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml_str(document: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(document)
    }

    /// Load configuration from XDG-compliant locations.
    ///
    /// Looks for `ember/config.toml` under `$XDG_CONFIG_HOME` (falling back to
    /// `~/.config`) and the XDG config dirs. If no file is found the defaults are used.
    /// If a file exists but cannot be read or parsed, the error is logged and the
    /// defaults are used.
    pub fn load() -> Self {
        use tracing::{error, info};

        let xdg_dirs = match xdg::BaseDirectories::with_prefix("ember") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        let Some(path) = xdg_dirs.find_config_file("config.toml") else {
            info!("No configuration file found, using defaults");
            return Self::default();
        };

        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(&path) {
            Ok(config_str) => match Self::from_toml_str(&config_str) {
                Ok(config) => {
                    info!("Successfully loaded configuration");
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Process-wide configuration loaded from XDG-compliant locations on first use.
    pub static ref CONFIG: EmberConfig = EmberConfig::load();
}
