// packages/engine/src/utils/config.rs
//! Layered configuration
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults (the mock flag default is captured at build time from
//!    `BRANDVIEW_USE_MOCK`)
//! 2. Optional `config/mock.{toml,yaml,json}` file
//! 3. Environment variables prefixed `BRANDVIEW`, nested with `__`
//!    (e.g. `BRANDVIEW__SERVER__PORT=8080`)

use crate::utils::errors::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default configuration file stem, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config/mock";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BRANDVIEW";

/// Build-time default for the raw mock flag
const BUILD_USE_MOCK: Option<&str> = option_env!("BRANDVIEW_USE_MOCK");

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub mode: ModeConfig,
    pub server: ServerConfig,
    pub interception: InterceptionConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

/// Raw mode signal. Only [`crate::mode::Mode::resolve`] interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    pub use_mock: Option<String>,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            use_mock: BUILD_USE_MOCK.map(str::to_string),
        }
    }
}

/// Fallback route server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Interception runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterceptionConfig {
    /// Allow the runtime to install at all
    pub enabled: bool,

    /// Log every intercepted request at debug level
    pub log_requests: bool,
}

impl Default for InterceptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_requests: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Address for the Prometheus scrape endpoint; disabled when unset
    pub prometheus_addr: Option<String>,
}

impl MockConfig {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self> {
        Self::build(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from an explicit file (extension selects the format) and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref())
    }

    fn build(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);

        let settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: MockConfig = settings.try_deserialize()?;
        Ok(config)
    }

    /// `host:port` of the fallback server
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
