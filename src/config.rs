use crate::domains::coverage::DEFAULT_SAME_ANGLE_TOLERANCE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variables with this prefix override file values,
/// e.g. `COVERAGE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "COVERAGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub planning: PlanningConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub favicon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Headings closer than this (radians) count as the same segment.
    pub same_angle_tolerance: f64,
    pub angle_step_deg: f64,
    pub turn_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Optional log file written through fast_log in addition to tracing output.
    pub file: Option<String>,
    pub buffer_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            favicon_url: "https://fields2cover.github.io/_static/favicon.ico".to_string(),
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            same_angle_tolerance: DEFAULT_SAME_ANGLE_TOLERANCE,
            angle_step_deg: 1.0,
            turn_step: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            buffer_capacity: 1024,
        }
    }
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Defaults, then the TOML file at `path` if it exists, then `COVERAGE__*`
    /// environment variables.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut builder = ::config::Config::builder().add_source(::config::Config::try_from(&Config::default())?);
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()).required(false));
        }
        let layered = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(layered.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
