//! Configuration for gra-daemon

use gra_core::ComputeDevice;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::DaemonError;

/// Whether this build ships accelerator kernels. The optimizer only runs on CPU.
pub const ACCELERATOR_AVAILABLE: bool = false;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Compute device selection
    #[serde(default)]
    pub compute: ComputeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Wall-clock budget for one simulation, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            enable_cors: true,
            request_timeout_secs: default_request_timeout(),
            max_body_size: default_max_body_size(),
        }
    }
}

/// Requested compute device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// Accelerator when available, CPU otherwise
    #[default]
    Auto,
    Cpu,
    Accelerator,
}

impl std::str::FromStr for DevicePreference {
    type Err = DaemonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(DevicePreference::Auto),
            "cpu" => Ok(DevicePreference::Cpu),
            "accelerator" | "gpu" | "cuda" => Ok(DevicePreference::Accelerator),
            other => Err(DaemonError::Config(format!(
                "Unknown compute device: {}",
                other
            ))),
        }
    }
}

/// Compute configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputeConfig {
    #[serde(default)]
    pub device: DevicePreference,
}

impl ComputeConfig {
    /// Pick the device handed to the optimizer.
    pub fn resolve(&self) -> Result<ComputeDevice, DaemonError> {
        match self.device {
            DevicePreference::Cpu => Ok(ComputeDevice::Cpu),
            DevicePreference::Auto if ACCELERATOR_AVAILABLE => Ok(ComputeDevice::Accelerator),
            DevicePreference::Auto => Ok(ComputeDevice::Cpu),
            DevicePreference::Accelerator if ACCELERATOR_AVAILABLE => {
                Ok(ComputeDevice::Accelerator)
            }
            DevicePreference::Accelerator => Err(DaemonError::Config(
                "Accelerator requested but none is available".to_string(),
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// Default value helpers
fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_size() -> usize {
    64 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        // Add file configuration if provided
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Add environment variables with GRA_ prefix, e.g. GRA_SERVER__LISTEN_ADDR
        builder = builder.add_source(
            config::Environment::with_prefix("GRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
