//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `rest.toml` in the working directory unless `WEDGE_REST_CONFIG`
//! names another file. Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use wedge_adapter_virtual::VirtualConfig;

use crate::transport::TlsFiles;

const DEFAULT_PATH: &str = "rest.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listener settings.
    pub listen: ListenConfig,
    /// TLS material, only read when `listen.ssl` is set.
    pub ssl: SslConfig,
    /// Console and file logging.
    pub logging: LoggingConfig,
    /// Options of the simulated board.
    pub platform: VirtualConfig,
}

/// Listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Address to bind to. `::` accepts both IPv6 and IPv4-mapped peers.
    pub host: String,
    /// TCP port. There is no default; the daemon refuses to start without
    /// one.
    pub port: Option<u16>,
    /// Serve over TLS.
    pub ssl: bool,
    /// Worker thread count, tokio's default when unset.
    pub workers: Option<usize>,
}

/// Certificate and key paths.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    /// PEM certificate chain.
    pub certificate: Option<PathBuf>,
    /// PEM private key.
    pub key: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Console filter directive (`RUST_LOG` syntax).
    pub filter: String,
    /// Log file receiving access and error lines.
    pub file: PathBuf,
    /// Size at which the log file is rotated.
    pub max_bytes: u64,
    /// Number of rotated files kept next to the live one.
    pub backups: u32,
    /// Filter directive for the file sink.
    pub file_filter: String,
}

impl Config {
    /// Load configuration from `WEDGE_REST_CONFIG` or `rest.toml`, then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly named
    /// file does not exist, or if the result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("WEDGE_REST_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path), true)?,
            Err(_) => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(port) = var("WEDGE_REST_PORT").and_then(|val| val.parse().ok()) {
            self.listen.port = Some(port);
        }
        if let Some(ssl) = var("WEDGE_REST_SSL").and_then(|val| parse_flag(&val)) {
            self.listen.ssl = ssl;
        }
        if let Some(val) = var("WEDGE_REST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.listen.port {
            None => {
                return Err(ConfigError::Validation(
                    "listen.port is required".to_string(),
                ));
            }
            Some(0) => {
                return Err(ConfigError::Validation("port must be non-zero".to_string()));
            }
            Some(_) => {}
        }
        if self.listen.workers == Some(0) {
            return Err(ConfigError::Validation(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.listen.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "host {:?} is not an IP address",
                self.listen.host
            )));
        }
        if self.listen.ssl && (self.ssl.certificate.is_none() || self.ssl.key.is_none()) {
            return Err(ConfigError::Validation(
                "ssl requires both ssl.certificate and ssl.key".to_string(),
            ));
        }
        if self.logging.max_bytes == 0 {
            return Err(ConfigError::Validation(
                "logging.max_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns an error if `listen.host` is not an IP address or
    /// `listen.port` is unset.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.listen.host.parse().map_err(|_| {
            ConfigError::Validation(format!("host {:?} is not an IP address", self.listen.host))
        })?;
        let port = self
            .listen
            .port
            .ok_or_else(|| ConfigError::Validation("listen.port is required".to_string()))?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Certificate and key paths when TLS is enabled.
    #[must_use]
    pub fn tls_files(&self) -> Option<TlsFiles> {
        if !self.listen.ssl {
            return None;
        }
        Some(TlsFiles {
            certificate: self.ssl.certificate.clone()?,
            key: self.ssl.key.clone()?,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "::".to_string(),
            port: None,
            ssl: false,
            workers: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wedge_restd=info,wedge_rest=info,wedge_adapter_http_axum=info,tower_http=info"
                .to_string(),
            file: PathBuf::from("/tmp/rest.log"),
            max_bytes: 1_048_576,
            backups: 3,
            file_filter: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
