use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dataset: DatasetConfig,
    pub auth: AuthConfig,
    pub registry: RegistryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let loads_path = env::var("LOADS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/loads.json"));

        let api_key = env::var("API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let registry = RegistryConfig::from_env()?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig { loads_path },
            auth: AuthConfig { api_key },
            registry,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the load dataset read once at startup.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub loads_path: PathBuf,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub api_key: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

pub const DEFAULT_FMCSA_BASE_URL: &str = "https://mobile.fmcsa.dot.gov/qc/services";

/// Which carrier registry backs `/api/carriers/verify`.
#[derive(Clone, PartialEq, Eq)]
pub enum RegistryConfig {
    Static,
    Fmcsa { base_url: String, web_key: String },
}

impl RegistryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let kind = env::var("CARRIER_REGISTRY").unwrap_or_else(|_| "static".to_string());
        match kind.trim().to_ascii_lowercase().as_str() {
            "static" | "mock" => Ok(Self::Static),
            "fmcsa" => {
                let web_key = env::var("FMCSA_WEB_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or(ConfigError::MissingFmcsaKey)?;
                let base_url = env::var("FMCSA_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_FMCSA_BASE_URL.to_string());
                Ok(Self::Fmcsa { base_url, web_key })
            }
            other => Err(ConfigError::UnknownRegistry(other.to_string())),
        }
    }
}

impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "Static"),
            Self::Fmcsa { base_url, .. } => f
                .debug_struct("Fmcsa")
                .field("base_url", base_url)
                .field("web_key", &"<redacted>")
                .finish(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownRegistry(String),
    MissingFmcsaKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownRegistry(kind) => {
                write!(f, "CARRIER_REGISTRY '{kind}' is not one of: static, fmcsa")
            }
            ConfigError::MissingFmcsaKey => {
                write!(f, "FMCSA_WEB_KEY is required when CARRIER_REGISTRY=fmcsa")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::UnknownRegistry(_)
            | ConfigError::MissingFmcsaKey => None,
        }
    }
}
