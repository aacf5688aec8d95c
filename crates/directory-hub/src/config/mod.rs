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

/// Which addressing scheme owns the canonical URL for a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Subdomain,
    Subdirectory,
}

impl AddressingMode {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "subdomain" | "host" => Self::Subdomain,
            _ => Self::Subdirectory,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub routing: RoutingConfig,
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let primary_mode = AddressingMode::from_str(
            &env::var("DIRECTORY_PRIMARY_MODE").unwrap_or_else(|_| "subdirectory".to_string()),
        );
        let subdirectory_base = sanitize_base_prefix(
            &env::var("DIRECTORY_SUBDIRECTORY_BASE").unwrap_or_else(|_| "/directories".to_string()),
        );
        let subdomain_root = sanitize_root_domain(
            &env::var("DIRECTORY_SUBDOMAIN_ROOT").unwrap_or_else(|_| "localhost".to_string()),
        );
        let public_protocol =
            env::var("DIRECTORY_PUBLIC_PROTOCOL").unwrap_or_else(|_| "https".to_string());

        let ttl_seconds = env::var("CATALOG_TTL_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<i64>()
            .ok()
            .filter(|ttl| *ttl >= 0)
            .ok_or(ConfigError::InvalidCatalogTtl)?;
        let file = env::var("CATALOG_FILE").ok().map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            routing: RoutingConfig {
                primary_mode,
                subdirectory_base,
                subdomain_root,
                public_protocol,
            },
            catalog: CatalogConfig { ttl_seconds, file },
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

/// Static routing configuration shared by the matcher and resolver.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub primary_mode: AddressingMode,
    /// Path prefix that owns subdirectory addressing, e.g. `/directories`.
    /// An empty string mounts directories at the host root.
    pub subdirectory_base: String,
    /// Bare root domain whose labels carry subdomain addressing.
    pub subdomain_root: String,
    /// Scheme used when assembling absolute canonical URLs.
    pub public_protocol: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            primary_mode: AddressingMode::Subdirectory,
            subdirectory_base: "/directories".to_string(),
            subdomain_root: "localhost".to_string(),
            public_protocol: "https".to_string(),
        }
    }
}

/// Catalog refresh controls.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub ttl_seconds: i64,
    pub file: Option<PathBuf>,
}

/// Collapses a configured base prefix to `""` or `/segment(/segment)*`.
fn sanitize_base_prefix(raw: &str) -> String {
    let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

fn sanitize_root_domain(raw: &str) -> String {
    raw.trim()
        .trim_matches('.')
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .to_ascii_lowercase()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCatalogTtl,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCatalogTtl => {
                write!(f, "CATALOG_TTL_SECONDS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidCatalogTtl => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
