use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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

        let repo =
            env::var("WORKBANK_DATASET_REPO").unwrap_or_else(|_| DatasetConfig::DEFAULT_REPO.to_string());
        let fetch_timeout = duration_from_env(
            "WORKBANK_FETCH_TIMEOUT_SECS",
            DatasetConfig::DEFAULT_FETCH_TIMEOUT,
        )?;
        let cache_ttl =
            duration_from_env("WORKBANK_CACHE_TTL_SECS", DatasetConfig::DEFAULT_CACHE_TTL)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig {
                repo,
                fetch_timeout,
                cache_ttl,
            },
        })
    }
}

fn duration_from_env(key: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidDuration { key }),
        Err(_) => Ok(default),
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the survey tables come from and how long a remote fetch is reused.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub repo: String,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
}

impl DatasetConfig {
    pub const DEFAULT_REPO: &'static str = "SALT-NLP/WORKBank";
    pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            repo: Self::DEFAULT_REPO.to_string(),
            fetch_timeout: Self::DEFAULT_FETCH_TIMEOUT,
            cache_ttl: Self::DEFAULT_CACHE_TTL,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDuration { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDuration { key } => {
                write!(f, "{} must be a whole number of seconds", key)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidDuration { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("WORKBANK_DATASET_REPO");
        env::remove_var("WORKBANK_FETCH_TIMEOUT_SECS");
        env::remove_var("WORKBANK_CACHE_TTL_SECS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.dataset.repo, DatasetConfig::DEFAULT_REPO);
        assert_eq!(config.dataset.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn dataset_overrides_are_read() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WORKBANK_DATASET_REPO", "example/mirror");
        env::set_var("WORKBANK_CACHE_TTL_SECS", "120");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.dataset.repo, "example/mirror");
        assert_eq!(config.dataset.cache_ttl, Duration::from_secs(120));
        assert_eq!(
            config.dataset.fetch_timeout,
            DatasetConfig::DEFAULT_FETCH_TIMEOUT
        );
    }

    #[test]
    fn rejects_non_numeric_cache_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WORKBANK_CACHE_TTL_SECS", "an hour");
        let error = AppConfig::load().expect_err("config must reject bad ttl");
        assert!(matches!(
            error,
            ConfigError::InvalidDuration {
                key: "WORKBANK_CACHE_TTL_SECS"
            }
        ));
    }
}
