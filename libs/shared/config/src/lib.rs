use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the cells persist their records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub api_token: String,
    pub host: IpAddr,
    pub port: u16,
    pub database_max_connections: u32,
    pub storage_backend: StorageBackend,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using empty value");
                    String::new()
                }),
            api_token: env::var("TOKEN")
                .unwrap_or_else(|_| {
                    warn!("TOKEN not set, write operations will be rejected");
                    String::new()
                }),
            host: parse_var("HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: parse_var("PORT", DEFAULT_PORT),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            storage_backend: parse_var("STORAGE_BACKEND", StorageBackend::Postgres),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_token.is_empty()
            && (self.storage_backend == StorageBackend::Memory || !self.database_url.is_empty())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {:?}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parses_known_names() {
        assert_eq!("postgres".parse::<StorageBackend>(), Ok(StorageBackend::Postgres));
        assert_eq!(" Memory ".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("redis".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn memory_backend_does_not_need_database_url() {
        let config = AppConfig {
            database_url: String::new(),
            api_token: "secret".to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            database_max_connections: 1,
            storage_backend: StorageBackend::Memory,
        };
        assert!(config.is_configured());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn missing_token_is_not_configured() {
        let config = AppConfig {
            database_url: "postgres://localhost/clinic".to_string(),
            api_token: String::new(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            database_max_connections: 5,
            storage_backend: StorageBackend::Postgres,
        };
        assert!(!config.is_configured());
    }
}
