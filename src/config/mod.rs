use serde::{Deserialize, Serialize};
use std::env;

/// Immutable process configuration, built once at startup and passed to whoever needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(port) = var("CLOTHING_API_PORT").or_else(|| var("PORT")).and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(v) = var("CLOTHING_STORAGE") {
            self.server.storage = match v.to_ascii_lowercase().as_str() {
                "memory" | "in-memory" => StorageBackend::Memory,
                _ => StorageBackend::Postgres,
            };
        }

        // Database overrides; MONGO_URL is honoured for deployments carrying the old variable
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("DATABASE_URL").or_else(|| non_empty("MONGO_URL")) {
            self.database.url = Some(v);
        }
        if let Some(v) = var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Some(v) = var("API_KEY").filter(|v| !v.is_empty()) {
            self.security.api_key = Some(v);
        }
        if let Some(v) = var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        self
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                storage: StorageBackend::Postgres,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                api_key: None,
                enable_cors: true,
                // Empty origin list means permissive CORS
                cors_origins: vec![],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            ..Self::development()
        }
    }

    /// Configuration for tests and embedded use: in-memory storage and a fixed key.
    pub fn for_memory(api_key: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.server.storage = StorageBackend::Memory;
        config.security.api_key = Some(api_key.into());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.storage, StorageBackend::Postgres);
        assert!(config.database.url.is_none());
        assert!(config.security.api_key.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::development().with_overrides(vars(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/clothing"),
            ("API_KEY", "secret"),
            ("CLOTHING_STORAGE", "memory"),
            ("SECURITY_CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/clothing"));
        assert_eq!(config.security.api_key.as_deref(), Some("secret"));
        assert_eq!(config.server.storage, StorageBackend::Memory);
        assert_eq!(config.security.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn specific_port_wins_and_bad_values_are_ignored() {
        let config = AppConfig::development().with_overrides(vars(&[
            ("PORT", "8080"),
            ("CLOTHING_API_PORT", "9090"),
            ("DATABASE_MAX_CONNECTIONS", "lots"),
        ]));
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.max_connections, 10);
    }

    #[test]
    fn legacy_mongo_url_and_empty_values() {
        let config = AppConfig::development().with_overrides(vars(&[
            ("MONGO_URL", "postgres://legacy/clothing"),
            ("API_KEY", ""),
        ]));
        assert_eq!(config.database.url.as_deref(), Some("postgres://legacy/clothing"));
        assert!(config.security.api_key.is_none());
    }
}
