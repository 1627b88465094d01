use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::LedgerSettings;
use crate::error::{AppError, AppResult};
use domain::account::AccountId;
use domain::ledger::DEFAULT_BALANCE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub store: StoreConfig,
    pub ledger: LedgerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<SecretString>,
    pub database: u32,
    pub pool_max_size: usize,
    pub connect_timeout_ms: u64,
    pub reuse_connections: bool,
    pub namespace: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct RedisConfigHelper {
    host: String,
    port: u16,
    password: Option<String>,
    database: u32,
    pool_max_size: usize,
    connect_timeout_ms: u64,
    reuse_connections: bool,
    namespace: Option<String>,
}

impl Serialize for RedisConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RedisConfigHelper {
            host: self.host.clone(),
            port: self.port,
            password: self.password.as_ref().map(|_| "[REDACTED]".to_string()),
            database: self.database,
            pool_max_size: self.pool_max_size,
            connect_timeout_ms: self.connect_timeout_ms,
            reuse_connections: self.reuse_connections,
            namespace: self.namespace.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RedisConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = RedisConfigHelper::deserialize(deserializer)?;
        Ok(RedisConfig {
            host: helper.host,
            port: helper.port,
            password: helper.password.map(SecretString::from),
            database: helper.database,
            pool_max_size: helper.pool_max_size,
            connect_timeout_ms: helper.connect_timeout_ms,
            reuse_connections: helper.reuse_connections,
            namespace: helper.namespace,
        })
    }
}

impl RedisConfig {
    pub fn redis_url(&self) -> AppResult<String> {
        let mut url = self.base_url()?;
        if let Some(password) = &self.password {
            url.set_password(Some(password.expose_secret()))
                .map_err(|()| AppError::ConfigError {
                    message: "redis password cannot be set on URL".to_string(),
                })?;
        }
        Ok(url.to_string())
    }

    #[must_use]
    pub fn redacted_url(&self) -> String {
        match self.base_url() {
            Ok(mut url) => {
                if self.password.is_some() {
                    url.set_password(Some("***")).ok();
                }
                url.to_string()
            }
            Err(_) => "[INVALID_URL]".to_string(),
        }
    }

    fn base_url(&self) -> AppResult<Url> {
        let raw = format!("redis://{}:{}/{}", self.host, self.port, self.database);
        Url::parse(&raw).map_err(|e| AppError::ConfigError {
            message: format!("Invalid redis endpoint {}:{}: {e}", self.host, self.port),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    #[serde(rename = "redis")]
    Redis,
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub default_balance: i64,
    pub default_account: String,
    pub default_charge: i64,
}

impl LedgerConfig {
    #[must_use]
    pub fn settings(&self) -> LedgerSettings {
        LedgerSettings {
            default_balance: self.default_balance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
                cors_origin: None,
            },
            redis: RedisConfig {
                host: "localhost".to_string(),
                port: 6379,
                password: None,
                database: 0,
                pool_max_size: 16,
                connect_timeout_ms: 1000,
                reuse_connections: false,
                namespace: None,
            },
            store: StoreConfig {
                backend: StoreBackend::Redis,
            },
            ledger: LedgerConfig {
                default_balance: DEFAULT_BALANCE,
                default_account: "account".to_string(),
                default_charge: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "server host cannot be empty".to_string(),
            });
        }

        if self.redis.host.trim().is_empty() {
            return Err(AppError::ConfigError {
                message: "redis host cannot be empty".to_string(),
            });
        }

        if self.redis.port == 0 {
            return Err(AppError::ConfigError {
                message: "redis port must be greater than 0".to_string(),
            });
        }

        if self.redis.pool_max_size == 0 {
            return Err(AppError::ConfigError {
                message: "redis pool_max_size must be greater than 0".to_string(),
            });
        }

        if self.redis.connect_timeout_ms == 0 {
            return Err(AppError::ConfigError {
                message: "redis connect_timeout_ms must be greater than 0".to_string(),
            });
        }

        if let Some(namespace) = &self.redis.namespace {
            if namespace.trim().is_empty() {
                return Err(AppError::ConfigError {
                    message: "redis namespace cannot be blank when set".to_string(),
                });
            }
        }

        self.redis.redis_url()?;

        if self.ledger.default_balance < 0 {
            return Err(AppError::ConfigError {
                message: "default_balance must be greater than or equal to 0".to_string(),
            });
        }

        if self.ledger.default_charge < 0 {
            return Err(AppError::ConfigError {
                message: "default_charge must be greater than or equal to 0".to_string(),
            });
        }

        AccountId::parse(self.ledger.default_account.as_str()).map_err(|e| {
            AppError::ConfigError {
                message: format!("default_account is not a valid account: {e}"),
            }
        })?;

        Ok(())
    }

    #[must_use]
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.ledger.default_balance, 100);
        assert_eq!(config.ledger.default_charge, 10);
        assert_eq!(config.ledger.default_account, "account");
    }

    #[test]
    fn redis_url_defaults_to_localhost() {
        let config = Config::default();
        assert_eq!(
            config.redis.redis_url().unwrap(),
            "redis://localhost:6379/0"
        );
    }

    #[test]
    fn password_is_redacted_for_logging() {
        let mut config = Config::default();
        config.redis.password = Some(SecretString::from("hunter2"));

        assert_eq!(
            config.redis.redis_url().unwrap(),
            "redis://:hunter2@localhost:6379/0"
        );
        assert_eq!(config.redis.redacted_url(), "redis://:***@localhost:6379/0");
    }

    #[test]
    fn rejects_negative_default_balance() {
        let mut config = Config::default();
        config.ledger.default_balance = -1;
        assert!(matches!(
            config.validate(),
            Err(AppError::ConfigError { .. })
        ));
    }

    #[test]
    fn rejects_empty_default_account() {
        let mut config = Config::default();
        config.ledger.default_account = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_pool_size() {
        let mut config = Config::default();
        config.redis.pool_max_size = 0;
        assert!(config.validate().is_err());
    }
}
