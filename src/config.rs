//! Client configuration.
//!
//! A connection string selects the database:
//! - `sqlite::memory:` -- private in-memory store, gone on close
//! - `sqlite://<path>` or `sqlite:<path>` -- database file, created when missing
//!
//! [`ClientConfig::from_env`] reads:
//! - `PLUMBERD_CONNECTION_STRING` (default `sqlite::memory:`)
//! - `PLUMBERD_POOL_SIZE` (default 4, ignored for in-memory stores)
//! - `PLUMBERD_CONNECT_TIMEOUT_MS` (default 5000)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const MEMORY: &str = "sqlite::memory:";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported connection string {0:?}, expected sqlite::memory: or sqlite://<path>")]
    UnsupportedConnectionString(String),

    #[error("invalid {var}: {reason}")]
    InvalidVar { var: &'static str, reason: String },

    #[error("pool size must be positive")]
    ZeroPoolSize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub database: Database,
    pub pool_size: u32,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            database: Database::Memory,
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_connection_string(connection_string: &str) -> Result<Self, ConfigError> {
        let database = parse_database(connection_string)?;
        Ok(Self {
            database,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables resolved by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let connection_string =
            lookup("PLUMBERD_CONNECTION_STRING").unwrap_or_else(|| MEMORY.to_owned());
        let mut config = Self::from_connection_string(&connection_string)?;

        if let Some(raw) = lookup("PLUMBERD_POOL_SIZE") {
            config.pool_size = raw
                .parse()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| ConfigError::InvalidVar {
                    var: "PLUMBERD_POOL_SIZE",
                    reason: format!("{raw:?} is not a positive integer"),
                })?;
        }

        if let Some(raw) = lookup("PLUMBERD_CONNECT_TIMEOUT_MS") {
            let millis: u64 = raw.parse().map_err(|e| ConfigError::InvalidVar {
                var: "PLUMBERD_CONNECT_TIMEOUT_MS",
                reason: format!("{e}"),
            })?;
            config.connect_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Checks values that can be set directly on the struct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        Ok(())
    }

    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }
}

fn parse_database(connection_string: &str) -> Result<Database, ConfigError> {
    let unsupported = || ConfigError::UnsupportedConnectionString(connection_string.to_owned());
    if connection_string == MEMORY {
        return Ok(Database::Memory);
    }
    let path = connection_string
        .strip_prefix("sqlite://")
        .or_else(|| connection_string.strip_prefix("sqlite:"))
        .ok_or_else(unsupported)?;
    if path.is_empty() {
        return Err(unsupported());
    }
    Ok(Database::File(PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_memory() {
        let config = ClientConfig::from_connection_string("sqlite::memory:").unwrap();
        assert_eq!(config.database, Database::Memory);
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn parses_file_paths() {
        assert_eq!(
            parse_database("sqlite:///var/lib/plumberd/events.db"),
            Ok(Database::File(PathBuf::from("/var/lib/plumberd/events.db")))
        );
        assert_eq!(
            parse_database("sqlite:events.db"),
            Ok(Database::File(PathBuf::from("events.db")))
        );
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn lookup_defaults_to_memory() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.database, Database::Memory);
    }

    #[test]
    fn lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PLUMBERD_CONNECTION_STRING", "sqlite:///tmp/events.db"),
            ("PLUMBERD_POOL_SIZE", "8"),
            ("PLUMBERD_CONNECT_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.database, Database::File(PathBuf::from("/tmp/events.db")));
        assert_eq!(config.pool_size, 8);
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
    }

    #[test]
    fn lookup_rejects_zero_pool_size() {
        let res = ClientConfig::from_lookup(lookup(&[("PLUMBERD_POOL_SIZE", "0")]));
        assert!(matches!(
            res,
            Err(ConfigError::InvalidVar { var: "PLUMBERD_POOL_SIZE", .. })
        ));
    }

    #[test]
    fn lookup_rejects_non_numeric_values() {
        let res = ClientConfig::from_lookup(lookup(&[("PLUMBERD_POOL_SIZE", "four")]));
        assert!(matches!(
            res,
            Err(ConfigError::InvalidVar { var: "PLUMBERD_POOL_SIZE", .. })
        ));

        let res = ClientConfig::from_lookup(lookup(&[("PLUMBERD_CONNECT_TIMEOUT_MS", "soon")]));
        assert!(matches!(
            res,
            Err(ConfigError::InvalidVar { var: "PLUMBERD_CONNECT_TIMEOUT_MS", .. })
        ));
    }

    #[test]
    fn lookup_rejects_unsupported_connection_string() {
        let res = ClientConfig::from_lookup(lookup(&[(
            "PLUMBERD_CONNECTION_STRING",
            "esdb://localhost:2113",
        )]));
        assert!(matches!(res, Err(ConfigError::UnsupportedConnectionString(_))));
    }

    #[test]
    fn validate_rejects_zero_pool_size() {
        assert_eq!(
            ClientConfig::default().with_pool_size(0).validate(),
            Err(ConfigError::ZeroPoolSize)
        );
        assert_eq!(ClientConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            ClientConfig::from_connection_string("esdb://localhost:2113?tls=false"),
            Err(ConfigError::UnsupportedConnectionString(_))
        ));
        assert!(parse_database("sqlite://").is_err());
    }
}
