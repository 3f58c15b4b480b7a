//! Load [`AppConfig`] from environment variables.

use crate::config::types::{AppConfig, StoreBackend};
use crate::error::ConfigError;
use crate::routes::DEFAULT_MAX_BODY_BYTES;
use crate::store::postgres::DEFAULT_SCHEMA;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(v) => v.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                var: "MAX_BODY_BYTES",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let backend = get("DATA_STORE").unwrap_or_else(|| "memory".into());
        let store = match backend.to_lowercase().as_str() {
            "memory" => StoreBackend::Memory {
                seed_path: get("DATA_SEED_PATH").map(PathBuf::from),
            },
            "postgres" => StoreBackend::Postgres {
                database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                schema: get("DATA_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into()),
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "DATA_STORE",
                    reason: format!("{} (expected memory or postgres)", other),
                })
            }
        };

        Ok(AppConfig {
            bind_addr,
            store,
            max_body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_to_memory_store_on_port_3000() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.store, StoreBackend::Memory { seed_path: None });
        assert_eq!(cfg.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = load(&[("DATA_STORE", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));

        let cfg = load(&[("DATA_STORE", "Postgres"), ("DATABASE_URL", "postgres://localhost/data")]).unwrap();
        assert_eq!(
            cfg.store,
            StoreBackend::Postgres {
                database_url: "postgres://localhost/data".into(),
                schema: "data_api".into(),
            }
        );
    }

    #[test]
    fn seed_path_and_overrides_are_read() {
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATA_SEED_PATH", "seed.json"),
            ("MAX_BODY_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(
            cfg.store,
            StoreBackend::Memory {
                seed_path: Some(PathBuf::from("seed.json"))
            }
        );
        assert_eq!(cfg.max_body_bytes, 2048);
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            load(&[("BIND_ADDR", "nope")]),
            Err(ConfigError::InvalidValue { var: "BIND_ADDR", .. })
        ));
        assert!(matches!(
            load(&[("MAX_BODY_BYTES", "-1")]),
            Err(ConfigError::InvalidValue { var: "MAX_BODY_BYTES", .. })
        ));
        assert!(matches!(
            load(&[("DATA_STORE", "redis")]),
            Err(ConfigError::InvalidValue { var: "DATA_STORE", .. })
        ));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = load(&[("BIND_ADDR", "  "), ("DATA_STORE", "")]).unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.store, StoreBackend::default());
    }
}
