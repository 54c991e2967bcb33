use std::collections::HashMap;
use std::env;

use crate::error::BootstrapError;

/// Canonical configuration key names.
pub mod keys {
    pub const POSTGRES_URL: &str = "postgres.url";
    pub const POSTGRES_USER: &str = "postgres.user";
    pub const POSTGRES_PASSWORD: &str = "postgres.password";

    pub fn all_required() -> [&'static str; 3] {
        [POSTGRES_URL, POSTGRES_USER, POSTGRES_PASSWORD]
    }
}

/// A string-keyed configuration provider.
///
/// Keys use dotted names (`postgres.url`). How a key is resolved is up
/// to the implementation; the environment-backed source maps
/// `postgres.url` to `POSTGRES_URL`.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from process environment variables.
///
/// Environment variables must be set by the runtime environment:
/// - Docker: via docker-compose env_file or docker run --env-file
/// - Local dev: via a .env file loaded by the binary
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        let var = key.replace('.', "_").to_uppercase();
        env::var(var).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Connection parameters for the Postgres bootstrap. Immutable once
/// read; there are no defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgConfig {
    pub url: String,
    pub user: String,
    pub password: String,
}

impl PgConfig {
    /// Load and validate the three required keys.
    ///
    /// Runs before any network I/O, so a missing key is reported as a
    /// configuration error, never as a connectivity error.
    pub fn load(source: &impl ConfigSource) -> Result<Self, BootstrapError> {
        let url = require(source, keys::POSTGRES_URL)?;
        let user = require(source, keys::POSTGRES_USER)?;
        let password = require(source, keys::POSTGRES_PASSWORD)?;
        Ok(Self {
            url,
            user,
            password,
        })
    }
}

fn require(source: &impl ConfigSource, key: &str) -> Result<String, BootstrapError> {
    source
        .get(key)
        .ok_or_else(|| BootstrapError::MissingConfigurationProperty {
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env;

    use serial_test::serial;

    use super::{keys, ConfigSource, EnvSource, PgConfig};
    use crate::error::BootstrapError;

    fn full_source() -> HashMap<String, String> {
        HashMap::from([
            (
                keys::POSTGRES_URL.to_string(),
                "postgresql://localhost:5432/testdb".to_string(),
            ),
            (keys::POSTGRES_USER.to_string(), "postgres".to_string()),
            (keys::POSTGRES_PASSWORD.to_string(), "example".to_string()),
        ])
    }

    #[test]
    fn load_succeeds_with_all_keys_present() {
        let config = PgConfig::load(&full_source()).unwrap();
        assert_eq!(config.url, "postgresql://localhost:5432/testdb");
        assert_eq!(config.user, "postgres");
        assert_eq!(config.password, "example");
    }

    #[test]
    fn load_names_exactly_the_missing_key() {
        for missing in keys::all_required() {
            let mut source = full_source();
            source.remove(missing);

            let err = PgConfig::load(&source).unwrap_err();
            match err {
                BootstrapError::MissingConfigurationProperty { ref key } => {
                    assert_eq!(key, missing);
                }
                other => panic!("expected MissingConfigurationProperty, got: {other:?}"),
            }
            assert!(err.to_string().contains(missing));
        }
    }

    #[test]
    #[serial]
    fn env_source_maps_dotted_keys_to_env_vars() {
        env::set_var("POSTGRES_URL", "postgresql://db:5432/app");
        assert_eq!(
            EnvSource.get(keys::POSTGRES_URL).as_deref(),
            Some("postgresql://db:5432/app")
        );
        env::remove_var("POSTGRES_URL");
        assert_eq!(EnvSource.get(keys::POSTGRES_URL), None);
    }
}
