//! Postgres bootstrap: the startup gate between "process launched" and
//! "ready to serve".
//!
//! Strict sequence, each step a hard precondition for the next:
//! validate configuration, build the pool, apply pending migrations,
//! verify the live schema against the declared entities. Every failure
//! is startup-fatal; nothing here retries.

use std::str::FromStr;

use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseConnection, SqlxPostgresConnector};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::{ConfigSource, PgConfig};
use crate::error::BootstrapError;
use crate::schema_check;

/// Fixed upper bound on concurrently checked-out connections.
pub const MAX_POOL_SIZE: u32 = 3;

/// Handles returned by a successful bootstrap. Callers thread these
/// explicitly; nothing is registered process-wide.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct PostgresHandle {
    /// The underlying sqlx pool, for consumers that bypass the ORM.
    pub pool: PgPool,
    /// ORM connection over the same pool.
    pub orm: DatabaseConnection,
}

/// Connect to Postgres and gate startup on a migrated, drift-free
/// schema.
///
/// Configuration is read from `source` under the keys `postgres.url`,
/// `postgres.user` and `postgres.password` — all required, no
/// defaults. The returned pool is bounded at [`MAX_POOL_SIZE`]
/// connections, each opened at REPEATABLE READ isolation; consumers
/// demarcate transactions explicitly via [`crate::txn::with_txn`].
pub async fn connect_to_postgres(
    source: &impl ConfigSource,
) -> Result<PostgresHandle, BootstrapError> {
    let config = PgConfig::load(source)?;
    let pool = build_pool(&config)?;
    let orm = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());

    apply_pending_migrations(&orm).await?;
    verify_schema(&orm).await?;

    info!("postgres bootstrap complete");
    Ok(PostgresHandle { pool, orm })
}

/// Build the connection pool without touching the network.
///
/// Parameter-shape errors surface here as
/// [`BootstrapError::PoolConfiguration`]; reachability errors surface
/// later, on first checkout. A leading `jdbc:` scheme prefix is
/// tolerated so JDBC-style URLs from existing config files keep
/// working.
pub fn build_pool(config: &PgConfig) -> Result<PgPool, BootstrapError> {
    let url = config.url.strip_prefix("jdbc:").unwrap_or(&config.url);

    let options = PgConnectOptions::from_str(url)
        .map_err(|e| BootstrapError::PoolConfiguration {
            detail: e.to_string(),
        })?
        .username(&config.user)
        .password(&config.password);

    let pool = PgPoolOptions::new()
        .max_connections(MAX_POOL_SIZE)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                // Every pooled session reads at REPEATABLE READ. There is
                // no auto-commit to disable in Postgres wire terms; the
                // equivalent contract is that all work goes through
                // explicitly demarcated transactions (see txn::with_txn).
                sqlx::query(
                    "SET SESSION CHARACTERISTICS AS TRANSACTION ISOLATION LEVEL REPEATABLE READ",
                )
                .execute(&mut *conn)
                .await?;
                Ok(())
            })
        })
        .connect_lazy_with(options);

    Ok(pool)
}

/// Apply pending migrations one at a time, in version order, so a
/// failure can name the exact script that broke.
///
/// The ledger lives in the target database (`seaql_migrations`). A
/// ledger left inconsistent by a prior partial run is an operator
/// problem, not something to retry past.
async fn apply_pending_migrations(orm: &DatabaseConnection) -> Result<(), BootstrapError> {
    let pending = Migrator::get_pending_migrations(orm)
        .await
        .map_err(|e| BootstrapError::Migration {
            script: "seaql_migrations".to_string(),
            detail: format!("failed to read migration ledger: {e}"),
        })?;

    if pending.is_empty() {
        info!("no pending migrations");
        return Ok(());
    }

    for migration in &pending {
        let script = migration.name().to_string();
        Migrator::up(orm, Some(1))
            .await
            .map_err(|e| BootstrapError::Migration {
                script: script.clone(),
                detail: e.to_string(),
            })?;
        info!(script = %script, "applied migration");
    }

    Ok(())
}

/// Migrations and entity declarations are both hand-authored; nothing
/// keeps them in sync except this check.
async fn verify_schema(orm: &DatabaseConnection) -> Result<(), BootstrapError> {
    let statements = schema_check::missing_statements(orm)
        .await
        .map_err(|e| BootstrapError::Db(e.to_string()))?;

    if statements.is_empty() {
        Ok(())
    } else {
        Err(BootstrapError::SchemaDrift { statements })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{build_pool, connect_to_postgres, MAX_POOL_SIZE};
    use crate::config::{keys, PgConfig};
    use crate::error::BootstrapError;

    fn config_with_url(url: &str) -> PgConfig {
        PgConfig {
            url: url.to_string(),
            user: "postgres".to_string(),
            password: "example".to_string(),
        }
    }

    #[test]
    fn build_pool_is_lazy_and_bounded() {
        // Unreachable host: must still succeed, because no I/O happens
        // until the first checkout.
        let pool = build_pool(&config_with_url("postgresql://nowhere.invalid:5432/app")).unwrap();
        assert_eq!(pool.options().get_max_connections(), MAX_POOL_SIZE);
    }

    #[test]
    fn build_pool_accepts_jdbc_prefixed_urls() {
        let pool = build_pool(&config_with_url("jdbc:postgresql://localhost:5432/testdb"));
        assert!(pool.is_ok());
    }

    #[test]
    fn build_pool_rejects_malformed_urls() {
        let err = build_pool(&config_with_url("definitely not a url")).unwrap_err();
        assert!(matches!(err, BootstrapError::PoolConfiguration { .. }));
    }

    #[tokio::test]
    async fn bootstrap_fails_on_missing_key_before_any_pool_exists() {
        let source: HashMap<String, String> = HashMap::from([
            (
                keys::POSTGRES_URL.to_string(),
                "postgresql://localhost:5432/testdb".to_string(),
            ),
            (keys::POSTGRES_USER.to_string(), "postgres".to_string()),
        ]);

        let err = connect_to_postgres(&source).await.unwrap_err();
        match err {
            BootstrapError::MissingConfigurationProperty { key } => {
                assert_eq!(key, keys::POSTGRES_PASSWORD);
            }
            other => panic!("expected MissingConfigurationProperty, got: {other:?}"),
        }
    }
}
