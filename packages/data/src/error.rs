use sea_orm::DbErr;
use thiserror::Error;

/// Fatal startup errors raised by the Postgres bootstrap sequence.
///
/// None of these are retried internally; a backend serving traffic
/// against an unmigrated or drifted schema is worse than one that
/// refuses to start.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required configuration key was absent. Raised before any
    /// connection attempt is made.
    #[error(
        "missing required configuration property `{key}`; \
         set it in the environment or a .env file"
    )]
    MissingConfigurationProperty { key: String },

    /// The connection parameters have an invalid shape, independent of
    /// whether the database is reachable.
    #[error("invalid connection pool configuration: {detail}")]
    PoolConfiguration { detail: String },

    /// A migration script failed to apply, or the migration ledger
    /// could not be read. Carries the identifier of the failing script.
    #[error("migration failure in `{script}`: {detail}")]
    Migration { script: String, detail: String },

    /// The live schema does not match the declared entity mappings
    /// after migrations ran. The statements listed would reconcile the
    /// two; add them as a migration script with a conforming name.
    #[error(
        "schema drift detected; statements required to actualize the schema:\n{}",
        .statements.join("\n")
    )]
    SchemaDrift { statements: Vec<String> },

    /// The database failed while verifying the schema.
    #[error("database error during startup: {0}")]
    Db(String),
}

/// Errors raised by the data layer after startup.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("{entity} with id `{id}` not found")]
    NotFound { entity: &'static str, id: String },
}

impl DataError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BootstrapError;

    #[test]
    fn schema_drift_lists_every_statement_newline_joined() {
        let err = BootstrapError::SchemaDrift {
            statements: vec![
                r#"CREATE TABLE "items" ("id" serial)"#.to_string(),
                r#"ALTER TABLE "items" ADD COLUMN "name" varchar"#.to_string(),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("schema drift"));
        assert!(message.contains("CREATE TABLE \"items\""));
        assert!(message.contains("\nALTER TABLE \"items\""));
    }

    #[test]
    fn migration_failure_identifies_the_script() {
        let err = BootstrapError::Migration {
            script: "m20240101_000001_init".to_string(),
            detail: "syntax error".to_string(),
        };
        assert!(err.to_string().contains("m20240101_000001_init"));
    }
}
