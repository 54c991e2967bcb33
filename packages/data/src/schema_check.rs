//! Schema completeness check: the DDL still missing after migrations.
//!
//! For every declared entity, compares the live table in
//! `information_schema` against the entity's column set and collects
//! the statements required to reconcile them. Columns that exist only
//! in the database are ignored; the check is for completeness of the
//! mapping, not strict equality.

use std::collections::HashSet;

use sea_orm::sea_query::{Alias, Table};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, IdenStatic, Iterable,
    Schema, Statement, TransactionTrait,
};

use crate::entities;

/// Compute the DDL statements required to actualize the live schema.
///
/// Runs inside a single transaction so all tables are inspected against
/// one consistent snapshot. An empty result means no drift.
pub async fn missing_statements(db: &DatabaseConnection) -> Result<Vec<String>, DbErr> {
    let txn = db.begin().await?;
    let mut missing = Vec::new();

    diff_entity(&txn, entities::Items, &mut missing).await?;

    txn.commit().await?;
    Ok(missing)
}

async fn diff_entity<C, E>(conn: &C, entity: E, missing: &mut Vec<String>) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = conn.get_database_backend();
    let expected = Schema::new(backend).create_table_from_entity(entity);
    let entity = E::default();
    let table = entity.table_name();

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            backend,
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = current_schema() AND table_name = $1",
            [table.into()],
        ))
        .await?;

    if rows.is_empty() {
        // Table absent entirely.
        missing.push(backend.build(&expected).sql);
        return Ok(());
    }

    let live: HashSet<String> = rows
        .iter()
        .map(|row| row.try_get::<String>("", "column_name"))
        .collect::<Result<_, _>>()?;

    for column in E::Column::iter() {
        let name = column.as_str();
        if live.contains(name) {
            continue;
        }
        if let Some(def) = expected
            .get_columns()
            .iter()
            .find(|c| c.get_column_name() == name)
        {
            let mut alter = Table::alter();
            alter.table(Alias::new(table)).add_column(def.clone());
            missing.push(backend.build(&alter).sql);
        }
    }

    Ok(())
}
