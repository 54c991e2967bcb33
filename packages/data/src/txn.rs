//! Explicit transaction demarcation.
//!
//! Pooled connections are never auto-committed; every unit of work
//! goes through [`with_txn`], which owns the transaction lifecycle:
//! begin, run the closure, commit on `Ok`, roll back on `Err`.

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::DataError;

pub async fn with_txn<R, F, Fut>(db: &DatabaseConnection, f: F) -> Result<R, DataError>
where
    F: FnOnce(&DatabaseTransaction) -> Fut,
    Fut: std::future::Future<Output = Result<R, DataError>>,
{
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve the original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use time::OffsetDateTime;

    use super::with_txn;
    use crate::entities::items;
    use crate::error::DataError;
    use crate::repos::ItemsRepo;
    use crate::resource::Creator;

    #[tokio::test]
    async fn commits_on_ok() {
        let inserted = items::Model {
            id: 1,
            name: "widget".to_string(),
            description: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let created = with_txn(&db, |txn| {
            let inserted = inserted.clone();
            async move { ItemsRepo.create(txn, inserted).await }
        })
        .await
        .unwrap();
        assert_eq!(created.id, 1);

        let log = db.into_transaction_log();
        assert!(!log.is_empty(), "expected the insert to be recorded");
    }

    #[tokio::test]
    async fn propagates_the_closure_error_after_rollback() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result: Result<(), DataError> = with_txn(&db, |_txn| async {
            Err(DataError::not_found("item", 1))
        })
        .await;

        assert!(matches!(result, Err(DataError::NotFound { .. })));
    }
}
