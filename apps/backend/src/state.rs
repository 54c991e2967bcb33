use sea_orm::DatabaseConnection;

/// Application state containing shared resources
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct AppState {
    /// ORM handle over the bootstrap-validated connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
