//! Generic resource capabilities.
//!
//! Four independent traits rather than one sealed union; a concrete
//! repository implements whichever capabilities its resource supports,
//! and [`Crud`] is blanket-implemented for types carrying all four.
//! Methods are generic over [`ConnectionTrait`] so they compose with
//! explicitly demarcated transactions (see [`crate::txn::with_txn`]).

use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::error::DataError;

#[async_trait]
pub trait Creator {
    type Resource: Send;

    async fn create<C>(&self, conn: &C, resource: Self::Resource) -> Result<Self::Resource, DataError>
    where
        C: ConnectionTrait + Send + Sync;
}

#[async_trait]
pub trait Reader {
    type Resource: Send;
    type Id: Send;

    /// Fetch one page of resources. Pages are zero-based.
    async fn get_all<C>(
        &self,
        conn: &C,
        page: u64,
        limit: u64,
    ) -> Result<Vec<Self::Resource>, DataError>
    where
        C: ConnectionTrait + Send + Sync;

    async fn get_by_id<C>(&self, conn: &C, id: Self::Id) -> Result<Self::Resource, DataError>
    where
        C: ConnectionTrait + Send + Sync;
}

#[async_trait]
pub trait Updater {
    type Resource: Send;
    type Id: Send;

    async fn update<C>(&self, conn: &C, resource: Self::Resource) -> Result<Self::Resource, DataError>
    where
        C: ConnectionTrait + Send + Sync;

    /// Read-modify-write: fetch the resource, apply `f`, persist the
    /// result. Run inside a transaction when atomicity matters.
    async fn transform<C, F>(
        &self,
        conn: &C,
        id: Self::Id,
        f: F,
    ) -> Result<Self::Resource, DataError>
    where
        C: ConnectionTrait + Send + Sync,
        F: FnOnce(Self::Resource) -> Self::Resource + Send;
}

#[async_trait]
pub trait Deleter {
    type Resource: Send;
    type Id: Send;

    /// Delete a resource, returning the deleted row.
    async fn delete_by_id<C>(&self, conn: &C, id: Self::Id) -> Result<Self::Resource, DataError>
    where
        C: ConnectionTrait + Send + Sync;
}

/// Full CRUD: the composition of all four capabilities.
pub trait Crud: Creator + Reader + Updater + Deleter {}

impl<T> Crud for T where T: Creator + Reader + Updater + Deleter {}
