//! Repository for the starter `items` entity, implementing all four
//! resource capabilities.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, QuerySelect, Set,
};

use crate::entities::items;
use crate::error::DataError;
use crate::resource::{Creator, Deleter, Reader, Updater};

pub struct ItemsRepo;

#[async_trait]
impl Creator for ItemsRepo {
    type Resource = items::Model;

    async fn create<C>(&self, conn: &C, resource: items::Model) -> Result<items::Model, DataError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active = items::ActiveModel {
            id: NotSet,
            name: Set(resource.name),
            description: Set(resource.description),
            created_at: Set(resource.created_at),
        };
        Ok(active.insert(conn).await?)
    }
}

#[async_trait]
impl Reader for ItemsRepo {
    type Resource = items::Model;
    type Id = i32;

    async fn get_all<C>(
        &self,
        conn: &C,
        page: u64,
        limit: u64,
    ) -> Result<Vec<items::Model>, DataError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(items::Entity::find()
            .order_by_asc(items::Column::Id)
            .limit(limit)
            .offset(page.saturating_mul(limit))
            .all(conn)
            .await?)
    }

    async fn get_by_id<C>(&self, conn: &C, id: i32) -> Result<items::Model, DataError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        items::Entity::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| DataError::not_found("item", id))
    }
}

#[async_trait]
impl Updater for ItemsRepo {
    type Resource = items::Model;
    type Id = i32;

    async fn update<C>(&self, conn: &C, resource: items::Model) -> Result<items::Model, DataError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active = items::ActiveModel {
            id: Set(resource.id),
            name: Set(resource.name),
            description: Set(resource.description),
            created_at: Set(resource.created_at),
        };
        Ok(active.update(conn).await?)
    }

    async fn transform<C, F>(&self, conn: &C, id: i32, f: F) -> Result<items::Model, DataError>
    where
        C: ConnectionTrait + Send + Sync,
        F: FnOnce(items::Model) -> items::Model + Send,
    {
        let current = self.get_by_id(conn, id).await?;
        self.update(conn, f(current)).await
    }
}

#[async_trait]
impl Deleter for ItemsRepo {
    type Resource = items::Model;
    type Id = i32;

    async fn delete_by_id<C>(&self, conn: &C, id: i32) -> Result<items::Model, DataError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let model = self.get_by_id(conn, id).await?;
        items::Entity::delete_by_id(id).exec(conn).await?;
        Ok(model)
    }
}
