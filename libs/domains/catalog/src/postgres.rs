use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::{CatalogError, CatalogResult},
    models::{CreateProduct, Product, ProductChanges},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository backed by SeaORM
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Store failures stay opaque; the driver message travels up unchanged.
fn store_err(e: sea_orm::DbErr) -> CatalogError {
    CatalogError::Database(e.to_string())
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = active_model.insert(&self.db).await.map_err(store_err)?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn find_available_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::Available.eq(true))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(Into::into))
    }

    async fn list_available(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Available.eq(true))
            .order_by_asc(entity::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_available(&self) -> CatalogResult<u64> {
        entity::Entity::find()
            .filter(entity::Column::Available.eq(true))
            .count(&self.db)
            .await
            .map_err(store_err)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> CatalogResult<Product> {
        // The row is fetched without the availability filter: this is the
        // path that flips the flag itself.
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)?
            .ok_or(CatalogError::NotFound(id))?;

        let mut product: Product = model.into();
        product.apply_changes(changes);

        let active_model: entity::ActiveModel = product.into();
        let updated = active_model.update(&self.db).await.map_err(store_err)?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }
}
