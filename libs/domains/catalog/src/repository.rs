use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Product, ProductChanges};

/// Repository trait for Product persistence
///
/// Data access interface for the catalog. Soft-deleted products count as
/// absent for the `*_available` operations but remain reachable through
/// `update`, which is how the soft-delete flag itself gets flipped.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return it with its assigned id
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product>;

    /// Fetch a product by id, only if it has not been soft-deleted
    async fn find_available_by_id(&self, id: i32) -> CatalogResult<Option<Product>>;

    /// List available products ordered by id ascending
    async fn list_available(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>>;

    /// Count available products
    async fn count_available(&self) -> CatalogResult<u64>;

    /// Apply a field patch to a product, returning the updated record
    async fn update(&self, id: i32, changes: ProductChanges) -> CatalogResult<Product>;
}

#[derive(Debug, Default)]
struct Store {
    rows: HashMap<i32, Product>,
    next_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: store.next_id,
            name: input.name,
            price: input.price,
            available: input.available.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn find_available_by_id(&self, id: i32) -> CatalogResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).filter(|p| p.available).cloned())
    }

    async fn list_available(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>> {
        let store = self.store.read().await;

        let mut result: Vec<Product> = store
            .rows
            .values()
            .filter(|p| p.available)
            .cloned()
            .collect();
        result.sort_by_key(|p| p.id);

        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_available(&self) -> CatalogResult<u64> {
        let store = self.store.read().await;
        Ok(store.rows.values().filter(|p| p.available).count() as u64)
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> CatalogResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .rows
            .get_mut(&id)
            .ok_or(CatalogError::NotFound(id))?;
        product.apply_changes(changes);
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }
}
