use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CreateProduct, PageMeta, Pagination, Product, ProductChanges, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Service layer owning the catalog's domain rules
///
/// Handles validation, the soft-delete convention, and pagination math;
/// persistence goes through the injected repository.
pub struct CatalogService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CatalogService<R> {
    /// Create a new CatalogService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    ///
    /// `available` defaults to true unless the input overrides it.
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;

        self.repository.create(input).await
    }

    /// List available products as a page envelope
    ///
    /// Pages are ordered by id ascending. A page past the end yields empty
    /// data, not an error.
    #[instrument(skip(self))]
    pub async fn find_all(&self, pagination: Pagination) -> CatalogResult<ProductPage> {
        pagination
            .validate()
            .map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;

        let total = self.repository.count_available().await?;
        let data = self
            .repository
            .list_available(pagination.offset(), pagination.limit)
            .await?;

        Ok(ProductPage {
            data,
            meta: PageMeta::new(total, &pagination),
        })
    }

    /// Fetch a single product; soft-deleted records count as absent
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: i32) -> CatalogResult<Product> {
        self.repository
            .find_available_by_id(id)
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    /// Update a product's fields
    ///
    /// The id is never rewritten and availability is untouched. Missing or
    /// soft-deleted ids fail as not found before anything is written.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateProduct) -> CatalogResult<Product> {
        input
            .validate()
            .map_err(|e| CatalogError::InvalidRequest(e.to_string()))?;

        self.find_one(id).await?;

        self.repository.update(id, input.into()).await
    }

    /// Soft-delete a product by flipping `available` off
    ///
    /// The record stays in the store. A second remove of the same id fails
    /// as not found, since the first already made it inactive.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> CatalogResult<Product> {
        self.find_one(id).await?;

        self.repository
            .update(
                id,
                ProductChanges {
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
    }
}
