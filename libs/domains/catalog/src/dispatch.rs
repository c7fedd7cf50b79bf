//! Message-pattern dispatch for catalog requests
//!
//! Routes inbound messages to catalog operations by pattern name. Patterns
//! are opaque subject strings; payloads are JSON. Transport concerns
//! (subscriptions, replies) live with the caller.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateProduct, Pagination, ProductRef, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::CatalogService;

/// Message patterns handled by the catalog
pub mod pattern {
    /// Wildcard covering every catalog request subject
    pub const ALL: &str = "catalog.product.*";

    pub const CREATE: &str = "catalog.product.create";
    pub const FIND_ALL: &str = "catalog.product.find_all";
    pub const FIND_ONE: &str = "catalog.product.find_one";
    pub const UPDATE: &str = "catalog.product.update";
    pub const REMOVE: &str = "catalog.product.remove";
}

/// Routes pattern-tagged payloads to the catalog service
pub struct CatalogDispatcher<R: ProductRepository> {
    service: CatalogService<R>,
}

impl<R: ProductRepository> CatalogDispatcher<R> {
    pub fn new(service: CatalogService<R>) -> Self {
        Self { service }
    }

    /// Handle one inbound message, returning the operation result as JSON
    ///
    /// Errors from the service propagate unchanged. Undecodable payloads,
    /// non-numeric ids and unknown patterns surface as invalid requests
    /// without reaching the service.
    pub async fn dispatch(&self, pattern: &str, payload: &[u8]) -> CatalogResult<Value> {
        match pattern {
            pattern::CREATE => {
                let input: CreateProduct = decode(payload)?;
                to_value(self.service.create(input).await?)
            }
            pattern::FIND_ALL => {
                let pagination: Pagination = decode(payload)?;
                to_value(self.service.find_all(pagination).await?)
            }
            pattern::FIND_ONE => {
                let product_ref: ProductRef = decode(payload)?;
                to_value(self.service.find_one(product_ref.numeric_id()?).await?)
            }
            pattern::UPDATE => {
                let input: UpdateProduct = decode(payload)?;
                to_value(self.service.update(input.id, input).await?)
            }
            pattern::REMOVE => {
                let product_ref: ProductRef = decode(payload)?;
                to_value(self.service.remove(product_ref.numeric_id()?).await?)
            }
            other => {
                warn!(pattern = %other, "Unknown message pattern");
                Err(CatalogError::InvalidRequest(format!(
                    "unknown message pattern '{}'",
                    other
                )))
            }
        }
    }
}

fn decode<T: DeserializeOwned>(payload: &[u8]) -> CatalogResult<T> {
    serde_json::from_slice(payload)
        .map_err(|e| CatalogError::InvalidRequest(format!("malformed payload: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> CatalogResult<Value> {
    serde_json::to_value(value).map_err(|e| CatalogError::Internal(e.to_string()))
}
