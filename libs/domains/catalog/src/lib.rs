//! Catalog Domain
//!
//! Message-driven CRUD for the product catalog.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Dispatch   │  ← pattern routing (one subject per operation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← domain rules: validation, soft delete, pagination
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entity, DTOs, page envelope
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     dispatch::{CatalogDispatcher, pattern},
//!     repository::InMemoryProductRepository,
//!     service::CatalogService,
//! };
//!
//! # async fn example() -> domain_catalog::CatalogResult<()> {
//! let repository = InMemoryProductRepository::new();
//! let service = CatalogService::new(repository);
//! let dispatcher = CatalogDispatcher::new(service);
//!
//! let payload = br#"{"name": "Keyboard", "price": 49.9}"#;
//! let created = dispatcher.dispatch(pattern::CREATE, payload).await?;
//! # let _ = created;
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use dispatch::{CatalogDispatcher, pattern};
pub use error::{CatalogError, CatalogResult};
pub use models::{
    CreateProduct, PageMeta, Pagination, Product, ProductChanges, ProductPage, ProductRef,
    UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::CatalogService;
