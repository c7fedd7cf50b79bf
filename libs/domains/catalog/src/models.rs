use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};

/// Product entity - a single catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the store
    pub id: i32,
    /// Display name
    pub name: String,
    /// Unit price
    pub price: f64,
    /// False once the product has been soft-deleted
    pub available: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Apply a field patch, refreshing the update timestamp
    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(available) = changes.available {
            self.available = available;
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Defaults to true when omitted
    pub available: Option<bool>,
}

/// DTO for updating an existing product
///
/// Carries the target id on the wire; the id itself is never written back
/// to the record. Omitted fields are left untouched.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    pub id: i32,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Field-level patch applied by the repository
///
/// `available` is only ever set by the soft-delete path; plain updates
/// leave it `None`.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

impl From<UpdateProduct> for ProductChanges {
    /// Carries every updatable field and drops `id`
    fn from(input: UpdateProduct) -> Self {
        Self {
            name: input.name,
            price: input.price,
            available: None,
        }
    }
}

/// Identifier payload for single-product operations
///
/// Message callers hand the id over in string form; it must parse to the
/// store's integer key before use.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRef {
    pub id: String,
}

impl ProductRef {
    pub fn numeric_id(&self) -> CatalogResult<i32> {
        self.id
            .parse()
            .map_err(|_| CatalogError::InvalidRequest(format!("invalid product id '{}'", self.id)))
    }
}

/// Pagination request. Omitted fields default to the first page of ten.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct Pagination {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Rows to skip before this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit
    }
}

/// Page-count metadata for a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    #[serde(rename = "lastPage")]
    pub last_page: u64,
}

impl PageMeta {
    /// Compute metadata for a validated pagination request (`limit >= 1`)
    pub fn new(total: u64, pagination: &Pagination) -> Self {
        Self {
            total,
            page: pagination.page,
            last_page: total.div_ceil(pagination.limit),
        }
    }
}

/// Paginated listing envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_deserializes_with_defaults() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 10);

        let pagination: Pagination = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(pagination.page, 3);
        assert_eq!(pagination.limit, 10);
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination { page: 1, limit: 10 };
        assert_eq!(pagination.offset(), 0);

        let pagination = Pagination { page: 4, limit: 25 };
        assert_eq!(pagination.offset(), 75);
    }

    #[test]
    fn test_page_meta_ceiling_division() {
        let limit_20 = Pagination { page: 1, limit: 20 };
        assert_eq!(PageMeta::new(0, &limit_20).last_page, 0);
        assert_eq!(PageMeta::new(20, &limit_20).last_page, 1);
        assert_eq!(PageMeta::new(21, &limit_20).last_page, 2);
        assert_eq!(PageMeta::new(100, &limit_20).last_page, 5);
    }

    #[test]
    fn test_page_meta_renames_last_page_on_the_wire() {
        let meta = PageMeta {
            total: 1,
            page: 1,
            last_page: 1,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["lastPage"], 1);
        assert!(json.get("last_page").is_none());
    }

    #[test]
    fn test_apply_changes_touches_only_named_fields() {
        let mut product = Product {
            id: 1,
            name: "Keyboard".to_string(),
            price: 49.9,
            available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        product.apply_changes(ProductChanges {
            price: Some(39.9),
            ..Default::default()
        });

        assert_eq!(product.name, "Keyboard");
        assert_eq!(product.price, 39.9);
        assert!(product.available);
    }

    #[test]
    fn test_update_conversion_drops_id_and_availability() {
        let input = UpdateProduct {
            id: 7,
            name: Some("Mouse".to_string()),
            price: None,
        };

        let changes: ProductChanges = input.into();
        assert_eq!(changes.name.as_deref(), Some("Mouse"));
        assert_eq!(changes.price, None);
        assert_eq!(changes.available, None);
    }

    #[test]
    fn test_product_ref_parses_numeric_ids() {
        let product_ref = ProductRef { id: "42".into() };
        assert_eq!(product_ref.numeric_id().unwrap(), 42);

        let product_ref = ProductRef { id: "abc".into() };
        assert!(matches!(
            product_ref.numeric_id(),
            Err(CatalogError::InvalidRequest(_))
        ));
    }
}
