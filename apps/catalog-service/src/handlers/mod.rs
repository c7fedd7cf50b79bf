//! Request handlers for catalog message patterns

mod catalog_requests;

pub use catalog_requests::CatalogRequestHandler;

use domain_catalog::CatalogResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire envelope for replies
///
/// Serializes as `{"data": ...}` on success and `{"error": {...}}` on
/// failure, so callers can branch on a single top-level key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reply {
    Data(Value),
    Error(ErrorBody),
}

/// Structured failure carried inside an error reply
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable machine-readable code
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl From<CatalogResult<Value>> for Reply {
    fn from(result: CatalogResult<Value>) -> Self {
        match result {
            Ok(value) => Reply::Data(value),
            Err(error) => Reply::Error(ErrorBody {
                code: error.code().to_string(),
                message: error.to_string(),
            }),
        }
    }
}
