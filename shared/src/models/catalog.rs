//! Catalog Record Models
//!
//! Listing shapes returned to rule-authoring hosts (product/category
//! pickers). The engine itself reads the catalog through the
//! `ProductCatalog` collaborator trait, not these records directly.

use serde::{Deserialize, Serialize};

/// Product listing entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub price: f64,
}

/// Category listing entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRecord {
    pub id: i64,
    pub name: String,
    pub slug: String,
}
