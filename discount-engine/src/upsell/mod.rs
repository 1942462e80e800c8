//! Upsell suggestions
//!
//! "You may also like" data for the cart page: up to 3 related products
//! per cart line, resolved through the catalog collaborator. Suggestions
//! are kept in line order without cross-line deduplication; the host
//! decides how to present them.

use crate::catalog::ProductCatalog;
use serde::{Deserialize, Serialize};
use shared::models::CartSnapshot;

/// Maximum related products suggested per cart line
const RELATED_PER_LINE: usize = 3;

/// One suggested product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpsellSuggestion {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
}

/// Collect upsell suggestions for every cart line
pub fn cart_upsells(cart: &CartSnapshot, catalog: &dyn ProductCatalog) -> Vec<UpsellSuggestion> {
    let mut suggestions = Vec::new();

    for line in &cart.lines {
        for related_id in catalog
            .related_products(line.product_id)
            .into_iter()
            .take(RELATED_PER_LINE)
        {
            let Some(product) = catalog.product(related_id) else {
                tracing::warn!(product_id = related_id, "related product missing from catalog");
                continue;
            };
            suggestions.push(UpsellSuggestion {
                product_id: product.id,
                name: product.name,
                price: product.price,
            });
        }
    }

    suggestions
}
