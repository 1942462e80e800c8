//! Product catalog collaborator
//!
//! The engine resolves rule-authoring tokens (ids or display names) and
//! product→category membership through this trait. The host backs it with
//! its real product source; [`MemoryCatalog`] is the reference
//! implementation used by tests and small embedders.

use shared::models::{CategoryRecord, ProductRecord};
use std::collections::HashMap;

/// Read-only product/category lookup
pub trait ProductCatalog {
    /// Product record by id, `None` when unknown
    fn product(&self, id: i64) -> Option<ProductRecord>;

    /// Category ids assigned to a product (empty when unknown)
    fn product_categories(&self, product_id: i64) -> Vec<i64>;

    /// All product ids whose display name matches case-insensitively
    fn products_named(&self, name: &str) -> Vec<i64>;

    /// All category ids whose name matches case-insensitively
    fn categories_named(&self, name: &str) -> Vec<i64>;

    /// Related product ids for upsell suggestions, in catalog order
    fn related_products(&self, product_id: i64) -> Vec<i64>;
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: HashMap<i64, ProductRecord>,
    categories: HashMap<i64, CategoryRecord>,
    /// product id → category ids
    memberships: HashMap<i64, Vec<i64>>,
    /// product id → related product ids
    related: HashMap<i64, Vec<i64>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&mut self, product: ProductRecord) {
        self.products.insert(product.id, product);
    }

    pub fn insert_category(&mut self, category: CategoryRecord) {
        self.categories.insert(category.id, category);
    }

    /// Assign a product to a category (duplicates ignored)
    pub fn assign_category(&mut self, product_id: i64, category_id: i64) {
        let cats = self.memberships.entry(product_id).or_default();
        if !cats.contains(&category_id) {
            cats.push(category_id);
        }
    }

    pub fn set_related(&mut self, product_id: i64, related: Vec<i64>) {
        self.related.insert(product_id, related);
    }

    /// All products sorted by id (listing shape for rule-authoring hosts)
    pub fn products(&self) -> Vec<ProductRecord> {
        let mut list: Vec<ProductRecord> = self.products.values().cloned().collect();
        list.sort_by_key(|p| p.id);
        list
    }

    /// All categories sorted by id
    pub fn categories(&self) -> Vec<CategoryRecord> {
        let mut list: Vec<CategoryRecord> = self.categories.values().cloned().collect();
        list.sort_by_key(|c| c.id);
        list
    }
}

impl ProductCatalog for MemoryCatalog {
    fn product(&self, id: i64) -> Option<ProductRecord> {
        self.products.get(&id).cloned()
    }

    fn product_categories(&self, product_id: i64) -> Vec<i64> {
        self.memberships.get(&product_id).cloned().unwrap_or_default()
    }

    fn products_named(&self, name: &str) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .products
            .values()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn categories_named(&self, name: &str) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .categories
            .values()
            .filter(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn related_products(&self, product_id: i64) -> Vec<i64> {
        self.related.get(&product_id).cloned().unwrap_or_default()
    }
}
