use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{AppError, AppResult};
use crate::models::{Product, StockItem};

/// Products at or below this many stock items show up on the dashboard.
pub const LOW_STOCK_THRESHOLD: usize = 3;

/// The whole persisted document: category name → products, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(pub IndexMap<String, Vec<Product>>);

// ── Response shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub product_count: usize,
}

#[derive(Debug, Serialize)]
pub struct StockSummary {
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub stock_count: usize,
    pub available: bool,
    pub delivery_method: String,
}

#[derive(Debug, Serialize)]
pub struct ConsumedStock {
    pub success: bool,
    pub product_id: i64,
    pub product_name: String,
    pub category: String,
    pub consumed_license: StockItem,
    pub remaining_stock: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LowStockProduct {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub stock_count: usize,
    pub price: Number,
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_categories: usize,
    pub total_products: usize,
    pub total_stock_items: usize,
    pub low_stock_products: Vec<LowStockProduct>,
    pub low_stock_count: usize,
    pub updated_at: DateTime<Utc>,
}

fn product_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Product with ID {} not found", id))
}

impl Catalog {
    /// Rejects documents that parse but break catalog invariants.
    pub fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for (category, product) in self.entries() {
            if !seen.insert(product.id) {
                return Err(AppError::InvalidCatalog(format!(
                    "duplicate product id {} in category '{}'",
                    product.id, category
                )));
            }
            if product.price_value() < 0.0 {
                return Err(AppError::InvalidCatalog(format!(
                    "product {} has invalid price {}",
                    product.id, product.price
                )));
            }
        }
        Ok(())
    }

    /// Every (category, product) pair, category order then in-category order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.0
            .iter()
            .flat_map(|(category, products)| products.iter().map(move |p| (category.as_str(), p)))
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.0.values().flatten()
    }

    pub fn find_product(&self, id: i64) -> AppResult<(&str, &Product)> {
        self.entries()
            .find(|(_, p)| p.id == id)
            .ok_or_else(|| product_not_found(id))
    }

    pub fn category(&self, name: &str) -> AppResult<&[Product]> {
        self.0
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", name)))
    }

    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        self.0
            .iter()
            .map(|(name, products)| CategorySummary {
                name: name.clone(),
                product_count: products.len(),
            })
            .collect()
    }

    pub fn stock_summary(&self, id: i64) -> AppResult<StockSummary> {
        let (category, product) = self.find_product(id)?;
        Ok(StockSummary {
            product_id: id,
            product_name: product.name.clone(),
            category: category.to_string(),
            stock_count: product.stock_count(),
            available: product.is_available(),
            delivery_method: product.delivery_method.clone(),
        })
    }

    /// Pops the head of the product's stock in memory. The caller persists.
    pub fn consume(&mut self, id: i64) -> AppResult<ConsumedStock> {
        let (category, product) = self
            .0
            .iter_mut()
            .find_map(|(category, products)| {
                products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .map(|p| (category.clone(), p))
            })
            .ok_or_else(|| product_not_found(id))?;

        let consumed = product.pop_stock().ok_or_else(|| {
            AppError::BadRequest(format!("Product {} is out of stock", product.name))
        })?;

        Ok(ConsumedStock {
            success: true,
            product_id: id,
            product_name: product.name.clone(),
            category,
            consumed_license: consumed,
            remaining_stock: product.stock_count(),
            message: "Stock item consumed successfully".to_string(),
        })
    }

    pub fn dashboard(&self) -> DashboardStats {
        let low_stock_products: Vec<LowStockProduct> = self
            .entries()
            .filter(|(_, p)| p.stock_count() <= LOW_STOCK_THRESHOLD)
            .map(|(category, p)| LowStockProduct {
                id: p.id,
                name: p.name.clone(),
                category: category.to_string(),
                stock_count: p.stock_count(),
                price: p.price.clone(),
            })
            .collect();

        DashboardStats {
            total_categories: self.0.len(),
            total_products: self.products().count(),
            total_stock_items: self.products().map(Product::stock_count).sum(),
            low_stock_count: low_stock_products.len(),
            low_stock_products,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn product(id: i64, name: &str, stock: usize) -> Product {
        Product {
            id,
            name: name.to_string(),
            image: "https://example.com/p.jpg".to_string(),
            imagehover: None,
            description: String::new(),
            price: Number::from(5),
            delivery_method: "instant".to_string(),
            stock: (0..stock)
                .map(|i| StockItem::new(format!("{}-{}", name, i)))
                .collect(),
            extra: serde_json::Map::new(),
        }
    }

    fn catalog(categories: Vec<(&str, Vec<Product>)>) -> Catalog {
        Catalog(
            categories
                .into_iter()
                .map(|(name, products)| (name.to_string(), products))
                .collect(),
        )
    }

    // ── Queries ────────────────────────────────────────────────────────────────

    #[test]
    fn products_flatten_in_document_order() {
        let c = catalog(vec![
            ("Zeta", vec![product(5, "z1", 1), product(3, "z2", 1)]),
            ("Alpha", vec![product(1, "a1", 1)]),
        ]);
        let ids: Vec<i64> = c.products().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 3, 1]);
    }

    #[test]
    fn find_product_reports_owning_category() {
        let c = seed::default_catalog();
        let (category, p) = c.find_product(2).unwrap();
        assert_eq!(category, "Window Protection 11");
        assert_eq!(p.name, "Window Protection");
        assert!(matches!(c.find_product(99), Err(AppError::NotFound(_))));
    }

    #[test]
    fn category_lookup() {
        let c = seed::default_catalog();
        assert_eq!(c.category("BloodStrike").unwrap().len(), 1);
        assert!(matches!(c.category("bloodstrike"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn category_counts_match_sequence_lengths() {
        let c = catalog(vec![
            ("A", vec![product(1, "a", 0), product(2, "b", 0)]),
            ("B", vec![]),
        ]);
        let summaries = c.category_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!((summaries[0].name.as_str(), summaries[0].product_count), ("A", 2));
        assert_eq!((summaries[1].name.as_str(), summaries[1].product_count), ("B", 0));
    }

    #[test]
    fn stock_summary_availability() {
        let c = catalog(vec![("A", vec![product(1, "full", 2), product(2, "empty", 0)])]);
        let full = c.stock_summary(1).unwrap();
        assert_eq!(full.stock_count, 2);
        assert!(full.available);
        let empty = c.stock_summary(2).unwrap();
        assert!(!empty.available);
        assert_eq!(empty.category, "A");
    }

    // ── Consume ────────────────────────────────────────────────────────────────

    #[test]
    fn consume_drains_fifo_then_rejects() {
        let mut c = catalog(vec![("A", vec![product(1, "p", 3)])]);
        for (i, expected_remaining) in [2usize, 1, 0].into_iter().enumerate() {
            let consumed = c.consume(1).unwrap();
            assert_eq!(consumed.consumed_license.license, format!("p-{}", i));
            assert_eq!(consumed.remaining_stock, expected_remaining);
            assert_eq!(consumed.category, "A");
        }
        match c.consume(1) {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Product p is out of stock"),
            other => panic!("expected out of stock, got {:?}", other),
        }
    }

    #[test]
    fn consume_unknown_product() {
        let mut c = seed::default_catalog();
        let before = c.clone();
        assert!(matches!(c.consume(42), Err(AppError::NotFound(_))));
        assert_eq!(c, before);
    }

    #[test]
    fn consume_leaves_other_products_untouched() {
        let mut c = seed::default_catalog();
        c.consume(1).unwrap();
        assert_eq!(c.find_product(2).unwrap().1.stock_count(), 4);
        assert_eq!(c.find_product(1).unwrap().1.stock_count(), 1);
    }

    // ── Dashboard ──────────────────────────────────────────────────────────────

    #[test]
    fn dashboard_over_seed_catalog() {
        let stats = seed::default_catalog().dashboard();
        assert_eq!(stats.total_categories, 2);
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_stock_items, 6);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.low_stock_products[0].id, 1);
        assert_eq!(stats.low_stock_products[0].stock_count, 2);
        assert_eq!(stats.low_stock_products[0].category, "BloodStrike");
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let c = catalog(vec![(
            "A",
            vec![product(1, "three", 3), product(2, "four", 4), product(3, "zero", 0)],
        )]);
        let stats = c.dashboard();
        let ids: Vec<i64> = stats.low_stock_products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(stats.total_stock_items, 7);
    }

    // ── Validation ─────────────────────────────────────────────────────────────

    #[test]
    fn validate_rejects_duplicate_ids_across_categories() {
        let c = catalog(vec![("A", vec![product(1, "a", 1)]), ("B", vec![product(1, "b", 1)])]);
        assert!(matches!(c.validate(), Err(AppError::InvalidCatalog(_))));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut p = product(1, "a", 1);
        p.price = Number::from_f64(-0.5).unwrap();
        let c = catalog(vec![("A", vec![p])]);
        assert!(matches!(c.validate(), Err(AppError::InvalidCatalog(_))));
    }

    #[test]
    fn serde_preserves_category_order() {
        let raw = r#"{"Zeta": [], "Alpha": [], "Mid": []}"#;
        let c: Catalog = serde_json::from_str(raw).unwrap();
        let names: Vec<&str> = c.0.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert!(c.validate().is_ok());
    }
}
