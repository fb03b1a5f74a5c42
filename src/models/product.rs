use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One consumable unit of stock: an opaque credential or voucher string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub license: String,
    /// Fields this service does not interpret; written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StockItem {
    pub fn new(license: impl Into<String>) -> Self {
        Self {
            license: license.into(),
            extra: Map::new(),
        }
    }
}

/// Sellable item. `stock` is a FIFO queue: index 0 is handed out first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub imagehover: Option<String>,
    pub description: String,
    /// Kept as the stored JSON number so `10` is not rewritten as `10.0`.
    pub price: Number,
    pub delivery_method: String,
    pub stock: Vec<StockItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn price_value(&self) -> f64 {
        self.price.as_f64().unwrap_or(0.0)
    }

    pub fn stock_count(&self) -> usize {
        self.stock.len()
    }

    pub fn is_available(&self) -> bool {
        !self.stock.is_empty()
    }

    /// Removes and returns the oldest stock item.
    pub fn pop_stock(&mut self) -> Option<StockItem> {
        if self.stock.is_empty() {
            None
        } else {
            Some(self.stock.remove(0))
        }
    }
}
