use serde_json::{Map, Number};

use crate::models::{Catalog, Product, StockItem};

static SEED_IMAGE: &str = "https://pic.bittopup.com/apiUpload/2ccf31c25175abf452e9766912a42c73.jpg";

/// Catalog written on first use when no stock document exists yet.
pub fn default_catalog() -> Catalog {
    let mut catalog = Catalog::default();

    catalog.0.insert(
        "BloodStrike".to_string(),
        vec![Product {
            id: 1,
            name: "Blood Strike Account".to_string(),
            image: SEED_IMAGE.to_string(),
            imagehover: Some(
                "https://imgop.itemku.com/?url=https%3A%2F%2Fd1x91p7vw3vuq8.cloudfront.net%2Fitemku-upload%2F2025715%2Fbu7sesjsnbxx2ftm9kc8q_thumbnail.jpg&w=1033&q=10"
                    .to_string(),
            ),
            description: "Best Account BloodStrike".to_string(),
            price: Number::from(10),
            delivery_method: "instant".to_string(),
            stock: licenses(&[
                "email@example.com:password123",
                "email2@example.com:password456",
            ]),
            extra: Map::new(),
        }],
    );

    catalog.0.insert(
        "Window Protection 11".to_string(),
        vec![Product {
            id: 2,
            name: "Window Protection".to_string(),
            image: SEED_IMAGE.to_string(),
            imagehover: Some(
                "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQ4NOVVkcMqtvEutXTu_StAuIwGGvO9DevFkg&s"
                    .to_string(),
            ),
            description: "Best Window Protection".to_string(),
            price: Number::from(30),
            delivery_method: "Waiting".to_string(),
            stock: licenses(&[
                "email@example.com:password123",
                "email2@example.com:password456",
                "email2@example.com:password456",
                "email2@example.com:password456",
            ]),
            extra: Map::new(),
        }],
    );

    catalog
}

fn licenses(values: &[&str]) -> Vec<StockItem> {
    values.iter().map(|l| StockItem::new(*l)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_valid() {
        let c = default_catalog();
        assert!(c.validate().is_ok());
        let names: Vec<&str> = c.0.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["BloodStrike", "Window Protection 11"]);
    }

    #[test]
    fn seed_stock_levels() {
        let c = default_catalog();
        assert_eq!(c.find_product(1).unwrap().1.stock_count(), 2);
        assert_eq!(c.find_product(2).unwrap().1.stock_count(), 4);
        assert_eq!(
            c.find_product(1).unwrap().1.stock[0].license,
            "email@example.com:password123"
        );
    }
}
