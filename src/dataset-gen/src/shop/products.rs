use enum_iterator::Sequence;
use rand::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use strum_macros::Display;
use tracing::info;

use crate::error::DatasetGenError;
use crate::error::Result;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, Sequence, Serialize)]
pub enum ProductCategory {
    Beverage,
    Pastry,
    Savory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub product_id: u64,
    pub product_name: String,
    pub product_category: ProductCategory,
    pub price: Decimal,
}

/// The fixed menu. Product ids are sequential from 1 in catalog order.
pub fn generate_products() -> Vec<Product> {
    let catalog = [
        ("Espresso", ProductCategory::Beverage, Decimal::new(25, 1)),
        ("Latte", ProductCategory::Beverage, Decimal::new(40, 1)),
        ("Cappuccino", ProductCategory::Beverage, Decimal::new(45, 1)),
        ("Americano", ProductCategory::Beverage, Decimal::new(30, 1)),
        ("Flat White", ProductCategory::Beverage, Decimal::new(35, 1)),
        ("Matcha", ProductCategory::Beverage, Decimal::new(40, 1)),
        ("Cold Brew", ProductCategory::Beverage, Decimal::new(40, 1)),
        ("Espresso Tonic", ProductCategory::Beverage, Decimal::new(45, 1)),
        ("Croissant", ProductCategory::Pastry, Decimal::new(30, 1)),
        ("Blueberry Muffin", ProductCategory::Pastry, Decimal::new(20, 1)),
        (
            "Chocolate Chip Cookie",
            ProductCategory::Pastry,
            Decimal::new(20, 1),
        ),
        ("Cheesecake Slice", ProductCategory::Pastry, Decimal::new(40, 1)),
        (
            "Bagel with Cream Cheese",
            ProductCategory::Savory,
            Decimal::new(30, 1),
        ),
        (
            "Ham & Cheese Sandwich",
            ProductCategory::Savory,
            Decimal::new(40, 1),
        ),
        ("Chicken Sandwich", ProductCategory::Savory, Decimal::new(40, 1)),
    ];

    let products = catalog
        .into_iter()
        .enumerate()
        .map(|(i, (name, category, price))| Product {
            product_id: i as u64 + 1,
            product_name: name.to_string(),
            product_category: category,
            price,
        })
        .collect::<Vec<_>>();

    info!("generated products table with {} entries", products.len());

    products
}

pub struct ProductProvider {
    pub products: Vec<Product>,
}

impl ProductProvider {
    pub fn try_new(products: Vec<Product>) -> Result<Self> {
        if products.is_empty() {
            return Err(DatasetGenError::General(
                "products table is empty".to_string(),
            ));
        }
        Ok(Self { products })
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Product {
        self.products.choose(rng).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_products() {
        let products = generate_products();
        assert_eq!(products.len(), 15);
        for (i, product) in products.iter().enumerate() {
            assert_eq!(product.product_id, i as u64 + 1);
            assert!(product.price > Decimal::ZERO);
        }
        assert_eq!(products[0].product_name, "Espresso");
        assert_eq!(products[0].price, Decimal::new(25, 1));
        assert_eq!(products[14].product_category, ProductCategory::Savory);
    }

    #[test]
    fn test_empty_products_rejected() {
        assert!(ProductProvider::try_new(vec![]).is_err());
    }
}
