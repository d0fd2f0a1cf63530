//! Wire shape of the external product feed.
//!
//! The endpoint returns a JSON array of records carrying at minimum
//! `{id, title, price, image}`; anything else the source sends (category,
//! description, rating) is ignored.

use rust_decimal::Decimal;
use serde::Deserialize;
use shoply_core::domain::product::{Product, ProductId};

use crate::errors::CatalogError;

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    pub image: String,
}

impl ProductRecord {
    pub fn into_product(self) -> Result<Product, CatalogError> {
        if self.price.is_sign_negative() {
            return Err(CatalogError::InvalidRecord {
                id: self.id,
                reason: format!("price must be non-negative, got {}", self.price),
            });
        }

        Ok(Product {
            id: ProductId(self.id),
            title: self.title,
            price: self.price,
            image: self.image,
        })
    }
}

/// Decode a full catalog response body into domain products.
pub fn decode_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    let records: Vec<ProductRecord> =
        serde_json::from_str(body).map_err(CatalogError::Decode)?;

    records.into_iter().map(ProductRecord::into_product).collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shoply_core::domain::product::ProductId;

    use super::decode_products;
    use crate::errors::CatalogError;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL.jpg"
        }
    ]"#;

    #[test]
    fn decodes_the_public_feed_shape_and_ignores_extra_fields() {
        let products = decode_products(SAMPLE).expect("sample feed should decode");

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId(1));
        assert_eq!(products[0].price, Decimal::new(10995, 2));
        assert_eq!(products[1].title, "Mens Casual Premium Slim Fit T-Shirts");
    }

    #[test]
    fn rejects_a_negative_price() {
        let body = r#"[{"id": 9, "title": "broken", "price": -1.50, "image": ""}]"#;

        let error = decode_products(body).expect_err("negative price should be rejected");
        assert!(matches!(error, CatalogError::InvalidRecord { id: 9, .. }));
    }

    #[test]
    fn rejects_a_malformed_body() {
        let error = decode_products("{not json").expect_err("malformed body should be rejected");
        assert!(matches!(error, CatalogError::Decode(_)));
    }
}
