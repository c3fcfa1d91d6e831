//! In-memory product store
//!
//! Owns the ordered product collection and the CRUD primitives over it.
//! The store is injected through `AppState` rather than living in a
//! process-wide static, so tests can build isolated instances.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Validated input for create and update operations
///
/// `in_stock` stays optional: `None` means the client left it unspecified,
/// which defaults to `true` on create and keeps the prior value on update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: Option<bool>,
}

/// Ordered in-memory collection of products
///
/// All lookups are linear; the collection stays small enough that nothing
/// more is warranted.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Store pre-populated with the three sample records served at startup
    pub fn seeded() -> Self {
        let sample = |id: &str, name: &str, description: &str, price: f64, category: &str, in_stock: bool| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
            in_stock,
        };

        Self {
            products: vec![
                sample(
                    "1",
                    "Laptop",
                    "High-performance laptop with 16GB RAM",
                    1200.0,
                    "electronics",
                    true,
                ),
                sample(
                    "2",
                    "Smartphone",
                    "Latest model with 128GB storage",
                    800.0,
                    "electronics",
                    true,
                ),
                sample(
                    "3",
                    "Coffee Maker",
                    "Programmable coffee maker with timer",
                    50.0,
                    "kitchen",
                    false,
                ),
            ],
        }
    }

    /// All records in insertion order
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Find one record by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Append a new record with a freshly generated id
    ///
    /// Ids are UUID v4, so they never collide with earlier records and are
    /// never reused after a delete.
    pub fn insert(&mut self, input: ProductInput) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock.unwrap_or(true),
        };

        self.products.push(product.clone());
        product
    }

    /// Replace all fields of the record with `id`
    ///
    /// The id itself is never changed, and `in_stock` falls back to the
    /// previous value when the input left it unspecified.
    pub fn update(&mut self, id: &str, input: ProductInput) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;

        product.name = input.name;
        product.description = input.description;
        product.price = input.price;
        product.category = input.category;
        if let Some(in_stock) = input.in_stock {
            product.in_stock = in_stock;
        }

        Some(product.clone())
    }

    /// Remove the record with `id`, reporting whether anything was deleted
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        self.products.len() < before
    }
}
