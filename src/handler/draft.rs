// Request body schema module
// Decodes untyped bodies into a draft and validates the required fields

use serde::Deserialize;
use thiserror::Error;

use crate::store::ProductInput;

/// Request body exactly as the client sent it
///
/// All fields are optional so the presence checks run after decoding,
/// not during it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Validation failure for a draft
///
/// Rendered as a single 400 message so the error contract stays the same
/// regardless of which field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing required fields")]
pub struct MissingFields;

impl ProductDraft {
    /// Check the required fields and produce a typed input
    ///
    /// A price of zero fails the presence check the same way an empty
    /// string does; this mirrors the published API contract. Negative
    /// prices are rejected as well, since prices are non-negative.
    pub fn validate(self) -> Result<ProductInput, MissingFields> {
        let name = self.name.filter(|s| !s.is_empty()).ok_or(MissingFields)?;
        let description = self
            .description
            .filter(|s| !s.is_empty())
            .ok_or(MissingFields)?;
        let category = self
            .category
            .filter(|s| !s.is_empty())
            .ok_or(MissingFields)?;
        let price = self.price.filter(|p| *p > 0.0).ok_or(MissingFields)?;

        Ok(ProductInput {
            name,
            description,
            price,
            category,
            in_stock: self.in_stock,
        })
    }
}
