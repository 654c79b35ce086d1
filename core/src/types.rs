//! Domain DTOs for the restaurant menu API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Wire envelopes (`CategoryList`, `MenuItemList`, `OrderRequest`,
//! `PreparationTime`) stay separate from the domain values handed to callers
//! so that a schema change shows up as a decode error rather than a silently
//! defaulted field. Integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single dish as returned by the `/menu` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
}

impl MenuItem {
    /// Price with a currency symbol and two decimals, e.g. `$9.00`.
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

/// Response envelope of `GET /categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

/// Response envelope of `GET /menu`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemList {
    pub items: Vec<MenuItem>,
}

/// Request payload of `POST /order`. Duplicate ids are kept as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    #[serde(rename = "menuIds")]
    pub menu_ids: Vec<u64>,
}

/// Response envelope of `POST /order`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreparationTime {
    pub preparation_time: u32,
}

/// Estimated wait, in minutes, for a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PreparationEstimate(pub u32);

impl PreparationEstimate {
    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl From<PreparationTime> for PreparationEstimate {
    fn from(value: PreparationTime) -> Self {
        PreparationEstimate(value.preparation_time)
    }
}

impl std::fmt::Display for PreparationEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

/// Distinct categories of a catalog, in the order they first appear.
///
/// Used when a backend exposes no `/categories` endpoint.
pub fn categories_from_items(items: &[MenuItem]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for item in items {
        if !categories.iter().any(|c| c == &item.category) {
            categories.push(item.category.clone());
        }
    }
    categories
}

pub(crate) fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
