//! Canned in-memory backend for offline development and tests.
//!
//! # Design
//! `LocalData` answers the same four questions as the remote backend without
//! a network round-trip. It is selected through `ClientConfig::use_local_data`
//! and plugged in as an alternate backend by `OrderingClient`; nothing in the
//! wire contract knows about it. Image locators of fixture items are bare
//! asset names, looked up in an embedded asset set.

use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::image::PLACEHOLDER_PNG;
use crate::types::{MenuItem, PreparationEstimate};

/// Minutes the fixture backend estimates per ordered dish.
pub const MINUTES_PER_ITEM: u32 = 5;

const CATEGORIES: [&str; 2] = ["appetizers", "entrees"];

// (id, name, description, price, category, asset)
const DISHES: [(u64, &str, &str, f64, &str, &str); 6] = [
    (
        1,
        "Spaghetti and Meatballs",
        "Seasoned meatballs on top of freshly-made spaghetti. Served with a robust tomato sauce.",
        9.0,
        "entrees",
        "SpaghettiAndMeatballs",
    ),
    (
        2,
        "Margherita Pizza",
        "Tomato sauce, fresh mozzarella, basil, and extra-virgin olive oil.",
        10.0,
        "entrees",
        "MargheritaPizza",
    ),
    (
        3,
        "Grilled Steelhead Trout Sandwich",
        "Pacific steelhead trout with lettuce, tomato, and red onion.",
        9.0,
        "entrees",
        "GrilledSteelheadTroutSandwich",
    ),
    (
        4,
        "Pesto Linguini",
        "Linguini tossed with basil pesto, toasted pine nuts, and shaved parmesan.",
        9.0,
        "entrees",
        "PestoLinguini",
    ),
    (
        5,
        "Chicken Noodle Soup",
        "Delicious chicken simmered alongside yellow onions, carrots, celery, and bay leaves, chicken stock.",
        3.0,
        "appetizers",
        "ChickenNoodleSoup",
    ),
    (
        6,
        "Italian Salad",
        "Garlic, red onions, tomatoes, mushrooms, and olives on top of romaine lettuce.",
        5.0,
        "appetizers",
        "ItalianSalad",
    ),
];

/// Deterministic catalog, estimates and image assets.
#[derive(Debug, Clone)]
pub struct LocalData {
    categories: Vec<String>,
    items: Vec<MenuItem>,
    assets: HashMap<String, &'static [u8]>,
}

impl Default for LocalData {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalData {
    pub fn new() -> Self {
        let items: Vec<MenuItem> = DISHES
            .iter()
            .map(|&(id, name, description, price, category, asset)| MenuItem {
                id,
                name: name.to_string(),
                description: description.to_string(),
                price,
                category: category.to_string(),
                image_url: asset.to_string(),
            })
            .collect();
        let assets = DISHES
            .iter()
            .map(|&(.., asset)| (asset.to_string(), PLACEHOLDER_PNG))
            .collect();
        Self {
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            items,
            assets,
        }
    }

    pub fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    /// Same filtering rule as the remote `/menu`: empty means everything.
    pub fn menu_items(&self, category: Option<&str>) -> Vec<MenuItem> {
        match category.filter(|c| !c.is_empty()) {
            Some(category) => self
                .items
                .iter()
                .filter(|item| item.category == category)
                .cloned()
                .collect(),
            None => self.items.clone(),
        }
    }

    pub fn estimate(&self, menu_ids: &[u64]) -> PreparationEstimate {
        let count = u32::try_from(menu_ids.len()).unwrap_or(u32::MAX);
        PreparationEstimate(count.saturating_mul(MINUTES_PER_ITEM))
    }

    /// Look up an asset by the last path segment of `locator`, extension
    /// stripped, so both `ItalianSalad` and `/images/ItalianSalad.png` hit.
    pub fn image(&self, locator: &str) -> ApiResult<Vec<u8>> {
        let key = asset_key(locator);
        self.assets
            .get(key)
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| ApiError::AssetNotFound(key.to_string()))
    }
}

fn asset_key(locator: &str) -> &str {
    let without_query = locator.split(['?', '#']).next().unwrap_or(locator);
    let segment = without_query
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(without_query);
    match segment.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => segment,
    }
}
