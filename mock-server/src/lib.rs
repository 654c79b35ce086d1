use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Minutes of kitchen time per ordered dish.
pub const MINUTES_PER_DISH: u32 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Categories {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MenuItems {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitOrder {
    #[serde(rename = "menuIds")]
    pub menu_ids: Vec<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreparationTime {
    pub preparation_time: u32,
}

pub type Catalog = Arc<Vec<MenuItem>>;

// 1x1 transparent PNG served for every known dish.
const DISH_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

pub fn default_catalog() -> Vec<MenuItem> {
    let dish = |id, name: &str, description: &str, price, category: &str, asset: &str| MenuItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image_url: format!("/images/{asset}.png"),
    };
    vec![
        dish(
            1,
            "Spaghetti and Meatballs",
            "Seasoned meatballs on top of freshly-made spaghetti. Served with a robust tomato sauce.",
            9.0,
            "entrees",
            "SpaghettiAndMeatballs",
        ),
        dish(
            2,
            "Margherita Pizza",
            "Tomato sauce, fresh mozzarella, basil, and extra-virgin olive oil.",
            10.0,
            "entrees",
            "MargheritaPizza",
        ),
        dish(
            3,
            "Grilled Steelhead Trout Sandwich",
            "Pacific steelhead trout with lettuce, tomato, and red onion.",
            9.0,
            "entrees",
            "GrilledSteelheadTroutSandwich",
        ),
        dish(
            4,
            "Pesto Linguini",
            "Linguini tossed with basil pesto, toasted pine nuts, and shaved parmesan.",
            9.0,
            "entrees",
            "PestoLinguini",
        ),
        dish(
            5,
            "Chicken Noodle Soup",
            "Delicious chicken simmered alongside yellow onions, carrots, celery, and bay leaves, chicken stock.",
            3.0,
            "appetizers",
            "ChickenNoodleSoup",
        ),
        dish(
            6,
            "Italian Salad",
            "Garlic, red onions, tomatoes, mushrooms, and olives on top of romaine lettuce.",
            5.0,
            "appetizers",
            "ItalianSalad",
        ),
    ]
}

pub fn app() -> Router {
    app_with_catalog(default_catalog())
}

pub fn app_with_catalog(items: Vec<MenuItem>) -> Router {
    let catalog: Catalog = Arc::new(items);
    Router::new()
        .route("/categories", get(list_categories))
        .route("/menu", get(list_menu))
        .route("/order", post(submit_order))
        .route("/images/{name}", get(get_image))
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_categories(State(catalog): State<Catalog>) -> Json<Categories> {
    let mut categories: Vec<String> = Vec::new();
    for item in catalog.iter() {
        if !categories.contains(&item.category) {
            categories.push(item.category.clone());
        }
    }
    Json(Categories { categories })
}

async fn list_menu(
    State(catalog): State<Catalog>,
    Query(query): Query<MenuQuery>,
) -> Json<MenuItems> {
    let items = match query.category.as_deref().filter(|c| !c.is_empty()) {
        Some(category) => catalog
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect(),
        None => catalog.to_vec(),
    };
    Json(MenuItems { items })
}

async fn submit_order(
    State(catalog): State<Catalog>,
    Json(order): Json<SubmitOrder>,
) -> Result<Json<PreparationTime>, StatusCode> {
    if let Some(unknown) = order
        .menu_ids
        .iter()
        .find(|id| !catalog.iter().any(|item| item.id == **id))
    {
        warn!(id = unknown, "order rejected: unknown dish");
        return Err(StatusCode::BAD_REQUEST);
    }
    let dishes = u32::try_from(order.menu_ids.len()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let preparation_time = dishes.saturating_mul(MINUTES_PER_DISH);
    info!(dishes, preparation_time, "order accepted");
    Ok(Json(PreparationTime { preparation_time }))
}

async fn get_image(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let path = format!("/images/{name}");
    if catalog.iter().any(|item| item.image_url == path) {
        Ok(([(header::CONTENT_TYPE, "image/png")], DISH_PNG))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_item_serializes_image_url_key() {
        let item = default_catalog().remove(0);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["image_url"], "/images/SpaghettiAndMeatballs.png");
        assert_eq!(json["price"], 9.0);
    }

    #[test]
    fn submit_order_reads_menu_ids_key() {
        let order: SubmitOrder = serde_json::from_str(r#"{"menuIds":[1,2,2]}"#).unwrap();
        assert_eq!(order.menu_ids, vec![1, 2, 2]);
    }

    #[test]
    fn submit_order_rejects_snake_case_key() {
        let result: Result<SubmitOrder, _> = serde_json::from_str(r#"{"menu_ids":[1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = default_catalog();
        let mut ids: Vec<u64> = catalog.iter().map(|i| i.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn catalog_entries_are_servable() {
        for item in default_catalog() {
            assert!(item.id > 0);
            assert!(item.price.is_finite() && item.price > 0.0, "{}", item.name);
            assert!(!item.description.is_empty(), "{}", item.name);
            assert!(item.image_url.starts_with("/images/"), "{}", item.image_url);
            assert!(item.image_url.ends_with(".png"), "{}", item.image_url);
        }
    }
}
