//! Stateless HTTP request builder and response parser for the menu API.
//!
//! # Design
//! `MenuApi` holds only the base origin and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! `OrderingClient` runs the round-trip in between, so this layer stays
//! deterministic and free of I/O.
//!
//! Every parse step is all-or-nothing: a non-2xx status, an empty body or a
//! single malformed element fails the whole call.

use url::Url;

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::image::ImageFormat;
use crate::types::{
    CategoryList, MenuItem, MenuItemList, OrderRequest, PreparationEstimate, PreparationTime,
};

/// Builds requests against, and parses responses from, one backend origin.
#[derive(Debug, Clone)]
pub struct MenuApi {
    base: Url,
}

impl MenuApi {
    /// `base` must be an absolute http(s) URL; `ClientConfig::base_origin`
    /// validates it. A missing trailing slash on the path is added so that
    /// endpoints are appended rather than replacing the last segment.
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        Self { base }
    }

    fn endpoint(&self, name: &str) -> ApiResult<Url> {
        Ok(self.base.join(name)?)
    }

    pub fn build_fetch_categories(&self) -> ApiResult<HttpRequest> {
        Ok(HttpRequest::get(self.endpoint("categories")?.into()))
    }

    /// An empty category is the same as none: the full catalog is requested.
    pub fn build_fetch_menu_items(&self, category: Option<&str>) -> ApiResult<HttpRequest> {
        let mut url = self.endpoint("menu")?;
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            url.query_pairs_mut().append_pair("category", category);
        }
        Ok(HttpRequest::get(url.into()))
    }

    pub fn build_submit_order(&self, menu_ids: &[u64]) -> ApiResult<HttpRequest> {
        let payload = OrderRequest {
            menu_ids: menu_ids.to_vec(),
        };
        let body =
            serde_json::to_string(&payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.endpoint("order")?.into(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_fetch_image(&self, locator: &str) -> ApiResult<HttpRequest> {
        Ok(HttpRequest::get(self.resolve_image_url(locator)?.into()))
    }

    /// Rewrite `locator` so that it points at this backend.
    ///
    /// Path and query come from the locator; scheme, host and port come from
    /// the base origin. Relative locators are taken from the origin root.
    pub fn resolve_image_url(&self, locator: &str) -> ApiResult<Url> {
        let mut root = self.base.clone();
        root.set_path("/");
        let parsed = match Url::parse(locator) {
            Ok(url) if !url.cannot_be_a_base() => url,
            // `host:port/path` without a scheme parses as scheme `host`.
            Ok(_) => root.join(&format!("//{locator}"))?,
            Err(url::ParseError::RelativeUrlWithoutBase) => root.join(locator)?,
            Err(e) => return Err(e.into()),
        };

        let mut resolved = self.base.clone();
        resolved.set_path(parsed.path());
        resolved.set_query(parsed.query());
        Ok(resolved)
    }

    pub fn parse_fetch_categories(&self, response: HttpResponse) -> ApiResult<Vec<String>> {
        check_status(&response)?;
        let list: CategoryList = serde_json::from_slice(&response.body)?;
        Ok(list.categories)
    }

    pub fn parse_fetch_menu_items(&self, response: HttpResponse) -> ApiResult<Vec<MenuItem>> {
        check_status(&response)?;
        let list: MenuItemList = serde_json::from_slice(&response.body)?;
        list.items.iter().try_for_each(validate_item)?;
        Ok(list.items)
    }

    pub fn parse_submit_order(&self, response: HttpResponse) -> ApiResult<PreparationEstimate> {
        check_status(&response)?;
        let time: PreparationTime = serde_json::from_slice(&response.body)?;
        Ok(time.into())
    }

    pub fn parse_fetch_image(&self, response: HttpResponse) -> ApiResult<Vec<u8>> {
        check_status(&response)?;
        if ImageFormat::sniff(&response.body).is_none() {
            return Err(ApiError::NotAnImage);
        }
        Ok(response.body)
    }
}

/// Ids are positive and prices are finite and non-negative.
fn validate_item(item: &MenuItem) -> ApiResult<()> {
    if item.id == 0 {
        return Err(ApiError::Decode(format!("menu item '{}' has id 0", item.name)));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(ApiError::Decode(format!(
            "menu item {} has invalid price {}",
            item.id, item.price
        )));
    }
    Ok(())
}

/// Map non-2xx status codes to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body_text(),
    })
}
