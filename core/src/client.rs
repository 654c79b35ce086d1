//! Asynchronous ordering client used by the UI layer.
//!
//! # Design
//! `OrderingClient` picks one of two interchangeable backends at
//! construction: the remote backend (`MenuApi` builds the request, a
//! `Transport` moves it, `MenuApi` parses the answer) or the canned
//! `LocalData`. It holds no mutable state, so one instance can serve every
//! screen and any number of calls can be in flight at once.
//!
//! Each operation resolves exactly once. Failures of any kind are reported
//! as `FetchFailed` or `SubmitFailed` with the cause attached; nothing is
//! retried and no partial result is returned.

use tracing::{debug, warn};

use crate::api::MenuApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError, OrderingError, OrderingResult};
use crate::fixtures::LocalData;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::transport::ReqwestTransport;
use crate::types::{MenuItem, PreparationEstimate};

#[derive(Debug, Clone)]
enum Backend<T> {
    Remote { api: MenuApi, transport: T },
    Local(LocalData),
}

/// Entry point for fetching the menu and submitting orders.
#[derive(Debug, Clone)]
pub struct OrderingClient<T = ReqwestTransport> {
    backend: Backend<T>,
}

impl OrderingClient<ReqwestTransport> {
    /// Client over the default reqwest transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T: Transport> OrderingClient<T> {
    /// Fails only if the configured base origin is invalid. In local mode
    /// the transport is never used.
    pub fn new(config: &ClientConfig, transport: T) -> Result<Self, ConfigError> {
        let base = config.base_origin()?;
        let backend = if config.use_local_data {
            debug!("ordering client using local data");
            Backend::Local(LocalData::new())
        } else {
            debug!(base_url = %base, "ordering client using remote backend");
            Backend::Remote {
                api: MenuApi::new(base),
                transport,
            }
        };
        Ok(Self { backend })
    }

    pub fn is_local(&self) -> bool {
        matches!(self.backend, Backend::Local(_))
    }

    /// Category names, verbatim and in server order.
    pub async fn fetch_categories(&self) -> OrderingResult<Vec<String>> {
        let result = match &self.backend {
            Backend::Local(data) => Ok(data.categories()),
            Backend::Remote { api, transport } => {
                let request = api.build_fetch_categories();
                round_trip(transport, request, |r| api.parse_fetch_categories(r)).await
            }
        };
        match result {
            Ok(categories) => {
                debug!(count = categories.len(), "categories fetched");
                Ok(categories)
            }
            Err(e) => {
                warn!(error = %e, "fetch categories failed");
                Err(OrderingError::FetchFailed(e))
            }
        }
    }

    /// Menu items of `category`, or the full catalog when it is `None` or
    /// empty. One malformed item fails the whole call.
    pub async fn fetch_menu_items(&self, category: Option<&str>) -> OrderingResult<Vec<MenuItem>> {
        let result = match &self.backend {
            Backend::Local(data) => Ok(data.menu_items(category)),
            Backend::Remote { api, transport } => {
                let request = api.build_fetch_menu_items(category);
                round_trip(transport, request, |r| api.parse_fetch_menu_items(r)).await
            }
        };
        match result {
            Ok(items) => {
                debug!(category = category.unwrap_or(""), count = items.len(), "menu fetched");
                Ok(items)
            }
            Err(e) => {
                warn!(category = category.unwrap_or(""), error = %e, "fetch menu items failed");
                Err(OrderingError::FetchFailed(e))
            }
        }
    }

    /// Submit the ids of the ordered dishes, duplicates included.
    ///
    /// On `Err` the order was not placed and no wait time may be assumed.
    pub async fn submit_order(&self, menu_ids: &[u64]) -> OrderingResult<PreparationEstimate> {
        let result = match &self.backend {
            Backend::Local(data) => Ok(data.estimate(menu_ids)),
            Backend::Remote { api, transport } => {
                let request = api.build_submit_order(menu_ids);
                round_trip(transport, request, |r| api.parse_submit_order(r)).await
            }
        };
        match result {
            Ok(estimate) => {
                debug!(items = menu_ids.len(), minutes = estimate.minutes(), "order submitted");
                Ok(estimate)
            }
            Err(e) => {
                warn!(items = menu_ids.len(), error = %e, "submit order failed");
                Err(OrderingError::SubmitFailed(e))
            }
        }
    }

    /// Raw image bytes for `locator`. The caller decides what to show on
    /// failure.
    pub async fn fetch_image(&self, locator: &str) -> OrderingResult<Vec<u8>> {
        let result = match &self.backend {
            Backend::Local(data) => data.image(locator),
            Backend::Remote { api, transport } => {
                let request = api.build_fetch_image(locator);
                round_trip(transport, request, |r| api.parse_fetch_image(r)).await
            }
        };
        match result {
            Ok(bytes) => {
                debug!(locator, bytes = bytes.len(), "image fetched");
                Ok(bytes)
            }
            Err(e) => {
                warn!(locator, error = %e, "fetch image failed");
                Err(OrderingError::FetchFailed(e))
            }
        }
    }
}

async fn round_trip<T, R, F>(transport: &T, request: ApiResult<HttpRequest>, parse: F) -> ApiResult<R>
where
    T: Transport,
    F: FnOnce(HttpResponse) -> ApiResult<R>,
{
    let request = request?;
    debug!(method = request.method.as_str(), url = %request.url, "sending request");
    let response = transport.execute(request).await.map_err(ApiError::from)?;
    parse(response)
}
