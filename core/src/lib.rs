//! Networking core of the restaurant ordering app.
//!
//! # Overview
//! UI screens call `OrderingClient` to list categories, list menu items,
//! fetch item images and submit an order, and receive plain data or a
//! `FetchFailed` / `SubmitFailed` error. They own no networking logic.
//!
//! # Design
//! - `MenuApi` is stateless: `build_*` produces an `HttpRequest`, `parse_*`
//!   consumes an `HttpResponse` (host-does-IO pattern).
//! - `Transport` moves the bytes; `ReqwestTransport` is the default, tests
//!   plug in stubs.
//! - `OrderingClient` dispatches to the remote backend or to `LocalData`,
//!   chosen once from `ClientConfig`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod http;
pub mod image;
pub mod order;
pub mod transport;
pub mod types;

pub use api::MenuApi;
pub use client::OrderingClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, OrderingError, TransportError};
pub use fixtures::LocalData;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use image::ImageFormat;
pub use order::{order_channel, Order, OrderEvent, OrderNotifier, OrderUpdates};
pub use transport::ReqwestTransport;
pub use types::{categories_from_items, MenuItem, PreparationEstimate};
