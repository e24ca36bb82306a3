//! Sales and the commission they earn.
//!
//! This module contains everything related to sales:
//! - The `NewSale`/`SaleEntry` models and the stored `SaleDocument` format
//! - Database functions for storing sales
//! - The `SaleRepository`, which caches every sale and publishes snapshots
//! - Page handlers for creating and editing sales, plus the JSON and SSE feeds

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod feed;
pub(crate) mod form;
mod query;
mod repository;

pub use api::list_sales_endpoint;
pub use create::{create_sale_endpoint, get_new_sale_page};
pub use db::create_sale_table;
pub use delete::delete_sale_endpoint;
pub use domain::{
    NewSale, Product, ProductFilter, ProductType, SaleDocument, SaleEntry, SaleId, parse_iso_date,
};
pub use edit::{get_edit_sale_page, update_sale_endpoint};
pub use feed::sales_feed_endpoint;
pub use query::{filter_by_product, month_from_index, total_commission};
pub use repository::{SaleRepository, Snapshot};
