//! Dashboard module
//!
//! Provides the overview page with the commission earned in a month, the goal
//! widget, a chart of commission per product type and the table of sales.
//! The content refreshes itself whenever the sales feed publishes a snapshot.

mod charts;
mod handlers;
mod tables;

pub use handlers::{get_dashboard_content, get_dashboard_page};
