//! Commissioner is a web app for tracking the commission earned on printer
//! sales and toner refills.
//!
//! This library provides a REST API that directly serves HTML pages, a live
//! feed of the recorded sales, monthly goals with AI written motivational
//! alerts and PDF commission reports.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod format;
mod goal;
mod html;
mod internal_server_error;
mod logging;
mod motivation;
mod navigation;
mod not_found;
mod period;
mod report;
mod routing;
mod sale;
#[cfg(test)]
mod test_utils;
mod timezone;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use goal::{CommissionGoal, GoalTracker};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use motivation::{
    AlertGenerator, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_REPRESENTATIVE_NAME,
    GeminiAlertGenerator,
};
pub use period::{Period, PeriodQuery};
pub use report::{Report, render_pdf, report_filename, write_report};
pub use routing::build_router;
pub use sale::{
    NewSale, Product, ProductFilter, ProductType, SaleEntry, SaleId, SaleRepository,
    month_from_index,
};
pub use timezone::{get_local_offset, local_today};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
