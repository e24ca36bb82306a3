//! JSON access to the cached sales.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::Serialize;

use crate::{
    AppState,
    sale::{SaleDocument, SaleRepository, Snapshot},
};

/// The state needed to read the cached sales.
#[derive(Debug, Clone)]
pub struct SalesApiState {
    pub sales: SaleRepository,
}

impl FromRef<AppState> for SalesApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
        }
    }
}

/// A snapshot in the wire format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    pub is_loading: bool,
    pub sales: Vec<SaleDocument>,
}

impl From<&Snapshot> for SnapshotDocument {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            is_loading: snapshot.is_loading,
            sales: snapshot.sales.iter().map(SaleDocument::from).collect(),
        }
    }
}

/// Every cached sale as a JSON document, newest first.
pub async fn list_sales_endpoint(State(state): State<SalesApiState>) -> Json<Vec<SaleDocument>> {
    let snapshot = state.sales.snapshot();

    Json(snapshot.sales.iter().map(SaleDocument::from).collect())
}
