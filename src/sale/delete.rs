//! Sale deletion endpoint.

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    sale::{SaleId, SaleRepository},
};

/// The state needed for deleting a sale.
#[derive(Debug, Clone)]
pub struct DeleteSaleState {
    pub sales: SaleRepository,
}

impl FromRef<AppState> for DeleteSaleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
        }
    }
}

/// Handle sale deletion. Returns success alert or error.
pub async fn delete_sale_endpoint(
    Path(sale_id): Path<SaleId>,
    State(state): State<DeleteSaleState>,
) -> Response {
    match state.sales.delete(&sale_id) {
        Ok(()) => Alert::SuccessSimple {
            message: "Venda excluída com sucesso".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingSale) => Error::DeleteMissingSale.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting sale {sale_id}: {error}");
            error.into_alert_response()
        }
    }
}
