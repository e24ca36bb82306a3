//! The edit sale page and the endpoint that updates a sale.

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base, real_input_styles},
    navigation::NavBar,
    sale::{
        SaleEntry, SaleId, SaleRepository,
        form::{SaleForm, SaleFormDefaults, sale_form_view},
    },
};

/// The state needed for editing a sale.
#[derive(Debug, Clone)]
pub struct EditSaleState {
    pub sales: SaleRepository,
}

impl FromRef<AppState> for EditSaleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
        }
    }
}

/// Render the page for editing a sale.
pub async fn get_edit_sale_page(
    Path(sale_id): Path<SaleId>,
    State(state): State<EditSaleState>,
) -> Result<Response, Error> {
    let sale = state.sales.get(&sale_id).ok_or(Error::NotFound)?;

    Ok(edit_sale_view(&sale).into_response())
}

/// Replace every field of a sale except its id.
pub async fn update_sale_endpoint(
    Path(sale_id): Path<SaleId>,
    State(state): State<EditSaleState>,
    Form(form): Form<SaleForm>,
) -> Response {
    let sale = match form.into_new_sale() {
        Ok(sale) => sale.with_id(sale_id),
        Err(error) => return error.into_alert_response(),
    };

    match state.sales.update(&sale) {
        Ok(()) => (
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingSale) => Error::UpdateMissingSale.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating sale {}: {error}",
                sale.id
            );
            error.into_alert_response()
        }
    }
}

fn edit_sale_view(sale: &SaleEntry) -> Markup {
    let edit_endpoint = format_endpoint(endpoints::EDIT_SALE_VIEW, sale.id.as_str());
    let update_endpoint = format_endpoint(endpoints::SALE, sale.id.as_str());
    let nav_bar = NavBar::new(&edit_endpoint).into_html();
    let form = sale_form_view(
        "hx-put",
        &update_endpoint,
        &SaleFormDefaults::from(sale),
        "Salvar Alterações",
        endpoints::DASHBOARD_VIEW,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Editar Serviço" }
            (form)
        }
    };

    base("Editar Venda", &[real_input_styles()], &content)
}
