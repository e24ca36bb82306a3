//! The new sale page and the endpoint that records a sale.

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{FORM_CONTAINER_STYLE, base, real_input_styles},
    navigation::NavBar,
    sale::{
        SaleRepository,
        form::{SaleForm, SaleFormDefaults, sale_form_view},
    },
    timezone::local_today,
};

/// The state needed for the new sale page.
#[derive(Debug, Clone)]
pub struct NewSalePageState {
    pub local_timezone: String,
}

impl FromRef<AppState> for NewSalePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed for recording a sale.
#[derive(Debug, Clone)]
pub struct CreateSaleState {
    pub sales: SaleRepository,
}

impl FromRef<AppState> for CreateSaleState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
        }
    }
}

/// Render the page for recording a new sale.
pub async fn get_new_sale_page(State(state): State<NewSalePageState>) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(new_sale_view(today).into_response())
}

/// Record a sale and send the browser back to the dashboard.
pub async fn create_sale_endpoint(
    State(state): State<CreateSaleState>,
    Form(form): Form<SaleForm>,
) -> Response {
    let sale = match form.into_new_sale() {
        Ok(sale) => sale,
        Err(error) => return error.into_alert_response(),
    };

    match state.sales.create(sale) {
        Ok(sale) => {
            tracing::info!("recorded sale {} for {}", sale.id, sale.client_name);

            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while recording a sale: {error}");

            error.into_alert_response()
        }
    }
}

fn new_sale_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::NEW_SALE_VIEW).into_html();
    let form = sale_form_view(
        "hx-post",
        endpoints::SALES_API,
        &SaleFormDefaults::new_sale(today),
        "Adicionar Serviço",
        endpoints::DASHBOARD_VIEW,
    );

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-2" { "Adicionar Novo Serviço" }
            p class="mb-6 text-sm text-gray-500 dark:text-gray-400"
            {
                "Preencha os detalhes do serviço para calcular a comissão."
            }

            (form)
        }
    };

    base("Nova Venda", &[real_input_styles()], &content)
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use axum_extra::extract::Form;

    use crate::{
        endpoints,
        sale::form::SaleForm,
        test_utils::{
            assert_content_type, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_hx_redirect, assert_status_ok, assert_valid_html, get_test_app_state,
            must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{CreateSaleState, NewSalePageState, create_sale_endpoint, get_new_sale_page};

    #[tokio::test]
    async fn render_page() {
        let response = get_new_sale_page(State(NewSalePageState {
            local_timezone: "Etc/UTC".to_owned(),
        }))
        .await
        .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::SALES_API, "hx-post");
        assert_form_submit_button_with_text(&form, "Adicionar Serviço");
    }

    #[tokio::test]
    async fn creates_sale_and_redirects() {
        let state = get_test_app_state();
        let mut subscription = state.sales.subscribe();
        let form: SaleForm = serde_html_form::from_str(
            "date=2025-03-15&client_name=Jo%C3%A3o&product_type=impressora\
            &printer_model=HP+M404dn&service_performed=Venda&sale_value=500&commission_rate=10",
        )
        .unwrap();

        let response = create_sale_endpoint(
            State(CreateSaleState {
                sales: state.sales.clone(),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let snapshot = subscription.current();
        assert_eq!(snapshot.sales.len(), 1);
        assert_eq!(snapshot.sales[0].client_name, "João");
        assert_eq!(snapshot.sales[0].commission_value, 50.0);
    }

    #[tokio::test]
    async fn invalid_sale_is_not_saved() {
        let state = get_test_app_state();
        let form: SaleForm = serde_html_form::from_str(
            "date=2025-03-15&client_name=J&product_type=toner&sale_value=80&commission_rate=10",
        )
        .unwrap();

        let response = create_sale_endpoint(
            State(CreateSaleState {
                sales: state.sales.clone(),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.sales.snapshot().sales.is_empty());
        let html = parse_html_fragment(response).await;
        assert!(
            html.html()
                .contains("O nome do cliente deve ter pelo menos 2 caracteres.")
        );
    }

    #[tokio::test]
    async fn empty_sale_value_shows_validation_alert() {
        let state = get_test_app_state();
        let form: SaleForm = serde_html_form::from_str(
            "date=2025-03-15&client_name=Maria&product_type=toner&sale_value=&commission_rate=10",
        )
        .unwrap();

        let response = create_sale_endpoint(
            State(CreateSaleState {
                sales: state.sales.clone(),
            }),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(state.sales.snapshot().sales.is_empty());
        let html = parse_html_fragment(response).await;
        assert!(html.html().contains("O valor da venda deve ser positivo."));
    }
}
