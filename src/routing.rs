//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    goal::{clear_goal_endpoint, set_goal_endpoint},
    internal_server_error::get_internal_server_error_page,
    motivation::generate_alert_endpoint,
    not_found::get_404_not_found,
    report::export_report_endpoint,
    sale::{
        create_sale_endpoint, delete_sale_endpoint, get_edit_sale_page, get_new_sale_page,
        list_sales_endpoint, sales_feed_endpoint, update_sale_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::NEW_SALE_VIEW, get(get_new_sale_page))
        .route(endpoints::EDIT_SALE_VIEW, get(get_edit_sale_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::SALES_API,
            get(list_sales_endpoint).post(create_sale_endpoint),
        )
        .route(endpoints::SALES_FEED, get(sales_feed_endpoint))
        .route(
            endpoints::SALE,
            put(update_sale_endpoint).delete(delete_sale_endpoint),
        )
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(
            endpoints::GOAL,
            post(set_goal_endpoint).delete(clear_goal_endpoint),
        )
        .route(endpoints::GOAL_ALERT, post(generate_alert_endpoint))
        .route(endpoints::EXPORT, get(export_report_endpoint));

    page_routes
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
