//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the dashboard page and its live-refreshed content
//! - HTML view functions for the period selectors, summary card and export control
//! - State types used by the handlers

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Month;

use crate::{
    AppState, Error,
    dashboard::{charts::commission_chart_view, tables::sales_table},
    endpoints::{self, with_query},
    format::{format_currency, month_name},
    goal::{CommissionGoal, GoalTracker, goal_widget},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement,
        LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    navigation::NavBar,
    period::{Period, PeriodQuery},
    sale::{ProductFilter, SaleEntry, SaleRepository, total_commission},
    timezone::local_today,
};

const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The cached sales.
    pub sales: SaleRepository,
    /// The commission goal.
    pub goal_tracker: GoalTracker,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
            goal_tracker: state.goal_tracker.clone(),
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    period: Period,
    years: Vec<i32>,
    sales: Vec<SaleEntry>,
    total: f64,
    goal: Option<CommissionGoal>,
}

/// Display the sales, commission and goal for the selected month and product filter.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, Error> {
    let data = build_dashboard_data(&state, query)?;

    Ok(dashboard_view(&data).into_response())
}

/// Render only the dashboard content, used to refresh the page when the sales change.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    match build_dashboard_data(&state, query) {
        Ok(data) => dashboard_content(&data).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

fn build_dashboard_data(state: &DashboardState, query: PeriodQuery) -> Result<DashboardData, Error> {
    let today = local_today(&state.local_timezone)?;
    let period = Period::resolve(query, today);
    let sales = period.sales(&state.sales);

    Ok(DashboardData {
        years: selectable_years(state.sales.distinct_years(), today.year()),
        total: total_commission(&sales),
        goal: state.goal_tracker.goal(),
        period,
        sales,
    })
}

/// The years with sales plus the current year, newest first.
fn selectable_years(mut years: Vec<i32>, current_year: i32) -> Vec<i32> {
    years.push(current_year);
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

fn dashboard_view(data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let content_endpoint = with_query(endpoints::DASHBOARD_CONTENT, &data.period.query_string());

    let content = html!(
        (nav_bar)

        div
            hx-ext="sse"
            sse-connect=(endpoints::SALES_FEED)
            class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            div
                id="dashboard-content"
                hx-get=(content_endpoint)
                hx-trigger="sse:snapshot"
                hx-swap="innerHTML"
                hx-target-error="#alert-container"
                class="w-full"
            {
                (dashboard_content(data))
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    base("Painel", &scripts, &content)
}

fn dashboard_content(data: &DashboardData) -> Markup {
    html!(
        (period_selectors(&data.period, &data.years))

        div class="grid grid-cols-1 lg:grid-cols-2 gap-4 mb-4"
        {
            (total_card(&data.period, data.total))
            (goal_widget(data.goal, data.total, &data.period, None))
        }

        section id="chart" class={(CARD_STYLE) " mb-4"}
        {
            (commission_chart_view(&data.sales))
        }

        section id="sales" class="w-full mb-8"
        {
            div class="flex justify-between flex-wrap items-end gap-2 mb-4"
            {
                h2 class="text-xl font-semibold" { "Registros de Vendas" }

                div class="flex gap-4 items-center"
                {
                    a href=(endpoints::NEW_SALE_VIEW) class=(LINK_STYLE) { "Nova Venda" }
                    (export_control(&data.period, &data.sales))
                }
            }

            (sales_table(&data.sales))
        }
    )
}

fn period_selectors(period: &Period, years: &[i32]) -> Markup {
    html!(
        form
            id="period-selectors"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            onchange="this.submit()"
            class="grid grid-cols-1 sm:grid-cols-3 gap-4 mb-4"
        {
            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Ano" }
                select id="year" name="year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for year in years {
                        option value=(year) selected[*year == period.year] { (year) }
                    }
                }
            }

            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Mês" }
                select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (index, month) in months().enumerate() {
                        option value=(index) selected[month == period.month] { (month_name(month)) }
                    }
                }
            }

            div
            {
                label for="product" class=(FORM_LABEL_STYLE) { "Produto" }
                select id="product" name="product" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for filter in ProductFilter::ALL {
                        option value=(filter.as_str()) selected[filter == period.filter]
                        {
                            (filter.label())
                        }
                    }
                }
            }

            noscript
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filtrar" }
            }
        }
    )
}

fn months() -> impl Iterator<Item = Month> {
    std::iter::successors(Some(Month::January), |month| match month {
        Month::December => None,
        month => Some(month.next()),
    })
}

fn total_card(period: &Period, total: f64) -> Markup {
    html!(
        div id="total-commission" class=(CARD_STYLE)
        {
            h2 class="text-xl font-semibold mb-2" { "Comissão Total" }
            p class="text-3xl font-bold text-green-600 dark:text-green-400"
            {
                (format_currency(total))
            }
            p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
            {
                (period.label()) " · " (period.filter.label())
            }
        }
    )
}

/// A download link for the report.
///
/// When there is nothing to export the control asks the server instead, so
/// the refusal is shown as an alert rather than downloaded.
fn export_control(period: &Period, sales: &[SaleEntry]) -> Markup {
    let export_endpoint = with_query(endpoints::EXPORT, &period.query_string());
    let style = "px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 \
        dark:hover:bg-blue-700 text-white rounded";

    if sales.is_empty() && period.filter == ProductFilter::All {
        html!(
            button
                id="export-report"
                type="button"
                hx-get=(export_endpoint)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                class=(style)
            {
                "Exportar PDF"
            }
        )
    } else {
        html!(
            a id="export-report" href=(export_endpoint) download class=(style)
            {
                "Exportar PDF"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        AppState,
        period::PeriodQuery,
        sale::{Product, ProductFilter},
        test_utils::{
            assert_status_ok, assert_valid_html, create_test_sale, get_test_app_state,
            parse_html_document, parse_html_fragment, printer,
        },
    };

    use super::{DashboardState, get_dashboard_content, get_dashboard_page, selectable_years};

    fn dashboard_state(state: &AppState) -> DashboardState {
        DashboardState {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
            goal_tracker: state.goal_tracker.clone(),
        }
    }

    fn march_2025(product: ProductFilter) -> Query<PeriodQuery> {
        Query(PeriodQuery {
            year: Some(2025),
            month: Some(2),
            product,
        })
    }

    fn seed(state: &AppState) {
        create_test_sale(
            state,
            date!(2025 - 03 - 15),
            "João",
            printer("HP M404dn", "Venda"),
            500.0,
            10.0,
        );
        create_test_sale(
            state,
            date!(2025 - 03 - 10),
            "Maria",
            Product::TonerRefill,
            80.0,
            10.0,
        );
        create_test_sale(
            state,
            date!(2024 - 03 - 10),
            "Pedro",
            Product::TonerRefill,
            100.0,
            10.0,
        );
    }

    #[track_caller]
    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("could not find {selector}"))
            .text()
            .collect::<String>()
    }

    #[test]
    fn years_include_current_year_newest_first() {
        assert_eq!(selectable_years(vec![2024, 2025], 2026), vec![2026, 2025, 2024]);
        assert_eq!(selectable_years(vec![2025, 2026], 2026), vec![2026, 2025]);
        assert_eq!(selectable_years(vec![], 2026), vec![2026]);
    }

    #[tokio::test]
    async fn dashboard_page_shows_selected_month() {
        let state = get_test_app_state();
        seed(&state);

        let response = get_dashboard_page(
            State(dashboard_state(&state)),
            march_2025(ProductFilter::All),
        )
        .await
        .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        assert!(text_of(&html, "#total-commission").contains("R$ 58,00"));
        let rows = html
            .select(&Selector::parse("#sales-table tbody tr").unwrap())
            .count();
        assert_eq!(rows, 2);
        assert!(
            html.select(&Selector::parse("#commission-chart").unwrap())
                .next()
                .is_some()
        );
        assert!(
            html.select(&Selector::parse("#goal-widget").unwrap())
                .next()
                .is_some()
        );

        let selected_month = html
            .select(&Selector::parse("#month option[selected]").unwrap())
            .next()
            .expect("no month selected");
        assert_eq!(selected_month.value().attr("value"), Some("2"));
        let years: Vec<_> = html
            .select(&Selector::parse("#year option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert!(years.contains(&"2025") && years.contains(&"2024"));
    }

    #[tokio::test]
    async fn dashboard_listens_for_snapshots() {
        let state = get_test_app_state();

        let response = get_dashboard_page(
            State(dashboard_state(&state)),
            march_2025(ProductFilter::TonerRefill),
        )
        .await
        .unwrap();

        let html = parse_html_document(response).await;
        let feed = html
            .select(&Selector::parse("[sse-connect]").unwrap())
            .next()
            .expect("no SSE connection");
        assert_eq!(feed.value().attr("sse-connect"), Some("/api/sales/feed"));

        let content = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .expect("no dashboard content");
        assert_eq!(content.value().attr("hx-trigger"), Some("sse:snapshot"));
        assert_eq!(
            content.value().attr("hx-get"),
            Some("/api/dashboard/content?year=2025&month=2&product=toner")
        );
    }

    #[tokio::test]
    async fn product_filter_narrows_sales() {
        let state = get_test_app_state();
        seed(&state);

        let response = get_dashboard_content(
            State(dashboard_state(&state)),
            march_2025(ProductFilter::TonerRefill),
        )
        .await;

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(text_of(&html, "#total-commission").contains("R$ 8,00"));
        assert!(text_of(&html, "#sales-table").contains("Maria"));
        assert!(!text_of(&html, "#sales-table").contains("João"));
    }

    #[tokio::test]
    async fn empty_month_shows_placeholders() {
        let state = get_test_app_state();
        seed(&state);

        let response = get_dashboard_content(
            State(dashboard_state(&state)),
            Query(PeriodQuery {
                year: Some(2025),
                month: Some(0),
                product: ProductFilter::All,
            }),
        )
        .await;

        let html = parse_html_fragment(response).await;
        assert!(text_of(&html, "#total-commission").contains("R$ 0,00"));
        assert!(text_of(&html, "#chart-placeholder").contains("Sem dados de comissão"));
        assert!(
            html.select(&Selector::parse("#no-sales").unwrap())
                .next()
                .is_some()
        );

        let export = html
            .select(&Selector::parse("#export-report").unwrap())
            .next()
            .expect("no export control");
        assert_eq!(export.value().name(), "button");
        assert_eq!(
            export.value().attr("hx-get"),
            Some("/api/export?year=2025&month=0&product=all")
        );
    }

    #[tokio::test]
    async fn export_is_a_download_link_when_there_are_sales() {
        let state = get_test_app_state();
        seed(&state);

        let response = get_dashboard_content(
            State(dashboard_state(&state)),
            march_2025(ProductFilter::PrinterSale),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let export = html
            .select(&Selector::parse("#export-report").unwrap())
            .next()
            .expect("no export control");
        assert_eq!(export.value().name(), "a");
        assert_eq!(
            export.value().attr("href"),
            Some("/api/export?year=2025&month=2&product=impressora")
        );
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let state = get_test_app_state();
        let mut dashboard_state = dashboard_state(&state);
        dashboard_state.local_timezone = "Not/AZone".to_owned();

        let response =
            get_dashboard_content(State(dashboard_state), march_2025(ProductFilter::All)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
