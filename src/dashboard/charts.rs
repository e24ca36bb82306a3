//! The commission chart.
//!
//! The chart is an ECharts bar chart with one bar per product type that earned
//! commission in the displayed sales. Its options are generated with `charming`
//! and initialised by an inline script so that the chart is redrawn whenever
//! the dashboard content is swapped in by htmx.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::Bar,
};
use maud::{Markup, PreEscaped, html};

use crate::sale::{ProductType, SaleEntry};

/// Shown instead of the chart when no product type earned commission.
pub(super) const NO_CHART_DATA_MESSAGE: &str =
    "Sem dados de comissão para exibir no gráfico para o filtro atual.";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// The commission earned per product type, leaving out types that earned nothing.
pub(super) fn commission_by_product_type(sales: &[SaleEntry]) -> Vec<(ProductType, f64)> {
    ProductType::ALL
        .iter()
        .map(|&product_type| {
            let total = sales
                .iter()
                .filter(|sale| sale.product_type() == product_type)
                .map(|sale| sale.commission_value)
                .sum();

            (product_type, total)
        })
        .filter(|(_, total)| *total > 0.0)
        .collect()
}

pub(super) fn commission_chart(totals: &[(ProductType, f64)]) -> Chart {
    let labels: Vec<String> = totals
        .iter()
        .map(|(product_type, _)| product_type.label().to_owned())
        .collect();
    let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();

    Chart::new()
        .title(Title::new().text("Comissões por Produto"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Comissão").data(values))
}

/// The chart container and its initialisation script, or the placeholder text
/// when there is nothing to plot.
pub(super) fn commission_chart_view(sales: &[SaleEntry]) -> Markup {
    let totals = commission_by_product_type(sales);

    if totals.is_empty() {
        return html! {
            p
                id="chart-placeholder"
                class="py-16 text-center text-gray-500 dark:text-gray-400"
            {
                (NO_CHART_DATA_MESSAGE)
            }
        };
    }

    let chart = DashboardChart {
        id: "commission-chart",
        options: commission_chart(&totals).to_string(),
    };

    html! {
        div
            id=(chart.id)
            class="min-h-[380px] rounded dark:bg-gray-100"
        {}

        script { (chart_script(&chart)) }
    }
}

fn chart_script(chart: &DashboardChart) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', () => chart.resize());

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        chart.id, chart.options
    ))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
