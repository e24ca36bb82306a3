//! The table of sales shown on the dashboard.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    format::{format_currency, format_date, format_percent},
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE,
    },
    sale::SaleEntry,
};

const NO_SALES_MESSAGE: &str = "Nenhuma venda registrada para o período selecionado.";

/// Renders one row per sale with links to edit or delete it.
pub(super) fn sales_table(sales: &[SaleEntry]) -> Markup {
    if sales.is_empty() {
        return html! {
            p
                id="no-sales"
                class="py-8 text-center text-gray-500 dark:text-gray-400"
            {
                (NO_SALES_MESSAGE)
            }
        };
    }

    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table
                id="sales-table"
                class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Data" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Cliente" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Produto" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Modelo / Serviço" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Valor" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Taxa" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Comissão" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Ações" }
                    }
                }

                tbody
                {
                    @for sale in sales {
                        (sale_row(sale))
                    }
                }
            }
        }
    }
}

fn sale_row(sale: &SaleEntry) -> Markup {
    let edit_url = format_endpoint(endpoints::EDIT_SALE_VIEW, sale.id.as_str());
    let delete_url = format_endpoint(endpoints::SALE, sale.id.as_str());
    let details = match (
        sale.product.printer_model(),
        sale.product.service_performed(),
    ) {
        (Some(model), Some(service)) if !service.is_empty() => format!("{model} / {service}"),
        (Some(model), _) => model.to_owned(),
        _ => "-".to_owned(),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-sale-id=(sale.id.as_str())
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (format_date(sale.date)) }
            td class=(TABLE_CELL_STYLE) { (sale.client_name) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(BADGE_STYLE) { (sale.product_type().label()) }
            }
            td class=(TABLE_CELL_STYLE) { (details) }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap"}
            {
                (format_currency(sale.sale_value))
            }
            td class={(TABLE_CELL_STYLE) " text-right"}
            {
                (format_percent(sale.commission_rate))
            }
            td class={(TABLE_CELL_STYLE) " text-right whitespace-nowrap font-semibold"}
            {
                (format_currency(sale.commission_value))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Editar" }

                    button
                        hx-delete=(delete_url)
                        hx-confirm={
                            "Tem certeza que deseja excluir a venda de '"
                            (sale.client_name) "'?"
                        }
                        hx-target="closest tr"
                        hx-target-error="#alert-container"
                        hx-swap="delete"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Excluir"
                    }
                }
            }
        }
    }
}
