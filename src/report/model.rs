//! What goes in a commission report, independent of how it is drawn.

use crate::{
    Error,
    format::{format_currency, format_date, format_percent, month_name},
    period::Period,
    sale::{ProductFilter, ProductType, SaleEntry, total_commission},
};

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Align {
    Left,
    Right,
}

/// A table column with its width in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub width: f32,
    pub align: Align,
}

const fn column(title: &'static str, width: f32, align: Align) -> Column {
    Column {
        title,
        width,
        align,
    }
}

pub const PRINTER_COLUMNS: [Column; 7] = [
    column("Data", 22.0, Align::Left),
    column("Cliente", 34.0, Align::Left),
    column("Modelo", 28.0, Align::Left),
    column("Serviço Feito", 32.0, Align::Left),
    column("Valor Serviço", 24.0, Align::Right),
    column("Taxa Com.", 18.0, Align::Right),
    column("Comissão", 24.0, Align::Right),
];

pub const TONER_COLUMNS: [Column; 5] = [
    column("Data", 26.0, Align::Left),
    column("Cliente", 70.0, Align::Left),
    column("Valor Serviço", 30.0, Align::Right),
    column("Taxa Com.", 26.0, Align::Right),
    column("Comissão", 30.0, Align::Right),
];

/// One table of sales with a subtotal row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: &'static [Column],
    pub rows: Vec<Vec<String>>,
    /// The footer cells: `Total Seção:` in the second to last column and the
    /// subtotal in the last, the rest empty.
    pub footer: Vec<String>,
}

/// A part of the report for one product type.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Table { title: &'static str, table: Table },
    /// A product type with no sales in the period.
    Empty { message: &'static str },
}

/// A commission report for one period and product filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub sections: Vec<Section>,
    /// The grand total line, only present when there are sales.
    pub grand_total: Option<String>,
}

impl Report {
    /// Build the report for `sales`, which must already be filtered by `period`.
    ///
    /// # Errors
    /// Returns [Error::NothingToExport] if there are no sales and the filter
    /// is [ProductFilter::All].
    pub fn build(sales: &[SaleEntry], period: &Period) -> Result<Self, Error> {
        if sales.is_empty() && period.filter == ProductFilter::All {
            return Err(Error::NothingToExport);
        }

        let sections = ProductType::ALL
            .into_iter()
            .filter(|product_type| period.filter.matches(*product_type))
            .map(|product_type| {
                let section_sales: Vec<&SaleEntry> = sales
                    .iter()
                    .filter(|sale| sale.product_type() == product_type)
                    .collect();

                build_section(product_type, &section_sales)
            })
            .collect();

        let grand_total = (!sales.is_empty()).then(|| {
            format!(
                "Comissão Total ({}): {}",
                grand_total_name(period.filter),
                format_currency(total_commission(sales))
            )
        });

        Ok(Self {
            title: format!("Relatório de Comissões - {}", report_label(period)),
            sections,
            grand_total,
        })
    }
}

fn build_section(product_type: ProductType, sales: &[&SaleEntry]) -> Section {
    let (title, message, columns): (_, _, &'static [Column]) = match product_type {
        ProductType::PrinterSale => (
            "Serviços de Impressora",
            "Nenhum impressora para este período.",
            &PRINTER_COLUMNS,
        ),
        ProductType::TonerRefill => (
            "Serviços de Recarga de Toner",
            "Nenhum recarga de toner para este período.",
            &TONER_COLUMNS,
        ),
    };

    if sales.is_empty() {
        return Section::Empty { message };
    }

    let rows = sales
        .iter()
        .map(|sale| {
            let mut row = vec![format_date(sale.date), sale.client_name.clone()];

            if product_type == ProductType::PrinterSale {
                row.push(non_empty_or_dash(sale.product.printer_model()));
                row.push(non_empty_or_dash(sale.product.service_performed()));
            }

            row.push(format_currency(sale.sale_value));
            row.push(format_percent(sale.commission_rate));
            row.push(format_currency(sale.commission_value));
            row
        })
        .collect();

    let subtotal: f64 = sales.iter().map(|sale| sale.commission_value).sum();
    let mut footer = vec![String::new(); columns.len() - 2];
    footer.push("Total Seção:".to_owned());
    footer.push(format_currency(subtotal));

    Section::Table {
        title,
        table: Table {
            columns,
            rows,
            footer,
        },
    }
}

fn non_empty_or_dash(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.trim().is_empty() => text.to_owned(),
        _ => "-".to_owned(),
    }
}

fn grand_total_name(filter: ProductFilter) -> &'static str {
    match filter {
        ProductFilter::All => "Geral",
        ProductFilter::PrinterSale => "Impressoras",
        ProductFilter::TonerRefill => "Rec. Toner",
    }
}

/// The period label used in the report title, e.g. "Impressoras - Março de 2025".
pub fn report_label(period: &Period) -> String {
    match period.filter {
        ProductFilter::All => period.label(),
        ProductFilter::PrinterSale => format!("Impressoras - {}", period.label()),
        ProductFilter::TonerRefill => format!("Recargas de Toner - {}", period.label()),
    }
}

/// The download name of the report, e.g. `comissoes_todos_março_2025.pdf`.
pub fn report_filename(period: &Period) -> String {
    let filter = match period.filter {
        ProductFilter::All => "todos",
        ProductFilter::PrinterSale => "impressoras",
        ProductFilter::TonerRefill => "toner",
    };

    format!(
        "comissoes_{filter}_{}_{}.pdf",
        month_name(period.month).to_lowercase(),
        period.year
    )
}
