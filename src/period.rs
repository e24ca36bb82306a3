//! The month and product filter selected on the dashboard.
//!
//! Every view of the data (the dashboard, the goal widget, motivational
//! alerts and report exports) is scoped to a [Period].

use serde::Deserialize;
use time::{Date, Month};

use crate::{
    format::month_name,
    sale::{ProductFilter, SaleEntry, SaleRepository, filter_by_product, month_from_index},
};

/// The query string parameters that select a period.
///
/// `month` is a zero-based month index (0 = January).
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PeriodQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
    #[serde(default)]
    pub product: ProductFilter,
}

/// A calendar month and a product filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub year: i32,
    pub month: Month,
    pub filter: ProductFilter,
}

impl Period {
    /// Fill in the parts of `query` that were not given with `today`'s year and month.
    ///
    /// A month index above 11 is logged and replaced with today's month.
    pub fn resolve(query: PeriodQuery, today: Date) -> Self {
        let month = match query.month.map(month_from_index) {
            Some(Ok(month)) => month,
            Some(Err(error)) => {
                tracing::warn!("{error}, using the current month instead");
                today.month()
            }
            None => today.month(),
        };

        Self {
            year: query.year.unwrap_or(today.year()),
            month,
            filter: query.product,
        }
    }

    /// The zero-based index of the month (0 = January).
    pub fn month_index(&self) -> u8 {
        u8::from(self.month) - 1
    }

    /// A label such as "Março de 2025".
    pub fn label(&self) -> String {
        format!("{} de {}", month_name(self.month), self.year)
    }

    /// The query string that selects this period, e.g. `year=2025&month=2&product=all`.
    pub fn query_string(&self) -> String {
        format!(
            "year={}&month={}&product={}",
            self.year,
            self.month_index(),
            self.filter.as_str()
        )
    }

    /// The cached sales in this period that match the product filter, newest first.
    pub fn sales(&self, repository: &SaleRepository) -> Vec<SaleEntry> {
        filter_by_product(
            repository.query_by_month(self.year, self.month_index()),
            self.filter,
        )
    }
}
