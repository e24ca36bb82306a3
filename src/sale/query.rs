//! Read-side helpers over a set of sales.

use std::{collections::BTreeSet, ops::RangeInclusive};

use time::{Date, Month};

use crate::{
    Error,
    sale::{ProductFilter, SaleEntry},
};

/// Convert a zero-based month index (0 = January) into a [Month].
///
/// # Errors
/// Returns [Error::InvalidMonth] if `month_index` is greater than 11.
pub fn month_from_index(month_index: u8) -> Result<Month, Error> {
    if month_index > 11 {
        return Err(Error::InvalidMonth(month_index));
    }

    Month::try_from(month_index + 1).map_err(|_| Error::InvalidMonth(month_index))
}

/// The sales dated in `month` of `year`, in their original order.
pub fn sales_in_month(sales: &[SaleEntry], year: i32, month: Month) -> Vec<SaleEntry> {
    sales
        .iter()
        .filter(|sale| sale.date.year() == year && sale.date.month() == month)
        .cloned()
        .collect()
}

/// The sales dated within `range` (inclusive), in their original order.
pub fn sales_in_range(sales: &[SaleEntry], range: RangeInclusive<Date>) -> Vec<SaleEntry> {
    sales
        .iter()
        .filter(|sale| range.contains(&sale.date))
        .cloned()
        .collect()
}

/// The years that have at least one sale, newest first and without duplicates.
pub fn distinct_years(sales: &[SaleEntry]) -> Vec<i32> {
    sales
        .iter()
        .map(|sale| sale.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// The sales that match `filter`.
pub fn filter_by_product(sales: Vec<SaleEntry>, filter: ProductFilter) -> Vec<SaleEntry> {
    sales
        .into_iter()
        .filter(|sale| filter.matches(sale.product_type()))
        .collect()
}

/// The sum of the commission values of `sales`.
pub fn total_commission(sales: &[SaleEntry]) -> f64 {
    sales.iter().map(|sale| sale.commission_value).sum()
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        Error,
        sale::{NewSale, Product, ProductFilter, SaleEntry, SaleId},
    };

    use super::{
        distinct_years, filter_by_product, month_from_index, sales_in_month, sales_in_range,
        total_commission,
    };

    fn sale(id: &str, date: time::Date, product: Product, value: f64) -> SaleEntry {
        NewSale::new(date, "Cliente", product, value, 10.0)
            .unwrap()
            .with_id(SaleId::new(id))
    }

    fn printer() -> Product {
        Product::PrinterSale {
            printer_model: String::new(),
            service_performed: String::new(),
        }
    }

    fn sample_sales() -> Vec<SaleEntry> {
        vec![
            sale("d", date!(2025 - 04 - 01), Product::TonerRefill, 100.0),
            sale("c", date!(2025 - 03 - 31), printer(), 200.0),
            sale("b", date!(2025 - 03 - 01), Product::TonerRefill, 300.0),
            sale("a", date!(2024 - 03 - 15), printer(), 400.0),
        ]
    }

    #[test]
    fn month_index_is_zero_based() {
        assert_eq!(month_from_index(0), Ok(Month::January));
        assert_eq!(month_from_index(2), Ok(Month::March));
        assert_eq!(month_from_index(11), Ok(Month::December));
        assert_eq!(month_from_index(12), Err(Error::InvalidMonth(12)));
    }

    #[test]
    fn sales_in_month_matches_year_and_month_exactly() {
        let got = sales_in_month(&sample_sales(), 2025, Month::March);

        let ids: Vec<_> = got.iter().map(|sale| sale.id.as_str()).collect();
        assert_eq!(ids, ["c", "b"]);
    }

    #[test]
    fn sales_in_range_is_inclusive() {
        let got = sales_in_range(
            &sample_sales(),
            date!(2025 - 03 - 01)..=date!(2025 - 04 - 01),
        );

        let ids: Vec<_> = got.iter().map(|sale| sale.id.as_str()).collect();
        assert_eq!(ids, ["d", "c", "b"]);
    }

    #[test]
    fn distinct_years_are_descending_and_unique() {
        assert_eq!(distinct_years(&sample_sales()), [2025, 2024]);
        assert!(distinct_years(&[]).is_empty());
    }

    #[test]
    fn filters_by_product() {
        let got = filter_by_product(sample_sales(), ProductFilter::PrinterSale);

        let ids: Vec<_> = got.iter().map(|sale| sale.id.as_str()).collect();
        assert_eq!(ids, ["c", "a"]);
        assert_eq!(
            filter_by_product(sample_sales(), ProductFilter::All).len(),
            4
        );
    }

    #[test]
    fn sums_commission() {
        assert_eq!(total_commission(&sample_sales()), 100.0);
        assert_eq!(total_commission(&[]), 0.0);
    }
}
