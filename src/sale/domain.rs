//! Core sale types: ids, products, validated new sales and stored sales.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::Error;

/// The opaque, store-assigned identifier of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleId(String);

impl SaleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SaleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of product sold, without the product specific details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "impressora")]
    PrinterSale,
    #[serde(rename = "toner")]
    TonerRefill,
}

impl ProductType {
    pub const ALL: [ProductType; 2] = [ProductType::PrinterSale, ProductType::TonerRefill];

    /// The identifier used in the store, forms and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::PrinterSale => "impressora",
            ProductType::TonerRefill => "toner",
        }
    }

    /// The human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::PrinterSale => "Impressora",
            ProductType::TonerRefill => "Recarga de Toner",
        }
    }
}

impl FromStr for ProductType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "impressora" => Ok(ProductType::PrinterSale),
            "toner" => Ok(ProductType::TonerRefill),
            other => Err(Error::UnknownProductType(other.to_owned())),
        }
    }
}

/// What was sold. Printer sales carry the model and the service performed,
/// toner refills carry nothing else.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    PrinterSale {
        printer_model: String,
        service_performed: String,
    },
    TonerRefill,
}

impl Product {
    pub fn product_type(&self) -> ProductType {
        match self {
            Product::PrinterSale { .. } => ProductType::PrinterSale,
            Product::TonerRefill => ProductType::TonerRefill,
        }
    }

    /// The printer model, if this is a printer sale.
    pub fn printer_model(&self) -> Option<&str> {
        match self {
            Product::PrinterSale { printer_model, .. } => Some(printer_model),
            Product::TonerRefill => None,
        }
    }

    /// The service performed, if this is a printer sale.
    pub fn service_performed(&self) -> Option<&str> {
        match self {
            Product::PrinterSale {
                service_performed, ..
            } => Some(service_performed),
            Product::TonerRefill => None,
        }
    }
}

/// Which product types to show on the dashboard or include in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProductFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "impressora")]
    PrinterSale,
    #[serde(rename = "toner")]
    TonerRefill,
}

impl ProductFilter {
    pub const ALL: [ProductFilter; 3] = [
        ProductFilter::All,
        ProductFilter::PrinterSale,
        ProductFilter::TonerRefill,
    ];

    pub fn matches(&self, product_type: ProductType) -> bool {
        match self.only() {
            Some(only) => only == product_type,
            None => true,
        }
    }

    /// The single product type selected by this filter, or `None` for all products.
    pub fn only(&self) -> Option<ProductType> {
        match self {
            ProductFilter::All => None,
            ProductFilter::PrinterSale => Some(ProductType::PrinterSale),
            ProductFilter::TonerRefill => Some(ProductType::TonerRefill),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self.only() {
            Some(product_type) => product_type.as_str(),
            None => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductFilter::All => "Todos",
            ProductFilter::PrinterSale => "Impressoras",
            ProductFilter::TonerRefill => "Recargas de Toner",
        }
    }
}

/// Calculate the commission earned on `sale_value` at `commission_rate` percent.
pub fn commission_for(sale_value: f64, commission_rate: f64) -> f64 {
    sale_value * commission_rate / 100.0
}

/// A validated sale that has not been saved yet.
///
/// The commission value is calculated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    date: Date,
    client_name: String,
    product: Product,
    sale_value: f64,
    commission_rate: f64,
    commission_value: f64,
}

impl NewSale {
    /// Validate the fields of a sale and calculate its commission.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the trimmed client name is shorter than two characters,
    /// - the sale value is not a positive number,
    /// - the commission rate is not a number between 0 and 100.
    pub fn new(
        date: Date,
        client_name: &str,
        product: Product,
        sale_value: f64,
        commission_rate: f64,
    ) -> Result<Self, Error> {
        let client_name = client_name.trim();

        if client_name.chars().count() < 2 {
            return Err(Error::ClientNameTooShort);
        }

        if !sale_value.is_finite() || sale_value <= 0.0 {
            return Err(Error::NonPositiveSaleValue);
        }

        if !commission_rate.is_finite() || !(0.0..=100.0).contains(&commission_rate) {
            return Err(Error::CommissionRateOutOfRange);
        }

        let product = match product {
            Product::PrinterSale {
                printer_model,
                service_performed,
            } => Product::PrinterSale {
                printer_model: printer_model.trim().to_owned(),
                service_performed: service_performed.trim().to_owned(),
            },
            Product::TonerRefill => Product::TonerRefill,
        };

        Ok(Self {
            date,
            client_name: client_name.to_owned(),
            product,
            sale_value,
            commission_rate,
            commission_value: commission_for(sale_value, commission_rate),
        })
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn sale_value(&self) -> f64 {
        self.sale_value
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    pub fn commission_value(&self) -> f64 {
        self.commission_value
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: SaleId) -> SaleEntry {
        SaleEntry {
            id,
            date: self.date,
            client_name: self.client_name,
            product: self.product,
            sale_value: self.sale_value,
            commission_rate: self.commission_rate,
            commission_value: self.commission_value,
        }
    }
}

/// A sale as it is held in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleEntry {
    pub id: SaleId,
    pub date: Date,
    pub client_name: String,
    pub product: Product,
    pub sale_value: f64,
    pub commission_rate: f64,
    pub commission_value: f64,
}

impl SaleEntry {
    pub fn product_type(&self) -> ProductType {
        self.product.product_type()
    }
}

/// The JSON document form of a sale, with the field names used on the wire.
///
/// Dates are kept as strings since documents may come from an older version
/// of the app or be edited by hand. Converting to a [SaleEntry] validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDocument {
    pub id: String,
    pub date: String,
    pub client_name: String,
    pub product_type: String,
    pub sale_value: f64,
    pub commission_rate: f64,
    pub commission_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printer_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_performed: Option<String>,
}

impl From<&SaleEntry> for SaleDocument {
    fn from(sale: &SaleEntry) -> Self {
        Self {
            id: sale.id.to_string(),
            date: sale.date.to_string(),
            client_name: sale.client_name.clone(),
            product_type: sale.product_type().as_str().to_owned(),
            sale_value: sale.sale_value,
            commission_rate: sale.commission_rate,
            commission_value: sale.commission_value,
            printer_model: sale.product.printer_model().map(str::to_owned),
            service_performed: sale.product.service_performed().map(str::to_owned),
        }
    }
}

impl TryFrom<SaleDocument> for SaleEntry {
    type Error = Error;

    /// Printer fields on a toner document are dropped.
    fn try_from(document: SaleDocument) -> Result<Self, Self::Error> {
        let date = parse_iso_date(&document.date)?;

        let product = match document.product_type.parse()? {
            ProductType::PrinterSale => Product::PrinterSale {
                printer_model: document.printer_model.unwrap_or_default(),
                service_performed: document.service_performed.unwrap_or_default(),
            },
            ProductType::TonerRefill => Product::TonerRefill,
        };

        Ok(SaleEntry {
            id: SaleId(document.id),
            date,
            client_name: document.client_name,
            product,
            sale_value: document.sale_value,
            commission_rate: document.commission_rate,
            commission_value: document.commission_value,
        })
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_iso_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        sale::{Product, ProductFilter, ProductType, SaleDocument, SaleEntry, SaleId},
    };

    use super::{NewSale, parse_iso_date};

    fn printer() -> Product {
        Product::PrinterSale {
            printer_model: "HP M404dn".to_owned(),
            service_performed: "Instalação".to_owned(),
        }
    }

    #[test]
    fn new_sale_calculates_commission() {
        let sale = NewSale::new(date!(2025 - 03 - 15), "João", printer(), 500.0, 10.0).unwrap();

        assert_eq!(sale.commission_value(), 50.0);
        assert_eq!(sale.client_name(), "João");
    }

    #[test]
    fn new_sale_trims_client_name() {
        let sale = NewSale::new(
            date!(2025 - 03 - 15),
            "  Ana  ",
            Product::TonerRefill,
            80.0,
            5.0,
        )
        .unwrap();

        assert_eq!(sale.client_name(), "Ana");
    }

    #[test]
    fn new_sale_rejects_short_client_name() {
        let result = NewSale::new(
            date!(2025 - 03 - 15),
            " J ",
            Product::TonerRefill,
            80.0,
            5.0,
        );

        assert_eq!(result, Err(Error::ClientNameTooShort));
    }

    #[test]
    fn new_sale_rejects_non_positive_value() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = NewSale::new(
                date!(2025 - 03 - 15),
                "Ana",
                Product::TonerRefill,
                value,
                5.0,
            );

            assert_eq!(result, Err(Error::NonPositiveSaleValue), "value {value}");
        }
    }

    #[test]
    fn new_sale_rejects_rate_out_of_range() {
        for rate in [-0.1, 100.1, f64::NAN] {
            let result = NewSale::new(
                date!(2025 - 03 - 15),
                "Ana",
                Product::TonerRefill,
                80.0,
                rate,
            );

            assert_eq!(result, Err(Error::CommissionRateOutOfRange), "rate {rate}");
        }
    }

    #[test]
    fn rate_bounds_are_inclusive() {
        let zero = NewSale::new(date!(2025 - 03 - 15), "Ana", Product::TonerRefill, 80.0, 0.0);
        let hundred = NewSale::new(
            date!(2025 - 03 - 15),
            "Ana",
            Product::TonerRefill,
            80.0,
            100.0,
        );

        assert_eq!(zero.unwrap().commission_value(), 0.0);
        assert_eq!(hundred.unwrap().commission_value(), 80.0);
    }

    #[test]
    fn toner_document_omits_printer_fields() {
        let sale = NewSale::new(
            date!(2025 - 03 - 15),
            "Ana",
            Product::TonerRefill,
            80.0,
            5.0,
        )
        .unwrap()
        .with_id(SaleId::new("abc"));

        let json = serde_json::to_value(SaleDocument::from(&sale)).unwrap();

        assert_eq!(json["productType"], "toner");
        assert_eq!(json["clientName"], "Ana");
        assert_eq!(json["date"], "2025-03-15");
        assert!(json.get("printerModel").is_none());
        assert!(json.get("servicePerformed").is_none());
    }

    #[test]
    fn toner_document_ignores_stray_printer_fields() {
        let document = SaleDocument {
            id: "abc".to_owned(),
            date: "2025-03-15".to_owned(),
            client_name: "Ana".to_owned(),
            product_type: "toner".to_owned(),
            sale_value: 80.0,
            commission_rate: 5.0,
            commission_value: 4.0,
            printer_model: Some("leftover".to_owned()),
            service_performed: None,
        };

        let sale = SaleEntry::try_from(document).unwrap();

        assert_eq!(sale.product, Product::TonerRefill);
    }

    #[test]
    fn document_with_bad_date_is_rejected() {
        let document = SaleDocument {
            id: "abc".to_owned(),
            date: "15/03/2025".to_owned(),
            client_name: "Ana".to_owned(),
            product_type: "toner".to_owned(),
            sale_value: 80.0,
            commission_rate: 5.0,
            commission_value: 4.0,
            printer_model: None,
            service_performed: None,
        };

        assert_eq!(
            SaleEntry::try_from(document),
            Err(Error::InvalidDate("15/03/2025".to_owned()))
        );
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date("2025-03-15"), Ok(date!(2025 - 03 - 15)));
        assert!(parse_iso_date("2025-13-01").is_err());
        assert!(parse_iso_date("").is_err());
    }

    #[test]
    fn product_filter_matches() {
        assert!(ProductFilter::All.matches(ProductType::PrinterSale));
        assert!(ProductFilter::All.matches(ProductType::TonerRefill));
        assert!(ProductFilter::TonerRefill.matches(ProductType::TonerRefill));
        assert!(!ProductFilter::TonerRefill.matches(ProductType::PrinterSale));
    }

    #[test]
    fn product_type_round_trips_through_str() {
        for product_type in ProductType::ALL {
            assert_eq!(product_type.as_str().parse(), Ok(product_type));
        }
        assert_eq!(
            "caneta".parse::<ProductType>(),
            Err(Error::UnknownProductType("caneta".to_owned()))
        );
    }
}
