//! The form shared by the new sale and edit sale pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
    },
    sale::{NewSale, Product, ProductType, SaleEntry, parse_iso_date},
};

/// The commission rate suggested for a new sale of `product_type`.
pub fn default_commission_rate(product_type: ProductType) -> f64 {
    match product_type {
        ProductType::PrinterSale => 5.0,
        ProductType::TonerRefill => 10.0,
    }
}

/// The submitted sale form.
///
/// The date and amounts are kept as text so that bad input is reported with the
/// rest of the validation errors instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct SaleForm {
    pub date: String,
    pub client_name: String,
    pub product_type: String,
    pub printer_model: Option<String>,
    pub service_performed: Option<String>,
    #[serde(default)]
    pub sale_value: String,
    #[serde(default)]
    pub commission_rate: String,
}

impl SaleForm {
    /// Validate the form and calculate the commission.
    ///
    /// The printer fields are ignored for toner refills.
    ///
    /// # Errors
    /// Returns an error if the date or product type cannot be parsed, or if
    /// [NewSale::new] rejects the values.
    pub fn into_new_sale(self) -> Result<NewSale, Error> {
        let date = parse_iso_date(&self.date)?;

        let product = match self.product_type.parse::<ProductType>()? {
            ProductType::PrinterSale => Product::PrinterSale {
                printer_model: self.printer_model.unwrap_or_default(),
                service_performed: self.service_performed.unwrap_or_default(),
            },
            ProductType::TonerRefill => Product::TonerRefill,
        };

        NewSale::new(
            date,
            &self.client_name,
            product,
            parse_amount(&self.sale_value),
            parse_amount(&self.commission_rate),
        )
    }
}

/// Parse a decimal amount written with either a dot or a comma.
///
/// Text that is not a number becomes NaN, which [NewSale::new] rejects with
/// the message for that field.
fn parse_amount(text: &str) -> f64 {
    text.trim().replace(',', ".").parse().unwrap_or(f64::NAN)
}

/// The values the form starts with.
pub struct SaleFormDefaults<'a> {
    pub date: Date,
    pub client_name: &'a str,
    pub product_type: ProductType,
    pub printer_model: &'a str,
    pub service_performed: &'a str,
    pub sale_value: Option<f64>,
    pub commission_rate: f64,
    /// Whether choosing a product type should reset the commission rate to its default.
    pub suggest_rate: bool,
}

impl SaleFormDefaults<'_> {
    /// The defaults for recording a new sale on `today`.
    pub fn new_sale(today: Date) -> Self {
        SaleFormDefaults {
            date: today,
            client_name: "",
            product_type: ProductType::PrinterSale,
            printer_model: "",
            service_performed: "",
            sale_value: None,
            commission_rate: default_commission_rate(ProductType::PrinterSale),
            suggest_rate: true,
        }
    }
}

impl<'a> From<&'a SaleEntry> for SaleFormDefaults<'a> {
    fn from(sale: &'a SaleEntry) -> Self {
        SaleFormDefaults {
            date: sale.date,
            client_name: &sale.client_name,
            product_type: sale.product_type(),
            printer_model: sale.product.printer_model().unwrap_or_default(),
            service_performed: sale.product.service_performed().unwrap_or_default(),
            sale_value: Some(sale.sale_value),
            commission_rate: sale.commission_rate,
            suggest_rate: false,
        }
    }
}

/// A complete sale form that submits with `hx_method` (`hx-post` or `hx-put`) to `endpoint`.
pub fn sale_form_view(
    hx_method: &str,
    endpoint: &str,
    defaults: &SaleFormDefaults<'_>,
    submit_label: &str,
    cancel_url: &str,
) -> Markup {
    let (hx_post, hx_put) = match hx_method {
        "hx-put" => (None, Some(endpoint)),
        _ => (Some(endpoint), None),
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (sale_form_fields(defaults))

            div class="flex gap-4"
            {
                a href=(cancel_url) class={ (BUTTON_SECONDARY_STYLE) " text-center" } { "Cancelar" }
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
            }
        }
    }
}

pub fn sale_form_fields(defaults: &SaleFormDefaults<'_>) -> Markup {
    let is_printer = defaults.product_type == ProductType::PrinterSale;
    let sale_value = defaults.sale_value.map(|value| format!("{value:.2}"));
    let commission_rate = format!("{:.1}", defaults.commission_rate);

    html! {
        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Data do Serviço" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="client_name" class=(FORM_LABEL_STYLE) { "Nome do Cliente" }

            input
                name="client_name"
                id="client_name"
                type="text"
                placeholder="Ex: João Silva"
                minlength="2"
                value=(defaults.client_name)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Tipo de Produto/Serviço" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for product_type in ProductType::ALL {
                    @let id = format!("product-type-{}", product_type.as_str());
                    @let onchange = rate_suggestion_script(product_type, defaults.suggest_rate);

                    div class="flex items-center gap-3"
                    {
                        input
                            name="product_type"
                            id=(id)
                            type="radio"
                            value=(product_type.as_str())
                            checked[product_type == defaults.product_type]
                            onchange=(onchange)
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (product_type.label())
                        }
                    }
                }
            }
        }

        div id="printer-fields" class="space-y-4" hidden[!is_printer]
        {
            div
            {
                label for="printer_model" class=(FORM_LABEL_STYLE) { "Modelo da Impressora" }

                input
                    name="printer_model"
                    id="printer_model"
                    type="text"
                    placeholder="Ex: HP LaserJet Pro M404dn"
                    value=(defaults.printer_model)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="service_performed" class=(FORM_LABEL_STYLE) { "Serviço Feito" }

                textarea
                    name="service_performed"
                    id="service_performed"
                    placeholder="Ex: Troca de fusor, limpeza geral"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (defaults.service_performed)
                }
            }
        }

        div
        {
            label for="sale_value" class=(FORM_LABEL_STYLE) { "Valor do Serviço (R$)" }

            div class="input-wrapper w-full"
            {
                input
                    name="sale_value"
                    id="sale_value"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="500,00"
                    value=[sale_value]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="commission_rate" class=(FORM_LABEL_STYLE) { "Taxa de Comissão (%)" }

            input
                name="commission_rate"
                id="commission_rate"
                type="number"
                step="0.1"
                min="0"
                max="100"
                value=(commission_rate)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// Show or hide the printer fields, and suggest a rate for new sales.
fn rate_suggestion_script(product_type: ProductType, suggest_rate: bool) -> String {
    let is_printer = product_type == ProductType::PrinterSale;
    let mut script = format!("document.getElementById('printer-fields').hidden = {};", !is_printer);

    if suggest_rate {
        script.push_str(&format!(
            " document.getElementById('commission_rate').value = '{:.1}';",
            default_commission_rate(product_type)
        ));
    }

    script
}
