//! Brazilian Portuguese (pt-BR) formatting for money, percentages, dates and months.
//!
//! The dashboard and the PDF report both use these helpers so that a value
//! reads the same on screen and on paper.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, Month};

/// Format `amount` as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// Negative amounts are prefixed with a minus sign, e.g. `-R$ 10,00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };

    format!(
        "{sign}R$ {},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Format a percentage with one decimal place and a decimal comma, e.g. `10,0%`.
pub fn format_percent(rate: f64) -> String {
    format!("{rate:.1}%").replace('.', ",")
}

/// Format `date` as `dd/MM/yyyy`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// The capitalised pt-BR name of `month`, e.g. "Março".
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Janeiro",
        Month::February => "Fevereiro",
        Month::March => "Março",
        Month::April => "Abril",
        Month::May => "Maio",
        Month::June => "Junho",
        Month::July => "Julho",
        Month::August => "Agosto",
        Month::September => "Setembro",
        Month::October => "Outubro",
        Month::November => "Novembro",
        Month::December => "Dezembro",
    }
}

/// Group the digits of `number` in threes with a dot, e.g. `1.234.567`.
fn group_thousands(number: u64) -> String {
    if number == 0 {
        // numfmt renders zero as "0" regardless of the configured precision.
        return "0".to_owned();
    }

    get_thousands_separator_formatter()
        .fmt_string(number)
        .replace(',', ".")
}

fn get_thousands_separator_formatter() -> &'static Formatter {
    static FORMATTER: OnceLock<Formatter> = OnceLock::new();

    // numfmt rejects '.' as a separator since it is the decimal point, so the
    // comma is swapped for a dot after formatting.
    FORMATTER.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(0))
    })
}
