use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    period::{Period, PeriodQuery},
    report::{Report, render_pdf, report_filename},
    sale::SaleRepository,
    timezone::local_today,
};

/// The state needed to export a report.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub local_timezone: String,
    pub sales: SaleRepository,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            sales: state.sales.clone(),
        }
    }
}

/// Download the commission report for the period in the query string as a PDF.
///
/// Responds with an alert instead when there is nothing to export.
pub async fn export_report_endpoint(
    State(state): State<ExportState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    let today = match local_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let period = Period::resolve(query, today);
    let sales = period.sales(&state.sales);

    let report = match Report::build(&sales, &period) {
        Ok(report) => report,
        Err(error) => return error.into_alert_response(),
    };

    let bytes = match render_pdf(&report) {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not export report: {error}");
            return error.into_alert_response();
        }
    };

    let filename = report_filename(&period);
    tracing::info!("exporting {} sales as {filename}", sales.len());

    (
        [
            (CONTENT_TYPE, "application/pdf".to_owned()),
            (CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        bytes,
    )
        .into_response()
}

/// An attachment header with an ASCII filename and the exact UTF-8 filename.
fn content_disposition(filename: &str) -> String {
    let ascii_filename: String = filename
        .chars()
        .map(|c| match c {
            c if c.is_ascii() => c,
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            _ => '_',
        })
        .collect();

    let encoded_filename: String = filename
        .bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                char::from(byte).to_string()
            }
            _ => format!("%{byte:02X}"),
        })
        .collect();

    format!("attachment; filename=\"{ascii_filename}\"; filename*=UTF-8''{encoded_filename}")
}
