//! Paginated PDF commission reports.
//!
//! A [Report] describes the tables and totals for a period, the layout
//! places them on pages and [render_pdf] draws the pages.

mod endpoint;
mod layout;
mod model;
mod pdf;

use std::path::Path;

pub use endpoint::export_report_endpoint;
pub use model::{Report, report_filename};
pub use pdf::render_pdf;

use crate::Error;

/// Render `report` and write it to `path`.
///
/// # Errors
/// Returns [Error::ReportRenderError] if the document cannot be rendered or written.
pub fn write_report(report: &Report, path: &Path) -> Result<(), Error> {
    let bytes = render_pdf(report)?;

    std::fs::write(path, bytes).map_err(|error| {
        Error::ReportRenderError(format!("could not write {}: {error}", path.display()))
    })
}
