//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/sales/{sale_id}/edit', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The commission dashboard.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for recording a new sale.
pub const NEW_SALE_VIEW: &str = "/sales/new";
/// The page for editing an existing sale.
pub const EDIT_SALE_VIEW: &str = "/sales/{sale_id}/edit";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to list and create sales.
pub const SALES_API: &str = "/api/sales";
/// The route to update or delete a single sale.
pub const SALE: &str = "/api/sales/{sale_id}";
/// The server-sent event stream of sale snapshots.
pub const SALES_FEED: &str = "/api/sales/feed";
/// The dashboard content region, re-rendered when the sales change.
pub const DASHBOARD_CONTENT: &str = "/api/dashboard/content";
/// The route to set or clear the commission goal.
pub const GOAL: &str = "/api/goal";
/// The route to generate a motivational alert.
pub const GOAL_ALERT: &str = "/api/goal/alert";
/// The route to download a PDF commission report.
pub const EXPORT: &str = "/api/export";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/sales/{sale_id}', '{sale_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

/// Append `query` to `endpoint_path`, e.g. `/api/export?year=2025&month=2&product=all`.
pub fn with_query(endpoint_path: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint_path.to_owned()
    } else {
        format!("{endpoint_path}?{query}")
    }
}
