use axum::response::Response;
use scraper::Html;

use crate::test_utils::response_bytes;

pub(crate) async fn parse_html_document(response: Response) -> Html {
    let body = response_bytes(response).await;

    Html::parse_document(&String::from_utf8_lossy(&body))
}

/// Parse an htmx partial, such as an alert or a re-rendered widget.
pub(crate) async fn parse_html_fragment(response: Response) -> Html {
    let body = response_bytes(response).await;

    Html::parse_fragment(&String::from_utf8_lossy(&body))
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}
