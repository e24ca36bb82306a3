//! A server-sent event stream of sale snapshots.
//!
//! Each connection holds its own `Subscription`. The first event
//! carries the current snapshot, and later events follow every change. A slow
//! client only receives the latest snapshot. The subscription is dropped when
//! the client disconnects.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, State},
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{Stream, StreamExt};

use crate::{
    AppState,
    sale::{SaleRepository, Snapshot, api::SnapshotDocument},
};

/// The name of the event that carries a snapshot.
pub const SNAPSHOT_EVENT: &str = "snapshot";

/// The state needed to stream snapshots.
#[derive(Debug, Clone)]
pub struct SalesFeedState {
    pub sales: SaleRepository,
}

impl FromRef<AppState> for SalesFeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            sales: state.sales.clone(),
        }
    }
}

/// Stream a `snapshot` event with the JSON snapshot whenever the sales change.
pub async fn sales_feed_endpoint(
    State(state): State<SalesFeedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("sales feed client connected");

    let stream = state
        .sales
        .subscribe()
        .into_stream()
        .map(|snapshot| Ok(snapshot_event(&snapshot)));

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn snapshot_event(snapshot: &Snapshot) -> Event {
    let document = SnapshotDocument::from(snapshot);

    match Event::default().event(SNAPSHOT_EVENT).json_data(&document) {
        Ok(event) => event,
        Err(error) => {
            tracing::error!("could not serialize snapshot: {error}");
            Event::default().event(SNAPSHOT_EVENT).data("{}")
        }
    }
}
