//! Kitchen API Handlers
//!
//! The SSE stream subscribes to the live channel first and snapshots the
//! backlog second, so no event can fall between replay and tail; live
//! events at or below the last replayed sequence are dropped to avoid
//! duplicates.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::BroadcastStream;

use shared::models::{OrderDetail, OrderItem, OrderItemStatusUpdate};
use shared::KitchenEvent;

use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders;
use crate::utils::AppResult;

/// GET /api/kitchen/orders - non-terminal orders with items, oldest first
pub async fn active_orders(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderDetail>>> {
    let active = order::find_active(state.pool()).await?;
    let mut details = Vec::with_capacity(active.len());
    for entry in active {
        let items = order::list_items(state.pool(), entry.id).await?;
        details.push(OrderDetail {
            order: entry,
            items,
        });
    }
    Ok(Json(details))
}

/// PATCH /api/kitchen/items/{id} - item preparation state
pub async fn set_item_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemStatusUpdate>,
) -> AppResult<Json<OrderItem>> {
    let updated = orders::set_item_status(&state.db, &state.kitchen, id, payload.status).await?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    /// Replay retained events with seq greater than this
    pub after: Option<u64>,
}

/// GET /api/kitchen/stream - SSE feed of order/item status changes
///
/// Replays retained history after `?after=<seq>` (or the standard
/// `Last-Event-ID` header on reconnect), then tails live events until the
/// client disconnects. Heartbeat comments keep idle connections open.
pub async fn stream(
    State(state): State<ServerState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let after = query
        .after
        .or_else(|| {
            headers
                .get("last-event-id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(0);

    // Subscribe before snapshotting the backlog.
    let rx = state.kitchen.subscribe();
    let backlog = state.kitchen.events_after(after);
    let last_replayed = backlog.last().map(|e| e.seq).unwrap_or(after);

    let replay = stream::iter(
        backlog
            .into_iter()
            .map(|e| Ok::<Event, Infallible>(to_sse_event(&e))),
    );
    let live = BroadcastStream::new(rx).filter_map(move |res| {
        futures::future::ready(match res {
            Ok(event) if event.seq > last_replayed => {
                Some(Ok::<Event, Infallible>(to_sse_event(&event)))
            }
            // Lagged receivers drop the gap; the client reconnects with
            // Last-Event-ID and replays from the buffer.
            _ => None,
        })
    });

    Sse::new(replay.chain(live)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(state.config.kitchen_heartbeat_secs))
            .text("heartbeat"),
    )
}

fn to_sse_event(event: &KitchenEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    Event::default()
        .id(event.seq.to_string())
        .event(event.event.as_str())
        .data(data)
}
