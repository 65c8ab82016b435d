//! Kitchen event feed
//!
//! In-process, append-only change log for the kitchen display. Owned by
//! [`ServerState`](crate::core::ServerState) and injected where needed;
//! there is no global registry. History is a bounded ring buffer (oldest
//! entries trimmed); live delivery fans out over a broadcast channel.
//! Nothing is durable: the sequence restarts with the process.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast;

use shared::util::now_millis;
use shared::{KitchenEvent, KitchenEventType};

#[derive(Clone, Debug)]
pub struct KitchenFeed {
    inner: Arc<FeedInner>,
}

#[derive(Debug)]
struct FeedInner {
    capacity: usize,
    state: Mutex<FeedState>,
    tx: broadcast::Sender<KitchenEvent>,
}

#[derive(Debug)]
struct FeedState {
    next_seq: u64,
    buffer: VecDeque<KitchenEvent>,
}

impl KitchenFeed {
    /// `capacity` bounds retained history; live subscribers share the same
    /// bound on their channel.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _) = broadcast::channel(capacity);
        KitchenFeed {
            inner: Arc::new(FeedInner {
                capacity,
                state: Mutex::new(FeedState {
                    next_seq: 0,
                    buffer: VecDeque::with_capacity(capacity),
                }),
                tx,
            }),
        }
    }

    /// Append an event. Sequence numbers are assigned under the buffer
    /// lock, so append order and delivery order always agree.
    pub fn publish(&self, event: KitchenEventType, payload: Value) -> KitchenEvent {
        let record = {
            let mut state = self.inner.state.lock();
            state.next_seq += 1;
            let record = KitchenEvent {
                seq: state.next_seq,
                event,
                payload,
                timestamp: now_millis(),
            };
            state.buffer.push_back(record.clone());
            while state.buffer.len() > self.inner.capacity {
                state.buffer.pop_front();
            }
            record
        };
        // No receivers is fine; the buffer still retains the event.
        let _ = self.inner.tx.send(record.clone());
        record
    }

    /// Retained events with `seq > after`, in append order.
    pub fn events_after(&self, after: u64) -> Vec<KitchenEvent> {
        let state = self.inner.state.lock();
        state
            .buffer
            .iter()
            .filter(|e| e.seq > after)
            .cloned()
            .collect()
    }

    /// Highest sequence assigned so far (0 before the first event).
    pub fn last_seq(&self) -> u64 {
        self.inner.state.lock().next_seq
    }

    pub fn subscribe(&self) -> broadcast::Receiver<KitchenEvent> {
        self.inner.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_are_sequenced_in_append_order() {
        let feed = KitchenFeed::new(16);
        for i in 0..5 {
            feed.publish(KitchenEventType::OrderStatus, json!({ "i": i }));
        }
        let events = feed.events_after(0);
        let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn replay_skips_already_seen_positions() {
        let feed = KitchenFeed::new(16);
        for i in 0..5 {
            feed.publish(KitchenEventType::ItemStatus, json!({ "i": i }));
        }
        let events = feed.events_after(3);
        let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![4, 5]);
    }

    #[test]
    fn history_is_bounded() {
        let feed = KitchenFeed::new(3);
        for i in 0..10 {
            feed.publish(KitchenEventType::OrderStatus, json!({ "i": i }));
        }
        let events = feed.events_after(0);
        let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
        // Oldest entries trimmed, ordering preserved
        assert_eq!(seqs, vec![8, 9, 10]);
        assert_eq!(feed.last_seq(), 10);
    }

    #[tokio::test]
    async fn subscribers_receive_live_events_once() {
        let feed = KitchenFeed::new(16);
        let mut rx = feed.subscribe();
        feed.publish(KitchenEventType::OrderStatus, json!({ "order_id": 1 }));
        feed.publish(KitchenEventType::ItemStatus, json!({ "item_id": 2 }));
        let first = rx.recv().await.expect("first event");
        let second = rx.recv().await.expect("second event");
        assert_eq!(first.seq, 1);
        assert_eq!(second.seq, 2);
        assert!(rx.try_recv().is_err());
    }
}
