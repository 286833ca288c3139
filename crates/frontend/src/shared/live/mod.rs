//! Live-update feed over the analytics WebSocket endpoint.
//!
//! Pushes alert/KPI/problem updates into the [`OperationalStore`]. The
//! reconnect loop is bounded and owned by a [`CancelToken`]: the
//! subscribing component holds the token and releases it on cleanup, so an
//! unmount mid-retry stops the loop instead of leaking it. Only the socket
//! is reopened on disconnect; the handler is registered exactly once.

use crate::shared::state::OperationalStore;
use contracts::alerts::{Alert, Problem};
use contracts::kpi::KpiMetric;
use futures::StreamExt;
use gloo_net::websocket::{futures::WebSocket, Message};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_DELAY_MS: u32 = 5_000;

/// One decoded push message from the feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    Alert { alert: Alert },
    Kpis { kpis: Vec<KpiMetric> },
    Problems { problems: Vec<Problem> },
}

/// Cancellation handle for a running feed. `Send`-safe so it can travel
/// into `on_cleanup`.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

fn apply(message: LiveMessage, store: &OperationalStore) {
    match message {
        LiveMessage::Alert { alert } => store.push_alert(alert),
        LiveMessage::Kpis { kpis } => store.set_kpis(kpis),
        LiveMessage::Problems { problems } => store.set_problems(problems),
    }
}

/// Start the feed. Returns the token the caller must cancel on teardown
/// (typically from `on_cleanup`).
pub fn spawn_feed(url: String, store: OperationalStore) -> CancelToken {
    let token = CancelToken::new();
    let loop_token = token.clone();

    spawn_local(async move {
        let mut attempts = 0u32;
        while !loop_token.is_cancelled() && attempts < MAX_RECONNECT_ATTEMPTS {
            attempts += 1;
            let mut socket = match WebSocket::open(&url) {
                Ok(socket) => socket,
                Err(e) => {
                    log::warn!("live feed: connect failed ({e}), attempt {attempts}");
                    TimeoutFuture::new(RECONNECT_DELAY_MS).await;
                    continue;
                }
            };
            log::info!("live feed: connected to {url}");

            while let Some(message) = socket.next().await {
                if loop_token.is_cancelled() {
                    return;
                }
                match message {
                    Ok(Message::Text(text)) => match serde_json::from_str::<LiveMessage>(&text) {
                        Ok(decoded) => {
                            // A delivered message proves the link is healthy.
                            attempts = 0;
                            apply(decoded, &store);
                        }
                        Err(e) => log::warn!("live feed: undecodable message: {e}"),
                    },
                    Ok(Message::Bytes(_)) => {}
                    Err(e) => {
                        log::warn!("live feed: socket error: {e}");
                        break;
                    }
                }
            }

            if loop_token.is_cancelled() {
                return;
            }
            log::info!("live feed: disconnected, retry {attempts}/{MAX_RECONNECT_ATTEMPTS}");
            TimeoutFuture::new(RECONNECT_DELAY_MS).await;
        }
        if !loop_token.is_cancelled() {
            log::error!("live feed: giving up after {MAX_RECONNECT_ATTEMPTS} attempts");
        }
    });

    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::alerts::AlertSeverity;

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_decode_alert_message() {
        let json = r#"{
            "type": "alert",
            "alert": {
                "id": "a1",
                "severity": "critical",
                "category": "stock",
                "title": "Остатки на исходе",
                "description": "Артикул 123 закончится через 2 дня",
                "timestamp": "2024-06-01T12:00:00Z"
            }
        }"#;
        let message: LiveMessage = serde_json::from_str(json).unwrap();
        match message {
            LiveMessage::Alert { alert } => {
                assert_eq!(alert.severity, AlertSeverity::Critical);
                assert!(!alert.is_read);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_apply_routes_to_store() {
        let store = OperationalStore::new();
        let alert = Alert::new(
            AlertSeverity::Warning,
            contracts::alerts::AlertCategory::Sales,
            "t",
            "d",
        );
        apply(LiveMessage::Alert { alert }, &store);
        assert_eq!(store.state().alerts.len(), 1);

        apply(LiveMessage::Problems { problems: vec![] }, &store);
        assert!(store.state().problems.is_empty());
    }
}
