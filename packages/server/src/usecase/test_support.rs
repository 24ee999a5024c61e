//! Test helpers shared by the use case tests.

use std::sync::Arc;

use classpoll_shared::time::FixedClock;
use tokio::sync::{Mutex, mpsc};

use super::SharedSession;
use crate::{
    domain::{
        ConnectionId, MessagePusher, PollSession, SessionConfig,
        scheduler::MockAutoCloseScheduler,
    },
    infrastructure::{dto::websocket::ServerMessage, message_pusher::WebSocketMessagePusher},
};

pub(crate) const NOW: i64 = 1_700_000_000_000;

pub(crate) fn create_test_session() -> SharedSession {
    let mut scheduler = MockAutoCloseScheduler::new();
    scheduler.expect_arm().return_const(());
    scheduler.expect_cancel().return_const(());
    Arc::new(Mutex::new(PollSession::new(
        SessionConfig::default(),
        Box::new(scheduler),
        Arc::new(FixedClock::new(NOW)),
    )))
}

pub(crate) fn create_test_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

/// Register a fresh connection and return its id and inbox.
pub(crate) async fn connect(
    pusher: &Arc<WebSocketMessagePusher>,
) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
    let id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    pusher.register_client(id, tx).await;
    (id, rx)
}

/// Everything currently queued for a connection, decoded.
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        messages.push(serde_json::from_str(&frame).expect("server frames are valid JSON"));
    }
    messages
}
