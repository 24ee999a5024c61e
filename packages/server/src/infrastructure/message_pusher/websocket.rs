//! WebSocket-backed `MessagePusher`.
//!
//! The UI layer accepts the socket and hands over the sending half of an
//! unbounded channel; this type keeps those channels plus the audience
//! membership sets, and turns domain events into JSON frames.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{Audience, ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::websocket::ServerMessage,
};

#[derive(Default)]
struct Registry {
    clients: HashMap<ConnectionId, PusherChannel>,
    audiences: HashMap<Audience, HashSet<ConnectionId>>,
}

/// Broadcast router over WebSocket connections.
#[derive(Default)]
pub struct WebSocketMessagePusher {
    registry: Mutex<Registry>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered connections.
    pub async fn client_count(&self) -> usize {
        self.registry.lock().await.clients.len()
    }

    /// Current members of an audience.
    pub async fn members(&self, audience: Audience) -> HashSet<ConnectionId> {
        self.registry
            .lock()
            .await
            .audiences
            .get(&audience)
            .cloned()
            .unwrap_or_default()
    }

    fn encode(event: &ServerEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    /// Send to each target, logging and skipping failures.
    fn fan_out<'a>(
        registry: &Registry,
        targets: impl IntoIterator<Item = &'a ConnectionId>,
        event: &ServerEvent,
        frame: &str,
    ) {
        for target in targets {
            match registry.clients.get(target) {
                Some(sender) => {
                    if let Err(e) = sender.send(frame.to_string()) {
                        tracing::warn!(
                            "Failed to push '{}' to client '{}': {}",
                            event.name(),
                            target,
                            e
                        );
                    } else {
                        tracing::debug!("Pushed '{}' to client '{}'", event.name(), target);
                    }
                }
                None => {
                    tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                }
            }
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        registry.clients.insert(connection, sender);
        tracing::debug!("Client '{}' registered to MessagePusher", connection);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.clients.remove(connection);
        for members in registry.audiences.values_mut() {
            members.remove(connection);
        }
        tracing::debug!("Client '{}' unregistered from MessagePusher", connection);
    }

    async fn subscribe(&self, connection: ConnectionId, audience: Audience) {
        let mut registry = self.registry.lock().await;
        registry
            .audiences
            .entry(audience)
            .or_default()
            .insert(connection);
        tracing::debug!("Client '{}' subscribed to {:?}", connection, audience);
    }

    async fn unsubscribe(&self, connection: &ConnectionId, audience: Audience) {
        let mut registry = self.registry.lock().await;
        if let Some(members) = registry.audiences.get_mut(&audience) {
            members.remove(connection);
        }
        tracing::debug!("Client '{}' unsubscribed from {:?}", connection, audience);
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let registry = self.registry.lock().await;

        let sender = registry
            .clients
            .get(connection)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", event.name(), connection);
        Ok(())
    }

    async fn broadcast(
        &self,
        audience: Audience,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let registry = self.registry.lock().await;

        if let Some(members) = registry.audiences.get(&audience) {
            Self::fan_out(&registry, members, event, &frame);
        }
        Ok(())
    }

    async fn broadcast_all(&self, event: &ServerEvent) -> Result<(), MessagePushError> {
        let frame = Self::encode(event)?;
        let registry = self.registry.lock().await;

        Self::fan_out(&registry, registry.clients.keys(), event, &frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast: 購読者集合（教師 / 生徒）への送信
    // - broadcast_all: 全接続への送信
    // - 登録解除で購読も外れること
    // ========================================

    fn decode(frame: Option<String>) -> ServerMessage {
        serde_json::from_str(&frame.expect("frame expected")).unwrap()
    }

    async fn register(
        pusher: &WebSocketMessagePusher,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_client(id, tx).await;
        (id, rx)
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続に JSON フレームを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (id, mut rx) = register(&pusher).await;

        // when (操作):
        let result = pusher.push_to(&id, &ServerEvent::CanCreate(true)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(decode(rx.recv().await), ServerMessage::CanCreate(true));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 未登録の接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher
            .push_to(&ConnectionId::generate(), &ServerEvent::StudentRemoved)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_audience_members() {
        // テスト項目: 購読者集合へのブロードキャストは他の集合に届かない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (teacher, mut teacher_rx) = register(&pusher).await;
        let (student, mut student_rx) = register(&pusher).await;
        pusher.subscribe(teacher, Audience::Teachers).await;
        pusher.subscribe(student, Audience::Students).await;

        // when (操作):
        let result = pusher
            .broadcast(Audience::Teachers, &ServerEvent::CanCreate(false))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(decode(teacher_rx.recv().await), ServerMessage::CanCreate(false));
        assert!(student_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_all_reaches_unsubscribed_clients() {
        // テスト項目: 全体送信はどの集合にも属さない接続にも届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (student, mut student_rx) = register(&pusher).await;
        let (_bystander, mut bystander_rx) = register(&pusher).await;
        pusher.subscribe(student, Audience::Students).await;

        // when (操作):
        pusher
            .broadcast_all(&ServerEvent::StudentRemoved)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(decode(student_rx.recv().await), ServerMessage::StudentRemoved);
        assert_eq!(decode(bystander_rx.recv().await), ServerMessage::StudentRemoved);
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_audience() {
        // テスト項目: 誰も購読していない集合への送信もエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher
            .broadcast(Audience::Students, &ServerEvent::NameTaken)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_channels() {
        // テスト項目: 受信側が閉じた接続があっても他の接続には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (gone, gone_rx) = register(&pusher).await;
        let (alive, mut alive_rx) = register(&pusher).await;
        pusher.subscribe(gone, Audience::Students).await;
        pusher.subscribe(alive, Audience::Students).await;
        drop(gone_rx);

        // when (操作):
        let result = pusher
            .broadcast(Audience::Students, &ServerEvent::AlreadySubmitted)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(decode(alive_rx.recv().await), ServerMessage::AlreadySubmitted);
    }

    #[tokio::test]
    async fn test_unregister_drops_audience_membership() {
        // テスト項目: 登録解除すると購読集合からも外れる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (teacher, _rx) = register(&pusher).await;
        pusher.subscribe(teacher, Audience::Teachers).await;

        // when (操作):
        pusher.unregister_client(&teacher).await;

        // then (期待する結果):
        assert_eq!(pusher.client_count().await, 0);
        assert!(pusher.members(Audience::Teachers).await.is_empty());
    }

    #[tokio::test]
    async fn test_unsubscribe_keeps_client_addressable() {
        // テスト項目: 購読解除後も個別送信は届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (student, mut rx) = register(&pusher).await;
        pusher.subscribe(student, Audience::Students).await;

        // when (操作):
        pusher.unsubscribe(&student, Audience::Students).await;
        pusher
            .push_to(&student, &ServerEvent::StudentRemoved)
            .await
            .unwrap();

        // then (期待する結果):
        assert!(!pusher.members(Audience::Students).await.contains(&student));
        assert_eq!(decode(rx.recv().await), ServerMessage::StudentRemoved);
    }
}
