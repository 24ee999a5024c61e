//! UseCase: クライアント接続処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// クライアント接続のユースケース
///
/// 接続 ID を払い出して送信チャンネルを登録するだけで、セッションには触れない。
/// 接続は teacher:join / student:join を送るまで観客でも生徒でもない。
pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 新しい接続を登録し、その ConnectionId を返す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionId::generate();
        self.message_pusher.register_client(connection, sender).await;
        tracing::info!("Client '{}' connected", connection);
        connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::ServerEvent, usecase::test_support::create_test_pusher};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_client() {
        // テスト項目: 接続すると新しい ID で送信チャンネルが登録される
        // given (前提条件):
        let pusher = create_test_pusher();
        let usecase = ConnectClientUseCase::new(pusher.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(tx).await;

        // then (期待する結果):
        assert_eq!(pusher.client_count().await, 1);
        pusher
            .push_to(&connection, &ServerEvent::StudentRemoved)
            .await
            .unwrap();
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_ids() {
        // テスト項目: 接続ごとに異なる ID が払い出される
        // given (前提条件):
        let pusher = create_test_pusher();
        let usecase = ConnectClientUseCase::new(pusher.clone());

        // when (操作):
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(pusher.client_count().await, 2);
    }
}
