//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 名簿からの削除、送信チャンネルの解除、残った参加者への通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：生徒の切断（先生に名簿が届く）、先生の切断（通知なし）
//! - エッジケース：最後の未回答者が切断して投票が早期終了する

use std::sync::Arc;

use super::{SharedSession, effects::apply_effects};
use crate::domain::{ConnectionId, MessagePusher};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    session: SharedSession,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(session: SharedSession, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            session,
            message_pusher,
        }
    }

    /// 切断されたクライアントを名簿と配信先から取り除く
    ///
    /// 送信チャンネルは Effect の適用前に解除する（切断済みの相手には送らない）。
    pub async fn execute(&self, connection: ConnectionId) {
        let mut session = self.session.lock().await;
        let effects = session.disconnect(connection);
        self.message_pusher.unregister_client(&connection).await;
        apply_effects(self.message_pusher.as_ref(), effects).await;
        tracing::info!("Client '{}' disconnected", connection);
    }
}
