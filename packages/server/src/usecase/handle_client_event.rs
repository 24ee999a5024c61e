//! UseCase: クライアントからのイベント処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleClientEventUseCase::execute() メソッド
//! - セッションへのディスパッチと、その結果の配信（宛先ごとの振り分け）
//!
//! ### なぜこのテストが必要か
//! - 生徒の参加・回答・削除が正しい相手（先生／生徒／全員／本人）に届くことを保証
//! - 拒否されたアクションが本人だけに返信されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：投票作成、回答、全員回答による早期終了
//! - 異常系：名前の重複、二重回答、先生以外による投票作成
//! - エッジケース：不正なメッセージ

use std::sync::Arc;

use super::{SharedSession, effects::apply_effects};
use crate::domain::{ClientEvent, ConnectionId, MessagePusher, ServerEvent};

/// Error code for frames that could not be understood at all.
pub const INVALID_MESSAGE_CODE: &str = "invalid-message";

/// クライアントイベント処理のユースケース
pub struct HandleClientEventUseCase {
    session: SharedSession,
    message_pusher: Arc<dyn MessagePusher>,
}

impl HandleClientEventUseCase {
    pub fn new(session: SharedSession, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            session,
            message_pusher,
        }
    }

    /// イベントをセッションに適用し、結果を配信する
    ///
    /// セッションのロックは配信が終わるまで保持する。
    pub async fn execute(&self, connection: ConnectionId, event: ClientEvent) {
        let mut session = self.session.lock().await;
        let effects = session.dispatch(connection, event);
        apply_effects(self.message_pusher.as_ref(), effects).await;
    }

    /// 解釈できなかったフレームを送信元に通知する
    pub async fn report_invalid_message(&self, connection: ConnectionId, reason: &str) {
        tracing::warn!("Invalid message from '{}': {}", connection, reason);
        let event = ServerEvent::Error {
            code: INVALID_MESSAGE_CODE,
            message: reason.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(&connection, &event).await {
            tracing::warn!("Failed to report invalid message: {}", e);
        }
    }
}
