//! UseCase: セッション状態の取得

use super::SharedSession;
use crate::domain::SessionSnapshot;

/// セッション状態取得のユースケース（デバッグ用エンドポイントから利用）
pub struct GetSessionStateUseCase {
    session: SharedSession,
}

impl GetSessionStateUseCase {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    pub async fn execute(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientEvent, ConnectionId},
        usecase::test_support::create_test_session,
    };

    #[tokio::test]
    async fn test_snapshot_reflects_roster() {
        // テスト項目: 参加した生徒がスナップショットに含まれる
        // given (前提条件):
        let session = create_test_session();
        let usecase = GetSessionStateUseCase::new(session.clone());
        session.lock().await.dispatch(
            ConnectionId::generate(),
            ClientEvent::StudentJoin {
                name: "Alice".to_string(),
            },
        );

        // when (操作):
        let snapshot = usecase.execute().await;

        // then (期待する結果):
        assert!(snapshot.current_poll.is_none());
        assert_eq!(snapshot.students.len(), 1);
        assert_eq!(snapshot.students[0].name.as_str(), "Alice");
    }
}
