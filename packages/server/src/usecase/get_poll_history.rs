//! UseCase: 投票履歴の取得

use super::SharedSession;
use crate::domain::HistoryEntry;

/// 投票履歴取得のユースケース
pub struct GetPollHistoryUseCase {
    session: SharedSession,
}

impl GetPollHistoryUseCase {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// 終了した投票を古い順に返す
    pub async fn execute(&self) -> Vec<HistoryEntry> {
        self.session.lock().await.history().to_vec()
    }
}
