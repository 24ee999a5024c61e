//! UseCase: 投票の時間切れ処理

use std::sync::Arc;

use tokio::sync::mpsc;

use super::{SharedSession, effects::apply_effects};
use crate::domain::{MessagePusher, PollGeneration};

/// 投票の時間切れのユースケース
///
/// タイマーは世代番号だけを送ってくる。終了済み・作り直し済みの投票に対する
/// 通知はセッション側で無視される。
pub struct ExpirePollUseCase {
    session: SharedSession,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ExpirePollUseCase {
    pub fn new(session: SharedSession, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            session,
            message_pusher,
        }
    }

    /// `generation` の投票が進行中なら終了させる。終了させたら true
    pub async fn execute(&self, generation: PollGeneration) -> bool {
        let mut session = self.session.lock().await;
        let effects = session.expire(generation);
        let closed = !effects.is_empty();
        apply_effects(self.message_pusher.as_ref(), effects).await;
        closed
    }

    /// タイマーからの通知を受け取り続けるワーカー
    pub async fn run(self: Arc<Self>, mut expiry_rx: mpsc::UnboundedReceiver<PollGeneration>) {
        while let Some(generation) = expiry_rx.recv().await {
            self.execute(generation).await;
        }
        tracing::debug!("Expiry worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientEvent, ConnectionId},
        infrastructure::dto::websocket::ServerMessage,
        usecase::{
            HandleClientEventUseCase,
            test_support::{connect, create_test_pusher, create_test_session, drain},
        },
    };

    async fn start_poll(handler: &HandleClientEventUseCase, teacher: ConnectionId) {
        handler
            .execute(
                teacher,
                ClientEvent::CreatePoll {
                    question: "Favourite colour?".to_string(),
                    options: vec!["Red".to_string(), "Blue".to_string()],
                    duration: Some(5),
                },
            )
            .await;
    }

    #[tokio::test]
    async fn test_expire_closes_current_poll() {
        // テスト項目: 進行中の投票の世代で時間切れになると全員に終了が届く
        // given (前提条件):
        let session = create_test_session();
        let pusher = create_test_pusher();
        let handler = HandleClientEventUseCase::new(session.clone(), pusher.clone());
        let usecase = ExpirePollUseCase::new(session.clone(), pusher.clone());
        let (teacher, mut teacher_rx) = connect(&pusher).await;
        let (student, mut student_rx) = connect(&pusher).await;
        handler.execute(teacher, ClientEvent::TeacherJoin).await;
        handler
            .execute(
                student,
                ClientEvent::StudentJoin {
                    name: "Alice".to_string(),
                },
            )
            .await;
        start_poll(&handler, teacher).await;
        drain(&mut teacher_rx);
        drain(&mut student_rx);
        let generation = session.lock().await.generation();

        // when (操作):
        let closed = usecase.execute(generation).await;

        // then (期待する結果):
        assert!(closed);
        assert!(matches!(&drain(&mut teacher_rx)[..], [ServerMessage::PollClosed(c)]
            if c.question == "Favourite colour?" && c.results.values().sum::<u32>() == 0));
        assert!(matches!(&drain(&mut student_rx)[..], [ServerMessage::PollClosed(_)]));
        assert_eq!(session.lock().await.history().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_generation_is_ignored() {
        // テスト項目: 作り直す前の投票の時間切れは無視される
        // given (前提条件):
        let session = create_test_session();
        let pusher = create_test_pusher();
        let handler = HandleClientEventUseCase::new(session.clone(), pusher.clone());
        let usecase = ExpirePollUseCase::new(session.clone(), pusher.clone());
        let (teacher, mut teacher_rx) = connect(&pusher).await;
        handler.execute(teacher, ClientEvent::TeacherJoin).await;
        start_poll(&handler, teacher).await;
        let stale = session.lock().await.generation();
        start_poll(&handler, teacher).await;
        drain(&mut teacher_rx);

        // when (操作):
        let closed = usecase.execute(stale).await;

        // then (期待する結果):
        assert!(!closed);
        assert!(drain(&mut teacher_rx).is_empty());
        assert!(session.lock().await.is_active());
    }

    #[tokio::test]
    async fn test_run_processes_expiries_until_channel_closes() {
        // テスト項目: ワーカーはチャンネルから届いた世代を処理し、閉じられたら終了する
        // given (前提条件):
        let session = create_test_session();
        let pusher = create_test_pusher();
        let handler = HandleClientEventUseCase::new(session.clone(), pusher.clone());
        let usecase = Arc::new(ExpirePollUseCase::new(session.clone(), pusher.clone()));
        let (teacher, _teacher_rx) = connect(&pusher).await;
        handler.execute(teacher, ClientEvent::TeacherJoin).await;
        start_poll(&handler, teacher).await;
        let generation = session.lock().await.generation();
        let (tx, rx) = mpsc::unbounded_channel();

        // when (操作):
        tx.send(generation).unwrap();
        drop(tx);
        usecase.run(rx).await;

        // then (期待する結果):
        assert!(!session.lock().await.is_active());
    }
}
