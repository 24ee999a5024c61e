//! UseCase layer
//!
//! 各ユースケースはセッションのロックを取得し、ハンドラを最後まで実行してから
//! その結果（Effect）を MessagePusher 経由で配信する。ロックは配信が終わるまで
//! 保持するため、クライアントに届く順序はハンドラの実行順と一致する。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::PollSession;

mod connect_client;
mod disconnect_client;
mod effects;
mod expire_poll;
mod get_poll_history;
mod get_session_state;
mod handle_client_event;
#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use expire_poll::ExpirePollUseCase;
pub use get_poll_history::GetPollHistoryUseCase;
pub use get_session_state::GetSessionStateUseCase;
pub use handle_client_event::HandleClientEventUseCase;

/// The single poll session, shared by every use case.
pub type SharedSession = Arc<Mutex<PollSession>>;
