//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetPollHistoryUseCase, GetSessionStateUseCase,
    HandleClientEventUseCase,
};

/// Use cases reachable from the axum handlers
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// HandleClientEventUseCase（クライアントイベント処理のユースケース）
    pub handle_client_event_usecase: Arc<HandleClientEventUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// GetSessionStateUseCase（セッション状態取得のユースケース）
    pub get_session_state_usecase: Arc<GetSessionStateUseCase>,
    /// GetPollHistoryUseCase（投票履歴取得のユースケース）
    pub get_poll_history_usecase: Arc<GetPollHistoryUseCase>,
}
