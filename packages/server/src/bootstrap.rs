//! Dependency wiring.

use std::sync::Arc;

use classpoll_shared::time::SystemClock;
use tokio::sync::Mutex;

use crate::{
    domain::{PollSession, SessionConfig},
    infrastructure::{message_pusher::WebSocketMessagePusher, scheduler::TokioAutoCloseScheduler},
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, ExpirePollUseCase, GetPollHistoryUseCase,
        GetSessionStateUseCase, HandleClientEventUseCase,
    },
};

/// Build a ready-to-run server around a fresh session.
///
/// Must be called inside a Tokio runtime: the expiry worker is spawned here.
pub fn build_server(config: SessionConfig) -> Server {
    // Initialize dependencies in order:
    // 1. Scheduler and session
    // 2. MessagePusher
    // 3. UseCases (and the expiry worker)
    // 4. Server

    // 1. Create the session (in-memory, single classroom)
    let (scheduler, expiry_rx) = TokioAutoCloseScheduler::new();
    let session = Arc::new(Mutex::new(PollSession::new(
        config,
        Box::new(scheduler),
        Arc::new(SystemClock),
    )));
    tracing::info!(
        "Session created (default duration {}s, reject superseding create: {})",
        config.default_duration_secs,
        config.reject_superseding_create
    );

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let handle_client_event_usecase = Arc::new(HandleClientEventUseCase::new(
        session.clone(),
        message_pusher.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        session.clone(),
        message_pusher.clone(),
    ));
    let expire_poll_usecase = Arc::new(ExpirePollUseCase::new(
        session.clone(),
        message_pusher.clone(),
    ));
    let get_session_state_usecase = Arc::new(GetSessionStateUseCase::new(session.clone()));
    let get_poll_history_usecase = Arc::new(GetPollHistoryUseCase::new(session));

    tokio::spawn(expire_poll_usecase.run(expiry_rx));

    // 4. Create the server
    Server::new(
        connect_client_usecase,
        handle_client_event_usecase,
        disconnect_client_usecase,
        get_session_state_usecase,
        get_poll_history_usecase,
    )
}
