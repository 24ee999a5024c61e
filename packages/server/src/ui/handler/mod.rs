mod http;
mod websocket;

pub use http::{debug_session_state, get_poll_history, health_check};
pub use websocket::websocket_handler;
