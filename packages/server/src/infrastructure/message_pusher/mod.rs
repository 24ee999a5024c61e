//! Message delivery implementations.
//!
//! - `websocket`: pushes serialized frames through per-connection channels

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
