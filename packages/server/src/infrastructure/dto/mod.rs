//! Data Transfer Objects (DTOs) for the poll server.
//!
//! - `websocket`: frames exchanged over the WebSocket
//! - `conversion`: mapping between DTOs and domain types

pub mod conversion;
pub mod websocket;
