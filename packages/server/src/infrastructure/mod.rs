//! Infrastructure layer: wire formats, message delivery and timers.

pub mod dto;
pub mod message_pusher;
pub mod scheduler;
