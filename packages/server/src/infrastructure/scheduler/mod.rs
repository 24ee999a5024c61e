//! Auto-close scheduler implementations.
//!
//! - `tokio_timer`: sleep task per poll, expiry reported over an mpsc channel

pub mod tokio_timer;

pub use tokio_timer::{ExpiryReceiver, TokioAutoCloseScheduler};
