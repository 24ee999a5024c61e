//! Message delivery abstraction.
//!
//! The domain decides *who* hears *what*; a `MessagePusher` implementation in
//! the infrastructure layer decides *how* it gets there.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    event::{Audience, ServerEvent},
    value_object::ConnectionId,
};

/// Outbound channel of one connection. Carries serialized frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Broadcast router over connections and audiences.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection so it can be addressed.
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// Forget a connection and drop it from every audience.
    async fn unregister_client(&self, connection: &ConnectionId);

    /// Add a connection to an audience.
    async fn subscribe(&self, connection: ConnectionId, audience: Audience);

    /// Remove a connection from an audience.
    async fn unsubscribe(&self, connection: &ConnectionId, audience: Audience);

    /// Send an event to one connection.
    async fn push_to(
        &self,
        connection: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// Send an event to every current member of an audience.
    async fn broadcast(
        &self,
        audience: Audience,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError>;

    /// Send an event to every registered connection.
    async fn broadcast_all(&self, event: &ServerEvent) -> Result<(), MessagePushError>;
}
