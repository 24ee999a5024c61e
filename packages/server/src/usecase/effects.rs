//! Effect の適用

use crate::domain::{Effect, MessagePusher, Recipient};

/// セッションが返した Effect を順番に適用する
///
/// 配信の失敗はログに残して次の Effect に進む（一部の失敗で他の配信を止めない）。
pub(crate) async fn apply_effects(message_pusher: &dyn MessagePusher, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::Deliver { recipient, event } => {
                let result = match recipient {
                    Recipient::Audience(audience) => {
                        message_pusher.broadcast(audience, &event).await
                    }
                    Recipient::Everyone => message_pusher.broadcast_all(&event).await,
                    Recipient::Connection(connection) => {
                        message_pusher.push_to(&connection, &event).await
                    }
                };
                if let Err(e) = result {
                    tracing::warn!("Failed to deliver '{}': {}", event.name(), e);
                }
            }
            Effect::Subscribe {
                connection,
                audience,
            } => message_pusher.subscribe(connection, audience).await,
            Effect::Unsubscribe {
                connection,
                audience,
            } => message_pusher.unsubscribe(&connection, audience).await,
        }
    }
}
