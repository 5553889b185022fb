//! Fan-out of gateway events to pending menu waits.
//!
//! The gateway loop publishes every event; each wait subscribes for its own lifetime and
//! filters what it needs.

use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;
use twilight_model::{
    channel::{Message, message::EmojiReactionType},
    gateway::{GatewayReaction, event::Event},
};

use crate::{
    error::MessengerError,
    messenger::{Actor, IncomingMessage, MessageHandle, ReactionEvent, Waited},
};

/// Events a menu can wait on.
#[derive(Clone, Debug, PartialEq)]
pub enum RelayEvent {
    Reaction(ReactionEvent),
    Message(IncomingMessage),
}

/// In-process relay based on tokio broadcast channels.
#[derive(Clone, Debug)]
pub struct EventRelay {
    tx: broadcast::Sender<RelayEvent>,
}

impl EventRelay {
    /// Create a relay with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Forward a gateway event if it is one menus wait on.
    pub fn publish(&self, event: &Event) {
        let relayed = match event {
            Event::ReactionAdd(reaction) => RelayEvent::Reaction(reaction_event(reaction)),
            Event::MessageCreate(message) => RelayEvent::Message(incoming_message(message)),
            _ => return,
        };

        self.send(relayed);
    }

    /// Forward an already converted event.
    pub fn send(&self, event: RelayEvent) {
        // No subscriber means no pending menu.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RelayEvent> {
        self.tx.subscribe()
    }

    /// Wait for the first event `pick` accepts, or until `timeout` elapses.
    ///
    /// Only events published after this call are seen.
    pub async fn next_matching<T>(
        &self,
        timeout: Duration,
        mut pick: impl FnMut(RelayEvent) -> Option<T> + Send,
    ) -> Result<Waited<T>, MessengerError>
    where
        T: Send,
    {
        let mut rx = self.subscribe();

        let wait = async {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if let Some(found) = pick(event) {
                            return Ok(found);
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "menu wait lagged behind the event relay");
                    }
                    Err(RecvError::Closed) => return Err(MessengerError::RelayClosed),
                }
            }
        };

        match tokio::time::timeout(timeout, wait).await {
            Ok(found) => found.map(Waited::Received),
            Err(_) => Ok(Waited::TimedOut),
        }
    }
}

impl Default for EventRelay {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Token of a reaction emoji: its name, or the id of a custom emoji without one.
pub fn reaction_token(emoji: &EmojiReactionType) -> String {
    match emoji {
        EmojiReactionType::Unicode { name } => name.clone(),
        EmojiReactionType::Custom { id, name, .. } => {
            name.clone().unwrap_or_else(|| id.get().to_string())
        }
    }
}

/// Convert a gateway reaction into a [`ReactionEvent`].
pub fn reaction_event(reaction: &GatewayReaction) -> ReactionEvent {
    let token = reaction_token(&reaction.emoji);

    let roles = reaction
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    ReactionEvent {
        channel_id: reaction.channel_id,
        message_id: reaction.message_id,
        guild_id: reaction.guild_id,
        actor: Actor::with_roles(reaction.user_id, roles),
        token,
    }
}

/// Convert a gateway message into an [`IncomingMessage`].
pub fn incoming_message(message: &Message) -> IncomingMessage {
    let roles = message
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    IncomingMessage {
        handle: MessageHandle {
            channel_id: message.channel_id,
            message_id: message.id,
            guild_id: message.guild_id,
        },
        author: Actor::with_roles(message.author.id, roles),
        content: message.content.clone(),
    }
}
