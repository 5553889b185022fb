//! Transport-agnostic messaging collaborator used by every menu.
//!
//! [`Messenger`] covers the display side effects (send/edit/delete, reactions) and the
//! single suspension point of a menu: waiting for the next qualifying event.

use std::time::Duration;

use async_trait::async_trait;
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
    },
};

use crate::error::MessengerError;

/// Reference to a message displayed by the collaborator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MessageHandle {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    /// `None` for direct-message channels, and for messages created over REST, whose response
    /// does not name the guild.
    pub guild_id: Option<Id<GuildMarker>>,
}

/// Content to display in a new message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload {
    pub content: Option<String>,
    pub embed: Option<Embed>,
}

impl Payload {
    /// Payload with text only.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            embed: None,
        }
    }

    /// Payload with a single embed only.
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }

    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.content.as_deref().is_none_or(str::is_empty) && self.embed.is_none()
    }
}

/// Partial update of an existing message.
///
/// Fields left as `None` are not touched. `content: Some(None)` clears the text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageEdit {
    pub content: Option<Option<String>>,
    pub embed: Option<Embed>,
}

impl MessageEdit {
    /// Replace the embed, keeping the current text.
    pub fn embed(embed: Embed) -> Self {
        Self {
            content: None,
            embed: Some(embed),
        }
    }

    /// Remove the message text.
    pub fn clear_content(mut self) -> Self {
        self.content = Some(None);
        self
    }
}

/// Identity that emitted an event.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Actor {
    pub user_id: Id<UserMarker>,
    /// Role memberships; empty outside guilds.
    pub roles: Vec<Id<RoleMarker>>,
}

impl Actor {
    pub fn new(user_id: Id<UserMarker>) -> Self {
        Self {
            user_id,
            roles: Vec::new(),
        }
    }

    pub fn with_roles(user_id: Id<UserMarker>, roles: Vec<Id<RoleMarker>>) -> Self {
        Self { user_id, roles }
    }

    pub fn has_role(&self, role_id: Id<RoleMarker>) -> bool {
        self.roles.contains(&role_id)
    }
}

/// A reaction added to some message.
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionEvent {
    pub channel_id: Id<ChannelMarker>,
    pub message_id: Id<MessageMarker>,
    pub guild_id: Option<Id<GuildMarker>>,
    pub actor: Actor,
    /// Unicode emoji, or the custom emoji name.
    pub token: String,
}

/// A message posted by someone.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomingMessage {
    pub handle: MessageHandle,
    pub author: Actor,
    pub content: String,
}

/// Result of waiting for the next qualifying event.
#[derive(Clone, Debug, PartialEq)]
pub enum Waited<T> {
    Received(T),
    TimedOut,
}

impl<T> Waited<T> {
    /// Convert into an option, mapping a timeout to `None`.
    pub fn received(self) -> Option<T> {
        match self {
            Waited::Received(value) => Some(value),
            Waited::TimedOut => None,
        }
    }
}

/// Predicate over reaction events.
pub type ReactionFilter<'a> = dyn Fn(&ReactionEvent) -> bool + Send + Sync + 'a;
/// Predicate over incoming messages.
pub type MessageFilter<'a> = dyn Fn(&IncomingMessage) -> bool + Send + Sync + 'a;

/// Display and event-delivery capabilities the menus depend on.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Post a new message and return its handle.
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &Payload,
    ) -> Result<MessageHandle, MessengerError>;

    /// Apply a partial update to a message.
    async fn edit(&self, message: &MessageHandle, edit: &MessageEdit)
    -> Result<(), MessengerError>;

    async fn delete(&self, message: &MessageHandle) -> Result<(), MessengerError>;

    /// Delete several messages, possibly spread over several channels.
    async fn delete_many(&self, messages: &[MessageHandle]) -> Result<(), MessengerError>;

    /// Attach a reaction token the participant can click.
    async fn add_reaction(&self, message: &MessageHandle, token: &str)
    -> Result<(), MessengerError>;

    /// Remove every reaction from a message.
    ///
    /// Fails with [`MessengerError::Forbidden`] where the bot cannot manage reactions
    /// (direct messages, missing permissions).
    async fn clear_reactions(&self, message: &MessageHandle) -> Result<(), MessengerError>;

    /// Wait for the next reaction accepted by `filter`, or the timeout.
    async fn next_reaction(
        &self,
        filter: &ReactionFilter<'_>,
        timeout: Duration,
    ) -> Result<Waited<ReactionEvent>, MessengerError>;

    /// Wait for the next message accepted by `filter`, or the timeout.
    async fn next_message(
        &self,
        filter: &MessageFilter<'_>,
        timeout: Duration,
    ) -> Result<Waited<IncomingMessage>, MessengerError>;
}
