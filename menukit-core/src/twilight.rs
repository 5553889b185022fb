//! [`Messenger`] implementation backed by `twilight-http` and the [`EventRelay`].

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, MessageMarker},
};

use crate::{
    error::MessengerError,
    messenger::{
        IncomingMessage, MessageEdit, MessageFilter, MessageHandle, Messenger, Payload,
        ReactionEvent, ReactionFilter, Waited,
    },
    relay::{EventRelay, RelayEvent},
};

/// Discord accepts between 2 and 100 messages per bulk delete.
const BULK_DELETE_MIN: usize = 2;
const BULK_DELETE_MAX: usize = 100;

/// One request issued by [`TwilightMessenger::delete_many`].
#[derive(Debug, PartialEq, Eq)]
enum Deletion {
    Single {
        channel_id: Id<ChannelMarker>,
        message_id: Id<MessageMarker>,
    },
    Bulk {
        channel_id: Id<ChannelMarker>,
        message_ids: Vec<Id<MessageMarker>>,
    },
}

/// Group `messages` by channel, in first-seen order, into bulk requests of up to 100 ids.
/// Chunks too small for a bulk delete fall back to single deletes.
fn plan_deletions(messages: &[MessageHandle]) -> Vec<Deletion> {
    let mut by_channel: Vec<(Id<ChannelMarker>, Vec<Id<MessageMarker>>)> = Vec::new();
    for message in messages {
        match by_channel
            .iter_mut()
            .find(|(channel_id, _)| *channel_id == message.channel_id)
        {
            Some((_, ids)) => ids.push(message.message_id),
            None => by_channel.push((message.channel_id, vec![message.message_id])),
        }
    }

    let mut plan = Vec::new();
    for (channel_id, ids) in by_channel {
        for chunk in ids.chunks(BULK_DELETE_MAX) {
            if chunk.len() < BULK_DELETE_MIN {
                plan.extend(chunk.iter().map(|&message_id| Deletion::Single {
                    channel_id,
                    message_id,
                }));
            } else {
                plan.push(Deletion::Bulk {
                    channel_id,
                    message_ids: chunk.to_vec(),
                });
            }
        }
    }

    plan
}

/// Messaging collaborator talking to Discord.
#[derive(Clone)]
pub struct TwilightMessenger {
    http: Arc<Client>,
    relay: EventRelay,
}

impl TwilightMessenger {
    pub fn new(http: Arc<Client>, relay: EventRelay) -> Self {
        Self { http, relay }
    }

    pub fn relay(&self) -> &EventRelay {
        &self.relay
    }
}

#[async_trait]
impl Messenger for TwilightMessenger {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &Payload,
    ) -> Result<MessageHandle, MessengerError> {
        let embeds = payload.embed.as_slice();
        let mut request = self.http.create_message(channel_id).embeds(embeds);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(content);
        }

        let created = request.await?.model().await?;

        Ok(MessageHandle {
            channel_id: created.channel_id,
            message_id: created.id,
            guild_id: created.guild_id,
        })
    }

    async fn edit(
        &self,
        message: &MessageHandle,
        edit: &MessageEdit,
    ) -> Result<(), MessengerError> {
        let mut request = self
            .http
            .update_message(message.channel_id, message.message_id);

        if let Some(content) = edit.content.as_ref() {
            request = request.content(content.as_deref());
        }
        if let Some(embed) = edit.embed.as_ref() {
            request = request.embeds(Some(std::slice::from_ref(embed)));
        }

        request.await?;
        Ok(())
    }

    async fn delete(&self, message: &MessageHandle) -> Result<(), MessengerError> {
        self.http
            .delete_message(message.channel_id, message.message_id)
            .await?;
        Ok(())
    }

    async fn delete_many(&self, messages: &[MessageHandle]) -> Result<(), MessengerError> {
        for deletion in plan_deletions(messages) {
            match deletion {
                Deletion::Single {
                    channel_id,
                    message_id,
                } => {
                    self.http.delete_message(channel_id, message_id).await?;
                }
                Deletion::Bulk {
                    channel_id,
                    message_ids,
                } => {
                    self.http.delete_messages(channel_id, &message_ids).await?;
                }
            }
        }

        Ok(())
    }

    async fn add_reaction(
        &self,
        message: &MessageHandle,
        token: &str,
    ) -> Result<(), MessengerError> {
        let emoji = RequestReactionType::Unicode { name: token };
        self.http
            .create_reaction(message.channel_id, message.message_id, &emoji)
            .await?;
        Ok(())
    }

    async fn clear_reactions(&self, message: &MessageHandle) -> Result<(), MessengerError> {
        self.http
            .delete_all_reactions(message.channel_id, message.message_id)
            .await?;
        Ok(())
    }

    async fn next_reaction(
        &self,
        filter: &ReactionFilter<'_>,
        timeout: Duration,
    ) -> Result<Waited<ReactionEvent>, MessengerError> {
        self.relay.next_matching(timeout, |event| match event {
            RelayEvent::Reaction(reaction) if filter(&reaction) => Some(reaction),
            _ => None,
        })
        .await
    }

    async fn next_message(
        &self,
        filter: &MessageFilter<'_>,
        timeout: Duration,
    ) -> Result<Waited<IncomingMessage>, MessengerError> {
        self.relay.next_matching(timeout, |event| match event {
            RelayEvent::Message(message) if filter(&message) => Some(message),
            _ => None,
        })
        .await
    }
}
