//! Scripted in-memory [`Messenger`] for engine tests.

use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use menukit_core::{
    Actor, IncomingMessage, MessageEdit, MessageFilter, MessageHandle, Messenger, MessengerError,
    Payload, ReactionEvent, ReactionFilter, Waited,
};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker},
};

use crate::{context::MenuContext, signal::ControlSignal};

pub const INVOKER: u64 = 1;
pub const BOT: u64 = 999;
pub const CHANNEL: u64 = 100;
pub const GUILD: u64 = 200;

/// Side effect recorded by the scripted messenger. Message ids are raw numbers.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Send { channel_id: u64, payload: Payload },
    Edit { message_id: u64, edit: MessageEdit },
    Delete(u64),
    DeleteMany(Vec<u64>),
    React { message_id: u64, token: String },
    ClearReactions(u64),
}

pub struct ScriptedMessenger {
    reactions: Mutex<VecDeque<ReactionEvent>>,
    messages: Mutex<VecDeque<IncomingMessage>>,
    calls: Mutex<Vec<Call>>,
    next_message_id: AtomicU64,
    waits: AtomicUsize,
    guild_id: Option<Id<GuildMarker>>,
    forbid_cleanup: bool,
    direct_messages: bool,
    fail_waits: bool,
}

impl ScriptedMessenger {
    pub fn new() -> Self {
        Self {
            reactions: Mutex::new(VecDeque::new()),
            messages: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            next_message_id: AtomicU64::new(1),
            waits: AtomicUsize::new(0),
            guild_id: Some(Id::new(GUILD)),
            forbid_cleanup: false,
            direct_messages: false,
            fail_waits: false,
        }
    }

    /// Every cleanup call fails with [`MessengerError::Forbidden`].
    pub fn forbidding_cleanup() -> Self {
        Self {
            forbid_cleanup: true,
            ..Self::new()
        }
    }

    /// Sent handles carry no guild id, like a REST create-message response.
    pub fn without_guild_ids() -> Self {
        Self {
            guild_id: None,
            ..Self::new()
        }
    }

    /// Messages live in a DM channel, where clearing reactions is refused.
    pub fn in_direct_messages() -> Self {
        Self {
            guild_id: None,
            direct_messages: true,
            ..Self::new()
        }
    }

    /// Every wait fails as if the event relay had shut down.
    pub fn failing_waits() -> Self {
        Self {
            fail_waits: true,
            ..Self::new()
        }
    }

    pub fn push_reaction(&self, event: ReactionEvent) {
        self.reactions.lock().unwrap().push_back(event);
    }

    pub fn push_message(&self, message: IncomingMessage) {
        self.messages.lock().unwrap().push_back(message);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of waits started so far.
    pub fn waits(&self) -> usize {
        self.waits.load(Ordering::SeqCst)
    }

    /// Tokens added to `message_id`, in order.
    pub fn reactions_on(&self, message_id: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::React {
                    message_id: id,
                    token,
                } if id == message_id => Some(token),
                _ => None,
            })
            .collect()
    }

    pub fn sent(&self) -> Vec<Payload> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send { payload, .. } => Some(payload),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn cleanup_result(&self) -> Result<(), MessengerError> {
        if self.forbid_cleanup {
            Err(MessengerError::Forbidden)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Messenger for ScriptedMessenger {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &Payload,
    ) -> Result<MessageHandle, MessengerError> {
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst);
        self.record(Call::Send {
            channel_id: channel_id.get(),
            payload: payload.clone(),
        });

        Ok(MessageHandle {
            channel_id,
            message_id: Id::new(message_id),
            guild_id: self.guild_id,
        })
    }

    async fn edit(
        &self,
        message: &MessageHandle,
        edit: &MessageEdit,
    ) -> Result<(), MessengerError> {
        self.record(Call::Edit {
            message_id: message.message_id.get(),
            edit: edit.clone(),
        });
        Ok(())
    }

    async fn delete(&self, message: &MessageHandle) -> Result<(), MessengerError> {
        self.record(Call::Delete(message.message_id.get()));
        self.cleanup_result()
    }

    async fn delete_many(&self, messages: &[MessageHandle]) -> Result<(), MessengerError> {
        self.record(Call::DeleteMany(
            messages.iter().map(|message| message.message_id.get()).collect(),
        ));
        self.cleanup_result()
    }

    async fn add_reaction(
        &self,
        message: &MessageHandle,
        token: &str,
    ) -> Result<(), MessengerError> {
        self.record(Call::React {
            message_id: message.message_id.get(),
            token: token.to_owned(),
        });
        Ok(())
    }

    async fn clear_reactions(&self, message: &MessageHandle) -> Result<(), MessengerError> {
        self.record(Call::ClearReactions(message.message_id.get()));
        if self.direct_messages {
            return Err(MessengerError::Forbidden);
        }
        self.cleanup_result()
    }

    async fn next_reaction(
        &self,
        filter: &ReactionFilter<'_>,
        _timeout: Duration,
    ) -> Result<Waited<ReactionEvent>, MessengerError> {
        self.waits.fetch_add(1, Ordering::SeqCst);
        if self.fail_waits {
            return Err(MessengerError::RelayClosed);
        }
        let mut queue = self.reactions.lock().unwrap();
        while let Some(event) = queue.pop_front() {
            if filter(&event) {
                return Ok(Waited::Received(event));
            }
        }
        Ok(Waited::TimedOut)
    }

    async fn next_message(
        &self,
        filter: &MessageFilter<'_>,
        _timeout: Duration,
    ) -> Result<Waited<IncomingMessage>, MessengerError> {
        self.waits.fetch_add(1, Ordering::SeqCst);
        if self.fail_waits {
            return Err(MessengerError::RelayClosed);
        }
        let mut queue = self.messages.lock().unwrap();
        while let Some(message) = queue.pop_front() {
            if filter(&message) {
                return Ok(Waited::Received(message));
            }
        }
        Ok(Waited::TimedOut)
    }
}

/// Context of a menu invoked by [`INVOKER`] in [`CHANNEL`] of [`GUILD`].
pub fn context(messenger: &Arc<ScriptedMessenger>) -> MenuContext {
    MenuContext::new(
        messenger.clone(),
        Id::new(CHANNEL),
        Some(Id::new(GUILD)),
        Actor::new(Id::new(INVOKER)),
        Id::new(BOT),
    )
}

pub fn handle(message_id: u64) -> MessageHandle {
    MessageHandle {
        channel_id: Id::new(CHANNEL),
        message_id: Id::new(message_id),
        guild_id: Some(Id::new(GUILD)),
    }
}

/// Reaction carrying `signal` on `message_id`.
pub fn reaction(message_id: u64, user_id: u64, signal: ControlSignal) -> ReactionEvent {
    ReactionEvent {
        channel_id: Id::new(CHANNEL),
        message_id: Id::new(message_id),
        guild_id: Some(Id::new(GUILD)),
        actor: Actor::new(Id::new(user_id)),
        token: signal.token().to_owned(),
    }
}

/// Message posted in [`CHANNEL`].
pub fn message(message_id: u64, user_id: u64, content: &str) -> IncomingMessage {
    IncomingMessage {
        handle: handle(message_id),
        author: Actor::new(Id::new(user_id)),
        content: content.to_owned(),
    }
}
