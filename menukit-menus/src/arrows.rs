//! Reaction-driven navigation over a list of page embeds.

use std::{sync::Arc, time::Duration};

use menukit_core::{
    MessageEdit, MessageHandle, Payload, ReactionEvent, Waited,
    config::DEFAULT_MENU_TIMEOUT_SECS,
};
use menukit_utils::{embed::closed_embed, pagination::clamp_head};
use tracing::debug;
use twilight_model::{
    channel::message::embed::Embed,
    id::{Id, marker::ChannelMarker},
};

use crate::{
    cleanup::{add_signals, schedule_delete, try_clear_reactions},
    context::MenuContext,
    error::MenuError,
    lock::Lock,
    navigation::{navigation_signals, next_head},
    signal::{ControlSignal, signal_for},
};

/// Delay before a closed menu disappears.
pub const CLOSED_DELETE_AFTER: Duration = Duration::from_secs(10);

/// Settings of an arrow menu.
#[derive(Clone, Debug)]
pub struct ArrowsOptions {
    /// Static text above the embed. Kept on pause, cleared on close.
    pub content: Option<String>,
    /// 0-based page shown first; clamped into range.
    pub head: usize,
    /// Wait per signal; restarts after each accepted signal.
    pub timeout: Duration,
    /// Shown when the user closes the menu. Defaults to "Closed by user".
    pub closed_embed: Option<Embed>,
    /// Defaults to the invoking channel.
    pub channel_id: Option<Id<ChannelMarker>>,
    pub lock: Lock,
    /// `None` keeps the closed message.
    pub closed_delete_after: Option<Duration>,
}

impl Default for ArrowsOptions {
    fn default() -> Self {
        Self {
            content: None,
            head: 0,
            timeout: Duration::from_secs(DEFAULT_MENU_TIMEOUT_SECS),
            closed_embed: None,
            channel_id: None,
            lock: Lock::Invoker,
            closed_delete_after: Some(CLOSED_DELETE_AFTER),
        }
    }
}

/// How an arrow menu ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Only one page: it was sent without controls.
    Single(MessageHandle),
    /// The user paused; the page stays, controls are gone.
    Paused { message: MessageHandle, head: usize },
    /// The user closed the menu.
    Closed { message: MessageHandle },
    /// Nobody interacted before the timeout.
    Expired { message: MessageHandle, head: usize },
}

/// Send `pages` with reaction navigation and drive it until pause, close or timeout.
pub async fn arrows(
    ctx: &MenuContext,
    pages: Vec<Embed>,
    options: ArrowsOptions,
) -> Result<NavigationOutcome, MenuError> {
    if pages.is_empty() {
        return Err(MenuError::NoPages);
    }

    let messenger = ctx.messenger.as_ref();
    let channel_id = options.channel_id.unwrap_or(ctx.channel_id);
    let page_count = pages.len();
    let head = clamp_head(options.head, page_count);

    let first = Payload {
        content: options.content.clone(),
        embed: Some(pages[head].clone()),
    };
    let message = messenger.send(channel_id, &first).await?;

    if page_count == 1 {
        return Ok(NavigationOutcome::Single(message));
    }

    let outcome = navigate(ctx, &pages, &options, message, head).await;
    if outcome.is_err() {
        try_clear_reactions(messenger, &message).await;
    }
    outcome
}

async fn navigate(
    ctx: &MenuContext,
    pages: &[Embed],
    options: &ArrowsOptions,
    message: MessageHandle,
    mut head: usize,
) -> Result<NavigationOutcome, MenuError> {
    let messenger = ctx.messenger.as_ref();
    let page_count = pages.len();

    let mut exposed = navigation_signals(head, page_count);
    add_signals(messenger, &message, &exposed).await?;

    loop {
        let waited = {
            let invoker = ctx.author.user_id;
            let lock = options.lock;
            let exposed = exposed.as_slice();
            let filter = |event: &ReactionEvent| {
                event.message_id == message.message_id
                    && !ctx.is_bot(&event.actor)
                    && lock.permits(invoker, &event.actor)
                    && signal_for(exposed, &event.token).is_some()
            };
            messenger.next_reaction(&filter, options.timeout).await?
        };

        let Waited::Received(event) = waited else {
            try_clear_reactions(messenger, &message).await;
            return Ok(NavigationOutcome::Expired { message, head });
        };

        let Some(signal) = signal_for(&exposed, &event.token) else {
            continue;
        };

        match signal {
            ControlSignal::Pause => {
                try_clear_reactions(messenger, &message).await;
                return Ok(NavigationOutcome::Paused { message, head });
            }
            ControlSignal::Close => {
                try_clear_reactions(messenger, &message).await;
                let closed = options.closed_embed.clone().unwrap_or_else(closed_embed);
                messenger
                    .edit(&message, &MessageEdit::embed(closed).clear_content())
                    .await?;
                if let Some(delay) = options.closed_delete_after {
                    schedule_delete(Arc::clone(&ctx.messenger), message, delay);
                }
                return Ok(NavigationOutcome::Closed { message });
            }
            ControlSignal::First | ControlSignal::Prev | ControlSignal::Next | ControlSignal::Last => {
                head = next_head(head, signal, page_count).unwrap_or(head);
                debug!(head, page_count, "arrow menu moved");

                try_clear_reactions(messenger, &message).await;
                messenger
                    .edit(&message, &MessageEdit::embed(pages[head].clone()))
                    .await?;
                exposed = navigation_signals(head, page_count);
                add_signals(messenger, &message, &exposed).await?;
            }
            ControlSignal::Select(_) | ControlSignal::Confirm | ControlSignal::Deny => {}
        }
    }
}
