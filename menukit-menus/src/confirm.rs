use std::time::Duration;

use menukit_core::{MessageHandle, ReactionEvent, Waited, config::DEFAULT_MENU_TIMEOUT_SECS};
use tracing::debug;

use crate::{
    cleanup::{add_signals, try_clear_reactions},
    context::MenuContext,
    error::MenuError,
    lock::Lock,
    signal::{ControlSignal, signal_for},
};

const CONFIRM_SIGNALS: [ControlSignal; 2] = [ControlSignal::Confirm, ControlSignal::Deny];

#[derive(Clone, Copy, Debug)]
pub struct ConfirmOptions {
    pub lock: Lock,
    pub timeout: Duration,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            lock: Lock::Invoker,
            timeout: Duration::from_secs(DEFAULT_MENU_TIMEOUT_SECS),
        }
    }
}

/// Ask for a yes/no answer on an existing message.
///
/// Returns `Some(true)` on 👍, `Some(false)` on ❌ and `None` when nobody answered in time.
pub async fn confirm(
    ctx: &MenuContext,
    message: &MessageHandle,
    options: ConfirmOptions,
) -> Result<Option<bool>, MenuError> {
    let messenger = ctx.messenger.as_ref();
    add_signals(messenger, message, &CONFIRM_SIGNALS).await?;

    let invoker = ctx.author.user_id;
    let filter = |event: &ReactionEvent| {
        event.message_id == message.message_id
            && !ctx.is_bot(&event.actor)
            && options.lock.permits(invoker, &event.actor)
            && signal_for(&CONFIRM_SIGNALS, &event.token).is_some()
    };
    let waited = messenger.next_reaction(&filter, options.timeout).await;
    try_clear_reactions(messenger, message).await;

    let answer = match waited? {
        Waited::Received(event) => match signal_for(&CONFIRM_SIGNALS, &event.token) {
            Some(ControlSignal::Confirm) => Some(true),
            Some(_) => Some(false),
            None => None,
        },
        Waited::TimedOut => None,
    };
    debug!(?answer, message_id = message.message_id.get(), "confirmation finished");

    Ok(answer)
}
