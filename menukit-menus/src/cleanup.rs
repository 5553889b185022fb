//! Best-effort removal of menu affordances and messages.
//!
//! Nothing here returns an error: a failed cleanup never changes a menu's outcome.

use std::{sync::Arc, time::Duration};

use menukit_core::{MessageHandle, Messenger, MessengerError};
use tracing::{debug, warn};

use crate::signal::ControlSignal;

fn swallow(result: Result<(), MessengerError>, action: &'static str, message: &MessageHandle) -> bool {
    match result {
        Ok(()) => true,
        Err(source) if source.is_forbidden() => {
            debug!(
                action,
                message_id = message.message_id.get(),
                "cleanup not permitted here, skipping"
            );
            false
        }
        Err(source) => {
            warn!(
                ?source,
                action,
                message_id = message.message_id.get(),
                "cleanup failed"
            );
            false
        }
    }
}

/// Remove all reactions from a menu message. Returns whether they were removed.
///
/// Always attempted: handles returned by `send` may not know their guild, and in direct messages
/// the platform answers with [`MessengerError::Forbidden`], which is swallowed.
pub async fn try_clear_reactions(messenger: &dyn Messenger, message: &MessageHandle) -> bool {
    swallow(messenger.clear_reactions(message).await, "clear_reactions", message)
}

/// Delete a message, ignoring failures.
pub async fn try_delete(messenger: &dyn Messenger, message: &MessageHandle) -> bool {
    swallow(messenger.delete(message).await, "delete", message)
}

/// Delete a batch of messages, ignoring failures.
pub async fn try_delete_many(messenger: &dyn Messenger, messages: &[MessageHandle]) -> bool {
    let Some(first) = messages.first() else {
        return true;
    };

    swallow(messenger.delete_many(messages).await, "delete_many", first)
}

/// Attach one reaction per exposed signal, in order.
pub async fn add_signals(
    messenger: &dyn Messenger,
    message: &MessageHandle,
    signals: &[ControlSignal],
) -> Result<(), MessengerError> {
    for signal in signals {
        messenger.add_reaction(message, signal.token()).await?;
    }
    Ok(())
}

/// Delete a message after `delay` without blocking the caller.
pub fn schedule_delete(messenger: Arc<dyn Messenger>, message: MessageHandle, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        try_delete(messenger.as_ref(), &message).await;
    });
}
