//! One-shot waits for a single qualifying message.

use std::time::Duration;

use menukit_core::{IncomingMessage, Waited, config::DEFAULT_PROMPT_TIMEOUT_SECS};
use regex::{Regex, RegexBuilder};
use twilight_model::id::{Id, marker::ChannelMarker};

use crate::{context::MenuContext, error::MenuError, lock::Lock};

#[derive(Clone, Copy, Debug)]
pub struct WaitOptions {
    /// Defaults to the invoking channel.
    pub channel_id: Option<Id<ChannelMarker>>,
    pub lock: Lock,
    pub timeout: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            channel_id: None,
            lock: Lock::Invoker,
            timeout: Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
        }
    }
}

/// Result of [`reply`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Received(IncomingMessage),
    /// The content matched none of the expected answers.
    Unexpected(IncomingMessage),
    Cancelled,
    TimedOut,
}

fn is_keyword(content: &str, keyword: &str) -> bool {
    !keyword.is_empty() && content.trim().to_lowercase() == keyword.trim().to_lowercase()
}

/// Wait for a message whose content matches `pattern` at its start.
pub async fn wait_for_regex(
    ctx: &MenuContext,
    pattern: &str,
    ignore_case: bool,
    options: WaitOptions,
) -> Result<Option<IncomingMessage>, MenuError> {
    if matches!(options.lock, Lock::Role(_)) && ctx.guild_id.is_none() {
        return Err(MenuError::RoleLockOutsideGuild);
    }

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(ignore_case)
        .build()?;
    let channel_id = options.channel_id.unwrap_or(ctx.channel_id);
    let invoker = ctx.author.user_id;

    let filter = |message: &IncomingMessage| {
        message.handle.channel_id == channel_id
            && !ctx.is_bot(&message.author)
            && options.lock.permits(invoker, &message.author)
            && regex
                .find(&message.content)
                .is_some_and(|found| found.start() == 0)
    };

    Ok(ctx
        .messenger
        .next_message(&filter, options.timeout)
        .await?
        .received())
}

async fn next_from_invoker(
    ctx: &MenuContext,
    timeout: Duration,
) -> Result<Waited<IncomingMessage>, MenuError> {
    let filter = |message: &IncomingMessage| {
        message.handle.channel_id == ctx.channel_id && message.author.user_id == ctx.author.user_id
    };

    Ok(ctx.messenger.next_message(&filter, timeout).await?)
}

/// Wait for the invoker's next message in the invoking channel.
///
/// `None` on timeout or when the message is the `stop` keyword.
pub async fn wait_for_author(
    ctx: &MenuContext,
    stop: &str,
    timeout: Duration,
) -> Result<Option<IncomingMessage>, MenuError> {
    Ok(next_from_invoker(ctx, timeout)
        .await?
        .received()
        .filter(|message| !is_keyword(&message.content, stop)))
}

/// Case-insensitive pattern matching exactly one of `alternatives`.
fn answer_pattern(alternatives: &[&str]) -> Result<Option<Regex>, MenuError> {
    if alternatives.is_empty() {
        return Ok(None);
    }

    let pattern = format!("^(?:{})$", alternatives.join("|"));
    Ok(Some(RegexBuilder::new(&pattern).case_insensitive(true).build()?))
}

/// Wait for the invoker's next message and check it against `expect`.
///
/// Each alternative in `expect` is a regex; the trimmed content must match one of them in
/// full, ignoring case. With an empty `expect` any answer is accepted.
pub async fn reply(
    ctx: &MenuContext,
    expect: &[&str],
    stop: &str,
    timeout: Duration,
) -> Result<Reply, MenuError> {
    let expected = answer_pattern(expect)?;
    let Waited::Received(message) = next_from_invoker(ctx, timeout).await? else {
        return Ok(Reply::TimedOut);
    };

    if is_keyword(&message.content, stop) {
        return Ok(Reply::Cancelled);
    }
    if expected
        .as_ref()
        .is_some_and(|pattern| !pattern.is_match(message.content.trim()))
    {
        return Ok(Reply::Unexpected(message));
    }

    Ok(Reply::Received(message))
}
