//! Pick one option out of a paginated list by clicking its ordinal.

use std::time::Duration;

use menukit_core::{MessageEdit, MessageHandle, Payload, ReactionEvent, Waited};
use menukit_utils::{
    embed::{DEFAULT_EMBED_COLOR, MAX_DESCRIPTION_LENGTH, with_page},
    pagination::{PageSet, paginate},
};
use tracing::debug;
use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::EmbedBuilder;

use crate::{
    cleanup::{add_signals, try_clear_reactions, try_delete},
    context::MenuContext,
    error::MenuError,
    lock::Lock,
    navigation::{choice_signals, next_head},
    signal::{ControlSignal, ORDINAL_SLOTS, signal_for},
};

pub const OPTIONS_PER_PAGE: usize = ORDINAL_SLOTS;
pub const MAX_OPTION_LENGTH: usize = MAX_DESCRIPTION_LENGTH;
/// Room taken by the ordinal emoji and the blank line around each option.
pub const OPTION_OVERHEAD: usize = 10;
pub const DEFAULT_MULTICHOICE_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct MultichoiceOptions {
    pub timeout: Duration,
    /// Blueprint for every page; its description and footer are replaced.
    pub base_embed: Embed,
    pub lock: Lock,
}

impl Default for MultichoiceOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_MULTICHOICE_TIMEOUT_SECS),
            base_embed: EmbedBuilder::new().color(DEFAULT_EMBED_COLOR).build(),
            lock: Lock::Invoker,
        }
    }
}

/// Option shown at `slot` of page `head`, if any.
pub fn resolve_choice(pages: &PageSet, head: usize, slot: usize) -> Option<&str> {
    pages
        .get(head)?
        .items()
        .get(slot)
        .map(String::as_str)
}

fn render_page(pages: &PageSet, head: usize, base: &Embed) -> Embed {
    let description: String = pages
        .get(head)
        .map(|page| {
            page.items()
                .iter()
                .enumerate()
                .filter_map(|(slot, option)| {
                    let signal = ControlSignal::select(slot)?;
                    Some(format!("{} {}\n\n", signal.token(), option.trim()))
                })
                .collect()
        })
        .unwrap_or_default();

    with_page(base, description, head, pages.len())
}

fn slots_on(pages: &PageSet, head: usize) -> usize {
    pages.get(head).map_or(0, |page| page.len())
}

/// Let the user pick one of `options`.
///
/// Returns the chosen option, or `None` when the menu was closed or timed out. The menu message
/// is deleted once sent, also when the menu fails midway.
pub async fn multichoice(
    ctx: &MenuContext,
    options: &[String],
    settings: MultichoiceOptions,
) -> Result<Option<String>, MenuError> {
    if options.is_empty() {
        return Err(MenuError::NoOptions);
    }
    if let Some((index, length)) = options
        .iter()
        .map(|option| option.chars().count())
        .enumerate()
        .find(|(_, length)| *length > MAX_OPTION_LENGTH)
    {
        return Err(MenuError::OptionTooLong {
            index,
            length,
            max: MAX_OPTION_LENGTH,
        });
    }

    let pages = paginate(options, OPTIONS_PER_PAGE, MAX_OPTION_LENGTH, OPTION_OVERHEAD)?;
    let messenger = ctx.messenger.as_ref();

    let message = messenger
        .send(
            ctx.channel_id,
            &Payload::embed(render_page(&pages, 0, &settings.base_embed)),
        )
        .await?;

    let choice = choose(ctx, &pages, &settings, &message).await;
    try_delete(messenger, &message).await;
    choice
}

async fn choose(
    ctx: &MenuContext,
    pages: &PageSet,
    settings: &MultichoiceOptions,
    message: &MessageHandle,
) -> Result<Option<String>, MenuError> {
    let messenger = ctx.messenger.as_ref();
    let page_count = pages.len();
    let mut head = 0;

    let mut exposed = choice_signals(head, slots_on(pages, head), page_count);
    add_signals(messenger, message, &exposed).await?;

    loop {
        let waited = {
            let invoker = ctx.author.user_id;
            let lock = settings.lock;
            let exposed = exposed.as_slice();
            let filter = |event: &ReactionEvent| {
                event.message_id == message.message_id
                    && !ctx.is_bot(&event.actor)
                    && lock.permits(invoker, &event.actor)
                    && signal_for(exposed, &event.token).is_some()
            };
            messenger.next_reaction(&filter, settings.timeout).await?
        };

        let Waited::Received(event) = waited else {
            debug!(head, "multichoice timed out");
            return Ok(None);
        };
        let Some(signal) = signal_for(&exposed, &event.token) else {
            continue;
        };

        match signal {
            ControlSignal::Select(slot) => {
                return Ok(resolve_choice(pages, head, usize::from(slot)).map(str::to_owned));
            }
            ControlSignal::Close => return Ok(None),
            ControlSignal::First | ControlSignal::Prev | ControlSignal::Next | ControlSignal::Last => {
                head = next_head(head, signal, page_count).unwrap_or(head);

                try_clear_reactions(messenger, message).await;
                messenger
                    .edit(
                        message,
                        &MessageEdit::embed(render_page(pages, head, &settings.base_embed)),
                    )
                    .await?;
                exposed = choice_signals(head, slots_on(pages, head), page_count);
                add_signals(messenger, message, &exposed).await?;
            }
            ControlSignal::Pause | ControlSignal::Confirm | ControlSignal::Deny => {}
        }
    }
}
