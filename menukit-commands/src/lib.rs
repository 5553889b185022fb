pub mod menus;
pub mod utility;

use std::sync::Arc;

use twilight_model::{channel::Message, gateway::payload::incoming::MessageCreate};

use menukit_core::{Actor, Context, Messenger};
use menukit_menus::MenuContext;
use menukit_utils::COMMAND_PREFIX;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    menus::pages::META,
    menus::choose::META,
    menus::confirm::META,
    menus::survey::META,
    menus::wait::META,
    // Add new commands here
];

/// A prefixed command split into its lowercase name and the trimmed remainder.
#[derive(Debug, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub name: String,
    pub rest: Option<&'a str>,
}

/// Split `content` into a command invocation, if it starts with the prefix.
pub fn parse_invocation(content: &str) -> Option<Invocation<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    Some(Invocation { name, rest })
}

/// Menu context for a command invoked by `msg`.
pub fn menu_context(ctx: &Context, msg: &Message) -> MenuContext {
    let roles = msg
        .member
        .as_ref()
        .map(|member| member.roles.clone())
        .unwrap_or_default();
    let messenger: Arc<dyn Messenger> = ctx.messenger.clone();

    MenuContext::new(
        messenger,
        msg.channel_id,
        msg.guild_id,
        Actor::with_roles(msg.author.id, roles),
        ctx.bot_user_id,
    )
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let Some(invocation) = parse_invocation(&msg.content) else {
        return Ok(());
    };
    let rest = invocation.rest;

    match invocation.name.as_str() {
        "help" => utility::help::run(ctx.clone(), &msg, rest).await?,

        "pages" => menus::pages::run(ctx.clone(), &msg, rest).await?,
        "choose" => menus::choose::run(ctx.clone(), &msg, rest).await?,
        "confirm" => menus::confirm::run(ctx.clone(), &msg, rest).await?,
        "survey" => menus::survey::run(ctx.clone(), &msg).await?,
        "wait" => menus::wait::run(ctx.clone(), &msg, rest).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}
