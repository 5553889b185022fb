use twilight_model::channel::Message;

use crate::{CommandMeta, menu_context};
use menukit_core::Context;
use menukit_menus::{Lock, MenuError, WaitOptions, wait_for_regex};

pub const META: CommandMeta = CommandMeta {
    name: "wait",
    desc: "Waits for anyone to post a message starting with a pattern.",
    category: "menus",
    usage: "!wait <regex>",
};

/// Announce a pattern and report who matched it first.
pub async fn run(ctx: Context, msg: &Message, arg: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let Some(pattern) = arg else {
        let usage = format!("Usage: `{}`", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let announce = format!(
        "First message starting with `{pattern}` wins. You have {} seconds.",
        ctx.config.prompt_timeout.as_secs()
    );
    http.create_message(msg.channel_id).content(&announce).await?;

    let menu = menu_context(&ctx, msg);
    let options = WaitOptions {
        lock: Lock::Unrestricted,
        timeout: ctx.config.prompt_timeout,
        ..WaitOptions::default()
    };

    let out = match wait_for_regex(&menu, pattern, true, options).await {
        Ok(Some(winner)) => format!("<@{}> got there first!", winner.author.user_id),
        Ok(None) => "Nobody matched in time.".to_owned(),
        Err(MenuError::InvalidPattern(source)) => format!("That is not a valid pattern: {source}"),
        Err(source) => return Err(source.into()),
    };
    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}
