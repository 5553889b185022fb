use twilight_model::channel::Message;

use crate::{CommandMeta, menu_context};
use menukit_core::{Context, MessageEdit, Messenger, Payload};
use menukit_menus::{ConfirmOptions, Lock, confirm};
use menukit_utils::{embed::description_embed, parse::parse_target_user_id};

pub const META: CommandMeta = CommandMeta {
    name: "confirm",
    desc: "Asks for a yes/no answer, optionally from another user.",
    category: "menus",
    usage: "!confirm [@user]",
};

/// Ask the invoker, or the mentioned user, to confirm.
pub async fn run(ctx: Context, msg: &Message, arg: Option<&str>) -> anyhow::Result<()> {
    let lock = match arg {
        None => Lock::Invoker,
        Some(raw) => match parse_target_user_id(raw) {
            Some(user_id) => Lock::User(user_id),
            None => {
                let out = format!("Usage: `{}`", META.usage);
                ctx.http.create_message(msg.channel_id).content(&out).await?;
                return Ok(());
            }
        },
    };

    let question = match lock {
        Lock::User(user_id) => format!("<@{user_id}>, do you agree?"),
        _ => "Are you sure?".to_owned(),
    };

    let menu = menu_context(&ctx, msg);
    let prompt = ctx
        .messenger
        .send(msg.channel_id, &Payload::embed(description_embed(question)))
        .await?;

    let answer = confirm(
        &menu,
        &prompt,
        ConfirmOptions {
            lock,
            timeout: ctx.config.menu_timeout,
        },
    )
    .await?;

    ctx.messenger
        .edit(&prompt, &MessageEdit::embed(description_embed(answer_text(answer))))
        .await?;

    Ok(())
}

fn answer_text(answer: Option<bool>) -> &'static str {
    match answer {
        Some(true) => "Confirmed.",
        Some(false) => "Denied.",
        None => "No answer in time.",
    }
}
