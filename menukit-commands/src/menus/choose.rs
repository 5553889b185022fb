use twilight_model::channel::Message;

use crate::{CommandMeta, menu_context};
use menukit_core::Context;
use menukit_menus::{MenuError, MultichoiceOptions, multichoice};
use menukit_utils::{embed::DEFAULT_EMBED_COLOR, parse::Trimmer};
use twilight_util::builder::embed::EmbedBuilder;

pub const META: CommandMeta = CommandMeta {
    name: "choose",
    desc: "Pick one of several options with reactions.",
    category: "menus",
    usage: "!choose <option> | <option> | ...",
};

const SHOWN_CHOICE_LENGTH: usize = 200;

/// Let the invoker pick one of the `|`-separated options.
pub async fn run(ctx: Context, msg: &Message, arg: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let options = split_options(arg.unwrap_or_default());

    let settings = MultichoiceOptions {
        base_embed: EmbedBuilder::new()
            .title("Pick one")
            .color(DEFAULT_EMBED_COLOR)
            .build(),
        ..MultichoiceOptions::default()
    };

    let menu = menu_context(&ctx, msg);
    let out = match multichoice(&menu, &options, settings).await {
        Ok(Some(choice)) => format!(
            "<@{}> picked **{}**",
            msg.author.id,
            Trimmer::new(SHOWN_CHOICE_LENGTH).trim(&choice)
        ),
        Ok(None) => "Nothing was picked.".to_owned(),
        Err(MenuError::NoOptions) => format!("Usage: `{}`", META.usage),
        Err(source @ (MenuError::OptionTooLong { .. } | MenuError::Paginate(_))) => {
            source.to_string()
        }
        Err(source) => return Err(source.into()),
    };

    http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

fn split_options(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
