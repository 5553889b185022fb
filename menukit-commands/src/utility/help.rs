use twilight_model::channel::{Message, message::embed::Embed};

use crate::{COMMANDS, CommandMeta, menu_context};
use menukit_core::Context;
use menukit_menus::{ArrowsOptions, arrows};
use menukit_utils::{
    embed::build_paginated_embed,
    pagination::{page_window, parse_one_based_page, total_pages},
};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;

/// Render the command catalog as an arrow menu, optionally filtered by category or opened at a
/// page.
pub async fn run(ctx: Context, msg: &Message, arg: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let requested_head = arg.and_then(|raw| parse_one_based_page(Some(raw)));
    let category = match (arg, requested_head) {
        (Some(raw), None) => Some(raw.to_ascii_lowercase()),
        _ => None,
    };

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category.as_deref()
        && !categories.contains(&wanted_category)
    {
        let out = format!(
            "Unknown category `{}`. Available: {}",
            wanted_category,
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category.as_deref());
    let pages = help_pages(&commands)?;

    let head = requested_head.unwrap_or(0);
    if head >= pages.len() {
        let out = format!(
            "Page {} does not exist, there are {} pages.",
            head + 1,
            pages.len()
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let menu = menu_context(&ctx, msg);
    arrows(
        &menu,
        pages,
        ArrowsOptions {
            head,
            timeout: ctx.config.menu_timeout,
            ..ArrowsOptions::default()
        },
    )
    .await?;

    Ok(())
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut commands: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|command| category.is_none_or(|wanted| command.category == wanted))
        .collect();
    commands.sort_by(|a, b| a.category.cmp(b.category).then(a.name.cmp(b.name)));
    commands
}

fn help_pages(commands: &[&CommandMeta]) -> anyhow::Result<Vec<Embed>> {
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);

    (0..total)
        .map(|head| {
            let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, head);
            build_paginated_embed(
                "Available Commands",
                grouped_help_description(&commands[start..end]),
                head,
                total,
            )
        })
        .collect()
}

fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("• `{}` - {}\n", command.usage, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
