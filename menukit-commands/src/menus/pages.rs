use tracing::debug;
use twilight_model::channel::Message;

use crate::{CommandMeta, menu_context};
use menukit_core::Context;
use menukit_menus::{ArrowsOptions, NavigationOutcome, arrows};
use menukit_utils::embed::{TextPageOptions, paginate_to_embeds};

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Shows a long generated text as an arrow menu.",
    category: "menus",
    usage: "!pages [lines]",
};

const DEFAULT_LINES: usize = 60;
const MAX_LINES: usize = 500;
const PAGE_SIZE: usize = 300;

/// Generate `lines` numbered lines and page through them.
pub async fn run(ctx: Context, msg: &Message, arg: Option<&str>) -> anyhow::Result<()> {
    let lines = match arg {
        None => DEFAULT_LINES,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(count) if (1..=MAX_LINES).contains(&count) => count,
            _ => {
                let out = format!("Usage: `{}` with 1 to {} lines", META.usage, MAX_LINES);
                ctx.http.create_message(msg.channel_id).content(&out).await?;
                return Ok(());
            }
        },
    };

    let pages = paginate_to_embeds(&sample_text(lines), &page_options())?;
    let menu = menu_context(&ctx, msg);
    let outcome = arrows(
        &menu,
        pages,
        ArrowsOptions {
            content: Some(format!("{lines} lines")),
            timeout: ctx.config.menu_timeout,
            ..ArrowsOptions::default()
        },
    )
    .await?;

    if let NavigationOutcome::Expired { head, .. } = outcome {
        debug!(head, "pages menu expired");
    }

    Ok(())
}

fn page_options() -> TextPageOptions {
    TextPageOptions {
        title: Some("Pages".to_owned()),
        max_size: PAGE_SIZE,
        prefix: "```\n".to_owned(),
        suffix: "\n```".to_owned(),
        ..TextPageOptions::default()
    }
}

fn sample_text(lines: usize) -> String {
    (1..=lines)
        .map(|line| format!("Line {line:>3}: the quick brown fox"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_text_fits_in_code_blocks() {
        let pages = paginate_to_embeds(&sample_text(DEFAULT_LINES), &page_options()).unwrap();

        assert!(pages.len() > 1);
        for page in &pages {
            let description = page.description.as_deref().unwrap();
            assert!(description.starts_with("```\n"));
            assert!(description.ends_with("\n```"));
            assert!(description.chars().count() <= PAGE_SIZE);
        }
    }

    #[test]
    fn every_line_is_kept() {
        let pages = paginate_to_embeds(&sample_text(12), &page_options()).unwrap();
        let lines: usize = pages
            .iter()
            .filter_map(|page| page.description.as_deref())
            .map(|description| description.lines().filter(|line| line.starts_with("Line")).count())
            .sum();

        assert_eq!(lines, 12);
    }
}
