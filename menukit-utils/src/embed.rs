use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

use crate::pagination::paginate;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
/// Color of the embed shown when a user closes a menu.
pub const CLOSED_EMBED_COLOR: u32 = 0xFF_00_00;
/// Discord's practical limit for a message or embed description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Footer text for the page at 0-based `head`.
pub fn page_footer(head: usize, total_pages: usize) -> String {
    format!("Page {}/{}", head + 1, total_pages.max(1))
}

/// Build a standard paginated embed with consistent styling.
///
/// The footer is omitted for a single page.
pub fn build_paginated_embed(
    title: &str,
    description: impl Into<String>,
    head: usize,
    total_pages: usize,
) -> anyhow::Result<Embed> {
    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if total_pages > 1 {
        let footer = EmbedFooterBuilder::new(page_footer(head, total_pages)).build();
        builder.footer(footer).validate()?.build()
    } else {
        builder.validate()?.build()
    };

    Ok(embed)
}

/// Copy `base` with a new description and a `Page i/n` footer.
///
/// Everything else on the blueprint (title, color, fields, images) is kept.
pub fn with_page(base: &Embed, description: String, head: usize, total_pages: usize) -> Embed {
    let mut embed = base.clone();
    embed.description = Some(description);
    embed.footer = Some(EmbedFooterBuilder::new(page_footer(head, total_pages)).build());
    embed
}

/// Default embed displayed when a user closes a navigation menu.
pub fn closed_embed() -> Embed {
    EmbedBuilder::new()
        .description("Closed by user")
        .color(CLOSED_EMBED_COLOR)
        .build()
}

/// Plain embed carrying only a description.
pub fn description_embed(description: impl Into<String>) -> Embed {
    EmbedBuilder::new()
        .description(description)
        .color(DEFAULT_EMBED_COLOR)
        .build()
}

/// Options for [`paginate_to_embeds`].
#[derive(Clone, Debug)]
pub struct TextPageOptions {
    /// Shared by every page.
    pub title: Option<String>,
    /// Maximum characters per page description, prefix and suffix included.
    pub max_size: usize,
    /// Prepended to every page, e.g. a code fence.
    pub prefix: String,
    /// Appended to every page.
    pub suffix: String,
    pub color: Option<u32>,
}

impl Default for TextPageOptions {
    fn default() -> Self {
        Self {
            title: None,
            max_size: MAX_DESCRIPTION_LENGTH,
            prefix: String::new(),
            suffix: String::new(),
            color: None,
        }
    }
}

/// Split a long text by lines into page embeds with `Page i/n` footers.
///
/// Fails when a single line cannot fit on a page.
pub fn paginate_to_embeds(description: &str, options: &TextPageOptions) -> anyhow::Result<Vec<Embed>> {
    let wrapper_length = options.prefix.chars().count() + options.suffix.chars().count();
    let budget = options.max_size.saturating_sub(wrapper_length);
    let lines: Vec<&str> = description.split('\n').collect();

    // Every line carries its newline.
    let pages = paginate(&lines, usize::MAX, budget, 1)?;
    let total = pages.len();

    let embeds = pages
        .iter()
        .map(|page| {
            let body = format!("{}{}{}", options.prefix, page.items().join("\n"), options.suffix);
            let mut builder = EmbedBuilder::new()
                .description(body)
                .footer(EmbedFooterBuilder::new(page_footer(page.index(), total)).build());
            if let Some(title) = options.title.as_deref() {
                builder = builder.title(title);
            }
            if let Some(color) = options.color {
                builder = builder.color(color);
            }
            builder.build()
        })
        .collect();

    Ok(embeds)
}
