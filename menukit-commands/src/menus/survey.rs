use anyhow::Context as _;
use twilight_model::channel::{Message, message::embed::Embed};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder};

use crate::{CommandMeta, menu_context};
use menukit_core::Context;
use menukit_menus::{MenuError, Question, ScriptOutcome, TextMenu};
use menukit_utils::{
    embed::DEFAULT_EMBED_COLOR,
    parse::{Trimmer, parse_duration, parse_month, to_spongebob_case},
};

pub const META: CommandMeta = CommandMeta {
    name: "survey",
    desc: "Asks a few questions in a row and sums up the answers.",
    category: "menus",
    usage: "!survey",
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const LABELS: [&str; 4] = ["Name", "Age", "Birth month", "Screen time"];

/// Run a short prompt script and post a summary embed.
pub async fn run(ctx: Context, msg: &Message) -> anyhow::Result<()> {
    let script = survey(&ctx.config.stop_keyword)?.timeout(ctx.config.prompt_timeout);
    let menu = menu_context(&ctx, msg);

    let out = match script.call(&menu).await {
        Ok(ScriptOutcome::Completed(answers)) => {
            let embed = summary_embed(&answers)?;
            ctx.http
                .create_message(msg.channel_id)
                .embeds(&[embed])
                .await?;
            return Ok(());
        }
        Ok(ScriptOutcome::Cancelled) => "Survey cancelled.".to_owned(),
        Ok(ScriptOutcome::TimedOut) => "Survey timed out.".to_owned(),
        Err(MenuError::AnswerParsing { question, source }) => {
            format!("Could not understand the answer to \"{question}\": {source}")
        }
        Err(source) => return Err(source.into()),
    };

    ctx.http.create_message(msg.channel_id).content(&out).await?;

    Ok(())
}

fn survey(stop: &str) -> Result<TextMenu<String>, MenuError> {
    Ok(TextMenu::new()
        .stop(stop)
        .cleanup(true)
        .retry_parse_fail(true)
        .add_question(Question::text(format!(
            "What is your name? (`{stop}` to stop)"
        ))?)
        .add_question(
            Question::text("How old are you?")?
                .parse_with(|content| {
                    content
                        .trim()
                        .parse::<u8>()
                        .map(|age| age.to_string())
                        .context("not an age")
                })
                .fail_response("**{}** is not an age, try a number."),
        )
        .add_question(Question::text("Which month were you born in?")?.parse_with(|content| {
            let month = parse_month(content)?;
            Ok(MONTH_NAMES[usize::from(month) - 1].to_owned())
        }))
        .add_question(
            Question::text("How long do you spend on Discord per day? (e.g. `2h30m`)")?
                .parse_with(|content| {
                    let duration = parse_duration(content)?;
                    Ok(format_minutes(duration.as_secs() / 60))
                }),
        ))
}

fn format_minutes(minutes: u64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, minutes) => format!("{minutes}m"),
        (hours, 0) => format!("{hours}h"),
        (hours, minutes) => format!("{hours}h {minutes}m"),
    }
}

fn summary_embed(answers: &[String]) -> anyhow::Result<Embed> {
    let name_trimmer = Trimmer::new(64);
    let mut builder = EmbedBuilder::new()
        .title(to_spongebob_case("survey results"))
        .color(DEFAULT_EMBED_COLOR);

    for (label, answer) in LABELS.iter().zip(answers) {
        builder = builder.field(EmbedFieldBuilder::new(*label, name_trimmer.trim(answer)).inline());
    }

    Ok(builder.validate()?.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_has_one_question_per_label() {
        let script = survey("cancel").unwrap();

        assert_eq!(script.len(), LABELS.len());
    }

    #[test]
    fn minutes_are_readable() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(150), "2h 30m");
    }

    #[test]
    fn summary_lists_every_answer() {
        let answers = ["Ferris", "9", "May", "2h"].map(ToOwned::to_owned);
        let embed = summary_embed(&answers).unwrap();

        assert_eq!(embed.title.as_deref(), Some("sUrVeY ReSuLtS"));
        assert_eq!(embed.fields.len(), 4);
        assert_eq!(embed.fields[2].name, "Birth month");
        assert_eq!(embed.fields[2].value, "May");
    }
}
