//! Sequential text prompts answered by plain messages.

use std::time::Duration;

use menukit_core::{
    IncomingMessage, MessageHandle, Payload, Waited,
    config::{DEFAULT_PROMPT_TIMEOUT_SECS, DEFAULT_STOP_KEYWORD},
};
use tracing::debug;
use twilight_model::channel::message::embed::Embed;

use crate::{cleanup::try_delete_many, context::MenuContext, error::MenuError, lock::Lock};

pub const DEFAULT_FAIL_RESPONSE: &str = "Failed to convert **\"{}\"** to desired type, try again";

type Parser<T> = Box<dyn Fn(&str) -> anyhow::Result<T> + Send + Sync>;

/// One prompt of a [`TextMenu`] and the parser for its answer.
pub struct Question<T> {
    text: Option<String>,
    embed: Option<Embed>,
    parser: Parser<T>,
    fail_response: Option<String>,
    fail_embed: Option<Embed>,
}

impl Question<String> {
    /// Question whose answer is the raw message content.
    ///
    /// Fails when there is neither a non-empty text nor an embed to show.
    pub fn new(text: Option<String>, embed: Option<Embed>) -> Result<Self, MenuError> {
        let text = text.filter(|text| !text.trim().is_empty());
        if text.is_none() && embed.is_none() {
            return Err(MenuError::InvalidQuestion);
        }

        Ok(Self {
            text,
            embed,
            parser: Box::new(|content: &str| Ok(content.to_owned())),
            fail_response: None,
            fail_embed: None,
        })
    }

    /// Text-only question.
    pub fn text(text: impl Into<String>) -> Result<Self, MenuError> {
        Self::new(Some(text.into()), None)
    }

    /// Convert the answer with `parser` instead of keeping the raw content.
    pub fn parse_with<U, F>(self, parser: F) -> Question<U>
    where
        F: Fn(&str) -> anyhow::Result<U> + Send + Sync + 'static,
    {
        Question {
            text: self.text,
            embed: self.embed,
            parser: Box::new(parser),
            fail_response: self.fail_response,
            fail_embed: self.fail_embed,
        }
    }
}

impl<T> Question<T> {
    /// Text sent after a failed parse. `{}` is replaced by the rejected answer.
    pub fn fail_response(mut self, response: impl Into<String>) -> Self {
        self.fail_response = Some(response.into());
        self
    }

    pub fn fail_embed(mut self, embed: Embed) -> Self {
        self.fail_embed = Some(embed);
        self
    }

    pub fn prompt(&self) -> Payload {
        Payload {
            content: self.text.clone(),
            embed: self.embed.clone(),
        }
    }

    /// Payload sent after `answer` could not be parsed.
    ///
    /// The default text is only used when no failure embed was given.
    pub fn fail_payload(&self, answer: &str) -> Payload {
        let template = match (&self.fail_response, &self.fail_embed) {
            (Some(response), _) => Some(response.as_str()),
            (None, None) => Some(DEFAULT_FAIL_RESPONSE),
            (None, Some(_)) => None,
        };

        Payload {
            content: template.map(|template| template.replace("{}", answer)),
            embed: self.fail_embed.clone(),
        }
    }

    fn label(&self, index: usize) -> String {
        self.text
            .clone()
            .unwrap_or_else(|| format!("question {}", index + 1))
    }
}

/// How a script ended when no error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptOutcome<T> {
    /// Every question was answered; answers are in question order.
    Completed(Vec<T>),
    /// The participant sent the stop keyword.
    Cancelled,
    TimedOut,
}

/// Ordered list of questions asked one after another.
pub struct TextMenu<T> {
    questions: Vec<Question<T>>,
    lock: Lock,
    stop: String,
    timeout: Duration,
    cleanup: bool,
    retry_parse_fail: bool,
}

impl<T> Default for TextMenu<T> {
    fn default() -> Self {
        Self {
            questions: Vec::new(),
            lock: Lock::Invoker,
            stop: DEFAULT_STOP_KEYWORD.to_owned(),
            timeout: Duration::from_secs(DEFAULT_PROMPT_TIMEOUT_SECS),
            cleanup: false,
            retry_parse_fail: false,
        }
    }
}

impl<T: Send> TextMenu<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = lock;
        self
    }

    /// Answer that aborts the script, matched case-insensitively. Empty disables it.
    pub fn stop(mut self, keyword: impl Into<String>) -> Self {
        self.stop = keyword.into();
        self
    }

    /// Wait per question.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delete every prompt and answer once the script ends.
    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Re-ask a question whose answer failed to parse instead of failing.
    pub fn retry_parse_fail(mut self, retry: bool) -> Self {
        self.retry_parse_fail = retry;
        self
    }

    pub fn add_question(mut self, question: Question<T>) -> Self {
        self.questions.push(question);
        self
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Ask every question in order in the invoking channel.
    pub async fn call(&self, ctx: &MenuContext) -> Result<ScriptOutcome<T>, MenuError> {
        if matches!(self.lock, Lock::Role(_)) && ctx.guild_id.is_none() {
            return Err(MenuError::RoleLockOutsideGuild);
        }

        let mut posted = Vec::new();
        let outcome = self.ask_all(ctx, &mut posted).await;

        if self.cleanup {
            try_delete_many(ctx.messenger.as_ref(), &posted).await;
        }

        outcome
    }

    fn is_stop(&self, content: &str) -> bool {
        !self.stop.is_empty() && content.trim().to_lowercase() == self.stop.trim().to_lowercase()
    }

    async fn ask_all(
        &self,
        ctx: &MenuContext,
        posted: &mut Vec<MessageHandle>,
    ) -> Result<ScriptOutcome<T>, MenuError> {
        let messenger = ctx.messenger.as_ref();
        let invoker = ctx.author.user_id;
        let lock = self.lock;
        let filter = |message: &IncomingMessage| {
            message.handle.channel_id == ctx.channel_id
                && !ctx.is_bot(&message.author)
                && lock.permits(invoker, &message.author)
        };

        let mut answers = Vec::with_capacity(self.questions.len());

        for (index, question) in self.questions.iter().enumerate() {
            let mut payload = question.prompt();

            loop {
                posted.push(messenger.send(ctx.channel_id, &payload).await?);

                let Waited::Received(answer) = messenger.next_message(&filter, self.timeout).await?
                else {
                    debug!(question = index, "text menu timed out");
                    return Ok(ScriptOutcome::TimedOut);
                };
                posted.push(answer.handle);

                if self.is_stop(&answer.content) {
                    return Ok(ScriptOutcome::Cancelled);
                }

                match (question.parser)(&answer.content) {
                    Ok(value) => {
                        answers.push(value);
                        break;
                    }
                    Err(source) if self.retry_parse_fail => {
                        debug!(question = index, error = %source, "answer rejected, asking again");
                        payload = question.fail_payload(&answer.content);
                    }
                    Err(source) => {
                        return Err(MenuError::AnswerParsing {
                            question: question.label(index),
                            source: source.into(),
                        });
                    }
                }
            }
        }

        Ok(ScriptOutcome::Completed(answers))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Context as _;
    use twilight_model::id::Id;
    use twilight_util::builder::embed::EmbedBuilder;

    use super::*;
    use crate::testing::{BOT, Call, INVOKER, ScriptedMessenger, context, message};

    fn two_questions() -> TextMenu<String> {
        TextMenu::new()
            .add_question(Question::text("Name?").unwrap())
            .add_question(Question::text("Colour?").unwrap())
    }

    fn numeric() -> Question<u32> {
        Question::text("How many?")
            .unwrap()
            .parse_with(|content| content.trim().parse::<u32>().context("not a number"))
    }

    #[test]
    fn questions_need_something_to_show() {
        assert!(matches!(
            Question::new(None, None),
            Err(MenuError::InvalidQuestion)
        ));
        assert!(matches!(
            Question::new(Some("  ".to_owned()), None),
            Err(MenuError::InvalidQuestion)
        ));
        assert!(Question::new(None, Some(EmbedBuilder::new().description("?").build())).is_ok());
    }

    #[test]
    fn failure_payloads() {
        let plain = Question::text("?").unwrap();
        assert_eq!(
            plain.fail_payload("abc").content.as_deref(),
            Some("Failed to convert **\"abc\"** to desired type, try again")
        );

        let custom = Question::text("?").unwrap().fail_response("{} is wrong");
        assert_eq!(custom.fail_payload("x").content.as_deref(), Some("x is wrong"));

        let embed_only = Question::text("?")
            .unwrap()
            .fail_embed(EmbedBuilder::new().description("nope").build());
        let payload = embed_only.fail_payload("x");
        assert_eq!(payload.content, None);
        assert!(payload.embed.is_some());
    }

    #[tokio::test]
    async fn answers_arrive_in_order() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, INVOKER, "Ferris"));
        messenger.push_message(message(51, INVOKER, "orange"));
        let ctx = context(&messenger);

        let outcome = two_questions().call(&ctx).await.unwrap();

        assert_eq!(
            outcome,
            ScriptOutcome::Completed(vec!["Ferris".to_owned(), "orange".to_owned()])
        );
        let prompts: Vec<_> = messenger
            .sent()
            .into_iter()
            .filter_map(|payload| payload.content)
            .collect();
        assert_eq!(prompts, vec!["Name?", "Colour?"]);
    }

    #[tokio::test]
    async fn stop_keyword_cancels() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, INVOKER, "  CANCEL "));
        let ctx = context(&messenger);

        let outcome = two_questions().call(&ctx).await.unwrap();

        assert_eq!(outcome, ScriptOutcome::Cancelled);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn silence_times_out() {
        let messenger = Arc::new(ScriptedMessenger::new());
        let ctx = context(&messenger);

        let outcome = two_questions().call(&ctx).await.unwrap();

        assert_eq!(outcome, ScriptOutcome::TimedOut);
    }

    #[tokio::test]
    async fn other_authors_and_the_bot_are_ignored() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, 42, "intruder"));
        messenger.push_message(message(51, BOT, "echo"));
        messenger.push_message(message(52, INVOKER, "7"));
        let ctx = context(&messenger);

        let outcome = TextMenu::new()
            .add_question(numeric())
            .call(&ctx)
            .await
            .unwrap();

        assert_eq!(outcome, ScriptOutcome::Completed(vec![7]));
    }

    #[tokio::test]
    async fn parse_failure_is_an_error_without_retry() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, INVOKER, "seven"));
        let ctx = context(&messenger);

        let err = TextMenu::new()
            .add_question(numeric())
            .call(&ctx)
            .await
            .unwrap_err();

        match err {
            MenuError::AnswerParsing { question, .. } => assert_eq!(question, "How many?"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn parse_failure_reprompts_with_retry() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, INVOKER, "seven"));
        messenger.push_message(message(51, INVOKER, "7"));
        let ctx = context(&messenger);

        let outcome = TextMenu::new()
            .retry_parse_fail(true)
            .add_question(numeric())
            .call(&ctx)
            .await
            .unwrap();

        assert_eq!(outcome, ScriptOutcome::Completed(vec![7]));
        assert_eq!(
            messenger.sent()[1].content.as_deref(),
            Some("Failed to convert **\"seven\"** to desired type, try again")
        );
    }

    #[tokio::test]
    async fn cleanup_deletes_prompts_and_answers() {
        let messenger = Arc::new(ScriptedMessenger::new());
        messenger.push_message(message(50, INVOKER, "Ferris"));
        messenger.push_message(message(51, INVOKER, "orange"));
        let ctx = context(&messenger);

        two_questions().cleanup(true).call(&ctx).await.unwrap();

        assert_eq!(
            messenger.calls().last(),
            Some(&Call::DeleteMany(vec![1, 50, 2, 51]))
        );
    }

    #[tokio::test]
    async fn cleanup_also_runs_on_parse_errors() {
        let messenger = Arc::new(ScriptedMessenger::forbidding_cleanup());
        messenger.push_message(message(50, INVOKER, "seven"));
        let ctx = context(&messenger);

        let result = TextMenu::new()
            .cleanup(true)
            .add_question(numeric())
            .call(&ctx)
            .await;

        assert!(matches!(result, Err(MenuError::AnswerParsing { .. })));
        assert_eq!(
            messenger.calls().last(),
            Some(&Call::DeleteMany(vec![1, 50]))
        );
    }

    #[tokio::test]
    async fn forbidden_cleanup_keeps_every_outcome() {
        for answers in [vec!["a", "b"], vec!["cancel"], vec![]] {
            let messenger = Arc::new(ScriptedMessenger::forbidding_cleanup());
            for (offset, content) in answers.iter().enumerate() {
                messenger.push_message(message(50 + offset as u64, INVOKER, content));
            }
            let ctx = context(&messenger);

            assert!(two_questions().cleanup(true).call(&ctx).await.is_ok());
        }
    }

    #[tokio::test]
    async fn role_lock_needs_a_guild() {
        let messenger = Arc::new(ScriptedMessenger::in_direct_messages());
        let mut ctx = context(&messenger);
        ctx.guild_id = None;

        let result = two_questions().lock(Lock::Role(Id::new(5))).call(&ctx).await;

        assert!(matches!(result, Err(MenuError::RoleLockOutsideGuild)));
        assert!(messenger.calls().is_empty());
    }
}
