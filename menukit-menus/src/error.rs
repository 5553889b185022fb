use menukit_core::MessengerError;
use menukit_utils::pagination::PaginateError;
use thiserror::Error;

/// Failure of a menu invocation.
///
/// Timeouts and explicit cancellations are outcomes, not errors.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("a navigation menu needs at least one page")]
    NoPages,

    #[error("options cannot be empty")]
    NoOptions,

    #[error("option {index} is {length} characters long, the maximum is {max}")]
    OptionTooLong {
        index: usize,
        length: usize,
        max: usize,
    },

    #[error("a question needs a text or an embed")]
    InvalidQuestion,

    #[error("a role lock can only be used in a guild channel")]
    RoleLockOutsideGuild,

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Paginate(#[from] PaginateError),

    #[error("failed to parse the answer to {question}")]
    AnswerParsing {
        question: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Messenger(#[from] MessengerError),
}
