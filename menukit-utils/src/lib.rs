/// Embed builders shared across menus and commands.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Paginator and page math.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
