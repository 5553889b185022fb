//! Interactive menus driven by reactions and replies.
//!
//! Every menu talks to the chat platform through [`menukit_core::Messenger`], suspends only
//! while waiting for the next qualifying event, and treats a timeout as an outcome.

pub mod arrows;
pub mod cleanup;
pub mod confirm;
pub mod context;
pub mod error;
pub mod lock;
pub mod multichoice;
pub mod navigation;
pub mod signal;
pub mod text_menu;
pub mod waiters;

#[cfg(test)]
mod testing;

pub use arrows::{ArrowsOptions, NavigationOutcome, arrows};
pub use confirm::{ConfirmOptions, confirm};
pub use context::MenuContext;
pub use error::MenuError;
pub use lock::Lock;
pub use multichoice::{MultichoiceOptions, multichoice, resolve_choice};
pub use navigation::{navigation_signals, next_head};
pub use signal::ControlSignal;
pub use text_menu::{Question, ScriptOutcome, TextMenu};
pub use waiters::{Reply, WaitOptions, reply, wait_for_author, wait_for_regex};
