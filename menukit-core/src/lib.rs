/// Environment configuration.
pub mod config;
/// Shared application context.
pub mod context;
/// Error types shared across crates.
pub mod error;
/// Messaging collaborator trait and event types.
pub mod messenger;
/// Gateway event fan-out for pending waits.
pub mod relay;
/// Twilight-backed messaging collaborator.
pub mod twilight;

pub use config::Config;
pub use context::Context;
pub use error::{ConfigError, MessengerError};
pub use messenger::{
    Actor, IncomingMessage, MessageEdit, MessageFilter, MessageHandle, Messenger, Payload,
    ReactionEvent, ReactionFilter, Waited,
};
pub use relay::{EventRelay, RelayEvent};
pub use twilight::TwilightMessenger;
