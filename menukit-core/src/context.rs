use std::sync::Arc;

use twilight_http::Client;
use twilight_model::id::{Id, marker::UserMarker};

use crate::{config::Config, twilight::TwilightMessenger};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub messenger: Arc<TwilightMessenger>,
    pub config: Arc<Config>,
    /// The bot's own user, so menus can ignore its reactions and prompts.
    pub bot_user_id: Id<UserMarker>,
}

impl Context {
    /// Create a new application context.
    pub fn new(
        http: Arc<Client>,
        messenger: Arc<TwilightMessenger>,
        config: Arc<Config>,
        bot_user_id: Id<UserMarker>,
    ) -> Self {
        Self {
            http,
            messenger,
            config,
            bot_user_id,
        }
    }
}
