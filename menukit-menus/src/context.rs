use std::sync::Arc;

use menukit_core::{Actor, Messenger};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker, UserMarker},
};

/// Where a menu was invoked and by whom.
#[derive(Clone)]
pub struct MenuContext {
    pub messenger: Arc<dyn Messenger>,
    pub channel_id: Id<ChannelMarker>,
    /// `None` in direct messages.
    pub guild_id: Option<Id<GuildMarker>>,
    pub author: Actor,
    pub bot_user_id: Id<UserMarker>,
}

impl MenuContext {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        channel_id: Id<ChannelMarker>,
        guild_id: Option<Id<GuildMarker>>,
        author: Actor,
        bot_user_id: Id<UserMarker>,
    ) -> Self {
        Self {
            messenger,
            channel_id,
            guild_id,
            author,
            bot_user_id,
        }
    }

    /// Whether `actor` is the bot itself.
    pub fn is_bot(&self, actor: &Actor) -> bool {
        actor.user_id == self.bot_user_id
    }
}
