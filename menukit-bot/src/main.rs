use std::sync::Arc;

use tracing::{error, info};
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use menukit_commands::handle_message;
use menukit_core::{Config, Context, EventRelay, TwilightMessenger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Reads .env first
    let config = Arc::new(Config::from_env()?);

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));
    let bot_user_id = http.current_user().await?.model().await?.id;

    // Every pending menu subscribes to this relay
    let relay = EventRelay::default();
    let messenger = Arc::new(TwilightMessenger::new(Arc::clone(&http), relay.clone()));
    let ctx = Context::new(Arc::clone(&http), messenger, Arc::clone(&config), bot_user_id);

    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), config.token.clone(), intents);

    info!("menukit is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        relay.publish(&event);

        match event {
            Event::Ready(_) => {
                info!(bot_user_id = bot_user_id.get(), "menukit is ready");
            }

            // Menus wait for later events, so they must not block this loop
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command failed");
                    }
                });
            }
            _ => {}
        }
    }

    Ok(())
}
