mod events;
mod jobs;
mod webhook;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use sable_core::{CommandFailure, Cooldowns, Data, Error};
use sable_store::Storage;

const DEFAULT_KNOCKOUT_COOLDOWN_SECONDS: u64 = 1800;
const DEFAULT_REVIVE_COOLDOWN_SECONDS: u64 = 600;
const DEFAULT_SOCIAL_COOLDOWN_SECONDS: u64 = 300;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    // Store Discord Bot Token
    let token = env::var("DISCORD_TOKEN")?;

    let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()));
    let storage = Arc::new(Storage::open(&data_dir)?);
    info!(data_dir = %data_dir.display(), "storage opened");

    let support_guild_id = match env::var("SUPPORT_GUILD_ID") {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(id) if id != 0 => Some(id),
            _ => {
                anyhow::bail!("SUPPORT_GUILD_ID is set but is not a valid guild id");
            }
        },
        Err(_) => None,
    };
    if support_guild_id.is_some() {
        info!("boost detection enabled.");
    } else {
        info!("boost detection disabled (set SUPPORT_GUILD_ID to enable).");
    }

    let error_webhook_url = env::var("ERROR_WEBHOOK_URL").ok().filter(|url| !url.is_empty());
    if error_webhook_url.is_some() {
        info!("error webhook mirroring enabled.");
    }

    let cooldowns = Cooldowns::new(
        Duration::from_secs(env_u64(
            "KNOCKOUT_COOLDOWN_SECONDS",
            DEFAULT_KNOCKOUT_COOLDOWN_SECONDS,
        )),
        Duration::from_secs(env_u64(
            "REVIVE_COOLDOWN_SECONDS",
            DEFAULT_REVIVE_COOLDOWN_SECONDS,
        )),
        Duration::from_secs(env_u64(
            "SOCIAL_COOLDOWN_SECONDS",
            DEFAULT_SOCIAL_COOLDOWN_SECONDS,
        )),
    );

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: sable_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(sable_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let storage = storage.clone();
            Box::pin(async move {
                info!("Sable has awoken!");

                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                jobs::spawn(ctx.clone(), storage.clone());

                Ok(Data {
                    storage,
                    cooldowns,
                    antiraid: Default::default(),
                    support_guild_id,
                    error_webhook_url,
                    started_at: Instant::now(),
                })
            })
        })
        .build();

    info!("Sable is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            // Expected refusals answer the caller directly and skip the
            // webhook mirror.
            if let Some(failure) = error.downcast_ref::<CommandFailure>() {
                let _ = ctx
                    .send(
                        poise::CreateReply::default()
                            .ephemeral(true)
                            .content(failure.to_string()),
                    )
                    .await;
                return;
            }

            error!(?error, command = %ctx.command().qualified_name, "command error");
            webhook::mirror_error(
                ctx.data().error_webhook_url.as_deref(),
                &format!("`{}` failed: {error:#}", ctx.command().qualified_name),
            )
            .await;

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(sable_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = match sable_commands::find_meta(&ctx.command().name) {
                Some(meta) => format!("Usage: `{}`", meta.usage),
                None => format!(
                    "Usage: `{}{}`",
                    sable_utils::COMMAND_PREFIX,
                    ctx.command().qualified_name
                ),
            };
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            events::antiraid::handle_message_lockdown(ctx, data, new_message).await;
        }
        _ => {}
    }

    Ok(())
}
