//! Example gateway bot
//!
//! Run with:
//! ```bash
//! DISCORD_TOKEN=... cargo run -p gatebot-gateway --bin gatebot
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use chrono::Utc;
use gatebot_common::{try_init_tracing_with_config, AppError, AppResult, BotConfig, TracingConfig};
use gatebot_core::{Embed, Message};
use gatebot_gateway::{handler_fn, reply_with, Bot, CommandContext, GatewayError, RegistryError};
use std::time::Duration;
use tracing::{error, info, warn};

const LATENCY_LOG_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, code = e.error_code(), "Bot failed");
        eprintln!("Error [{}]: {e}", e.error_code());
        // 2 for misconfiguration, 1 for runtime failures
        std::process::exit(if e.is_setup_error() { 2 } else { 1 });
    }
}

async fn run() -> AppResult<()> {
    let config = BotConfig::from_env()?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }
    info!(env = ?config.env, api_base = %config.rest.api_base, "Configuration loaded");

    let mut bot = Bot::init(config).await?;
    register_commands(&mut bot).map_err(GatewayError::from)?;

    match bot.register_remote().await {
        Ok(report) if report.is_complete() => {
            info!(count = report.registered.len(), "Commands registered");
        }
        Ok(report) => warn!(
            registered = report.registered.len(),
            failed = report.failed.len(),
            "Some commands failed to register"
        ),
        Err(e) => warn!(error = %e, "Skipping command registration"),
    }

    bot.start()?;
    info!("Bot is running; press Ctrl+C to stop");

    let mut ticker = tokio::time::interval(LATENCY_LOG_INTERVAL);
    ticker.tick().await;
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.map_err(AppError::internal)?;
                info!("Shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                match bot.latency() {
                    Some(latency) => info!(latency_ms = latency.as_millis() as u64, "Gateway latency"),
                    None => info!(state = %bot.handshake_state(), "Gateway latency unknown"),
                }
                if !bot.is_running() {
                    warn!("Gateway session ended");
                    break;
                }
            }
        }
    }

    bot.shutdown().await;
    info!("Bot stopped");
    Ok(())
}

fn register_commands(bot: &mut Bot) -> Result<(), RegistryError> {
    bot.register_command("ping", "Check bot latency", handler_fn(ping))?;
    bot.register_command("hello", "Say hello to the bot", handler_fn(hello))?;
    bot.register_command(
        "time",
        "Get current server time",
        handler_fn(|_| {
            Some(Message::new(format!(
                "Current server time: {}",
                Utc::now().format("%a %b %e %H:%M:%S %Y UTC")
            )))
        }),
    )?;
    bot.register_command("info", "Get bot information", reply_with(INFO))?;
    bot.register_command("embed", "Demonstrate embed functionality", handler_fn(embed))?;
    Ok(())
}

const INFO: &str = "**Bot Information**\n\
    - Language: Rust\n\
    - Library: gatebot\n\
    - Features: Slash Commands, Embeds, WebSocket Gateway\n\
    - Status: Online and ready!";

fn ping(ctx: &CommandContext) -> Option<Message> {
    let text = match ctx.latency() {
        Some(latency) => format!("Pong! Gateway latency: {}ms", latency.as_millis()),
        None => "Pong! (latency unknown)".to_string(),
    };
    Some(Message::new(text))
}

fn hello(ctx: &CommandContext) -> Option<Message> {
    let text = match ctx.user_name() {
        Some(name) => format!("Hello there, {name}!"),
        None => "Hello there!".to_string(),
    };
    Some(Message::new(text))
}

fn embed(_ctx: &CommandContext) -> Option<Message> {
    let embed = Embed::new(
        "Embed Demo",
        "This is an example of a rich embed sent along with regular text!",
        0x00ff00,
    )
    .with_footer("Powered by gatebot")
    .with_timestamp(Utc::now());

    Some(Message::new("Here's an embed example:").with_embed(embed))
}
