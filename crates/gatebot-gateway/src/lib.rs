//! # gatebot-gateway
//!
//! Gateway bot client: connects to the real-time gateway, performs the
//! HELLO/IDENTIFY handshake, keeps the connection alive with heartbeats and
//! answers slash commands over the REST API.
//!
//! ```no_run
//! use gatebot_common::BotConfig;
//! use gatebot_gateway::{reply_with, Bot};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bot = Bot::init(BotConfig::from_env()?).await?;
//! bot.register_command("hello", "Say hello", reply_with("Hi"))?;
//! bot.register_remote().await?;
//! bot.start()?;
//! // ...
//! bot.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod commands;
pub mod driver;
pub mod error;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod rest;
pub mod session;
pub mod transport;

pub use bot::{Bot, RegistrationReport};
pub use commands::{handler_fn, reply_with, CommandContext, CommandHandler, RegistryError};
pub use error::{GatewayError, GatewayResult};
pub use session::HandshakeState;
