//! Host-facing bot handle

use crate::commands::{CommandHandler, CommandRegistry, RegistryError};
use crate::driver::SessionDriver;
use crate::error::{GatewayError, GatewayResult};
use crate::handlers::EventDispatcher;
use crate::rest::{HttpRestClient, RestApi, RestClient, RestError};
use crate::session::{HandshakeState, SessionState};
use gatebot_common::BotConfig;
use gatebot_core::{GatewayIntents, Message};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Result of pushing the local command set to the API
#[derive(Debug, Default)]
pub struct RegistrationReport {
    /// Commands accepted by the API
    pub registered: Vec<String>,
    /// Commands that failed, with the reason
    pub failed: Vec<(String, RestError)>,
}

impl RegistrationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

struct DriverHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<GatewayResult<()>>,
}

/// A bot session: configuration, commands and the gateway connection
///
/// Commands are registered before [`Bot::start`]; the registry is frozen
/// while the driver runs. Dropping the bot signals a running driver to stop.
pub struct Bot {
    config: BotConfig,
    session: Arc<SessionState>,
    registry: Arc<CommandRegistry>,
    rest: RestApi,
    driver: Option<DriverHandle>,
}

impl Bot {
    /// Create a bot talking to the configured API over HTTP
    ///
    /// Application id discovery is attempted; failure is logged, not returned.
    pub async fn init(config: BotConfig) -> GatewayResult<Self> {
        let client = HttpRestClient::new(&config)?;
        Ok(Self::with_rest_client(config, Arc::new(client)).await)
    }

    /// Create a bot on top of a custom REST client
    pub async fn with_rest_client(config: BotConfig, client: Arc<dyn RestClient>) -> Self {
        let session = Arc::new(SessionState::new(
            config.token.clone(),
            GatewayIntents::DEFAULT,
        ));
        let rest = RestApi::new(client);

        match rest.current_application_id().await {
            Ok(id) => {
                tracing::info!(application_id = %id, "Resolved application id");
                session.set_application_id(id);
            }
            Err(e) => tracing::warn!(error = %e, "Application id lookup failed"),
        }

        Self {
            registry: Arc::new(CommandRegistry::with_capacity(config.gateway.max_commands)),
            config,
            session,
            rest,
            driver: None,
        }
    }

    /// Add a slash command
    ///
    /// Fails while the driver is running.
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        if self.driver.is_some() {
            return Err(RegistryError::Frozen);
        }
        Arc::get_mut(&mut self.registry)
            .ok_or(RegistryError::Frozen)?
            .register(name, description, handler)
    }

    /// Create every registered command on the API
    ///
    /// Individual failures are logged and reported; the rest still go out.
    pub async fn register_remote(&self) -> GatewayResult<RegistrationReport> {
        let application_id = self
            .session
            .application_id()
            .ok_or(GatewayError::MissingApplicationId)?;

        let mut report = RegistrationReport::default();
        for spec in self.registry.specs() {
            match self.rest.create_command(&application_id, spec).await {
                Ok(()) => {
                    tracing::info!(command = %spec.name, "Registered command with API");
                    report.registered.push(spec.name.clone());
                }
                Err(e) => {
                    tracing::warn!(command = %spec.name, error = %e, "Command registration failed");
                    report.failed.push((spec.name.clone(), e));
                }
            }
        }
        Ok(report)
    }

    /// Spawn the session driver on the current Tokio runtime
    pub fn start(&mut self) -> GatewayResult<()> {
        if let Some(handle) = &self.driver {
            if !handle.task.is_finished() {
                return Err(GatewayError::AlreadyRunning);
            }
            self.driver = None;
        }
        let runtime = Handle::try_current().map_err(|_| GatewayError::NoRuntime)?;

        let stop = Arc::new(AtomicBool::new(false));
        let dispatcher = EventDispatcher::new(
            Arc::clone(&self.session),
            Arc::clone(&self.registry),
            self.rest.clone(),
        );
        let driver = SessionDriver::new(
            dispatcher,
            self.rest.clone(),
            self.config.gateway.fallback_url.clone(),
            self.config.gateway.poll_interval,
            Arc::clone(&stop),
        );

        let task = runtime.spawn(driver.run());
        self.driver = Some(DriverHandle { stop, task });
        tracing::info!(commands = self.registry.len(), "Bot started");
        Ok(())
    }

    /// Signal the driver to stop and wait for it
    ///
    /// Returns within one poll interval of the signal; calling it again is a no-op.
    pub async fn stop(&mut self) {
        let Some(handle) = self.driver.take() else {
            return;
        };
        handle.stop.store(true, Ordering::Release);

        match handle.task.await {
            Ok(Ok(())) => tracing::debug!("Session driver exited"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Session driver exited with error"),
            Err(e) => tracing::error!(error = %e, "Session driver task failed"),
        }
    }

    /// Stop the driver and release the bot
    pub async fn shutdown(mut self) {
        self.stop().await;
        tracing::info!("Bot shut down");
    }

    /// Whether a driver task is alive
    pub fn is_running(&self) -> bool {
        self.driver
            .as_ref()
            .is_some_and(|handle| !handle.task.is_finished())
    }

    /// Last heartbeat round trip, `None` until the first ACK
    pub fn latency(&self) -> Option<Duration> {
        self.session.liveness().latency()
    }

    pub fn handshake_state(&self) -> HandshakeState {
        self.session.handshake_state()
    }

    pub fn application_id(&self) -> Option<String> {
        self.session.application_id()
    }

    /// Gateway URL of the latest connection
    pub fn gateway_url(&self) -> Option<String> {
        self.session.gateway_url()
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Post a message to a channel
    pub async fn send_message(&self, channel_id: &str, message: &Message) -> GatewayResult<()> {
        self.rest.create_message(channel_id, message).await?;
        tracing::debug!(channel_id = %channel_id, "Sent channel message");
        Ok(())
    }
}

impl Drop for Bot {
    fn drop(&mut self) {
        if let Some(handle) = &self.driver {
            handle.stop.store(true, Ordering::Release);
        }
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("session", &self.session)
            .field("commands", &self.registry.len())
            .field("running", &self.is_running())
            .finish()
    }
}
