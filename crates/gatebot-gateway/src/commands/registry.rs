//! Command registry

use super::CommandHandler;
use gatebot_core::{CommandSpec, DomainError};
use std::fmt;

/// Registry errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Command already registered: {0}")]
    Duplicate(String),

    #[error("Command registry is full ({0} commands)")]
    CapacityExceeded(usize),

    #[error("Commands cannot be registered while the bot is running")]
    Frozen,
}

/// A command's metadata bound to its handler
pub struct RegisteredCommand {
    spec: CommandSpec,
    handler: Box<dyn CommandHandler>,
}

impl RegisteredCommand {
    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn handler(&self) -> &dyn CommandHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("spec", &self.spec)
            .finish()
    }
}

/// Ordered, bounded set of uniquely named commands
#[derive(Debug)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
    capacity: usize,
}

impl CommandRegistry {
    pub const DEFAULT_CAPACITY: usize = 100;

    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::new(),
            capacity,
        }
    }

    /// Add a command
    ///
    /// Rejected entries leave the registry unchanged.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), RegistryError> {
        let spec = CommandSpec::new(name, description)?;

        if self.get(&spec.name).is_some() {
            return Err(RegistryError::Duplicate(spec.name));
        }
        if self.commands.len() >= self.capacity {
            return Err(RegistryError::CapacityExceeded(self.capacity));
        }

        tracing::debug!(command = %spec.name, "Registered command");
        self.commands.push(RegisteredCommand {
            spec,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Look up a command by name
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.iter().find(|c| c.name() == name)
    }

    /// Commands in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }

    pub fn specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().map(RegisteredCommand::spec)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
