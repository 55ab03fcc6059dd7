//! High-level agent orchestrator.
//!
//! The agent owns the controller task, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hunter_content::ItemCatalog;
use hunter_core::AgentConfig;

use crate::api::{AgentError, AgentHandle, Capabilities, FeedSettings, Result};
use crate::events::EventBus;
use crate::repository::{AnchorRepository, InMemoryAnchorRepository};
use crate::workers::{Controller, Schedule};

/// Runtime configuration shared across the agent and its controller.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub agent: AgentConfig,
    /// Decision tick period. `None` leaves ticking to [`AgentHandle::tick`].
    pub tick_interval: Option<Duration>,
    pub deposit_interval: Option<Duration>,
    pub restock_interval: Option<Duration>,
    /// Delay before the one-off entity scan after spawning.
    pub startup_scan_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);
    pub const DEFAULT_DEPOSIT_INTERVAL: Duration = Duration::from_secs(500);
    pub const DEFAULT_RESTOCK_INTERVAL: Duration = Duration::from_secs(60);

    /// Manual mode: no tick and no schedulers, for stepping a session by hand.
    pub fn manual(agent: AgentConfig) -> Self {
        Self {
            agent,
            tick_interval: None,
            deposit_interval: None,
            restock_interval: None,
            ..Self::default()
        }
    }

    fn schedule(&self) -> Schedule {
        Schedule {
            tick: self.tick_interval,
            deposit: self.deposit_interval,
            restock: self.restock_interval,
            startup_scan: self.startup_scan_delay,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            tick_interval: Some(Self::DEFAULT_TICK_INTERVAL),
            deposit_interval: Some(Self::DEFAULT_DEPOSIT_INTERVAL),
            restock_interval: Some(Self::DEFAULT_RESTOCK_INTERVAL),
            startup_scan_delay: Duration::from_secs(2),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// A running agent session.
///
/// [`AgentHandle`] provides a cloneable façade for clients.
pub struct Agent {
    handle: AgentHandle,
    controller: JoinHandle<()>,
}

impl Agent {
    /// Create a new agent builder
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Get a cloneable handle to this agent
    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    /// Disconnect and wait for the controller to stop.
    pub async fn shutdown(self, reason: &str) -> Result<()> {
        // A closed channel means the controller is already gone.
        let _ = self.handle.disconnect(reason).await;
        self.join().await
    }

    /// Wait for the controller to stop on its own.
    pub async fn join(self) -> Result<()> {
        drop(self.handle);
        self.controller.await.map_err(AgentError::WorkerJoin)
    }
}

/// Builder for [`Agent`] with flexible configuration.
pub struct AgentBuilder {
    config: RuntimeConfig,
    capabilities: Option<Capabilities>,
    anchors: Option<Arc<dyn AnchorRepository>>,
    catalog: Option<ItemCatalog>,
}

impl AgentBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            capabilities: None,
            anchors: None,
            catalog: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required world capabilities
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Set the guard anchor store. Defaults to an in-memory store.
    pub fn anchors(mut self, anchors: impl AnchorRepository + 'static) -> Self {
        self.anchors = Some(Arc::new(anchors));
        self
    }

    /// Set the item catalog used for auto-feed. Defaults to the builtin one.
    pub fn catalog(mut self, catalog: ItemCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build the agent and start its controller
    pub async fn build(self) -> Result<Agent> {
        let capabilities = self.capabilities.ok_or(AgentError::MissingCapabilities)?;
        let anchors = self
            .anchors
            .unwrap_or_else(|| Arc::new(InMemoryAnchorRepository::new()));
        let catalog = match self.catalog {
            Some(catalog) => catalog,
            None => ItemCatalog::builtin().map_err(|e| AgentError::Catalog(e.to_string()))?,
        };

        let feed = FeedSettings {
            min_hunger: self.config.agent.min_hunger,
            banned_foods: self.config.agent.banned_foods.clone(),
            foods: catalog.food_kinds().cloned().collect(),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = AgentHandle::new(command_tx, event_bus.clone());

        let controller = Controller::new(
            Arc::new(self.config.agent.clone()),
            self.config.schedule(),
            capabilities,
            anchors,
            feed,
            command_rx,
            event_bus,
            self.config.command_buffer_size,
        );
        let controller = tokio::spawn(controller.run());

        Ok(Agent { handle, controller })
    }
}
