//! Cloneable façade for sending messages to the agent controller.
//!
//! [`AgentHandle`] hides channel plumbing and offers async helpers for
//! feeding world events in, querying state, or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use hunter_core::AgentMode;

use super::errors::{AgentError, Result};
use super::status::{AgentStatus, TickOutcome};
use crate::events::{AgentEvent, EventBus, Topic};
use crate::operations::{OperationKind, OperationReport};
use crate::workers::Command;

/// Client-facing handle to interact with the agent
#[derive(Clone)]
pub struct AgentHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl AgentHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| AgentError::CommandChannelClosed)
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(command(reply_tx)).await?;
        reply_rx.await.map_err(AgentError::ReplyChannelClosed)
    }

    /// Deliver a chat message seen in the world.
    pub async fn chat(&self, sender: impl Into<String>, message: impl Into<String>) -> Result<()> {
        self.send(Command::Chat {
            sender: sender.into(),
            message: message.into(),
        })
        .await
    }

    /// Tell the controller that the combat capability stopped attacking.
    pub async fn notify_stopped_attacking(&self) -> Result<()> {
        self.send(Command::StoppedAttacking).await
    }

    /// Run one decision tick now and report what it did.
    pub async fn tick(&self) -> Result<TickOutcome> {
        self.request(|reply| Command::Tick { reply }).await
    }

    /// Run an exclusive operation and wait for its result.
    ///
    /// Fails with [`OperationError::Busy`](crate::OperationError::Busy)
    /// without side effects while another operation or a fight is in progress.
    pub async fn run_operation(&self, kind: OperationKind) -> Result<OperationReport> {
        let result = self
            .request(|reply| Command::RunOperation { kind, reply })
            .await?;
        Ok(result?)
    }

    pub async fn status(&self) -> Result<AgentStatus> {
        self.request(|reply| Command::QueryStatus { reply }).await
    }

    pub async fn mode(&self) -> Result<AgentMode> {
        Ok(self.status().await?.mode)
    }

    /// End the session. Schedulers stop with the controller.
    pub async fn disconnect(&self, reason: impl Into<String>) -> Result<()> {
        self.send(Command::Disconnect {
            reason: reason.into(),
        })
        .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut modes = handle.subscribe(Topic::Mode);
    /// while let Ok(event) = modes.recv().await {
    ///     // Handle mode changes
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<AgentEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<AgentEvent>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
