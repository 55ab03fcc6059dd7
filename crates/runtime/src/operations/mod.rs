//! Exclusive container operations: restock and deposit.
//!
//! An operation runs with a gate permit held by its caller and walks through
//! locate, approach, open, transfer and close. The container session is
//! closed on every path once it has been opened. Progress and results are
//! reported to chat.

mod deposit;
mod restock;

use std::num::NonZeroU32;
use std::sync::Arc;

use hunter_core::{AgentConfig, BatchReport, BlockPos, TransferError};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{Capabilities, MovementError, PortError};
use crate::notify::Notifier;

/// Operations that need the exclusion gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OperationKind {
    Restock,
    Deposit,
}

impl OperationKind {
    /// Reply to the chat command, before the gate is checked.
    pub fn acknowledgement(&self) -> &'static str {
        match self {
            Self::Restock => "Restocking supplies...",
            Self::Deposit => "Depositing loot...",
        }
    }

    fn approach_message(&self) -> &'static str {
        match self {
            Self::Restock => "Moving to chest to take supplies...",
            Self::Deposit => "Moving to chest to deposit loot...",
        }
    }

    fn opened_message(&self) -> &'static str {
        match self {
            Self::Restock => "Chest opened. Taking supplies...",
            Self::Deposit => "Chest opened. Depositing loot...",
        }
    }

    fn done_message(&self) -> &'static str {
        match self {
            Self::Restock => "Supplies taken.",
            Self::Deposit => "Loot deposited.",
        }
    }

    fn cancelled_message(&self) -> &'static str {
        match self {
            Self::Restock => "Restock cancelled.",
            Self::Deposit => "Deposit cancelled.",
        }
    }

    fn failed_message(&self) -> &'static str {
        match self {
            Self::Restock => "Failed to restock.",
            Self::Deposit => "Failed to deposit loot.",
        }
    }
}

pub const BUSY_MESSAGE: &str = "I am busy right now.";
pub const NO_CONTAINER_MESSAGE: &str = "No chest found nearby.";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Another operation holds the gate, or the agent is fighting.
    #[error("agent is busy")]
    Busy,

    #[error("no container within range")]
    NoContainer,

    /// The walk to the container was stopped or superseded.
    #[error("interrupted on the way to the container")]
    Interrupted,

    #[error("could not reach container: {0}")]
    Unreachable(#[source] MovementError),

    #[error("transfer failed: {0}")]
    Transfer(#[source] TransferError),

    #[error(transparent)]
    Port(#[from] PortError),
}

/// Result of a completed operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperationReport {
    pub batch: BatchReport,
    /// At least one armor piece was withdrawn (restock only).
    pub armor_withdrawn: bool,
}

impl OperationReport {
    fn new(planned: usize) -> Self {
        Self {
            batch: BatchReport::new(planned),
            armor_withdrawn: false,
        }
    }

    /// The destination filled up before the plan was done.
    pub fn is_partial(&self) -> bool {
        self.batch.stopped_full
    }
}

/// Everything an operation task needs, cloned out of the controller.
#[derive(Clone)]
pub(crate) struct OperationContext {
    pub ports: Capabilities,
    pub config: Arc<AgentConfig>,
    pub notifier: Notifier,
}

/// Runs one operation to completion and reports the result to chat.
///
/// The caller holds the gate permit for the whole call.
pub(crate) async fn run(
    kind: OperationKind,
    ctx: &OperationContext,
) -> Result<OperationReport, OperationError> {
    info!(%kind, "Operation started");
    let result = visit(kind, ctx).await;

    match &result {
        Ok(report) if report.is_partial() => {
            warn!(
                %kind,
                completed = report.batch.completed,
                planned = report.batch.planned,
                "Destination full, batch stopped early"
            );
            ctx.notifier
                .say(&format!(
                    "{} Ran out of space after {} of {} transfers.",
                    kind.done_message(),
                    report.batch.completed,
                    report.batch.planned
                ))
                .await;
        }
        Ok(report) => {
            info!(%kind, transfers = report.batch.completed, items = report.batch.items, "Operation finished");
            ctx.notifier.say(kind.done_message()).await;
        }
        Err(OperationError::NoContainer) => {
            info!(%kind, "No container in range");
            ctx.notifier.say(NO_CONTAINER_MESSAGE).await;
        }
        Err(OperationError::Interrupted) => {
            info!(%kind, "Operation interrupted before the container was opened");
            ctx.notifier.say(kind.cancelled_message()).await;
        }
        Err(error) => {
            error!(%kind, %error, "Operation failed");
            ctx.notifier.say(kind.failed_message()).await;
        }
    }

    result
}

async fn visit(
    kind: OperationKind,
    ctx: &OperationContext,
) -> Result<OperationReport, OperationError> {
    let at = locate(ctx).await?;

    ctx.notifier.say(kind.approach_message()).await;
    ctx.ports
        .movement
        .goto(at.center(), ctx.config.container_approach_tolerance)
        .await
        .map_err(|error| match error {
            MovementError::Interrupted => OperationError::Interrupted,
            failed => OperationError::Unreachable(failed),
        })?;

    let mut session = ctx.ports.containers.open(at).await?;
    ctx.notifier.say(kind.opened_message()).await;

    let outcome = match kind {
        OperationKind::Restock => restock::transfer(session.as_mut(), ctx).await,
        OperationKind::Deposit => deposit::transfer(session.as_mut(), ctx).await,
    };

    if let Err(error) = session.close().await {
        warn!(%kind, %error, "Failed to close container");
    }

    let report = outcome?;
    if report.armor_withdrawn
        && let Err(error) = ctx.ports.inventory.equip_best_armor().await
    {
        warn!(%error, "Failed to equip withdrawn armor");
    }

    Ok(report)
}

async fn locate(ctx: &OperationContext) -> Result<BlockPos, OperationError> {
    let origin = ctx.ports.world.self_position().await?;
    ctx.ports
        .world
        .find_container(
            &ctx.config.container_kinds,
            origin,
            ctx.config.container_search_radius,
        )
        .await?
        .ok_or(OperationError::NoContainer)
}

/// Folds one transfer result into the report.
///
/// Returns `Ok(false)` when the destination is full and the batch must stop
/// softly; any other transfer failure aborts the operation.
fn record(
    report: &mut OperationReport,
    count: NonZeroU32,
    result: Result<(), TransferError>,
) -> Result<bool, OperationError> {
    match result {
        Ok(()) => {
            report.batch.record(count);
            Ok(true)
        }
        Err(TransferError::DestinationFull) => {
            report.batch.stopped_full = true;
            Ok(false)
        }
        Err(error) => Err(OperationError::Transfer(error)),
    }
}
