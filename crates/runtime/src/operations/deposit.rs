use hunter_core::plan_deposit;
use tracing::{debug, info};

use super::{OperationContext, OperationError, OperationReport, record};
use crate::api::ContainerSession;

/// Deposits general-storage stacks into an open container.
///
/// Slots come from the container window's layout, so hotbar and worn armor
/// stay with the agent whatever window is open.
pub(super) async fn transfer(
    session: &mut dyn ContainerSession,
    ctx: &OperationContext,
) -> Result<OperationReport, OperationError> {
    let container = session.view().await?;
    let inventory = ctx.ports.inventory.snapshot().await?;

    let plan = plan_deposit(&inventory, &container.layout);
    debug!(requests = plan.len(), "Deposit planned");

    let mut report = OperationReport::new(plan.len());
    for request in &plan {
        let result = session.deposit(request).await;
        let succeeded = result.is_ok();
        if !record(&mut report, request.count, result)? {
            break;
        }
        if succeeded {
            info!("Deposited {} x {}", request.count, request.item);
        }
    }

    Ok(report)
}
