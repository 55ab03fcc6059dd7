use hunter_core::{WithdrawPolicy, plan_withdraw};
use tracing::{debug, info};

use super::{OperationContext, OperationError, OperationReport, record};
use crate::api::ContainerSession;

/// Withdraws the restock plan from an open container, in plan order.
pub(super) async fn transfer(
    session: &mut dyn ContainerSession,
    ctx: &OperationContext,
) -> Result<OperationReport, OperationError> {
    let container = session.view().await?;
    let inventory = ctx.ports.inventory.snapshot().await?;
    let policy = WithdrawPolicy::from(ctx.config.as_ref());

    let plan = plan_withdraw(&container, &inventory, &policy);
    debug!(requests = plan.len(), "Restock planned");

    let mut report = OperationReport::new(plan.len());
    for request in &plan {
        let result = session.withdraw(request).await;
        let succeeded = result.is_ok();
        if !record(&mut report, request.count, result)? {
            break;
        }
        if succeeded {
            info!("Took {} {}", request.count, request.item);
            report.armor_withdrawn |= request.item.category.is_armor();
        }
    }

    Ok(report)
}
