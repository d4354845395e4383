use std::sync::Arc;

use crate::domain::cart::checkout::{CheckoutReport, LineOutcome};
use crate::domain::cart::gateway::OrderGateway;
use crate::domain::logger::Logger;

/// Turns cart lines into orders, one remote call per line, in cart order.
pub struct CheckoutSaga {
    pub orders: Arc<dyn OrderGateway>,
    pub logger: Arc<dyn Logger>,
}

impl CheckoutSaga {
    /// Orders every step that has no order yet and stops at the first failure;
    /// the steps after it stay pending. Running it again on the returned report
    /// resumes where it stopped.
    pub async fn execute(&self, mut report: CheckoutReport) -> CheckoutReport {
        let account_id = report.account_id.clone();

        for (index, step) in report.steps.iter_mut().enumerate() {
            if matches!(step.outcome, LineOutcome::Ordered { .. }) {
                continue;
            }

            match self.orders.create_order(&account_id, &step.line).await {
                Ok(order) => {
                    self.logger.info(&format!(
                        "Checkout line {} ({}) ordered as {}",
                        index, step.line.house_name, order.id
                    ));
                    step.outcome = LineOutcome::Ordered { order_id: order.id };
                }
                Err(e) => {
                    self.logger.error(&format!(
                        "Checkout line {} ({}) failed: {}",
                        index, step.line.house_name, e
                    ));
                    step.outcome = LineOutcome::Failed {
                        reason: e.to_string(),
                    };
                    break;
                }
            }
        }

        report
    }
}
