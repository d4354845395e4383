use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::CartLine;
use crate::domain::shared::value_objects::AccountId;

/// Where a single line stands in a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LineOutcome {
    Pending,
    Ordered { order_id: Uuid },
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStep {
    pub line: CartLine,
    pub outcome: LineOutcome,
}

/// Per-line record of a checkout, kept so that a partial failure can be
/// inspected and resumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReport {
    pub account_id: AccountId,
    pub steps: Vec<CheckoutStep>,
    pub cart_cleared: bool,
}

impl CheckoutReport {
    /// All lines start pending, in cart order.
    pub fn new(account_id: AccountId, lines: &[CartLine]) -> Self {
        Self {
            account_id,
            steps: lines
                .iter()
                .map(|line| CheckoutStep {
                    line: line.clone(),
                    outcome: LineOutcome::Pending,
                })
                .collect(),
            cart_cleared: false,
        }
    }

    /// Lines the report up with the cart as it is now, keeping earlier orders.
    ///
    /// A line keeps its order only while it sits in the cart unchanged. New
    /// lines and lines whose quantity or price moved are pending again. Orders
    /// whose line left or changed stay in the report without a cart line
    /// backing them, so they are never placed twice.
    pub fn rebase(self, lines: &[CartLine]) -> Self {
        let mut earlier: Vec<CheckoutStep> = self
            .steps
            .into_iter()
            .filter(|step| matches!(step.outcome, LineOutcome::Ordered { .. }))
            .collect();

        let mut steps: Vec<CheckoutStep> = lines
            .iter()
            .map(|line| match earlier.iter().position(|step| &step.line == line) {
                Some(index) => earlier.remove(index),
                None => CheckoutStep {
                    line: line.clone(),
                    outcome: LineOutcome::Pending,
                },
            })
            .collect();
        steps.extend(earlier);

        Self {
            account_id: self.account_id,
            steps,
            cart_cleared: false,
        }
    }

    /// Every line has an order.
    pub fn is_complete(&self) -> bool {
        self.steps
            .iter()
            .all(|step| matches!(step.outcome, LineOutcome::Ordered { .. }))
    }

    pub fn ordered(&self) -> Vec<Uuid> {
        self.steps
            .iter()
            .filter_map(|step| match step.outcome {
                LineOutcome::Ordered { order_id } => Some(order_id),
                _ => None,
            })
            .collect()
    }

    pub fn failed(&self) -> Vec<&CheckoutStep> {
        self.steps
            .iter()
            .filter(|step| matches!(step.outcome, LineOutcome::Failed { .. }))
            .collect()
    }

    pub fn pending(&self) -> Vec<&CheckoutStep> {
        self.steps
            .iter()
            .filter(|step| step.outcome == LineOutcome::Pending)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::CartLineProps;

    fn line(name: &str) -> CartLine {
        CartLine::new(CartLineProps {
            house_id: Uuid::new_v4(),
            house_name: name.to_string(),
            color_id: None,
            color_name: "Default".to_string(),
            size_id: None,
            size_name: "20ft".to_string(),
            quantity: 1,
            unit_price: 30000,
            image_url: None,
        })
        .unwrap()
    }

    #[test]
    fn should_start_with_every_line_pending_in_cart_order() {
        let lines = vec![line("A"), line("B")];

        let report = CheckoutReport::new(AccountId::new("acc"), &lines);

        assert_eq!(report.pending().len(), 2);
        assert_eq!(report.steps[0].line.house_name, "A");
        assert_eq!(report.steps[1].line.house_name, "B");
        assert!(!report.is_complete());
        assert!(!report.cart_cleared);
    }

    #[test]
    fn should_be_complete_only_when_every_line_ordered() {
        let mut report = CheckoutReport::new(AccountId::new("acc"), &[line("A"), line("B")]);
        let first_order = Uuid::new_v4();
        report.steps[0].outcome = LineOutcome::Ordered {
            order_id: first_order,
        };
        report.steps[1].outcome = LineOutcome::Failed {
            reason: "gateway.unavailable".to_string(),
        };

        assert!(!report.is_complete());
        assert_eq!(report.ordered(), vec![first_order]);
        assert_eq!(report.failed().len(), 1);

        report.steps[1].outcome = LineOutcome::Ordered {
            order_id: Uuid::new_v4(),
        };
        assert!(report.is_complete());
    }

    fn ordered(mut report: CheckoutReport, index: usize) -> CheckoutReport {
        report.steps[index].outcome = LineOutcome::Ordered {
            order_id: Uuid::new_v4(),
        };
        report
    }

    #[test]
    fn should_keep_orders_of_unchanged_lines_when_rebased() {
        let a = line("A");
        let b = line("B");
        let lines = [a.clone(), b.clone()];
        let mut report = ordered(CheckoutReport::new(AccountId::new("acc"), &lines), 0);
        report.steps[1].outcome = LineOutcome::Failed {
            reason: "gateway.unavailable".to_string(),
        };
        let c = line("C");

        let rebased = report.clone().rebase(&[a, b, c]);

        assert_eq!(rebased.steps.len(), 3);
        assert_eq!(rebased.steps[0], report.steps[0]);
        assert_eq!(rebased.steps[1].outcome, LineOutcome::Pending);
        assert_eq!(rebased.steps[2].line.house_name, "C");
        assert_eq!(rebased.steps[2].outcome, LineOutcome::Pending);
    }

    #[test]
    fn should_order_changed_line_again_and_keep_its_first_order() {
        let a = line("A");
        let report = ordered(CheckoutReport::new(AccountId::new("acc"), &[a.clone()]), 0);
        let first_order = report.ordered()[0];
        let bigger = a.with_quantity(3);

        let rebased = report.rebase(&[bigger.clone()]);

        assert_eq!(rebased.pending().len(), 1);
        assert_eq!(rebased.pending()[0].line, bigger);
        assert_eq!(rebased.ordered(), vec![first_order]);
        assert!(!rebased.is_complete());
    }

    #[test]
    fn should_drop_unordered_lines_that_left_the_cart() {
        let a = line("A");
        let b = line("B");
        let lines = [a.clone(), b];
        let report = ordered(CheckoutReport::new(AccountId::new("acc"), &lines), 0);

        let rebased = report.rebase(&[a]);

        assert_eq!(rebased.steps.len(), 1);
        assert!(rebased.is_complete());
    }

    #[test]
    fn should_read_back_stored_report() {
        let lines = [line("A"), line("B")];
        let report = ordered(CheckoutReport::new(AccountId::new("acc"), &lines), 0);

        let raw = serde_json::to_string(&report).unwrap();

        assert!(raw.contains("\"state\":\"ordered\""));
        assert_eq!(serde_json::from_str::<CheckoutReport>(&raw).unwrap(), report);
    }
}
