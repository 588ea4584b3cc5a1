//! Pre-submission checks on repayment instructions.

use super::instruction::RepaymentInstruction;
use crate::error::{RepaymentError, Result};

/// A check every instruction must pass before it reaches the ledger.
pub trait RemittanceRule: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the reason the instruction is refused, if any.
    fn violation(&self, instruction: &RepaymentInstruction) -> Option<String>;
}

/// Refuses instructions remitting more than `max_amount` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountLimitRule {
    max_amount: u64,
}

impl AmountLimitRule {
    pub fn new(max_amount: u64) -> Self {
        Self { max_amount }
    }
}

impl RemittanceRule for AmountLimitRule {
    fn name(&self) -> &str {
        "amount_limit"
    }

    fn violation(&self, instruction: &RepaymentInstruction) -> Option<String> {
        let amount = instruction.amount_to_remit();
        (amount > self.max_amount)
            .then(|| format!("amount {amount} exceeds limit {}", self.max_amount))
    }
}

/// Ordered set of [`RemittanceRule`]s; the first violation wins.
#[derive(Default)]
pub struct RemittanceValidator {
    rules: Vec<Box<dyn RemittanceRule>>,
}

impl RemittanceValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, rule: Box<dyn RemittanceRule>) {
        self.rules.push(rule);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// # Errors
    ///
    /// [`RepaymentError::ComplianceViolation`] naming the first failing rule.
    pub fn validate(&self, instruction: &RepaymentInstruction) -> Result<()> {
        for rule in &self.rules {
            if let Some(reason) = rule.violation(instruction) {
                return Err(RepaymentError::ComplianceViolation {
                    rule: rule.name().to_string(),
                    reason,
                });
            }
        }
        Ok(())
    }
}
